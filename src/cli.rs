use clap::Parser;
use std::path::PathBuf;

use crate::config::{ProbeName, DEFAULT_CONFIG_PATH, DEFAULT_PORT};

#[derive(Parser, Debug)]
#[command(name = "healthsidecar")]
#[command(version = concat!("Ver:", env!("CARGO_PKG_VERSION")))]
#[command(about = "Sidecar liveness/readiness server backed by declarative HTTP probes")]
pub struct Cli {
    /// Probe configuration file (YAML)
    #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Port to serve /healthz and /readyz on
    #[arg(short = 'p', long = "port", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Validate the configuration and exit
    #[arg(long = "check")]
    pub check: bool,

    /// Print the loaded configuration as YAML and exit
    #[arg(long = "print")]
    pub print: bool,

    /// Evaluate a single probe once and exit (0 = OK, 1 = NOT OK)
    #[arg(long = "probe", value_enum, conflicts_with_all = ["check", "print"])]
    pub probe: Option<ProbeName>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
