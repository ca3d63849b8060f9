use healthsidecar::cli::Cli;
use healthsidecar::config::ProbeSet;
use healthsidecar::core::get_debug_logger;
use healthsidecar::core::probe::IsahcProbeClient;
use healthsidecar::server::{self, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();
    let logger = get_debug_logger();

    // The server never starts without a fully loaded configuration
    let probes = match ProbeSet::load(&cli.config) {
        Ok(probes) => probes,
        Err(e) => {
            logger.error_sync("Config", "load_failed", &e.to_string());
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    if cli.check {
        for warning in probes.check() {
            eprintln!("Warning: {}", warning);
        }
        println!("✓ Configuration valid");
        return Ok(());
    }

    if cli.print {
        print!("{}", probes.to_yaml()?);
        return Ok(());
    }

    let client = Arc::new(IsahcProbeClient::new()?);
    let state = AppState::new(probes, client);

    if let Some(name) = cli.probe {
        let outcome = state.run_probe(name).await;
        print!("{}", server::response_text(&outcome));
        std::process::exit(if outcome.is_success() { 0 } else { 1 });
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    let listener = TcpListener::bind(addr).await?;

    logger.server_start(&addr.to_string(), &cli.config.display().to_string());
    println!("Starting server on port {}", cli.port);

    server::serve(listener, state).await?;

    Ok(())
}
