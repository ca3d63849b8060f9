/// Configuration file read when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";

/// Port the probe server listens on when `--port` is not given
pub const DEFAULT_PORT: u16 = 8080;
