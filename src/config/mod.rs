pub mod defaults;
pub mod loader;
pub mod types;

pub use defaults::{DEFAULT_CONFIG_PATH, DEFAULT_PORT};
pub use loader::ConfigError;
pub use types::*;
