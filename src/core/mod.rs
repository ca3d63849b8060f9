pub mod debug_logger;
pub mod probe;

pub use debug_logger::{get_debug_logger, EnhancedDebugLogger};
pub use probe::{evaluate, evaluate_named, ProbeError, ProbeHttpClient, ProbeOutcome};
