//! HTTP probe evaluation
//!
//! A probe is one declarative check against the target service:
//! - Single GET to `http://{target}:{port}{path}`, no timeout or retry
//! - Optional body regex, matched anywhere in the raw bytes, optionally negated
//! - Status code comparison when the body check does not already decide
//!
//! Every failure is folded into a [`ProbeOutcome`]; nothing here panics or
//! exits the process.

pub mod client;
pub mod evaluator;
pub mod types;
pub mod url;

pub use client::{IsahcProbeClient, ProbeHttpClient, ProbeResponse};
pub use evaluator::{check_status, evaluate, evaluate_named};
pub use types::{ProbeError, ProbeOutcome};
pub use url::build_target_url;
