//! Probe errors and outcomes

use std::time::Duration;

/// Every way a probe can fail. The Display text is the diagnostic returned
/// to callers of the health endpoints.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("unsupported probe type: {0}")]
    UnsupportedProbeType(String),
    #[error("HTTP request failed: {0}")]
    Transport(String),
    #[error("failed to read response body: {0}")]
    BodyRead(#[source] std::io::Error),
    #[error("invalid regex: {0}")]
    InvalidRegex(#[from] regex::Error),
    #[error("regex did not match")]
    RegexMismatch,
    #[error("regex matched, but negation was expected")]
    RegexNegationViolated,
    #[error("unexpected status code: got {got}, expected {expected}")]
    StatusMismatch { got: u16, expected: i64 },
}

/// Result of one probe evaluation. Success is the absence of an error.
#[derive(Debug)]
pub struct ProbeOutcome {
    pub error: Option<ProbeError>,
    /// URL the request was sent to (None when no request was attempted)
    pub target_url: Option<String>,
    /// Status of the completed response, if there was one
    pub status_code: Option<u16>,
    pub duration_ms: u64,
}

impl ProbeOutcome {
    pub(crate) fn from_result(
        result: Result<(), ProbeError>,
        target_url: Option<String>,
        status_code: Option<u16>,
        elapsed: Duration,
    ) -> Self {
        Self {
            error: result.err(),
            target_url,
            status_code,
            duration_ms: elapsed.as_millis() as u64,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn diagnostic(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }
}
