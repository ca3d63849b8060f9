//! Probe evaluation
//!
//! The HTTP check is an ordered list of early-return steps:
//! 1. Request (transport failure ends the check, body untouched)
//! 2. Body regex, only when configured: read, compile, match anywhere
//!    - negated: match fails, non-match succeeds without a status check
//!    - plain: non-match fails without a status check
//! 3. Status code comparison
//!
//! Reordering these steps changes observable results.

use std::borrow::Cow;
use std::time::Instant;

use futures::io::AsyncReadExt;
use regex::Regex;

use crate::config::{ProbeKind, ProbeSpec};
use crate::core::debug_logger::get_debug_logger;
use crate::core::probe::client::{ProbeHttpClient, ProbeResponse};
use crate::core::probe::types::{ProbeError, ProbeOutcome};
use crate::core::probe::url::build_target_url;

/// Evaluate `spec` once
pub async fn evaluate(spec: &ProbeSpec, client: &dyn ProbeHttpClient) -> ProbeOutcome {
    evaluate_named("probe", spec, client).await
}

/// Evaluate `spec` once, labelling debug log events with `name`
pub async fn evaluate_named(
    name: &str,
    spec: &ProbeSpec,
    client: &dyn ProbeHttpClient,
) -> ProbeOutcome {
    let start = Instant::now();

    match &spec.kind {
        ProbeKind::Http => evaluate_http(name, spec, client, start).await,
        ProbeKind::Unsupported(kind) => {
            get_debug_logger().error_sync(
                "Evaluator",
                "unsupported_probe_type",
                &format!("{} probe has unsupported type '{}'", name, kind),
            );
            ProbeOutcome::from_result(
                Err(ProbeError::UnsupportedProbeType(kind.clone())),
                None,
                None,
                start.elapsed(),
            )
        }
    }
}

async fn evaluate_http(
    name: &str,
    spec: &ProbeSpec,
    client: &dyn ProbeHttpClient,
    start: Instant,
) -> ProbeOutcome {
    let logger = get_debug_logger();
    let url = build_target_url(&spec.target_address, spec.port, &spec.path);

    let probe_id = format!("probe_{}", uuid::Uuid::new_v4());
    logger.probe_start(name, "http", &url, probe_id.clone());

    let (status_code, result) = match client.get(url.clone()).await {
        Ok(response) => {
            let status_code = response.status_code;
            (Some(status_code), verify_response(spec, response).await)
        }
        Err(e) => (None, Err(ProbeError::Transport(e))),
    };

    let outcome = ProbeOutcome::from_result(result, Some(url), status_code, start.elapsed());

    logger.probe_end(
        name,
        outcome.is_success(),
        outcome.status_code,
        outcome.duration_ms,
        outcome.diagnostic().as_deref(),
        probe_id,
    );

    outcome
}

/// Steps 2 and 3 on a completed response
async fn verify_response(spec: &ProbeSpec, response: ProbeResponse) -> Result<(), ProbeError> {
    let ProbeResponse {
        status_code,
        mut body,
    } = response;

    if spec.has_body_regex() {
        let mut bytes = Vec::new();
        body.read_to_end(&mut bytes)
            .await
            .map_err(ProbeError::BodyRead)?;

        // Compiled per evaluation: a bad pattern is a probe failure, not a
        // startup error, and it wins over the status comparison.
        let pattern = Regex::new(&spec.expected_body_regex)?;
        let matched = pattern.is_match(&decode_body(&bytes));

        if spec.negate_body_regex {
            return if matched {
                Err(ProbeError::RegexNegationViolated)
            } else {
                Ok(())
            };
        }
        if !matched {
            return Err(ProbeError::RegexMismatch);
        }
    }

    check_status(status_code, spec.expected_status)
}

/// Body as text for matching. Each invalid UTF-8 sequence becomes U+FFFD, so
/// `.` and negated classes still match across binary garbage.
fn decode_body(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Compare the observed status with the configured one
pub fn check_status(got: u16, expected: i64) -> Result<(), ProbeError> {
    if i64::from(got) == expected {
        Ok(())
    } else {
        Err(ProbeError::StatusMismatch { got, expected })
    }
}
