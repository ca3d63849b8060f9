/*!
End-to-end probe tests against real loopback upstreams using the isahc client.
*/

use crate::common::{closed_port, http_spec, regex_spec, spawn_upstream};
use healthsidecar::config::{ProbeKind, ProbeSpec};
use healthsidecar::core::probe::{evaluate, IsahcProbeClient, ProbeError};

fn client() -> IsahcProbeClient {
    IsahcProbeClient::new().expect("Failed to create probe client")
}

#[tokio::test]
async fn test_expected_status_succeeds() {
    let port = spawn_upstream(200, "OK\n").await;
    let outcome = evaluate(&http_spec(port), &client()).await;

    assert!(outcome.is_success(), "unexpected failure: {:?}", outcome.error);
    assert_eq!(outcome.status_code, Some(200));
}

#[tokio::test]
async fn test_unexpected_status_fails() {
    let port = spawn_upstream(503, "NOT OK\n").await;
    let outcome = evaluate(&http_spec(port), &client()).await;

    assert!(!outcome.is_success());
    assert!(outcome
        .diagnostic()
        .unwrap()
        .contains("unexpected status code: got 503, expected 200"));
}

#[tokio::test]
async fn test_regex_match() {
    let port = spawn_upstream(200, "OK\n").await;
    let outcome = evaluate(&regex_spec(port, "OK", false), &client()).await;

    assert!(outcome.is_success(), "unexpected failure: {:?}", outcome.error);
}

#[tokio::test]
async fn test_regex_mismatch() {
    let port = spawn_upstream(200, "FAILED\n").await;
    let outcome = evaluate(&regex_spec(port, "OK", false), &client()).await;

    assert!(!outcome.is_success());
    assert!(outcome.diagnostic().unwrap().contains("regex did not match"));
}

#[tokio::test]
async fn test_negated_regex_mismatch_succeeds() {
    let port = spawn_upstream(200, "FAILED\n").await;
    let outcome = evaluate(&regex_spec(port, "OK", true), &client()).await;

    assert!(outcome.is_success(), "unexpected failure: {:?}", outcome.error);
}

#[tokio::test]
async fn test_negated_regex_match_fails() {
    let port = spawn_upstream(200, "OK\n").await;
    let outcome = evaluate(&regex_spec(port, "OK", true), &client()).await;

    assert!(!outcome.is_success());
    assert!(outcome
        .diagnostic()
        .unwrap()
        .contains("regex matched, but negation was expected"));
}

#[tokio::test]
async fn test_invalid_regex() {
    let port = spawn_upstream(200, "OK\n").await;
    let outcome = evaluate(&regex_spec(port, "?!", false), &client()).await;

    assert!(!outcome.is_success());
    assert!(outcome.diagnostic().unwrap().contains("invalid regex"));
}

#[tokio::test]
async fn test_unknown_path_is_a_status_failure() {
    let port = spawn_upstream(200, "OK\n").await;
    let spec = ProbeSpec {
        path: "/missing".to_string(),
        ..http_spec(port)
    };
    let outcome = evaluate(&spec, &client()).await;

    assert!(!outcome.is_success());
    assert!(matches!(
        outcome.error,
        Some(ProbeError::StatusMismatch { got: 404, expected: 200 })
    ));
}

#[tokio::test]
async fn test_connection_refused() {
    let port = closed_port().await;
    let outcome = evaluate(&regex_spec(port, "OK", true), &client()).await;

    assert!(!outcome.is_success());
    assert!(matches!(outcome.error, Some(ProbeError::Transport(_))));
    assert!(outcome
        .diagnostic()
        .unwrap()
        .starts_with("HTTP request failed: "));
}

#[tokio::test]
async fn test_out_of_range_port_is_a_transport_failure() {
    for port in [0, -1, 70000] {
        let spec = ProbeSpec {
            port,
            ..http_spec(1)
        };
        let outcome = evaluate(&spec, &client()).await;

        assert!(!outcome.is_success(), "port {} should fail", port);
        assert!(matches!(outcome.error, Some(ProbeError::Transport(_))));
    }
}

#[tokio::test]
async fn test_unsupported_type() {
    let spec = ProbeSpec {
        kind: ProbeKind::from("invalid"),
        ..Default::default()
    };
    let outcome = evaluate(&spec, &client()).await;

    assert!(!outcome.is_success());
    assert_eq!(outcome.diagnostic().unwrap(), "unsupported probe type: invalid");
}
