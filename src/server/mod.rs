//! Liveness/readiness HTTP surface
//!
//! `GET /healthz` evaluates the liveness probe and `GET /readyz` the
//! readiness probe. Every hit runs a fresh evaluation; outcomes are never
//! cached. Handlers only read the shared [`ProbeSet`], so no locking is
//! involved.

use std::future::{Future, IntoFuture};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::config::{ProbeName, ProbeSet};
use crate::core::debug_logger::get_debug_logger;
use crate::core::probe::{evaluate_named, ProbeHttpClient, ProbeOutcome};

pub const LIVENESS_ROUTE: &str = "/healthz";
pub const READINESS_ROUTE: &str = "/readyz";

/// Shared, read-only handler state
#[derive(Clone)]
pub struct AppState {
    probes: Arc<ProbeSet>,
    client: Arc<dyn ProbeHttpClient>,
}

impl AppState {
    pub fn new(probes: ProbeSet, client: Arc<dyn ProbeHttpClient>) -> Self {
        Self {
            probes: Arc::new(probes),
            client,
        }
    }

    pub fn probes(&self) -> &ProbeSet {
        &self.probes
    }

    /// Evaluate the named probe once
    pub async fn run_probe(&self, name: ProbeName) -> ProbeOutcome {
        evaluate_named(name.as_str(), self.probes.get(name), self.client.as_ref()).await
    }
}

/// Plain-text body for an outcome: `OK\n` or `NOT OK: <diagnostic>\n`
pub fn response_text(outcome: &ProbeOutcome) -> String {
    match &outcome.error {
        None => "OK\n".to_string(),
        Some(e) => format!("NOT OK: {}\n", e),
    }
}

/// 200 on success, 503 on any failure
pub fn response_status(outcome: &ProbeOutcome) -> StatusCode {
    if outcome.is_success() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(LIVENESS_ROUTE, get(healthz))
        .route(READINESS_ROUTE, get(readyz))
        .with_state(state)
}

async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    handle_probe(&state, ProbeName::Liveness, LIVENESS_ROUTE).await
}

async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    handle_probe(&state, ProbeName::Readiness, READINESS_ROUTE).await
}

async fn handle_probe(
    state: &AppState,
    name: ProbeName,
    route: &str,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let start = Instant::now();
    let outcome = state.run_probe(name).await;
    let status = response_status(&outcome);

    get_debug_logger().request_served(route, status.as_u16(), start.elapsed().as_millis() as u64);

    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        response_text(&outcome),
    )
}

/// Longest wait for in-flight probes after a shutdown signal. Probes have
/// no timeout, so a hung upstream would otherwise hold the process forever.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Serve on an already bound listener until Ctrl-C
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    serve_with_shutdown(listener, state, shutdown_signal(), SHUTDOWN_GRACE).await
}

/// Serve until `signal` resolves, then give in-flight probes at most `grace`
/// to finish before returning
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    state: AppState,
    signal: F,
    grace: Duration,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (fired_tx, fired_rx) = oneshot::channel::<()>();
    let signal = async move {
        signal.await;
        let _ = fired_tx.send(());
    };

    let server = axum::serve(listener, router(state))
        .with_graceful_shutdown(signal)
        .into_future();

    let deadline = async move {
        match fired_rx.await {
            Ok(()) => tokio::time::sleep(grace).await,
            // Server finished without a signal; the other branch wins
            Err(_) => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        result = server => result,
        _ = deadline => {
            get_debug_logger().error_sync(
                "ProbeServer",
                "shutdown_forced",
                &format!("in-flight probes still running after {:?}", grace),
            );
            Ok(())
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        get_debug_logger().error_sync("ProbeServer", "signal_error", &e.to_string());
        // Without a signal handler, run until the process is killed
        std::future::pending::<()>().await;
    }
}
