//! HTTP API for finding the peaks nearest to a coordinate.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /health` | liveness with a timestamp |
//! | `GET /metrics` | request counters and lookup latencies |
//! | `GET /api/peaks` | every catalog peak |
//! | `GET /api/peaks/find?latitude&longitude[&max_distance][&limit]` | ranked matches, unbounded without `max_distance` |
//! | `GET /api/peaks/nearest?latitude&longitude[&max_distance]` | `{"match": ...}` or `{"match": null}` |
//! | `GET /api/peaks/:id` | one peak, 404 when unknown |
//!
//! Out-of-range coordinates and malformed query strings are a 400; an
//! unreadable catalog is a 500. Every error has the same JSON body.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub mod error;
pub mod routes;
pub mod state;

use routes::{
    find_peaks_handler, get_peak_handler, health_handler, list_peaks_handler, metrics_handler,
    nearest_peak_handler,
};
use state::State;

/// The full router over shared state.
pub fn app(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/peaks", get(list_peaks_handler))
        .route("/api/peaks/find", get(find_peaks_handler))
        .route("/api/peaks/nearest", get(nearest_peak_handler))
        .route("/api/peaks/:id", get(get_peak_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl+C or SIGTERM.
pub async fn start_server(state: Arc<State>) -> anyhow::Result<()> {
    let address = state.server.address();
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
