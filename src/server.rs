//! Server initialization and routing
//!
//! This module handles the Axum server setup including:
//! - Router configuration with all API endpoints
//! - Middleware stack (metrics, tracing, logging, timeout)
//! - Graceful shutdown with a bounded drain window

use crate::config::ServerConfig;
use crate::middleware::{log_requests, propagate_request_id, record_metrics};
use crate::routes::{health, messages, not_found};
use crate::state::ServerState;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::timeout::TimeoutLayer;

/// Build the Axum router with all routes and middleware
///
/// The middleware pipeline wraps the router outer-to-inner as
/// Metrics → Tracing → Logging, so every layer observes the request on the
/// way in and the latency on the way out, with the transport deadline
/// outermost. Layers added later sit further out, hence the reverse order
/// below.
pub fn build_router(state: Arc<ServerState>) -> Router {
    let api_routes = Router::new()
        .route(
            "/messages",
            get(messages::list_messages).post(messages::create_message),
        )
        .route(
            "/messages/{id}",
            get(messages::get_message).delete(messages::delete_message),
        );

    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics))
        .nest("/api/v1", api_routes)
        .fallback(not_found)
        .layer(from_fn(log_requests))
        .layer(from_fn(propagate_request_id))
        .layer(from_fn(record_metrics))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.timeout(),
        ))
        .with_state(state)
}

/// Start the palindrome message server
///
/// Initializes logging and metrics, binds the configured TCP address and
/// serves until a termination signal arrives. A failure to bind the
/// listener is returned as an error, so the process exits non-zero.
///
/// # Shutdown
///
/// On Ctrl+C or SIGTERM the listener stops accepting new connections and
/// in-flight requests get `shutdown_grace_secs` (default 30s) to finish;
/// whatever remains after that is aborted rather than awaited.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .with_target(false)
        .json()
        .init();

    let state = Arc::new(ServerState::new(config.clone())?);
    let app = build_router(state);

    let addr: SocketAddr = config.socket_addr()?;

    tracing::info!(
        "Starting palindrome server on {} (timeout {}s, shutdown grace {}s)",
        addr,
        config.timeout_secs,
        config.shutdown_grace_secs
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // The watch channel flips once the termination signal is observed, which
    // both starts axum's graceful drain and arms the grace-period timer here.
    let (drain_tx, mut drain_rx) = tokio::sync::watch::channel(false);
    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = drain_tx.send(true);
    });

    let mut server_task = tokio::spawn(async move { server.await });

    tokio::select! {
        res = &mut server_task => {
            res??;
        }
        _ = drain_rx.changed() => {
            tracing::info!(
                "Draining in-flight requests, up to {}s",
                config.shutdown_grace_secs
            );
            match tokio::time::timeout(config.shutdown_grace(), &mut server_task).await {
                Ok(res) => {
                    res??;
                    tracing::info!("Server shutdown complete");
                }
                Err(_) => {
                    server_task.abort();
                    tracing::warn!(
                        "Grace period of {}s elapsed, closing remaining connections",
                        config.shutdown_grace_secs
                    );
                }
            }
        }
    }

    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
