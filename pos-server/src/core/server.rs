//! HTTP server lifecycle
//!
//! Binds the listener, serves the router until Ctrl+C / SIGTERM, gives
//! in-flight requests a grace period and closes the pool.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;

use super::{Config, ServerState};
use crate::api;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub struct Server {
    state: ServerState,
}

impl Server {
    pub fn new(state: ServerState) -> Self {
        Self { state }
    }

    pub async fn from_config(config: Config) -> Result<Self, BoxError> {
        let state = ServerState::initialize(config).await?;
        Ok(Self::new(state))
    }

    pub async fn run(self) -> Result<(), BoxError> {
        let config = self.state.config.clone();
        let app = api::build_app(self.state.clone());

        let addr = config.http_addr();
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!("POS server listening on {addr} (env: {})", config.environment);

        let draining = Arc::new(Notify::new());
        let signal = draining.clone();
        let serve = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                signal.notify_one();
            })
            .into_future();
        tokio::pin!(serve);

        let grace = Duration::from_millis(config.shutdown_timeout_ms);
        tokio::select! {
            result = &mut serve => result?,
            _ = draining.notified() => {
                match tokio::time::timeout(grace, &mut serve).await {
                    Ok(result) => result?,
                    Err(_) => tracing::warn!(
                        timeout_ms = config.shutdown_timeout_ms,
                        "Shutdown grace period elapsed, dropping open connections"
                    ),
                }
            }
        }

        self.state.db.close().await;
        tracing::info!("POS server stopped");
        Ok(())
    }
}

/// Resolve on Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
