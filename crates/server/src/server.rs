//! Feed server: binds the listener and serves until a shutdown signal arrives.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::{ConfigError, ServerConfig};
use crate::handlers::AppState;
use crate::router::create_router;

/// Web server for the feed API.
pub struct FeedServer {
    addr: SocketAddr,
    app_state: Arc<AppState>,
    cors_origins: Vec<String>,
}

impl FeedServer {
    /// Create a new server from configuration.
    pub fn new(config: &ServerConfig) -> Result<Self, ConfigError> {
        let addr = config.addr()?;
        let client = config.client()?;

        Ok(Self {
            addr,
            app_state: Arc::new(AppState::new(client)),
            cors_origins: config.cors_origins.clone(),
        })
    }

    /// Get the configured address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Run the server until Ctrl-C or SIGTERM.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let router = create_router(self.app_state, &self.cors_origins);

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Feed server listening on http://{}", local_addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Feed server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl-C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
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
    tracing::info!("shutdown signal received");
}
