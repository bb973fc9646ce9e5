//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the server from validated configuration
//! - Bind the local listener
//! - Install signal handling and run until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::DashboardConfig;
use crate::http::{HttpServer, ServerError};
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::spawn_signal_listener;

/// Fatal startup or runtime failure.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Server(#[from] ServerError),
}

/// Run the dashboard until a termination signal arrives.
pub async fn run(config: DashboardConfig) -> Result<(), StartupError> {
    let store = config.upstream.store.clone();
    let bind_address = config.listener.bind_address.clone();

    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(&bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: bind_address.clone(),
            source,
        })?;
    let local_addr = listener.local_addr().map_err(ServerError::from)?;
    warn_if_exposed(local_addr);

    tracing::info!(
        store = %store,
        url = %format!("http://{}", local_addr),
        "Dashboard ready"
    );

    let shutdown = Arc::new(Shutdown::new());
    let receiver = shutdown.subscribe();
    spawn_signal_listener(shutdown);

    server.run(listener, receiver).await?;
    Ok(())
}

/// The local endpoint is unauthenticated, so anything but loopback deserves a warning.
fn warn_if_exposed(addr: SocketAddr) {
    if !addr.ip().is_loopback() {
        tracing::warn!(
            address = %addr,
            "Listening on a non-loopback address; the dashboard API has no authentication"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccessToken;

    #[tokio::test]
    async fn test_bind_failure_is_fatal() {
        let occupied = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mut config = DashboardConfig::default();
        config.upstream.store = "demo.myshopify.com".into();
        config.upstream.access_token = AccessToken::new("shpat_secret");
        config.listener.bind_address = occupied.local_addr().unwrap().to_string();

        let err = run(config).await.unwrap_err();
        assert!(matches!(err, StartupError::Bind { .. }));
    }
}
