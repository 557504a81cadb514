// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP listener built on axum.

use axum::Router;
use relay_core::RelayError;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

/// Listener address for one facade.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Serve `router` until `cancel` fires, then drain in-flight requests.
pub async fn serve(
    config: &ServerConfig,
    router: Router,
    cancel: CancellationToken,
) -> Result<(), RelayError> {
    let app = router.layer(TraceLayer::new_for_http());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| RelayError::Internal(format!("failed to bind {addr}: {e}")))?;

    tracing::info!("listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(|e| RelayError::Internal(format!("server error: {e}")))?;

    tracing::info!("server on {addr} stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addr_joins_host_and_port() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8081,
        };
        assert_eq!(config.addr(), "127.0.0.1:8081");
    }

    #[tokio::test]
    async fn cancelled_server_returns() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        };
        let cancel = CancellationToken::new();
        cancel.cancel();
        serve(&config, Router::new(), cancel).await.unwrap();
    }

    #[tokio::test]
    async fn bind_failure_is_reported() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: taken.local_addr().unwrap().port(),
        };
        let err = serve(&config, Router::new(), CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to bind"));
    }
}
