//! HTTP transport.
//!
//! One listener serves both surfaces: MCP over streamable HTTP at the
//! configured endpoint, and the JSON stats endpoint at `/api/stats`.

use crate::api;
use crate::db::Database;
use crate::error::{StatsError, StatsResult};
use crate::mcp::StatsService;
use crate::transport::{Transport, wait_for_signal};
use axum::Router;
use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

const GRACEFUL_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpTransport {
    db: Arc<Database>,
    host: String,
    port: u16,
    /// MCP endpoint path
    endpoint: String,
}

impl HttpTransport {
    pub fn new(
        db: Arc<Database>,
        host: impl Into<String>,
        port: u16,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            db,
            host: host.into(),
            port,
            endpoint: endpoint.into(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the router: the stats endpoint plus the MCP service.
    pub fn app(&self) -> Router {
        let db = self.db.clone();
        let mcp = StreamableHttpService::new(
            move || Ok(StatsService::new(db.clone())),
            LocalSessionManager::default().into(),
            Default::default(),
        );

        let stats = api::router(self.db.clone());
        // nest_service rejects "/"
        if self.endpoint == "/" {
            stats.fallback_service(mcp)
        } else {
            stats.nest_service(&self.endpoint, mcp)
        }
    }
}

impl Transport for HttpTransport {
    async fn run(&self) -> StatsResult<()> {
        let bind_addr = self.bind_addr();
        info!("Starting server with HTTP transport on {}", bind_addr);

        let app = self.app();

        let listener = TcpListener::bind(&bind_addr).await.map_err(|e| {
            StatsError::connection(
                format!("Failed to bind to {bind_addr}: {e}"),
                "Check that the port is available",
            )
        })?;

        info!(
            mcp_endpoint = %self.endpoint,
            stats_endpoint = api::STATS_PATH,
            "Endpoints ready"
        );

        let shutdown_notify = Arc::new(tokio::sync::Notify::new());
        let shutdown_notify_clone = shutdown_notify.clone();
        let shutdown_signal = async move {
            wait_for_signal().await;
            shutdown_notify_clone.notify_one();
        };

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal);

        // SSE streams can hold the server open, so cap the drain time.
        tokio::select! {
            result = server => {
                match result {
                    Ok(()) => info!("HTTP server stopped"),
                    Err(e) => {
                        error!(error = %e, "HTTP server error");
                        return Err(StatsError::internal(format!("HTTP server error: {e}")));
                    }
                }
            }
            _ = async {
                shutdown_notify.notified().await;
                info!(
                    timeout_secs = GRACEFUL_TIMEOUT.as_secs(),
                    "Waiting for connections to close (send signal again to force exit)..."
                );
                tokio::select! {
                    _ = tokio::time::sleep(GRACEFUL_TIMEOUT) => {
                        warn!("Graceful shutdown timeout, forcing exit");
                    }
                    _ = wait_for_signal() => {
                        warn!("Received second signal, forcing immediate exit");
                    }
                }
            } => {}
        }

        info!("Closing database connection");
        self.db.close().await;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;

    fn transport(endpoint: &str) -> HttpTransport {
        let config = DatabaseConfig::parse("sqlite:saints_encyclopedia.db").unwrap();
        HttpTransport::new(Arc::new(Database::new(config)), "127.0.0.1", 8080, endpoint)
    }

    #[test]
    fn test_http_transport_creation() {
        let transport = transport("/mcp");
        assert_eq!(transport.name(), "http");
        assert_eq!(transport.bind_addr(), "127.0.0.1:8080");
        assert_eq!(transport.endpoint(), "/mcp");
    }

    #[tokio::test]
    async fn test_app_builds_for_root_endpoint() {
        let transport = transport("/");
        let _app = transport.app();
        assert!(!transport.db.is_connected());
    }
}
