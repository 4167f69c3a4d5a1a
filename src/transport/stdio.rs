//! Stdio transport: JSON-RPC over stdin/stdout.

use crate::db::Database;
use crate::error::{StatsError, StatsResult};
use crate::mcp::StatsService;
use crate::transport::{Transport, wait_for_signal};
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;
use tracing::{info, warn};

pub struct StdioTransport {
    db: Arc<Database>,
}

impl StdioTransport {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

impl Transport for StdioTransport {
    async fn run(&self) -> StatsResult<()> {
        info!("Starting MCP server with stdio transport");

        let service = StatsService::new(self.db.clone());
        let running_service = service
            .serve(stdio())
            .await
            .map_err(|e| StatsError::internal(format!("Failed to start stdio transport: {e}")))?;

        let shutdown_requested = tokio::select! {
            result = running_service.waiting() => {
                match result {
                    Ok(_quit_reason) => info!("Stdio transport completed normally"),
                    Err(e) => {
                        warn!(error = %e, "Stdio transport error");
                        return Err(StatsError::internal(format!("Stdio transport error: {e}")));
                    }
                }
                false
            }
            _ = wait_for_signal() => {
                info!("Shutdown signal received (send again to force exit)");
                true
            }
        };

        if shutdown_requested {
            tokio::spawn(async {
                wait_for_signal().await;
                warn!("Received second signal, forcing immediate exit");
                std::process::exit(1);
            });
        }

        info!("Closing database connection");
        self.db.close().await;

        if shutdown_requested {
            // A pending stdin read cannot be cancelled from select!
            info!("Exiting process");
            std::process::exit(0);
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "stdio"
    }
}
