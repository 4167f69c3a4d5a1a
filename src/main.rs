//! Saints Encyclopedia server - main entry point.

use clap::Parser;
use saints_encyclopedia::config::{Config, TransportMode};
use saints_encyclopedia::db::Database;
use saints_encyclopedia::transport::{HttpTransport, StdioTransport, Transport};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber. Logs go to stderr; stdout carries
/// the stdio protocol.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();

    init_tracing(&config);

    let db_config = match config.database_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!();
            eprintln!("Usage: saints-encyclopedia --database sqlite:<path>");
            eprintln!();
            eprintln!("Examples:");
            eprintln!("  saints-encyclopedia --database sqlite:saints_encyclopedia.db");
            eprintln!("  saints-encyclopedia --database sqlite:///var/data/saints.db?max_connections=4");
            eprintln!("  saints-encyclopedia --transport http --http-port 3000");
            std::process::exit(1);
        }
    };

    info!(
        transport = %config.transport,
        "Starting Saints Encyclopedia v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Connects on the first query.
    let db = Arc::new(Database::new(db_config));

    let result = match config.transport {
        TransportMode::Stdio => StdioTransport::new(db).run().await,
        TransportMode::Http => {
            info!(
                host = %config.http_host,
                port = config.http_port,
                endpoint = %config.mcp_endpoint,
                "Using HTTP transport"
            );
            HttpTransport::new(
                db,
                &config.http_host,
                config.http_port,
                &config.mcp_endpoint,
            )
            .run()
            .await
        }
    };

    if let Err(e) = result {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
