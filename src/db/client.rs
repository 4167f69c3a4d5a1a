//! Lazily-connected, read-only database client.
//!
//! One [`Database`] is shared by every tool and HTTP handler. The pool behind
//! it is created on first use and lives for the rest of the process.

use crate::config::DatabaseConfig;
use crate::db::params::bind_param;
use crate::db::statement::{self, Statement};
use crate::db::types::RowToJson;
use crate::error::{StatsError, StatsResult};
use crate::models::{Row, SqlParam};
use futures_util::StreamExt;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tokio::sync::OnceCell;
use tracing::{debug, info};

#[derive(Debug)]
pub struct Database {
    config: Option<DatabaseConfig>,
    pool: OnceCell<SqlitePool>,
}

impl Database {
    /// Create a client that connects on first query.
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config: Some(config),
            pool: OnceCell::new(),
        }
    }

    /// Wrap an already-open pool.
    pub fn with_pool(pool: SqlitePool) -> Self {
        Self {
            config: None,
            pool: OnceCell::new_with(Some(pool)),
        }
    }

    /// Whether the pool has been created yet.
    pub fn is_connected(&self) -> bool {
        self.pool.initialized()
    }

    async fn pool(&self) -> StatsResult<&SqlitePool> {
        self.pool
            .get_or_try_init(|| async {
                let config = self.config.as_ref().ok_or_else(|| {
                    StatsError::internal("Database has neither a pool nor a configuration")
                })?;
                connect(config).await
            })
            .await
    }

    /// Run a read-only statement and return every row.
    pub async fn query(&self, sql: &str, params: &[SqlParam]) -> StatsResult<Vec<Row>> {
        statement::validate(sql, params)?;
        let pool = self.pool().await?;

        debug!(sql = %sql, params = ?param_types(params), "Executing statement");

        let mut query = sqlx::query(sql);
        for param in params {
            query = bind_param(query, param);
        }

        let mut stream = query.fetch(pool);
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await {
            rows.push(row.map_err(|e| driver_error(pool, e))?.to_json_map());
        }

        debug!(rows = rows.len(), "Statement complete");
        Ok(rows)
    }

    /// Run a read-only statement and return its first row, if any.
    pub async fn query_one(&self, sql: &str, params: &[SqlParam]) -> StatsResult<Option<Row>> {
        statement::validate(sql, params)?;
        let pool = self.pool().await?;

        debug!(sql = %sql, params = ?param_types(params), "Executing single-row statement");

        let mut query = sqlx::query(sql);
        for param in params {
            query = bind_param(query, param);
        }

        let row = query
            .fetch_optional(pool)
            .await
            .map_err(|e| driver_error(pool, e))?;
        Ok(row.map(|r| r.to_json_map()))
    }

    pub async fn fetch(&self, stmt: &Statement) -> StatsResult<Vec<Row>> {
        self.query(stmt.sql(), stmt.params()).await
    }

    pub async fn fetch_one(&self, stmt: &Statement) -> StatsResult<Option<Row>> {
        self.query_one(stmt.sql(), stmt.params()).await
    }

    /// Close the pool if it was ever opened.
    pub async fn close(&self) {
        if let Some(pool) = self.pool.get() {
            pool.close().await;
            info!("Database pool closed");
        }
    }
}

fn param_types(params: &[SqlParam]) -> Vec<&'static str> {
    params.iter().map(SqlParam::type_name).collect()
}

/// Classify a driver error. Acquire timeouts report the pool's own limit.
fn driver_error(pool: &SqlitePool, err: sqlx::Error) -> StatsError {
    match err {
        sqlx::Error::PoolTimedOut => StatsError::timeout(
            "connection pool acquire",
            pool.options().get_acquire_timeout().as_secs(),
        ),
        other => other.into(),
    }
}

async fn connect(config: &DatabaseConfig) -> StatsResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.connection_string)
        .map_err(|e| {
            StatsError::connection(
                format!("Invalid SQLite connection string: {}", e),
                "Check the connection URL format: sqlite:path/to/saints_encyclopedia.db",
            )
        })?
        .read_only(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(options)
        .await
        .map_err(|e| {
            StatsError::connection(
                format!("Failed to open stats database: {}", e),
                "Verify the file exists and is readable: sqlite:path/to/saints_encyclopedia.db",
            )
        })?;

    info!(
        max_connections = config.max_connections,
        "Opened stats database (read-only)"
    );
    Ok(pool)
}
