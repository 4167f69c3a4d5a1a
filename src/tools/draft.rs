//! `query_draft` tool.

use crate::db::Database;
use crate::error::StatsResult;
use crate::stats::draft;
use crate::tools::format::{OutputFormat, RowsOutput};
use crate::tools::validate;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_DRAFT_LIMIT: u32 = 50;

/// Input for the query_draft tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct QueryDraftInput {
    /// Draft year
    #[serde(default)]
    pub season: Option<i64>,
    /// Draft round, starting at 1
    #[serde(default)]
    pub round: Option<i64>,
    /// Maximum rows to return. Default: 50, max: 500
    #[serde(default)]
    pub limit: Option<u32>,
    /// Output format: "json" (default), "table" or "markdown"
    #[serde(default)]
    #[schemars(extend("enum" = ["json", "table", "markdown", null]))]
    pub format: Option<String>,
}

pub struct DraftToolHandler {
    db: Arc<Database>,
}

impl DraftToolHandler {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn draft(&self, input: QueryDraftInput) -> StatsResult<RowsOutput> {
        let season = validate::season(input.season)?;
        let round = validate::positive("round", input.round)?;
        let format = validate::parse_opt_enum::<OutputFormat>("format", input.format.as_deref())?
            .unwrap_or_default();
        let (limit, warning) = validate::limit("query_draft", input.limit, DEFAULT_DRAFT_LIMIT);

        let rows = draft::draft_picks(&self.db, season, round, limit).await?;

        info!(tool = "query_draft", row_count = rows.len(), "Draft picks fetched");
        Ok(RowsOutput::new(rows, format, warning))
    }
}
