//! Output shaping for list-returning tools.
//!
//! Rows go back as JSON by default. Callers that want something to show a
//! person can ask for an ASCII or Markdown table instead.

use crate::models::{Row, UnknownVariant};
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::str::FromStr;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Structured rows (default)
    #[default]
    Json,
    /// ASCII table (like the sqlite3 CLI in box mode)
    Table,
    /// Markdown table
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            "markdown" => Ok(Self::Markdown),
            _ => Err(UnknownVariant {
                value: s.to_string(),
                expected: &["json", "table", "markdown"],
            }),
        }
    }
}

/// Rows returned by a list tool.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct RowsOutput {
    /// Result rows keyed by column name. Empty when `formatted` is set.
    pub rows: Vec<Row>,
    /// Number of rows the query returned
    pub row_count: usize,
    /// Pre-rendered table when format is table or markdown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
    /// Set when the requested limit was out of range and clamped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl RowsOutput {
    pub fn new(rows: Vec<Row>, format: OutputFormat, warning: Option<String>) -> Self {
        let row_count = rows.len();
        match format {
            OutputFormat::Json => Self {
                rows,
                row_count,
                formatted: None,
                warning,
            },
            OutputFormat::Table => Self {
                formatted: Some(format_as_table(&column_names(&rows), &rows)),
                rows: Vec::new(),
                row_count,
                warning,
            },
            OutputFormat::Markdown => Self {
                formatted: Some(format_as_markdown(&column_names(&rows), &rows)),
                rows: Vec::new(),
                row_count,
                warning,
            },
        }
    }
}

/// Column names in select-list order, taken from the first row.
pub fn column_names(rows: &[Row]) -> Vec<String> {
    rows.first()
        .map(|r| r.keys().cloned().collect())
        .unwrap_or_default()
}

pub fn format_value(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "NULL".to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Array(arr) => serde_json::to_string(arr).unwrap_or_default(),
        JsonValue::Object(obj) => serde_json::to_string(obj).unwrap_or_default(),
    }
}

pub fn format_as_table(columns: &[String], rows: &[Row]) -> String {
    if columns.is_empty() {
        return "Empty set".to_string();
    }

    let mut widths: Vec<usize> = columns.iter().map(|c| c.width()).collect();
    for row in rows {
        for (i, col) in columns.iter().enumerate() {
            if let Some(value) = row.get(col) {
                widths[i] = widths[i].max(format_value(value).width());
            }
        }
    }

    let separator: String = widths
        .iter()
        .map(|w| format!("+{}", "-".repeat(w + 2)))
        .collect::<String>()
        + "+\n";

    let mut output = String::new();
    output.push_str(&separator);
    let header: String = columns
        .iter()
        .zip(&widths)
        .map(|(col, w)| format!("| {} ", pad(col, *w, Align::Center)))
        .collect::<String>()
        + "|\n";
    output.push_str(&header);
    output.push_str(&separator);

    for row in rows {
        let line: String = columns
            .iter()
            .zip(&widths)
            .map(|(col, w)| {
                let value = row.get(col).unwrap_or(&JsonValue::Null);
                // Numbers right-aligned, everything else left.
                let align = if value.is_number() {
                    Align::Right
                } else {
                    Align::Left
                };
                format!("| {} ", pad(&format_value(value), *w, align))
            })
            .collect::<String>()
            + "|\n";
        output.push_str(&line);
    }

    output.push_str(&separator);
    let row_text = if rows.len() == 1 { "row" } else { "rows" };
    output.push_str(&format!("{} {} in set\n", rows.len(), row_text));
    output
}

pub fn format_as_markdown(columns: &[String], rows: &[Row]) -> String {
    if columns.is_empty() {
        return "*Empty set*".to_string();
    }

    let mut output = String::new();
    let header: String = columns
        .iter()
        .map(|c| format!("| {} ", c))
        .collect::<String>()
        + "|\n";
    output.push_str(&header);

    let sep: String = columns.iter().map(|_| "|---").collect::<String>() + "|\n";
    output.push_str(&sep);

    for row in rows {
        let line: String = columns
            .iter()
            .map(|col| {
                let value = row.get(col).unwrap_or(&JsonValue::Null);
                format!("| {} ", format_value(value).replace('|', "\\|"))
            })
            .collect::<String>()
            + "|\n";
        output.push_str(&line);
    }

    output.push_str(&format!("\n*{} rows*", rows.len()));
    output
}

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
    Center,
}

/// Pad by display width; `format!` width counts chars, not columns.
fn pad(text: &str, width: usize, align: Align) -> String {
    let fill = width.saturating_sub(text.width());
    match align {
        Align::Left => format!("{}{}", text, " ".repeat(fill)),
        Align::Right => format!("{}{}", " ".repeat(fill), text),
        Align::Center => {
            let left = fill / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(fill - left))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows() -> Vec<Row> {
        let mut a = Row::new();
        a.insert("player_name".to_string(), json!("Drew Brees"));
        a.insert("yds".to_string(), json!(4388));
        let mut b = Row::new();
        b.insert("player_name".to_string(), json!("Mark Brunell"));
        b.insert("yds".to_string(), json!(102));
        vec![a, b]
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!("Markdown".parse::<OutputFormat>(), Ok(OutputFormat::Markdown));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_json_output_keeps_rows() {
        let out = RowsOutput::new(rows(), OutputFormat::Json, None);
        assert_eq!(out.row_count, 2);
        assert_eq!(out.rows.len(), 2);
        assert!(out.formatted.is_none());
    }

    #[test]
    fn test_table_output() {
        let out = RowsOutput::new(rows(), OutputFormat::Table, None);
        assert!(out.rows.is_empty());
        assert_eq!(out.row_count, 2);
        let table = out.formatted.unwrap();
        assert!(table.contains("| Drew Brees   | 4388 |"));
        assert!(table.contains("|  102 |"));
        assert!(table.ends_with("2 rows in set\n"));
    }

    #[test]
    fn test_markdown_output() {
        let md = format_as_markdown(&column_names(&rows()), &rows());
        assert!(md.starts_with("| player_name | yds |\n|---|---|\n"));
        assert!(md.contains("| Drew Brees | 4388 |"));
        assert!(md.ends_with("*2 rows*"));
    }

    #[test]
    fn test_empty_set() {
        assert_eq!(format_as_table(&[], &[]), "Empty set");
        let out = RowsOutput::new(Vec::new(), OutputFormat::Markdown, None);
        assert_eq!(out.formatted.as_deref(), Some("*Empty set*"));
    }

    #[test]
    fn test_pad_uses_display_width() {
        assert_eq!(pad("ab", 4, Align::Right), "  ab");
        assert_eq!(pad("ab", 5, Align::Center), " ab  ");
    }
}
