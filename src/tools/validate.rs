//! Input validation shared by the tool handlers.
//!
//! Everything here runs before a statement is built. A failure is an
//! `InvalidInput` error naming the offending field.

use crate::error::{StatsError, StatsResult};
use crate::models::{UnknownVariant, effective_limit};
use std::str::FromStr;
use tracing::warn;

/// First season of franchise play.
pub const FIRST_SEASON: i64 = 1967;
pub const LAST_SEASON: i64 = 2100;

/// Parse a closed-set value such as a stat category.
pub fn parse_enum<T>(field: &str, value: &str) -> StatsResult<T>
where
    T: FromStr<Err = UnknownVariant>,
{
    value
        .parse()
        .map_err(|e: UnknownVariant| StatsError::invalid_input(field, e.to_string()))
}

pub fn parse_opt_enum<T>(field: &str, value: Option<&str>) -> StatsResult<Option<T>>
where
    T: FromStr<Err = UnknownVariant>,
{
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => parse_enum(field, v).map(Some),
        None => Ok(None),
    }
}

/// Trimmed, non-empty text.
pub fn required_text(field: &str, value: &str) -> StatsResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StatsError::invalid_input(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Blank optional text is treated as absent.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn season(value: Option<i64>) -> StatsResult<Option<i64>> {
    match value {
        Some(s) if !(FIRST_SEASON..=LAST_SEASON).contains(&s) => Err(StatsError::invalid_input(
            "season",
            format!("must be between {FIRST_SEASON} and {LAST_SEASON}, got {s}"),
        )),
        other => Ok(other),
    }
}

pub fn positive(field: &str, value: Option<i64>) -> StatsResult<Option<i64>> {
    match value {
        Some(v) if v < 1 => Err(StatsError::invalid_input(
            field,
            format!("must be a positive integer, got {v}"),
        )),
        other => Ok(other),
    }
}

/// Clamp a row limit, logging when the request was out of range.
pub fn limit(tool: &str, requested: Option<u32>, default: u32) -> (u32, Option<String>) {
    let (limit, warning) = effective_limit(requested, default);
    if let Some(w) = &warning {
        warn!(tool = tool, requested = ?requested, limit = limit, "{}", w);
    }
    (limit, warning)
}

/// String choices a tool input publishes for `field` in its JSON schema.
#[cfg(test)]
pub(crate) fn schema_choices<T: schemars::JsonSchema>(field: &str) -> Vec<String> {
    let schema = serde_json::to_value(schemars::schema_for!(T)).unwrap();
    schema["properties"][field]["enum"]
        .as_array()
        .unwrap_or_else(|| panic!("{field} publishes no enum"))
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Scope, StatCategory};

    #[test]
    fn test_parse_enum_names_field() {
        let err = parse_enum::<StatCategory>("stat_type", "kicking").unwrap_err();
        assert_eq!(err.field(), Some("stat_type"));
        assert!(err.to_string().contains("kicking"));
    }

    #[test]
    fn test_parse_opt_enum_blank_is_none() {
        assert_eq!(parse_opt_enum::<Scope>("scope", Some("  ")).unwrap(), None);
        assert_eq!(
            parse_opt_enum::<Scope>("scope", Some("Season")).unwrap(),
            Some(Scope::Season)
        );
    }

    #[test]
    fn test_required_text() {
        assert_eq!(required_text("name", "  Brees ").unwrap(), "Brees");
        assert_eq!(required_text("name", " ").unwrap_err().field(), Some("name"));
    }

    #[test]
    fn test_season_bounds() {
        assert_eq!(season(Some(2009)).unwrap(), Some(2009));
        assert_eq!(season(None).unwrap(), None);
        assert_eq!(season(Some(1950)).unwrap_err().field(), Some("season"));
    }

    #[test]
    fn test_positive() {
        assert_eq!(positive("round", Some(0)).unwrap_err().field(), Some("round"));
        assert_eq!(positive("round", Some(2)).unwrap(), Some(2));
    }
}
