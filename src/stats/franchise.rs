//! Which rows belong to the franchise.
//!
//! Stat and team rows carry a free-text `team` column. A row is attributed
//! to the franchise when that text contains "Saints" or "New Orleans". This
//! is a substring heuristic: "Saints of Somewhere Else" matches too, and
//! that is kept as-is.

/// Substrings that mark a team name as the franchise.
pub const FRANCHISE_PATTERNS: [&str; 2] = ["Saints", "New Orleans"];

/// SQL predicate for the `team` column of the given table alias.
pub fn belongs_to_franchise(alias: &str) -> String {
    let clauses: Vec<String> = FRANCHISE_PATTERNS
        .iter()
        .map(|p| format!("{alias}.team LIKE '%{p}%'"))
        .collect();
    format!("({})", clauses.join(" OR "))
}

/// In-process equivalent of [`belongs_to_franchise`].
///
/// SQLite `LIKE` is case-insensitive for ASCII, so this is too.
pub fn matches(team: &str) -> bool {
    let team = team.to_ascii_lowercase();
    FRANCHISE_PATTERNS
        .iter()
        .any(|p| team.contains(&p.to_ascii_lowercase()))
}
