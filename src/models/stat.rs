//! Closed vocabularies for stat queries.
//!
//! Every value a caller can choose that ends up as SQL text (a table, a
//! column, a game-type literal) is one of these enums. Parsing is the only
//! way in, and the SQL fragments they render are `&'static str`.

use std::fmt;
use std::str::FromStr;

/// Stat category, each backed by its own table (defense by three).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatCategory {
    Passing,
    Rushing,
    Receiving,
    Defense,
}

impl StatCategory {
    pub const ALL: [StatCategory; 4] = [
        Self::Passing,
        Self::Rushing,
        Self::Receiving,
        Self::Defense,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passing => "passing",
            Self::Rushing => "rushing",
            Self::Receiving => "receiving",
            Self::Defense => "defense",
        }
    }

    /// Primary table for the category. Defense also reads `player_sacks`
    /// and `player_interceptions`.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Passing => "player_passing",
            Self::Rushing => "player_rushing",
            Self::Receiving => "player_receiving",
            Self::Defense => "player_defense",
        }
    }
}

/// Aggregation granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    /// Sum across all games.
    #[default]
    Career,
    /// Sum grouped by season.
    Season,
    /// One row per game, no aggregation.
    Game,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Career => "career",
            Self::Season => "season",
            Self::Game => "game",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameType {
    Regular,
    Playoff,
    Preseason,
}

impl GameType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Playoff => "playoff",
            Self::Preseason => "preseason",
        }
    }
}

/// Game result from the franchise's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Tie,
}

impl Outcome {
    /// Value stored in `games.result`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Win => "W",
            Self::Loss => "L",
            Self::Tie => "T",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeAway {
    Home,
    Away,
}

impl HomeAway {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Away => "away",
        }
    }
}

/// Which game types a query counts.
///
/// Different query functions apply different filters; see the table in
/// DESIGN.md. They are kept as they are rather than unified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameTypeFilter {
    /// `game_type = 'regular'`
    RegularOnly,
    /// `game_type != 'preseason'`
    ExcludePreseason,
    /// No condition.
    All,
}

impl GameTypeFilter {
    /// SQL condition for a `games` alias, or `None` when nothing is filtered.
    pub fn condition(&self, alias: &str) -> Option<String> {
        match self {
            Self::RegularOnly => Some(format!("{alias}.game_type = 'regular'")),
            Self::ExcludePreseason => Some(format!("{alias}.game_type != 'preseason'")),
            Self::All => None,
        }
    }
}

/// Error produced when a string does not name a member of a closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub value: String,
    pub expected: &'static [&'static str],
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected one of {}; got '{}'",
            self.expected.join(", "),
            self.value
        )
    }
}

macro_rules! impl_from_str {
    ($ty:ty, [$($text:literal => $variant:expr),+ $(,)?]) => {
        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                const EXPECTED: &[&str] = &[$($text),+];
                let normalized = s.trim().to_ascii_lowercase();
                match normalized.as_str() {
                    $($text => Ok($variant),)+
                    _ => Err(UnknownVariant {
                        value: s.to_string(),
                        expected: EXPECTED,
                    }),
                }
            }
        }
    };
}

impl_from_str!(StatCategory, [
    "passing" => StatCategory::Passing,
    "rushing" => StatCategory::Rushing,
    "receiving" => StatCategory::Receiving,
    "defense" => StatCategory::Defense,
]);

impl_from_str!(Scope, [
    "career" => Scope::Career,
    "season" => Scope::Season,
    "game" => Scope::Game,
]);

impl_from_str!(GameType, [
    "regular" => GameType::Regular,
    "playoff" => GameType::Playoff,
    "preseason" => GameType::Preseason,
]);

impl_from_str!(Outcome, [
    "w" => Outcome::Win,
    "l" => Outcome::Loss,
    "t" => Outcome::Tie,
]);

impl_from_str!(HomeAway, [
    "home" => HomeAway::Home,
    "away" => HomeAway::Away,
]);

impl fmt::Display for StatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category_case_insensitive() {
        assert_eq!("Passing".parse::<StatCategory>(), Ok(StatCategory::Passing));
        assert_eq!(" defense ".parse::<StatCategory>(), Ok(StatCategory::Defense));
    }

    #[test]
    fn test_parse_category_rejects_unknown() {
        let err = "kicking".parse::<StatCategory>().unwrap_err();
        assert_eq!(err.value, "kicking");
        assert_eq!(
            err.to_string(),
            "expected one of passing, rushing, receiving, defense; got 'kicking'"
        );
    }

    #[test]
    fn test_parse_outcome_codes() {
        assert_eq!("W".parse::<Outcome>(), Ok(Outcome::Win));
        assert_eq!("t".parse::<Outcome>(), Ok(Outcome::Tie));
        assert!("win".parse::<Outcome>().is_err());
        assert_eq!(Outcome::Loss.code(), "L");
    }

    #[test]
    fn test_parse_scope_and_game_type() {
        assert_eq!("season".parse::<Scope>(), Ok(Scope::Season));
        assert_eq!("PRESEASON".parse::<GameType>(), Ok(GameType::Preseason));
        assert!("week".parse::<Scope>().is_err());
    }

    #[test]
    fn test_game_type_filter_conditions() {
        assert_eq!(
            GameTypeFilter::RegularOnly.condition("g").as_deref(),
            Some("g.game_type = 'regular'")
        );
        assert_eq!(
            GameTypeFilter::ExcludePreseason.condition("g").as_deref(),
            Some("g.game_type != 'preseason'")
        );
        assert_eq!(GameTypeFilter::All.condition("g"), None);
    }

    #[test]
    fn test_category_tables() {
        assert_eq!(StatCategory::Receiving.table(), "player_receiving");
        assert_eq!(StatCategory::Defense.table(), "player_defense");
    }
}
