//! Read-only query library over the stats store.
//!
//! Each function builds a parameterized statement for one page or tool and
//! runs it through [`Database`](crate::db::Database). Statement builders are
//! exposed separately so their SQL can be checked without a database.

pub mod columns;
pub mod draft;
pub mod filter;
pub mod franchise;
pub mod games;
pub mod leaderboards;
pub mod player_stats;
pub mod players;
pub mod records;
pub mod scoring;
pub mod team;

pub use filter::WhereClause;
pub use games::{GameDetail, GameFilter};
pub use player_stats::{StatOrder, StatQuery};
pub use players::{PlayerBio, PlayerRef};
pub use records::RecordCategory;
pub use scoring::ScoringResult;
pub use team::TeamSeason;
