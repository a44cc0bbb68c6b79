//! Round scoring.
//!
//! The table is loaded once at startup and never changes afterwards.

pub mod table;
pub mod loader;

pub use table::{ScoreRule, ScoreTable, ScoreTableBuilder};
pub use loader::{load_score_rules, parse_score_rules};
