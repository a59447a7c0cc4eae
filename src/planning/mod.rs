//! Deterministic sprint candidate selection.
//!
//! Scores backlog tickets against a free-text strategy, splits the capacity
//! budget between feature work and tech debt, and greedily packs tickets while
//! respecting dependencies. Tickets that do not make it are kept (up to
//! [`MAX_BACKUPS`]) as replacement candidates.

mod keywords;
mod select;
mod summary;
mod types;


pub use keywords::{extract_keywords, matched_keywords, STRATEGY_KEYWORDS};
pub use select::{select_candidates, MAX_BACKUPS};
pub use summary::{Summary, Warning, WarningKind};
pub use types::{
    Budget, CapacityMode, RejectError, ScoredTicket, SelectionParams, SelectionResult,
};
