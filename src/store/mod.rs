//! Persistence for drafts, refinements and sprints.
//!
//! All state goes through a [`KeyValueStore`] that callers construct and pass
//! in, so planning code never touches ambient storage. Values are JSON.
//! [`FileStore`] keeps one `<key>.json` file per key in the state directory;
//! [`MemoryStore`] keeps everything in process.

mod kv;
mod records;
mod sprint_store;

#[cfg(test)]
mod tests;

pub use kv::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use records::{
    history_averages, CurrentSprint, DraftStrategy, HistoryAverages, HistoryEntry, RefinedRecord,
};
pub use sprint_store::{SprintStore, MAX_HISTORY};

/// Default state directory, relative to the working directory.
pub const DEFAULT_STATE_DIR: &str = ".align";

/// Storage key for the saved strategy draft.
pub const DRAFT_STRATEGY_KEY: &str = "align_draft_strategy";
/// Storage key for the map of refined tickets.
pub const REFINED_TICKETS_KEY: &str = "align_refined_tickets";
/// Storage key for launched sprints, newest first.
pub const SPRINT_HISTORY_KEY: &str = "align_sprint_history";
/// Storage key for the sprint being planned.
pub const CURRENT_SPRINT_KEY: &str = "align_current_sprint";

/// Every key owned by this crate.
pub const ALL_KEYS: [&str; 4] = [
    DRAFT_STRATEGY_KEY,
    REFINED_TICKETS_KEY,
    SPRINT_HISTORY_KEY,
    CURRENT_SPRINT_KEY,
];
