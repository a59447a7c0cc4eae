use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::refine::RefinementResult;

use super::{
    CurrentSprint, DraftStrategy, HistoryEntry, KeyValueStore, RefinedRecord, StoreError,
    ALL_KEYS, CURRENT_SPRINT_KEY, DRAFT_STRATEGY_KEY, REFINED_TICKETS_KEY, SPRINT_HISTORY_KEY,
};

/// Launched sprints kept in history.
pub const MAX_HISTORY: usize = 10;

/// Typed access to planning state on top of a [`KeyValueStore`].
///
/// Reads never fail on bad data: a missing or malformed value is logged and
/// read as empty. Writes propagate their errors.
pub struct SprintStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SprintStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn inner(&self) -> &S {
        &self.store
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "Failed to read stored value");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Ignoring malformed stored value");
                None
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, &json)
    }

    pub fn save_draft_strategy(&self, strategy: &str) -> Result<DraftStrategy, StoreError> {
        let draft = DraftStrategy {
            strategy: strategy.to_string(),
            saved_at: Utc::now(),
        };
        self.write(DRAFT_STRATEGY_KEY, &draft)?;
        Ok(draft)
    }

    pub fn draft_strategy(&self) -> Option<DraftStrategy> {
        self.read(DRAFT_STRATEGY_KEY)
    }

    /// Store a refinement under its ticket id, replacing any earlier one.
    ///
    /// When the ticket is part of the current sprint the refinement is merged
    /// into it as well; the return value says whether that happened.
    pub fn save_refined_ticket(&self, result: &RefinementResult) -> Result<bool, StoreError> {
        let mut all = self.refined_tickets();
        all.insert(
            result.original.id.clone(),
            RefinedRecord {
                result: result.clone(),
                refined_at: Utc::now(),
            },
        );
        self.write(REFINED_TICKETS_KEY, &all)?;

        let Some(mut sprint) = self.current_sprint() else {
            return Ok(false);
        };
        if !sprint.apply_refinement(result) {
            return Ok(false);
        }
        self.save_current_sprint(&sprint)?;
        Ok(true)
    }

    /// All stored refinements keyed by ticket id.
    pub fn refined_tickets(&self) -> BTreeMap<String, RefinedRecord> {
        self.read(REFINED_TICKETS_KEY).unwrap_or_default()
    }

    pub fn refined_ticket(&self, ticket_id: &str) -> Option<RefinedRecord> {
        self.refined_tickets().remove(ticket_id)
    }

    pub fn clear_refined_tickets(&self) -> Result<(), StoreError> {
        self.store.remove(REFINED_TICKETS_KEY)
    }

    pub fn save_current_sprint(&self, sprint: &CurrentSprint) -> Result<(), StoreError> {
        self.write(CURRENT_SPRINT_KEY, sprint)
    }

    pub fn current_sprint(&self) -> Option<CurrentSprint> {
        self.read(CURRENT_SPRINT_KEY)
    }

    pub fn clear_current_sprint(&self) -> Result<(), StoreError> {
        self.store.remove(CURRENT_SPRINT_KEY)
    }

    /// Record a launch now. See [`Self::add_to_history_at`].
    pub fn add_to_history(
        &self,
        sprint: &CurrentSprint,
        refined_count: usize,
    ) -> Result<HistoryEntry, StoreError> {
        self.add_to_history_at(sprint, refined_count, Utc::now())
    }

    /// Prepend a launch to history, keeping the newest [`MAX_HISTORY`].
    pub fn add_to_history_at(
        &self,
        sprint: &CurrentSprint,
        refined_count: usize,
        launched_at: DateTime<Utc>,
    ) -> Result<HistoryEntry, StoreError> {
        let entry = HistoryEntry::from_sprint(sprint, refined_count, launched_at);
        let mut history = self.sprint_history();
        history.insert(0, entry.clone());
        history.truncate(MAX_HISTORY);
        self.write(SPRINT_HISTORY_KEY, &history)?;
        Ok(entry)
    }

    /// Launched sprints, newest first.
    pub fn sprint_history(&self) -> Vec<HistoryEntry> {
        self.read(SPRINT_HISTORY_KEY).unwrap_or_default()
    }

    pub fn clear_sprint_history(&self) -> Result<(), StoreError> {
        self.store.remove(SPRINT_HISTORY_KEY)
    }

    /// Remove every key this crate owns.
    pub fn clear_all(&self) -> Result<(), StoreError> {
        for key in ALL_KEYS {
            self.store.remove(key)?;
        }
        Ok(())
    }
}
