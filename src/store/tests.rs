use chrono::{Duration, TimeZone, Utc};
use tempfile::TempDir;

use super::*;
use crate::planning::{select_candidates, SelectionParams};
use crate::random::Seed;
use crate::refine::refine_ticket;
use crate::ticket::Backlog;

fn sprint(strategy: &str) -> CurrentSprint {
    let params = SelectionParams::default();
    let tickets = Backlog::embedded().unwrap().tickets;
    let result = select_candidates(strategy, &tickets, &Seed::from(strategy), &params);
    CurrentSprint::new(strategy, &params, result)
}

#[test]
fn test_memory_store_basics() {
    let store = MemoryStore::new();
    assert_eq!(store.get("k").unwrap(), None);
    store.set("k", "v").unwrap();
    assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
    store.remove("k").unwrap();
    store.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
}

#[test]
fn test_file_store_writes_one_file_per_key() {
    let temp = TempDir::new().unwrap();
    let store = FileStore::new(temp.path().join("state"));

    assert_eq!(store.get(DRAFT_STRATEGY_KEY).unwrap(), None);
    store.set(DRAFT_STRATEGY_KEY, "{}").unwrap();

    let path = temp.path().join("state").join("align_draft_strategy.json");
    assert_eq!(store.path_for(DRAFT_STRATEGY_KEY), path);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");

    store.remove(DRAFT_STRATEGY_KEY).unwrap();
    assert!(!path.exists());
}

#[test]
fn test_draft_strategy_round_trip() {
    let store = SprintStore::new(MemoryStore::new());
    assert!(store.draft_strategy().is_none());

    store.save_draft_strategy("Fix Q3 retention issues").unwrap();
    let draft = store.draft_strategy().unwrap();
    assert_eq!(draft.strategy, "Fix Q3 retention issues");

    let raw = store.inner().get(DRAFT_STRATEGY_KEY).unwrap().unwrap();
    assert!(raw.contains("\"savedAt\""));
}

#[test]
fn test_malformed_values_read_as_empty() {
    let store = SprintStore::new(MemoryStore::new());
    for key in ALL_KEYS {
        store.inner().set(key, "{not json").unwrap();
    }

    assert!(store.draft_strategy().is_none());
    assert!(store.refined_tickets().is_empty());
    assert!(store.current_sprint().is_none());
    assert!(store.sprint_history().is_empty());
}

#[test]
fn test_refined_tickets_keyed_by_id() {
    let store = SprintStore::new(MemoryStore::new());
    let backlog = Backlog::embedded().unwrap();

    for id in ["ALN-101", "ALN-115"] {
        let result = refine_ticket(backlog.ticket(id).unwrap(), None);
        store.save_refined_ticket(&result).unwrap();
    }
    // Refining again replaces the earlier record.
    let again = refine_ticket(backlog.ticket("ALN-101").unwrap(), None);
    store.save_refined_ticket(&again).unwrap();

    let all = store.refined_tickets();
    assert_eq!(all.keys().collect::<Vec<_>>(), vec!["ALN-101", "ALN-115"]);

    let record = store.refined_ticket("ALN-115").unwrap();
    assert_eq!(record.result.refined.suggested_points, Some(8));
    assert!(store.refined_ticket("ALN-999").is_none());

    store.clear_refined_tickets().unwrap();
    assert!(store.refined_tickets().is_empty());
}

#[test]
fn test_refinement_merges_into_current_sprint() {
    let store = SprintStore::new(MemoryStore::new());
    let backlog = Backlog::embedded().unwrap();
    store.save_current_sprint(&sprint("Fix Q3 retention issues")).unwrap();

    let result = refine_ticket(backlog.ticket("ALN-101").unwrap(), None);
    assert!(store.save_refined_ticket(&result).unwrap());

    let current = store.current_sprint().unwrap();
    let merged = current.selected.iter().find(|t| t.id() == "ALN-101").unwrap();
    assert!(merged.is_refined);
    assert_eq!(
        merged.ticket.title,
        "Implement: onboarding checklist drops users after step 3"
    );
    assert!(merged.ticket.acceptance_criteria.is_some());
    assert_eq!(merged.ticket.story_points, 5);
    assert!(current.selected.iter().filter(|t| t.id() != "ALN-101").all(|t| !t.is_refined));

    // Not in the sprint: stored, but the sprint is untouched.
    let outside = refine_ticket(backlog.ticket("ALN-115").unwrap(), None);
    assert!(!store.save_refined_ticket(&outside).unwrap());
    assert!(store.current_sprint().unwrap().selected.iter().all(|t| t.id() != "ALN-115"));
    assert!(store.refined_ticket("ALN-115").is_some());
}

#[test]
fn test_refinement_without_current_sprint_is_only_stored() {
    let store = SprintStore::new(MemoryStore::new());
    let backlog = Backlog::embedded().unwrap();
    let result = refine_ticket(backlog.ticket("ALN-101").unwrap(), None);
    assert!(!store.save_refined_ticket(&result).unwrap());
    assert!(store.current_sprint().is_none());
    assert!(store.refined_ticket("ALN-101").is_some());
}

#[test]
fn test_current_sprint_round_trip() {
    let temp = TempDir::new().unwrap();
    let store = SprintStore::new(FileStore::new(temp.path()));
    let current = sprint("Fix Q3 retention issues");

    store.save_current_sprint(&current).unwrap();
    let loaded = store.current_sprint().unwrap();
    assert_eq!(loaded.strategy, current.strategy);
    assert_eq!(loaded.summary, current.summary);
    assert_eq!(loaded.selection().selected_ids(), current.selection().selected_ids());
    assert_eq!(loaded.saved_at, current.saved_at);

    store.clear_current_sprint().unwrap();
    assert!(store.current_sprint().is_none());
}

#[test]
fn test_reject_through_snapshot() {
    let mut current = sprint("Fix Q3 retention issues");
    let first = current.selected[0].ticket.id.clone();
    let backup = current.backups[0].ticket.id.clone();

    let mut selection = current.selection();
    selection.reject(&first).unwrap();
    current.apply(selection);

    assert!(current.selected.iter().all(|t| t.ticket.id != first));
    assert_eq!(current.selected.last().unwrap().ticket.id, backup);
}

#[test]
fn test_history_is_newest_first_and_capped() {
    let store = SprintStore::new(MemoryStore::new());
    let current = sprint("retention");
    let start = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();

    for i in 0..12 {
        store
            .add_to_history_at(&current, i, start + Duration::days(i as i64))
            .unwrap();
    }

    let history = store.sprint_history();
    assert_eq!(history.len(), MAX_HISTORY);
    assert_eq!(history[0].refined_count, 11);
    assert_eq!(history[9].refined_count, 2);
    assert_eq!(
        history[0].id,
        format!("sprint-{}", (start + Duration::days(11)).timestamp_millis())
    );

    store.clear_sprint_history().unwrap();
    assert!(store.sprint_history().is_empty());
}

#[test]
fn test_history_averages() {
    assert!(history_averages(&[]).is_none());

    let current = sprint("retention");
    let now = Utc::now();
    let mut a = HistoryEntry::from_sprint(&current, 0, now);
    let mut b = a.clone();
    a.summary.total_points = 10;
    a.summary.strategic_fit = 40;
    a.summary.capacity_utilization = 90;
    b.summary.total_points = 15;
    b.summary.strategic_fit = 51;
    b.summary.capacity_utilization = 100;

    let avg = history_averages(&[a, b]).unwrap();
    assert_eq!(avg.points, 13);
    assert_eq!(avg.strategic_fit, 46);
    assert_eq!(avg.capacity_utilization, 95);
}

#[test]
fn test_clear_all() {
    let temp = TempDir::new().unwrap();
    let store = SprintStore::new(FileStore::new(temp.path()));
    store.save_draft_strategy("x").unwrap();
    store.save_current_sprint(&sprint("x")).unwrap();
    store.add_to_history(&sprint("x"), 0).unwrap();

    store.clear_all().unwrap();
    assert!(store.draft_strategy().is_none());
    assert!(store.current_sprint().is_none());
    assert!(store.sprint_history().is_empty());
}
