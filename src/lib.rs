//! Align: deterministic sprint planning.
//!
//! Turns a free-text strategy and a ticket backlog into a capacity-bounded
//! sprint selection, and suggests refinements for individual tickets. Every
//! "AI" decision is driven by a seeded PRNG, so the same inputs always give
//! the same plan.
//!
//! ## State
//!
//! Working state lives in `.align/` (configurable):
//! - `.align/align_current_sprint.json` - The sprint being planned
//! - `.align/align_refined_tickets.json` - Refinements keyed by ticket id
//! - `.align/align_sprint_history.json` - Launched sprints, newest first
//! - `.align/align_draft_strategy.json` - Last strategy text
//! - `.align/activity.log` - Activity log

pub mod color;
pub mod config;
pub mod export;
pub mod log;
pub mod planning;
pub mod random;
pub mod refine;
pub mod store;
pub mod team;
pub mod telemetry;
#[doc(hidden)]
pub mod testutil;
pub mod ticket;
