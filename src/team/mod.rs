//! Team roster and capacity arithmetic.
//!
//! The roster is TOML (see `data/roster.toml` for the embedded default). Each
//! member has a base point capacity, deductions for leave or side projects,
//! and points already assigned.

mod capacity;
mod roster;


pub use capacity::{
    capacity_by_role, capacity_status, detect_bottlenecks, net_availability, team_totals,
    utilization, AlertSeverity, BottleneckAlert, BottleneckKind, CapacityStatus, RoleCapacity,
    TeamTotals,
};
pub use roster::{Deduction, Roster, RosterError, TeamMember};
