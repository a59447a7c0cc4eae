use std::fmt;

use serde::Serialize;

use super::{Roster, TeamMember};

/// Utilization below this is underutilized.
const UNDERUTILIZED_BELOW: u32 = 50;

/// Utilization up to and including this is optimal.
const OPTIMAL_UP_TO: u32 = 85;

/// Points a member can take on after deductions, never negative.
pub fn net_availability(member: &TeamMember) -> u32 {
    member.base_points.saturating_sub(member.total_deductions())
}

/// Assigned points as a percentage of net availability.
///
/// A member with no availability reports 100.
pub fn utilization(member: &TeamMember) -> u32 {
    let net = net_availability(member);
    if net == 0 {
        return 100;
    }
    ((f64::from(member.assigned_points) / f64::from(net)) * 100.0).round() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CapacityStatus {
    Underutilized,
    Optimal,
    Overloaded,
}

impl CapacityStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Underutilized => "underutilized",
            Self::Optimal => "optimal",
            Self::Overloaded => "overloaded",
        }
    }
}

impl fmt::Display for CapacityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn capacity_status(member: &TeamMember) -> CapacityStatus {
    match utilization(member) {
        u if u < UNDERUTILIZED_BELOW => CapacityStatus::Underutilized,
        u if u <= OPTIMAL_UP_TO => CapacityStatus::Optimal,
        _ => CapacityStatus::Overloaded,
    }
}

/// Whole-team totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamTotals {
    pub total_base: u32,
    pub total_deductions: u32,
    pub total_net: u32,
    pub total_assigned: u32,
    /// Net minus assigned; negative when the team is over-assigned.
    pub available_points: i64,
    pub overall_utilization: u32,
}

pub fn team_totals(roster: &Roster) -> TeamTotals {
    let members = &roster.members;
    let total_base = members.iter().map(|m| m.base_points).sum();
    let total_deductions = members.iter().map(TeamMember::total_deductions).sum();
    let total_net: u32 = members.iter().map(net_availability).sum();
    let total_assigned: u32 = members.iter().map(|m| m.assigned_points).sum();

    let overall_utilization = if total_net > 0 {
        ((f64::from(total_assigned) / f64::from(total_net)) * 100.0).round() as u32
    } else {
        0
    };

    TeamTotals {
        total_base,
        total_deductions,
        total_net,
        total_assigned,
        available_points: i64::from(total_net) - i64::from(total_assigned),
        overall_utilization,
    }
}

/// Capacity aggregated over one role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleCapacity {
    pub role: String,
    pub net: u32,
    pub assigned: u32,
    pub available: i64,
    /// Member names in roster order.
    pub members: Vec<String>,
}

/// Capacity per role, in the order each role first appears in the roster.
pub fn capacity_by_role(roster: &Roster) -> Vec<RoleCapacity> {
    let mut by_role: Vec<RoleCapacity> = Vec::new();
    for member in &roster.members {
        let net = net_availability(member);
        let index = match by_role.iter().position(|r| r.role == member.role) {
            Some(index) => index,
            None => {
                by_role.push(RoleCapacity {
                    role: member.role.clone(),
                    ..RoleCapacity::default()
                });
                by_role.len() - 1
            }
        };
        let entry = &mut by_role[index];
        entry.net += net;
        entry.assigned += member.assigned_points;
        entry.available += i64::from(net) - i64::from(member.assigned_points);
        entry.members.push(member.name.clone());
    }
    by_role
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BottleneckKind {
    MissingRole,
    CapacityMismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Warning,
    Error,
}

/// A role that cannot absorb the work required of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BottleneckAlert {
    #[serde(rename = "type")]
    pub kind: BottleneckKind,
    pub severity: AlertSeverity,
    pub message: String,
    pub role: String,
    pub deficit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<u32>,
}

/// Compare required points per role against what each role has left.
///
/// Alerts come out in the iteration order of `required_by_role`.
pub fn detect_bottlenecks<'a, I>(roster: &Roster, required_by_role: I) -> Vec<BottleneckAlert>
where
    I: IntoIterator<Item = (&'a str, u32)>,
{
    let capacity = capacity_by_role(roster);
    let mut alerts = Vec::new();

    for (role, required) in required_by_role {
        match capacity.iter().find(|c| c.role == role) {
            None => alerts.push(BottleneckAlert {
                kind: BottleneckKind::MissingRole,
                severity: AlertSeverity::Error,
                message: format!(
                    "No {} engineers available. {} points unassignable.",
                    role, required
                ),
                role: role.to_string(),
                deficit: i64::from(required),
                available: None,
                required: None,
            }),
            Some(cap) if i64::from(required) > cap.available => {
                let deficit = i64::from(required) - cap.available;
                alerts.push(BottleneckAlert {
                    kind: BottleneckKind::CapacityMismatch,
                    severity: AlertSeverity::Warning,
                    message: format!(
                        "Resource Mismatch: {} {} points are unassigned due to capacity constraints.",
                        deficit, role
                    ),
                    role: role.to_string(),
                    deficit,
                    available: Some(cap.available),
                    required: Some(required),
                });
            }
            Some(_) => {}
        }
    }

    alerts
}
