use anyhow::Result;

use align::color::{self, emoji};
use align::config::Config;
use align::team::{
    capacity_by_role, capacity_status, detect_bottlenecks, net_availability, team_totals,
    utilization, AlertSeverity,
};

/// Show team capacity, per-role capacity and bottlenecks for `needs`.
pub fn cmd_team(config: &Config, needs: &[(String, u32)], json: bool) -> Result<()> {
    let roster = super::load_roster(config)?;
    let totals = team_totals(&roster);
    let roles = capacity_by_role(&roster);
    let alerts = detect_bottlenecks(&roster, needs.iter().map(|(role, points)| (role.as_str(), *points)));

    if json {
        let output = serde_json::json!({
            "members": roster.members,
            "totals": totals,
            "roles": roles,
            "bottlenecks": alerts,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{} {}:", emoji::TEAM, color::label("Team Capacity"));
    for member in &roster.members {
        let status = capacity_status(member);
        println!(
            "  {:<3} {:<18} {:<10} net {:>2}  assigned {:>2}  {:>3}%  {}",
            member.initials,
            member.name,
            member.role,
            net_availability(member),
            member.assigned_points,
            utilization(member),
            color::capacity_status(status)
        );
        for deduction in &member.deductions {
            println!(
                "        -{} {} ({})",
                deduction.value,
                deduction.kind,
                color::timestamp(&deduction.reason)
            );
        }
    }

    println!();
    println!(
        "  {} base {}, deductions {}, net {}, assigned {}, available {}, utilization {}%",
        color::label("Totals:"),
        totals.total_base,
        totals.total_deductions,
        color::number(totals.total_net),
        totals.total_assigned,
        color::number(totals.available_points),
        totals.overall_utilization
    );

    println!("\n{}:", color::label("By Role"));
    for capacity in &roles {
        println!(
            "  {:<10} net {:>2}  assigned {:>2}  available {:>3}  ({})",
            capacity.role,
            capacity.net,
            capacity.assigned,
            capacity.available,
            capacity.members.join(", ")
        );
    }

    if !needs.is_empty() {
        println!("\n{}:", color::label("Bottlenecks"));
        if alerts.is_empty() {
            println!("  {} {}", emoji::CHECK, color::success("Every role can absorb the required work"));
        }
        for alert in &alerts {
            let message = match alert.severity {
                AlertSeverity::Error => color::error(&alert.message),
                AlertSeverity::Warning => color::warning(&alert.message),
            };
            println!("  {} {}", emoji::WARNING, message);
        }
    }
    Ok(())
}
