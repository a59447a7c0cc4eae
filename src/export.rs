//! CSV reports.
//!
//! Three reports are produced: the sprint candidate list with its summary, the
//! sprint history, and the team capacity breakdown. Fields are quoted only when
//! they need to be.

use std::string::FromUtf8Error;

use chrono::{DateTime, SecondsFormat, Utc};
use csv::{Writer, WriterBuilder};
use thiserror::Error;

use crate::planning::{ScoredTicket, Summary};
use crate::store::HistoryEntry;
use crate::team::{capacity_by_role, net_availability, team_totals, Roster};

/// Column headers of the candidate report.
pub const CANDIDATE_HEADERS: [&str; 8] = [
    "ID",
    "Title",
    "Priority",
    "Story Points",
    "Labels",
    "Tech Debt",
    "Selection Reason",
    "AI Confidence",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV output is not UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// Accumulates CSV sections separated by blank lines.
struct Report {
    out: String,
}

impl Report {
    fn new() -> Self {
        Self { out: String::new() }
    }

    /// Append rows of any width as one section.
    fn section<I, R>(&mut self, rows: I) -> Result<(), ExportError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator,
        R::Item: AsRef<[u8]>,
    {
        let mut writer: Writer<Vec<u8>> = WriterBuilder::new().flexible(true).from_writer(Vec::new());
        for row in rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        self.out.push_str(&String::from_utf8(bytes)?);
        Ok(())
    }

    fn blank_line(&mut self) {
        self.out.push('\n');
    }

    fn finish(self) -> String {
        self.out
    }
}

fn percent(value: u32) -> String {
    format!("{}%", value)
}

fn generated_row(at: DateTime<Utc>) -> Vec<String> {
    vec![
        "Generated".to_string(),
        at.to_rfc3339_opts(SecondsFormat::Millis, true),
    ]
}

/// Candidate list followed by a summary block.
pub fn sprint_candidates_csv(tickets: &[ScoredTicket], summary: &Summary) -> Result<String, ExportError> {
    let mut report = Report::new();

    let mut rows = vec![CANDIDATE_HEADERS.iter().map(|h| h.to_string()).collect::<Vec<_>>()];
    rows.extend(tickets.iter().map(|t| {
        vec![
            t.ticket.id.clone(),
            t.ticket.title.clone(),
            t.ticket.priority.to_string(),
            t.ticket.story_points.to_string(),
            t.ticket.labels.join(", "),
            if t.ticket.tech_debt { "Yes" } else { "No" }.to_string(),
            t.selection_reason.clone().unwrap_or_default(),
            percent((t.confidence * 100.0).round() as u32),
        ]
    }));
    report.section(rows)?;
    report.blank_line();

    report.section(vec![
        vec!["Sprint Summary".to_string()],
        vec!["Total Points".to_string(), summary.total_points.to_string()],
        vec!["Feature Points".to_string(), summary.feature_points.to_string()],
        vec!["Tech Debt Points".to_string(), summary.tech_debt_points.to_string()],
        vec!["Strategic Fit".to_string(), percent(summary.strategic_fit)],
        vec!["Capacity Utilization".to_string(), percent(summary.capacity_utilization)],
    ])?;

    Ok(report.finish())
}

/// One row per launched sprint.
pub fn sprint_history_csv(entries: &[HistoryEntry], generated_at: DateTime<Utc>) -> Result<String, ExportError> {
    let mut report = Report::new();
    report.section(vec![vec!["Sprint History Report".to_string()], generated_row(generated_at)])?;
    report.blank_line();

    let mut rows = vec![[
        "Sprint ID",
        "Date",
        "Total Points",
        "Tickets Count",
        "Strategic Fit %",
        "Capacity Utilization %",
        "AI Refined Count",
    ]
    .iter()
    .map(|h| h.to_string())
    .collect::<Vec<_>>()];
    rows.extend(entries.iter().map(|e| {
        vec![
            e.id.clone(),
            e.launched_at.format("%Y-%m-%d").to_string(),
            e.summary.total_points.to_string(),
            e.summary.ticket_count.to_string(),
            percent(e.summary.strategic_fit),
            percent(e.summary.capacity_utilization),
            e.refined_count.to_string(),
        ]
    }));
    report.section(rows)?;

    Ok(report.finish())
}

/// Summary, per-role, per-member and deduction sections.
pub fn team_capacity_csv(roster: &Roster, generated_at: DateTime<Utc>) -> Result<String, ExportError> {
    let totals = team_totals(roster);
    let mut report = Report::new();

    report.section(vec![vec!["Team Capacity Report".to_string()], generated_row(generated_at)])?;
    report.blank_line();

    report.section(vec![
        vec!["SUMMARY".to_string()],
        vec!["Metric".to_string(), "Value".to_string()],
        vec!["Total Base Capacity".to_string(), totals.total_base.to_string()],
        vec!["Total Deductions".to_string(), totals.total_deductions.to_string()],
        vec!["Net Available".to_string(), totals.total_net.to_string()],
        vec!["Currently Assigned".to_string(), totals.total_assigned.to_string()],
        vec!["Unassigned Points".to_string(), totals.available_points.to_string()],
        vec!["Overall Utilization".to_string(), percent(totals.overall_utilization)],
    ])?;
    report.blank_line();

    let mut rows = vec![
        vec!["CAPACITY BY ROLE".to_string()],
        ["Role", "Net Capacity", "Assigned", "Available", "Members"]
            .iter()
            .map(|h| h.to_string())
            .collect(),
    ];
    for cap in capacity_by_role(roster) {
        rows.push(vec![
            cap.role,
            cap.net.to_string(),
            cap.assigned.to_string(),
            cap.available.to_string(),
            cap.members.join(", "),
        ]);
    }
    report.section(rows)?;
    report.blank_line();

    let mut rows = vec![
        vec!["INDIVIDUAL BREAKDOWN".to_string()],
        [
            "Name",
            "Role",
            "Base Points",
            "Total Deductions",
            "Net Available",
            "Assigned",
            "Utilization %",
        ]
        .iter()
        .map(|h| h.to_string())
        .collect(),
    ];
    for member in &roster.members {
        let net = net_availability(member);
        // Unlike the capacity view, a member with no availability reports 0 here.
        let utilization = if net > 0 {
            ((f64::from(member.assigned_points) / f64::from(net)) * 100.0).round() as u32
        } else {
            0
        };
        rows.push(vec![
            member.name.clone(),
            member.role.clone(),
            member.base_points.to_string(),
            member.total_deductions().to_string(),
            net.to_string(),
            member.assigned_points.to_string(),
            percent(utilization),
        ]);
    }
    report.section(rows)?;
    report.blank_line();

    let mut rows = vec![
        vec!["DEDUCTIONS DETAIL".to_string()],
        ["Name", "Deduction Type", "Points", "Reason"]
            .iter()
            .map(|h| h.to_string())
            .collect(),
    ];
    for member in &roster.members {
        for deduction in &member.deductions {
            rows.push(vec![
                member.name.clone(),
                deduction.kind.clone(),
                deduction.value.to_string(),
                deduction.reason.clone(),
            ]);
        }
    }
    report.section(rows)?;

    Ok(report.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::planning::{select_candidates, SelectionParams};
    use crate::random::Seed;
    use crate::store::CurrentSprint;
    use crate::ticket::{Backlog, Priority, Ticket};

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_candidates_csv_layout() {
        let tickets = Backlog::embedded().unwrap().tickets;
        let result = select_candidates(
            "Fix Q3 retention issues",
            &tickets,
            &Seed::Number(12345),
            &SelectionParams::default(),
        );
        let csv = sprint_candidates_csv(&result.selected, &result.summary).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "ID,Title,Priority,Story Points,Labels,Tech Debt,Selection Reason,AI Confidence"
        );
        assert!(lines[1].starts_with(
            "ALN-101,Onboarding checklist drops users after step 3,high,5,\"retention, ux\",No,"
        ));
        assert!(lines[1].ends_with('%'));
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "Sprint Summary");
        assert_eq!(lines[7], "Total Points,17");
        assert_eq!(lines[10], "Strategic Fit,50%");
        assert_eq!(lines[11], "Capacity Utilization,94%");
    }

    #[test]
    fn test_candidates_csv_escapes_quotes() {
        let mut ticket = Ticket::new("X-1", "Say \"hello\", world", Priority::Low, 1);
        ticket.tech_debt = true;
        let result = select_candidates(
            "",
            &[ticket],
            &Seed::Number(1),
            &SelectionParams {
                debt_percent: 100,
                ..SelectionParams::default()
            },
        );
        let csv = sprint_candidates_csv(&result.selected, &result.summary).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("X-1,\"Say \"\"hello\"\", world\",low,1,,Yes,Tech debt allocation,"));
    }

    #[test]
    fn test_history_csv() {
        let tickets = Backlog::embedded().unwrap().tickets;
        let params = SelectionParams::default();
        let result = select_candidates("retention", &tickets, &Seed::Number(12345), &params);
        let sprint = CurrentSprint::new("retention", &params, result);
        let entry = HistoryEntry::from_sprint(&sprint, 3, fixed_time());

        let csv = sprint_history_csv(&[entry.clone()], fixed_time()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Sprint History Report");
        assert_eq!(lines[1], "Generated,2026-05-04T12:30:00.000Z");
        assert_eq!(lines[2], "");
        assert!(lines[3].starts_with("Sprint ID,Date,"));
        assert_eq!(
            lines[4],
            format!(
                "{},2026-05-04,{},{},{}%,{}%,3",
                entry.id,
                entry.summary.total_points,
                entry.summary.ticket_count,
                entry.summary.strategic_fit,
                entry.summary.capacity_utilization
            )
        );
    }

    #[test]
    fn test_team_capacity_csv() {
        let roster = Roster::embedded().unwrap();
        let csv = team_capacity_csv(&roster, fixed_time()).unwrap();

        assert!(csv.starts_with("Team Capacity Report\nGenerated,2026-05-04T12:30:00.000Z\n\nSUMMARY\n"));
        assert!(csv.contains("Net Available,35\n"));
        assert!(csv.contains("Overall Utilization,57%\n"));
        assert!(csv.contains("Frontend,18,11,7,\"Sarah, Alex\"\n"));
        let frontend = csv.find("\nFrontend,18").unwrap();
        let backend = csv.find("\nBackend,10").unwrap();
        assert!(frontend < backend);
        assert!(csv.contains("Sarah,Frontend,10,2,8,5,63%\n"));
        assert!(csv.contains("Jordan,Shadow Project,2,DevOps migration support\n"));
    }
}
