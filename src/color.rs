//! Terminal color utilities using ANSI escape codes.
//!
//! Provides colored output for priorities, capacity status, confidence scores
//! and activity log lines.

use crate::planning::WarningKind;
use crate::team::CapacityStatus;
use crate::ticket::Priority;

/// ANSI color codes
pub mod codes {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";

    pub const BRIGHT_CYAN: &str = "\x1b[96m";
}

use codes::*;

fn paint(style: &str, text: &str) -> String {
    format!("{}{}{}", style, text, RESET)
}

/// Color a timestamp (dim).
pub fn timestamp(ts: &str) -> String {
    paint(DIM, ts)
}

/// Color success messages (green).
pub fn success(text: &str) -> String {
    paint(GREEN, text)
}

/// Color error messages (red).
pub fn error(text: &str) -> String {
    paint(RED, text)
}

/// Color warning messages (yellow).
pub fn warning(text: &str) -> String {
    paint(YELLOW, text)
}

/// Color info messages (cyan).
pub fn info(text: &str) -> String {
    paint(CYAN, text)
}

/// Color a label (bold).
pub fn label(text: &str) -> String {
    paint(BOLD, text)
}

/// Color a number/count (bright cyan).
pub fn number(n: impl std::fmt::Display) -> String {
    format!("{}{}{}", BRIGHT_CYAN, n, RESET)
}

/// Ticket id (bold blue).
pub fn ticket_id(id: &str) -> String {
    format!("{}{}{}{}", BOLD, BLUE, id, RESET)
}

pub fn priority(priority: Priority) -> String {
    let style = match priority {
        Priority::High => RED,
        Priority::Medium => YELLOW,
        Priority::Low => DIM,
    };
    paint(style, priority.as_str())
}

pub fn capacity_status(status: CapacityStatus) -> String {
    let style = match status {
        CapacityStatus::Underutilized => BLUE,
        CapacityStatus::Optimal => GREEN,
        CapacityStatus::Overloaded => RED,
    };
    paint(style, status.as_str())
}

/// Percentage colored by how much to trust it.
pub fn confidence(value: f64) -> String {
    let text = format!("{}%", (value * 100.0).round());
    let style = if value < 0.7 {
        YELLOW
    } else if value >= 0.85 {
        GREEN
    } else {
        CYAN
    };
    paint(style, &text)
}

pub fn warning_kind(kind: WarningKind) -> String {
    let style = match kind {
        WarningKind::Capacity => YELLOW,
        WarningKind::Risk => MAGENTA,
    };
    paint(style, kind.as_str())
}

/// Colorize an activity line in the format `timestamp | actor | message`.
pub fn activity_line(line: &str) -> String {
    let parts: Vec<&str> = line.splitn(3, " | ").collect();
    if parts.len() != 3 {
        return line.to_string();
    }
    format!(
        "{} | {} | {}",
        timestamp(parts[0]),
        label(parts[1]),
        parts[2]
    )
}

/// Emoji constants for consistent usage
pub mod emoji {
    pub const ROCKET: &str = "🚀";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARNING: &str = "⚠️";
    pub const SPRINT: &str = "🏃";
    pub const TASK: &str = "📋";
    pub const SPARKLES: &str = "✨";
    pub const BRAIN: &str = "🧠";
    pub const TEAM: &str = "👥";
    pub const CLOCK: &str = "🕐";
}
