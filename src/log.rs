//! Append-only activity log with rotation.
//!
//! Every state-changing command records a line in `<state_dir>/activity.log`
//! so a team can see who planned, refined or launched what. The file is
//! rotated to a timestamped backup once it grows past a line limit.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

/// Default maximum number of lines before rotation.
pub const DEFAULT_MAX_LINES: usize = 1000;

/// Log file name inside the state directory.
pub const ACTIVITY_LOG_FILE: &str = "activity.log";

/// Activity log for one state directory.
pub struct ActivityLog {
    /// Path to the log file.
    pub path: PathBuf,
    /// Maximum lines before rotation.
    pub max_lines: usize,
    /// Who is acting, recorded on every line.
    pub actor: String,
}

impl ActivityLog {
    /// Create a log under `state_dir` attributed to `actor`.
    pub fn new(state_dir: &Path, actor: &str) -> Self {
        Self {
            path: state_dir.join(ACTIVITY_LOG_FILE),
            max_lines: DEFAULT_MAX_LINES,
            actor: actor.to_string(),
        }
    }

    /// Create a log with a custom max lines setting.
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    /// Append an entry.
    ///
    /// Format: `YYYY-MM-DD HH:MM:SS | <actor> | <message>`
    pub fn record(&self, message: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let line = format!("{} | {} | {}\n", timestamp, self.actor, message);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.flush()?;

        if count_lines(&self.path)? > self.max_lines {
            rotate_log(&self.path)?;
        }
        Ok(())
    }

    /// Read all lines from the log file.
    pub fn read_all(&self) -> io::Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        BufReader::new(File::open(&self.path)?).lines().collect()
    }

    /// Read the last `n` lines.
    pub fn read_recent(&self, n: usize) -> io::Result<Vec<String>> {
        let all_lines = self.read_all()?;
        let start = all_lines.len().saturating_sub(n);
        Ok(all_lines[start..].to_vec())
    }
}

/// Count lines in a file.
pub fn count_lines(path: &Path) -> io::Result<usize> {
    let reader = BufReader::new(File::open(path)?);
    Ok(reader.lines().count())
}

/// Move the log to `<name>.<timestamp>.bak` and start a fresh one.
pub fn rotate_log(path: &Path) -> io::Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    let backup_name = format!(
        "{}.{}.bak",
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("activity.log"),
        timestamp
    );
    fs::rename(path, path.with_file_name(backup_name))?;
    File::create(path)?;
    Ok(())
}
