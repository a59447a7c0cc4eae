//! Test utilities for align.
//!
//! Config loading reads `align.toml` from the working directory and
//! `ALIGN_*` environment variables, both process-wide. Tests touching either
//! go through the helpers here, which serialize on a global lock.

#[cfg(test)]
use std::sync::Mutex;

#[cfg(test)]
use tempfile::TempDir;

/// Global mutex for tests that change the working directory or environment.
#[cfg(test)]
pub static PROCESS_LOCK: Mutex<()> = Mutex::new(());

/// Every environment variable the config layer reads.
#[cfg(test)]
pub const ALIGN_ENV_VARS: [&str; 7] = [
    "ALIGN_CAPACITY_POINTS",
    "ALIGN_CAPACITY_MODE",
    "ALIGN_DEBT_PERCENT",
    "ALIGN_STATE_DIR",
    "ALIGN_BACKLOG_FILE",
    "ALIGN_ROSTER_FILE",
    "ALIGN_MOCK_MODE",
];

/// Execute a closure in a fresh temporary directory with no `ALIGN_*`
/// variables set, restoring the original directory afterward.
///
/// # Panics
///
/// Panics if the current directory cannot be determined, the temp directory
/// cannot be created, or the directory changes fail.
#[cfg(test)]
pub fn with_temp_cwd<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = PROCESS_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    for var in ALIGN_ENV_VARS {
        std::env::remove_var(var);
    }
    let original = std::env::current_dir().expect("failed to get current directory");
    let temp = TempDir::new().expect("failed to create temp directory");
    std::env::set_current_dir(temp.path()).expect("failed to change to temp directory");
    let result = f();
    std::env::set_current_dir(original).expect("failed to restore original directory");
    for var in ALIGN_ENV_VARS {
        std::env::remove_var(var);
    }
    result
}
