use std::env;

use super::types::Config;
use crate::planning::CapacityMode;

/// Apply `ALIGN_*` variables. Values that fail to parse are ignored.
pub(super) fn apply_env(config: &mut Config) {
    if let Ok(val) = env::var("ALIGN_CAPACITY_POINTS") {
        if let Ok(n) = val.trim().parse() {
            config.planning_capacity_points = n;
        }
    }
    if let Ok(val) = env::var("ALIGN_CAPACITY_MODE") {
        if let Some(mode) = CapacityMode::parse(&val) {
            config.planning_capacity_mode = mode;
        }
    }
    if let Ok(val) = env::var("ALIGN_DEBT_PERCENT") {
        if let Ok(n) = val.trim().parse::<u32>() {
            if n <= 100 {
                config.planning_debt_percent = n;
            }
        }
    }
    if let Ok(val) = env::var("ALIGN_STATE_DIR") {
        config.files_state_dir = val;
    }
    if let Ok(val) = env::var("ALIGN_BACKLOG_FILE") {
        config.files_backlog = Some(val);
    }
    if let Ok(val) = env::var("ALIGN_ROSTER_FILE") {
        config.files_roster = Some(val);
    }
    if let Ok(val) = env::var("ALIGN_MOCK_MODE") {
        config.refine_mock_mode = val != "false";
    }
}
