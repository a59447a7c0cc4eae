use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use align::color::{self, emoji};
use align::config::{Config, DEFAULT_CONFIG_FILE};

/// Write `align.toml` and create the state directory.
pub fn cmd_init(config: &Config, force: bool) -> Result<()> {
    println!("Initializing align...");

    let config_path = Path::new(DEFAULT_CONFIG_FILE);
    if config_path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", DEFAULT_CONFIG_FILE);
    }
    fs::write(config_path, Config::default_toml())
        .with_context(|| format!("failed to write {}", DEFAULT_CONFIG_FILE))?;
    println!("  Created {}", DEFAULT_CONFIG_FILE);

    fs::create_dir_all(&config.files_state_dir)
        .with_context(|| format!("failed to create state dir {}", config.files_state_dir))?;
    println!("  Created state directory: {}", config.files_state_dir);

    super::record_activity(config, "init", "Initialized align");

    println!("\n{} {}", emoji::CHECK, color::success("Align initialized."));
    println!("  Use 'align demos' to list demo strategies.");
    println!("  Use 'align select \"<strategy>\"' to plan a sprint.");
    Ok(())
}
