use std::process;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use align::config::{CliArgs, Command, Config};
use align::telemetry;

mod commands;

fn main() {
    let cli = CliArgs::parse();
    telemetry::init_tracing(telemetry::level_for(cli.verbose));

    if let Err(e) = run(&cli) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &CliArgs) -> Result<()> {
    let Some(ref command) = cli.command else {
        CliArgs::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load(cli).context("failed to load configuration")?;
    tracing::debug!(?config, "configuration loaded");

    match command {
        Command::Init { force } => commands::cmd_init(&config, *force),
        Command::Demos => commands::cmd_demos(&config),
        Command::Select {
            strategy,
            demo,
            seed,
            json,
            ..
        } => commands::cmd_select(
            &config,
            strategy.as_deref(),
            demo.as_deref(),
            seed.as_deref(),
            *json,
        ),
        Command::Refine { id, seed, json } => {
            commands::cmd_refine(&config, id, seed.as_deref(), *json)
        }
        Command::Reject { id } => commands::cmd_reject(&config, id),
        Command::Launch { confirm } => commands::cmd_launch(&config, *confirm),
        Command::Status => commands::cmd_status(&config),
        Command::History { clear } => commands::cmd_history(&config, *clear),
        Command::Team { needs, json } => commands::cmd_team(&config, needs, *json),
        Command::Export { report, output } => {
            commands::cmd_export(&config, *report, output.as_deref())
        }
        Command::Reset => commands::cmd_reset(&config),
    }
}
