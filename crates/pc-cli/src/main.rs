use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pc_cli::commands::{chart, events, punch, report, status};
use pc_cli::{Cli, Commands, Config, PunchArgs};
use pc_core::Status;

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(pc_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = pc_db::Database::open(&config.database_path).context("failed to open database")?;
    Ok((db, config))
}

fn run_punch(config_path: Option<&Path>, status: Status, args: &PunchArgs) -> Result<()> {
    let (mut db, config) = open_database(config_path)?;
    let mut stdout = std::io::stdout();
    punch::run(
        &mut stdout,
        &mut db,
        &config,
        status,
        args,
        Utc::now(),
        &Local,
    )?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config_path = cli.config.as_deref();
    match &cli.command {
        Some(Commands::In(args)) => run_punch(config_path, Status::ClockedIn, args)?,
        Some(Commands::Out(args)) => run_punch(config_path, Status::ClockedOut, args)?,
        Some(Commands::Break(args)) => run_punch(config_path, Status::OnBreak, args)?,
        Some(Commands::Lunch(args)) => run_punch(config_path, Status::OnLunch, args)?,
        Some(Commands::Status) => {
            let (db, config) = open_database(config_path)?;
            status::run(&mut std::io::stdout(), &db, &config, Utc::now(), &Local)?;
        }
        Some(Commands::Report { json }) => {
            let (db, config) = open_database(config_path)?;
            report::run(&db, &config, *json)?;
        }
        Some(Commands::Chart {
            weekly: _,
            monthly,
            json,
        }) => {
            let (db, config) = open_database(config_path)?;
            let span = if *monthly {
                chart::Span::Month
            } else {
                chart::Span::Week
            };
            chart::run(&db, &config, span, *json)?;
        }
        Some(Commands::Events { limit, since }) => {
            let (db, config) = open_database(config_path)?;
            events::run(
                &mut std::io::stdout(),
                &db,
                &config,
                *limit,
                since.as_deref(),
                Utc::now(),
            )?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
