use std::io::{self, Write};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pc_cli::catalog::Catalog;
use pc_cli::commands::{day, home, mark, plan, run, status, validate};
use pc_cli::{Cli, Commands, Config};
use pc_core::ProgressStore;
use pc_db::Database;

/// Open the database, ensuring the parent directory exists.
fn open_database(config: &Config) -> Result<Database> {
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }
    Database::open(&config.database_path).with_context(|| {
        format!(
            "failed to open database at {}",
            config.database_path.display()
        )
    })
}

/// Open the database wrapped with the configured key namespace.
fn open_progress(config: &Config) -> Result<ProgressStore<Database>> {
    Ok(ProgressStore::new(
        open_database(config)?,
        config.namespace.clone(),
    ))
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
        .with_writer(io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut stdout = io::stdout().lock();

    match &cli.command {
        Some(Commands::Home { week, json }) => {
            let catalog = Catalog::load(&config)?;
            let mut progress = open_progress(&config)?;
            home::run(&mut stdout, &catalog, &mut progress, *week, *json)?;
        }
        Some(Commands::Day(args)) => {
            let catalog = Catalog::load(&config)?;
            let progress = open_progress(&config)?;
            day::run(&mut stdout, &catalog, &progress, args.week, &args.day)?;
        }
        Some(Commands::Plan { day, json }) => {
            // Plan only reads the program, no database needed
            let catalog = Catalog::load(&config)?;
            plan::run(&mut stdout, &catalog, day.week, &day.day, *json)?;
        }
        Some(Commands::Run(args)) => {
            let catalog = Catalog::load(&config)?;
            let mut progress = open_progress(&config)?;
            run::run(
                &mut stdout,
                &catalog,
                &mut progress,
                &config,
                args.week,
                &args.day,
            )?;
        }
        Some(Commands::Done(args)) => {
            let catalog = Catalog::load(&config)?;
            let mut progress = open_progress(&config)?;
            mark::done(
                &mut stdout,
                &catalog,
                &mut progress,
                args.week,
                &args.day,
                Utc::now(),
            )?;
        }
        Some(Commands::Undone(args)) => {
            let catalog = Catalog::load(&config)?;
            let mut progress = open_progress(&config)?;
            mark::undone(&mut stdout, &catalog, &mut progress, args.week, &args.day)?;
        }
        Some(Commands::Status) => {
            let db = open_database(&config)?;
            status::run(&mut stdout, &db, &config)?;
        }
        Some(Commands::Validate) => {
            let catalog = Catalog::load(&config)?;
            validate::run(&mut stdout, &catalog)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    stdout.flush()?;
    Ok(())
}
