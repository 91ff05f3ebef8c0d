use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sked_cli::commands::{allocate, conflicts, events, report, resources, status};
use sked_cli::{Cli, Commands, Config, EventAction, ResourceAction};

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(sked_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = sked_db::Database::open(&config.database_path).context("failed to open database")?;
    Ok((db, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let mut stdout = io::stdout();
    match &cli.command {
        Some(Commands::Event { action }) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            match action {
                EventAction::Add {
                    title,
                    start,
                    end,
                    description,
                } => events::add(&mut db, title, start, end, description.as_deref())?,
                EventAction::List { json } => events::list(&mut stdout, &db, *json)?,
                EventAction::Edit {
                    id,
                    title,
                    start,
                    end,
                    description,
                } => events::edit(
                    &mut db,
                    id,
                    title.as_deref(),
                    start.as_deref(),
                    end.as_deref(),
                    description.as_deref(),
                )?,
                EventAction::Delete { id } => events::delete(&mut db, id)?,
            }
        }
        Some(Commands::Resource { action }) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            match action {
                ResourceAction::Add { name, kind } => resources::add(&mut db, name, *kind)?,
                ResourceAction::List { json } => resources::list(&mut stdout, &db, *json)?,
                ResourceAction::Edit { id, name, kind } => {
                    resources::edit(&mut db, id, name.as_deref(), *kind)?;
                }
                ResourceAction::Delete { id } => resources::delete(&mut db, id)?,
            }
        }
        Some(Commands::Allocate {
            event,
            resources: ids,
        }) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            allocate::run(&mut stdout, &mut db, event, ids)?;
        }
        Some(Commands::Deallocate { allocation }) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            allocate::deallocate(&mut stdout, &mut db, allocation)?;
        }
        Some(Commands::Conflicts { json }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            conflicts::run(&mut stdout, &db, *json)?;
        }
        Some(Commands::Report {
            resource,
            start,
            end,
            json,
        }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            report::run(&mut stdout, &db, resource, start, end, *json)?;
        }
        Some(Commands::Status) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            status::run(&mut stdout, &db)?;
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
