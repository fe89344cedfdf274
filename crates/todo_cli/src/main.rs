//! Terminal front end for the todo list.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open storage exactly once.
//! - Refuse to enter the interactive screen when storage is unusable.

mod app;
mod config;
mod terminal;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use std::path::Path;
use todo_core::db::{open_db, Connection};
use todo_core::{init_logging, ItemStore, ListView, SqliteItemRepository};

use crate::config::{Arguments, Config};

fn main() -> Result<()> {
    let args = Arguments::parse();
    let config = Config::from_env(&args).context("failed to resolve working directory")?;

    init_logging(&config.log_level, &config.log_dir).with_context(|| {
        format!(
            "failed to initialize logging in {}",
            config.log_dir.display()
        )
    })?;
    info!(
        "event=cli_start module=cli status=ok core_version={}",
        todo_core::core_version()
    );

    if let Err(err) = run(&config) {
        error!("event=cli_exit module=cli status=error error={err:#}");
        return Err(err);
    }
    info!("event=cli_exit module=cli status=ok");
    Ok(())
}

fn run(config: &Config) -> Result<()> {
    let conn = open_storage(&config.db_path)?;
    let repo = SqliteItemRepository::try_new(&conn).context("todo database schema is not usable")?;
    let store = ItemStore::open(repo).context("failed to load items")?;
    terminal::run(ListView::new(store))
}

fn open_storage(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create data directory {}", parent.display()))?;
    }
    open_db(path).with_context(|| format!("failed to open todo database at {}", path.display()))
}
