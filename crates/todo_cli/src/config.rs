//! Command-line and environment configuration.
//!
//! # Invariants
//! - Resolved paths are absolute.
//! - Flags win over environment variables, which win over defaults.

use clap::Parser;
use std::path::{Path, PathBuf};

const DB_FILE_NAME: &str = "todo.sqlite3";
const LOG_DIR_NAME: &str = "logs";
const DATA_DIR_NAME: &str = ".todo";

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "todo", version, about = "A single-screen to-do list")]
pub struct Arguments {
    /// SQLite file holding the items.
    #[arg(long, env = "TODO_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Directory for rolling log files.
    #[arg(long, env = "TODO_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// trace | debug | info | warn | error
    #[arg(long, env = "TODO_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Config {
    /// Resolves `args` against the user's home and the working directory.
    ///
    /// Without `home` the data directory falls back to the temp dir.
    pub fn resolve(args: &Arguments, home: Option<&Path>, cwd: &Path) -> Self {
        let data_dir = home.map_or_else(
            || std::env::temp_dir().join("todo"),
            |home| home.join(DATA_DIR_NAME),
        );

        let db_path = args
            .db_path
            .as_deref()
            .map_or_else(|| data_dir.join(DB_FILE_NAME), |path| absolutize(path, cwd));
        let log_dir = args
            .log_dir
            .as_deref()
            .map_or_else(|| data_dir.join(LOG_DIR_NAME), |path| absolutize(path, cwd));
        let log_level = args
            .log_level
            .as_deref()
            .map(str::trim)
            .filter(|level| !level.is_empty())
            .unwrap_or(todo_core::default_log_level())
            .to_string();

        Self {
            db_path,
            log_dir,
            log_level,
        }
    }

    /// Resolves from the process environment.
    pub fn from_env(args: &Arguments) -> std::io::Result<Self> {
        let home = std::env::var_os("HOME")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        let cwd = std::env::current_dir()?;
        Ok(Self::resolve(args, home.as_deref(), &cwd))
    }
}

fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
