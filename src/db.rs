//! Connection pool for the catalog database file.
//!
//! `catalog serve` keeps a pool open for as long as the server runs, while
//! the `create`/`update`/`delete` subcommands open the same file from a
//! separate process. The journal is switched to WAL so those CLI writes do
//! not stall HTTP reads, and a busy timeout makes a writer wait for the
//! other process's write lock instead of failing with `SQLITE_BUSY`.

use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::config::Config;

const MAX_CONNECTIONS: u32 = 5;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

fn connect_options(config: &Config) -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .filename(&config.db.path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT)
}

/// Open a pool on `[db].path`, creating the file and its directory on
/// first use.
pub async fn connect(config: &Config) -> Result<SqlitePool> {
    let path = &config.db.path;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create database directory {}", dir.display()))?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(connect_options(config))
        .await
        .with_context(|| format!("Failed to open catalog database {}", path.display()))?;

    tracing::debug!(path = %path.display(), "catalog database opened");
    Ok(pool)
}
