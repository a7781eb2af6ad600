//! # Glossary Database
//!
//! Opens the SQLite pool and creates the schema on startup.

use crate::domain::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::fs;
use std::str::FromStr;
use std::time::Duration;

/// How long a writer waits for the database lock before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS acronyms (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        acronym TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS explanations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        acronym_id INTEGER NOT NULL REFERENCES acronyms(id) ON DELETE CASCADE,
        explanation TEXT NOT NULL,
        author_id TEXT NULL,
        created_at TEXT NOT NULL,
        UNIQUE (acronym_id, explanation)
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS explanations_author_idx ON explanations (author_id)
    "#,
];

pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .with_context(|| format!("Invalid database url: {}", config.url))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory {}", parent.display())
            })?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .context("Failed to open glossary database")?;

    create_schema(&pool).await?;
    Ok(pool)
}

pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("Failed to create glossary schema")?;
    }
    Ok(())
}

/// Fresh in-memory database. Pinned to one connection that never expires,
/// since every SQLite memory connection is its own database.
#[cfg(test)]
pub async fn memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    create_schema(&pool).await.unwrap();
    pool
}
