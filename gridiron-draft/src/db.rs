// SQLite-backed key-value cache for season stat payloads.

use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

/// Opaque payload cache. Values are stored as text under a fixed key and
/// never expire.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a SQLite database at `path` and ensure the cache
    /// table exists. Pass `":memory:"` for an ephemeral in-memory database
    /// (useful for tests).
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )
        .context("failed to set database pragmas")?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS stat_cache (
                key       TEXT PRIMARY KEY,
                value     TEXT NOT NULL,
                stored_at TEXT NOT NULL
            );
            ",
        )
        .context("failed to create database schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("database mutex poisoned"))
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn put_cached(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn()?;
        let stored_at = chrono::Utc::now().to_rfc3339();
        conn.execute(
            "INSERT OR REPLACE INTO stat_cache (key, value, stored_at) VALUES (?1, ?2, ?3)",
            params![key, value, stored_at],
        )
        .with_context(|| format!("failed to cache value for {key}"))?;
        Ok(())
    }

    /// Load the cached value for `key`, or `None` if nothing is stored.
    pub fn get_cached(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT value FROM stat_cache WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .with_context(|| format!("failed to read cached value for {key}"))
    }

    /// Drop the cached value for `key`. Removing a missing key is a no-op.
    pub fn clear_cached(&self, key: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM stat_cache WHERE key = ?1", params![key])
            .with_context(|| format!("failed to clear cached value for {key}"))?;
        Ok(())
    }
}
