pub mod migrations;
pub mod models;
pub mod queries;

use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

use crate::models::DoodleRow;

/// The single-table key-value store behind the doodle API.
///
/// Partition key is the day bucket, sort key the creation timestamp. Every
/// method is one storage call; callers validate keys before reaching here.
pub trait DoodleBackend: Send + Sync {
    /// All doodles in a day bucket, oldest first. Unbounded.
    fn query_day(&self, day_bucket: &str) -> Result<Vec<DoodleRow>>;

    fn get_doodle(&self, day_bucket: &str, created_at: &str) -> Result<Option<DoodleRow>>;

    /// Returns false without writing if the key is already taken.
    fn insert_doodle(&self, row: &DoodleRow) -> Result<bool>;

    /// Returns false if nothing was stored under the key.
    fn delete_doodle(&self, day_bucket: &str, created_at: &str) -> Result<bool>;
}

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")?;

        migrations::run(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Private in-memory database, gone when dropped.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        migrations::run(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock().map_err(|e| anyhow::anyhow!("DB lock poisoned: {}", e))?;
        f(&conn)
    }
}
