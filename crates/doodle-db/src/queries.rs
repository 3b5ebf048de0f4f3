use crate::models::DoodleRow;
use crate::{Database, DoodleBackend};
use anyhow::Result;
use rusqlite::{Connection, Row};

impl DoodleBackend for Database {
    fn query_day(&self, day_bucket: &str) -> Result<Vec<DoodleRow>> {
        self.with_conn(|conn| query_day(conn, day_bucket))
    }

    fn get_doodle(&self, day_bucket: &str, created_at: &str) -> Result<Option<DoodleRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT day_bucket, created_at, pixels FROM doodles
                 WHERE day_bucket = ?1 AND created_at = ?2",
            )?;

            let row = stmt
                .query_row([day_bucket, created_at], doodle_from_row)
                .optional()?;

            Ok(row)
        })
    }

    fn insert_doodle(&self, row: &DoodleRow) -> Result<bool> {
        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO doodles (day_bucket, created_at, pixels) VALUES (?1, ?2, ?3)",
                rusqlite::params![row.day_bucket, row.created_at, row.pixels],
            )?;
            Ok(inserted == 1)
        })
    }

    fn delete_doodle(&self, day_bucket: &str, created_at: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let deleted = conn.execute(
                "DELETE FROM doodles WHERE day_bucket = ?1 AND created_at = ?2",
                [day_bucket, created_at],
            )?;
            Ok(deleted > 0)
        })
    }
}

fn query_day(conn: &Connection, day_bucket: &str) -> Result<Vec<DoodleRow>> {
    let mut stmt = conn.prepare(
        "SELECT day_bucket, created_at, pixels FROM doodles
         WHERE day_bucket = ?1
         ORDER BY created_at ASC",
    )?;

    let rows = stmt
        .query_map([day_bucket], doodle_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn doodle_from_row(row: &Row<'_>) -> rusqlite::Result<DoodleRow> {
    Ok(DoodleRow {
        day_bucket: row.get(0)?,
        created_at: row.get(1)?,
        pixels: row.get(2)?,
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
