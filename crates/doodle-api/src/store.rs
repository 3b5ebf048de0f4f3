use std::sync::Arc;

use tracing::{debug, info, warn};

use doodle_codec::{Edge, PackedPixels};
use doodle_db::DoodleBackend;
use doodle_db::models::DoodleRow;
use doodle_types::{DayBucket, Doodle, Timestamp};

use crate::error::StoreError;

/// Validates keys and payloads, then makes exactly one backend call.
///
/// Nothing reaches the backend until every key has passed its format check.
#[derive(Clone)]
pub struct DoodleStore {
    backend: Arc<dyn DoodleBackend>,
    edge: Edge,
}

impl DoodleStore {
    pub fn new(backend: Arc<dyn DoodleBackend>, edge: Edge) -> Self {
        Self { backend, edge }
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    /// Every doodle in the bucket, oldest first. An empty day is an empty list.
    pub fn list_by_day(&self, day_bucket: &str) -> Result<Vec<Doodle>, StoreError> {
        let day = DayBucket::parse(day_bucket)?;

        let rows = self.backend.query_day(day.as_str())?;
        debug!("Listed {} doodles for {}", rows.len(), day);

        rows.into_iter().map(doodle_from_row).collect()
    }

    pub fn get_one(&self, day_bucket: &str, created_at: &str) -> Result<Doodle, StoreError> {
        let (day, ts) = parse_key(day_bucket, created_at)?;

        self.backend
            .get_doodle(day.as_str(), &ts.to_string())?
            .map(doodle_from_row)
            .transpose()?
            .ok_or_else(|| not_found(&day, &ts))
    }

    /// Stamps the doodle with the current UTC time and stores it.
    /// A doodle already stored under the same millisecond is a `Conflict`.
    pub fn create(&self, pixels: PackedPixels) -> Result<Doodle, StoreError> {
        if pixels.len() != self.edge.packed_len() {
            return Err(StoreError::InvalidPayload(format!(
                "Must be {} chars.",
                self.edge.packed_len()
            )));
        }

        let doodle = Doodle::new(Timestamp::now(), pixels);
        let row = DoodleRow {
            day_bucket: doodle.day_bucket.to_string(),
            created_at: doodle.created_at.to_string(),
            pixels: doodle.pixels.to_be_bytes(),
        };

        if !self.backend.insert_doodle(&row)? {
            warn!("Doodle key collision at {}/{}", row.day_bucket, row.created_at);
            return Err(StoreError::Conflict {
                day_bucket: row.day_bucket,
                created_at: row.created_at,
            });
        }

        info!("Created doodle {}/{}", doodle.day_bucket, doodle.created_at);
        Ok(doodle)
    }

    /// Returns the confirmation message.
    pub fn remove(&self, day_bucket: &str, created_at: &str) -> Result<String, StoreError> {
        let (day, ts) = parse_key(day_bucket, created_at)?;

        if !self.backend.delete_doodle(day.as_str(), &ts.to_string())? {
            return Err(not_found(&day, &ts));
        }

        info!("Deleted doodle {}/{}", day, ts);
        Ok(format!("Deleted doodle {}-{}", day, ts))
    }
}

fn parse_key(day_bucket: &str, created_at: &str) -> Result<(DayBucket, Timestamp), StoreError> {
    Ok((DayBucket::parse(day_bucket)?, Timestamp::parse(created_at)?))
}

fn not_found(day: &DayBucket, ts: &Timestamp) -> StoreError {
    StoreError::NotFound {
        day_bucket: day.to_string(),
        created_at: ts.to_string(),
    }
}

/// Rows that no longer parse are a storage fault, not a client one.
fn doodle_from_row(row: DoodleRow) -> Result<Doodle, StoreError> {
    let corrupt = |what: &str| {
        StoreError::Upstream(anyhow::anyhow!(
            "Corrupt {} on stored doodle '{}/{}'",
            what,
            row.day_bucket,
            row.created_at
        ))
    };

    let day_bucket = DayBucket::parse(&row.day_bucket).map_err(|_| corrupt("day_bucket"))?;
    let created_at = Timestamp::parse(&row.created_at).map_err(|_| corrupt("created_at"))?;
    let pixels = PackedPixels::from_be_bytes(&row.pixels).map_err(|_| corrupt("pixels"))?;

    Ok(Doodle {
        day_bucket,
        created_at,
        pixels,
    })
}
