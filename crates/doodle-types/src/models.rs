use serde::{Deserialize, Serialize};

use doodle_codec::PackedPixels;

use crate::keys::{DayBucket, Timestamp};

/// A submitted drawing. Immutable once stored; identified by
/// `(day_bucket, created_at)`.
///
/// Input also accepts the field names the original front end used
/// (`yy-mm-dd`, `createddate`, `drawing`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doodle {
    #[serde(alias = "yy-mm-dd")]
    pub day_bucket: DayBucket,
    #[serde(alias = "createddate")]
    pub created_at: Timestamp,
    #[serde(alias = "drawing")]
    pub pixels: PackedPixels,
}

impl Doodle {
    /// Builds a doodle whose bucket is derived from its timestamp.
    pub fn new(created_at: Timestamp, pixels: PackedPixels) -> Self {
        Self {
            day_bucket: created_at.day_bucket(),
            created_at,
            pixels,
        }
    }

    pub fn key(&self) -> (&DayBucket, &Timestamp) {
        (&self.day_bucket, &self.created_at)
    }

    pub fn has_key(&self, day_bucket: &DayBucket, created_at: &Timestamp) -> bool {
        self.day_bucket == *day_bucket && self.created_at == *created_at
    }
}
