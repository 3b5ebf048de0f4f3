/// Row type for the `doodles` table.
/// Distinct from the doodle-types model to keep the DB layer independent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoodleRow {
    pub day_bucket: String,
    pub created_at: String,
    /// Packed pixels, two big-endian bytes per code unit.
    pub pixels: Vec<u8>,
}
