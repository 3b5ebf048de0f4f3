use serde::{Deserialize, Serialize};

use doodle_codec::PackedPixels;

// -- Doodles --

/// Body of `PUT /doodles`. The original front end sent the field as `drawing`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateDoodleRequest {
    #[serde(alias = "drawing")]
    pub pixels: PackedPixels,
}
