pub mod api;
pub mod keys;
pub mod models;

pub use keys::{DayBucket, KeyError, Timestamp};
pub use models::Doodle;
