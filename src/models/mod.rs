//! Data models module
//!
//! Contains the movie record entered by the user and the revenue
//! estimate derived from it.

pub mod estimate;
pub mod record;

// Re-export commonly used types
pub use estimate::{BucketTag, Estimate, RevenueBucket};
pub use record::{MovieRecord, RecordField, RATING_OPTIONS};
