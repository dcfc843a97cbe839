//! Utility functions module
//!
//! Contains helpers for formatting currency amounts and durations.

pub mod format;

// Re-export commonly used functions
pub use format::{format_compact_currency, format_currency, format_duration};
