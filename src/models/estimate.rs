//! Revenue estimate data models
//!
//! Contains the predicted gross, the revenue bucket it falls into, and the
//! presentation tag attached to each bucket.

use chrono::{DateTime, Utc};

/// Inclusive upper bounds of the first five buckets, ascending
const BUCKET_LIMITS: [(f64, RevenueBucket); 5] = [
    (10_000_000.0, RevenueBucket::Low),
    (40_000_000.0, RevenueBucket::MediumLow),
    (70_000_000.0, RevenueBucket::Medium),
    (120_000_000.0, RevenueBucket::MediumHigh),
    (200_000_000.0, RevenueBucket::High),
];

/// Qualitative revenue range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevenueBucket {
    Low,
    MediumLow,
    Medium,
    MediumHigh,
    High,
    UltraHigh,
}

/// Presentation colours attached to a bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketTag {
    /// Accent colour name for the label
    pub color: &'static str,
    /// Background colour name for the badge
    pub background: &'static str,
}

impl RevenueBucket {
    /// Classify a gross value. Anything above 200M is `UltraHigh`.
    pub fn from_gross(gross: f64) -> Self {
        BUCKET_LIMITS
            .iter()
            .find(|(limit, _)| gross <= *limit)
            .map(|(_, bucket)| *bucket)
            .unwrap_or(RevenueBucket::UltraHigh)
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low Revenue",
            Self::MediumLow => "Medium-Low Revenue",
            Self::Medium => "Medium Revenue",
            Self::MediumHigh => "Medium-High Revenue",
            Self::High => "High Revenue",
            Self::UltraHigh => "Ultra High Revenue",
        }
    }

    pub fn tag(&self) -> BucketTag {
        let (color, background) = match self {
            Self::Low => ("orange", "light-orange"),
            Self::MediumLow => ("yellow", "light-yellow"),
            Self::Medium => ("blue", "light-blue"),
            Self::MediumHigh => ("indigo", "light-indigo"),
            Self::High => ("purple", "light-purple"),
            Self::UltraHigh => ("green", "light-green"),
        };
        BucketTag { color, background }
    }
}

impl std::fmt::Display for RevenueBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A finished revenue prediction
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    /// Predicted worldwide gross in dollars
    pub gross: f64,
    /// Bucket derived from `gross`
    pub bucket: RevenueBucket,
    /// When the estimate was produced
    pub generated_at: DateTime<Utc>,
}

impl Estimate {
    /// Create an estimate, deriving the bucket from the gross
    pub fn new(gross: f64) -> Self {
        Self {
            gross,
            bucket: RevenueBucket::from_gross(gross),
            generated_at: Utc::now(),
        }
    }

    /// Bucket label, e.g. "Medium Revenue"
    pub fn label(&self) -> &'static str {
        self.bucket.label()
    }
}
