//! Mock revenue estimator
//!
//! Turns a completed [`MovieRecord`] into an [`Estimate`] using a handful of
//! fixed multipliers and a random jitter. There is no model behind it; the
//! numbers only need to look plausible for the demo.
//!
//! The random source is always passed in so callers can seed it.

use crate::models::{Estimate, MovieRecord};
use rand::Rng;
use std::ops::Range;

/// Budget used when the field is empty or unparsable
pub const DEFAULT_BUDGET: f64 = 50_000_000.0;
/// Score used when the field is empty or unparsable
pub const DEFAULT_SCORE: f64 = 7.0;
/// Runtime used when the field is empty or unparsable
pub const DEFAULT_RUNTIME: f64 = 120.0;
/// Vote count used when the field is empty or unparsable
pub const DEFAULT_VOTES: f64 = 50_000.0;

/// Multiplier applied to the budget before any adjustment
pub const BASE_MULTIPLIER: f64 = 1.5;
/// Lowest gross the estimator will ever report
pub const MIN_GROSS: f64 = 1_000_000.0;
/// Half-open range the jitter factor is drawn from
pub const JITTER_RANGE: Range<f64> = 0.8..1.2;

/// Score thresholds, checked from the top down
const SCORE_BANDS: [(f64, f64); 3] = [(8.0, 1.8), (7.0, 1.4), (6.0, 1.1)];
const LOW_SCORE_MULTIPLIER: f64 = 0.8;

/// Genre keywords and their multipliers. Every keyword found applies.
const GENRE_MULTIPLIERS: [(&str, f64); 3] = [("action", 1.3), ("comedy", 1.2), ("drama", 0.9)];

/// Numeric view of a record after fallbacks are applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimateInputs {
    pub budget: f64,
    pub score: f64,
    pub runtime: f64,
    pub votes: f64,
}

impl EstimateInputs {
    /// Parse the numeric fields of a record. Never fails.
    pub fn from_record(record: &MovieRecord) -> Self {
        Self {
            budget: parse_or(&record.budget, DEFAULT_BUDGET),
            score: parse_or(&record.score, DEFAULT_SCORE),
            runtime: parse_or(&record.runtime, DEFAULT_RUNTIME),
            votes: parse_or(&record.votes, DEFAULT_VOTES),
        }
    }
}

/// Parse the leading number of `raw`, falling back when there is none or
/// when it is non-finite or zero.
///
/// Trailing text is ignored, so "25000000 USD" reads as 25,000,000 and
/// "8/10" as 8.
pub fn parse_or(raw: &str, default: f64) -> f64 {
    match leading_number(raw).and_then(|prefix| prefix.parse::<f64>().ok()) {
        Some(value) if value.is_finite() && value != 0.0 => value,
        _ => default,
    }
}

/// Longest prefix of the trimmed text shaped like `[+-]digits[.digits][e[+-]digits]`
fn leading_number(raw: &str) -> Option<&str> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    Some(&text[..end])
}

/// Multiplier for a critic score
pub fn score_multiplier(score: f64) -> f64 {
    SCORE_BANDS
        .iter()
        .find(|(threshold, _)| score >= *threshold)
        .map(|(_, multiplier)| *multiplier)
        .unwrap_or(LOW_SCORE_MULTIPLIER)
}

/// Combined multiplier for every genre keyword contained in `genre`
pub fn genre_multiplier(genre: &str) -> f64 {
    let genre = genre.to_lowercase();
    GENRE_MULTIPLIERS
        .iter()
        .filter(|(keyword, _)| genre.contains(keyword))
        .fold(1.0, |acc, (_, multiplier)| acc * multiplier)
}

/// Gross before jitter and flooring
pub fn base_gross(record: &MovieRecord) -> f64 {
    let inputs = EstimateInputs::from_record(record);
    inputs.budget * BASE_MULTIPLIER * score_multiplier(inputs.score) * genre_multiplier(&record.genre)
}

/// Deterministic core: apply a known jitter factor and the floor
pub fn estimate_with_jitter(record: &MovieRecord, jitter: f64) -> Estimate {
    let gross = (base_gross(record) * jitter).max(MIN_GROSS);
    Estimate::new(gross)
}

/// Produce an estimate, drawing the jitter from `rng`
pub fn estimate<R: Rng>(record: &MovieRecord, rng: &mut R) -> Estimate {
    let jitter = rng.gen_range(JITTER_RANGE);
    estimate_with_jitter(record, jitter)
}
