//! Display formatting utilities
//!
//! Human-readable rendering of dollar amounts and durations for the
//! results screen and prompt mode.

use std::time::Duration;

/// Format a dollar amount with thousands separators, rounded to whole dollars
///
/// # Examples
/// ```
/// use neurocinema::util::format::format_currency;
///
/// assert_eq!(format_currency(24_300_000.0), "$24,300,000");
/// assert_eq!(format_currency(999.6), "$1,000");
/// ```
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}${}", sign, grouped)
}

/// Format a dollar amount with a K/M/B suffix
///
/// # Examples
/// ```
/// use neurocinema::util::format::format_compact_currency;
///
/// assert_eq!(format_compact_currency(24_300_000.0), "$24.3M");
/// assert_eq!(format_compact_currency(1_250_000_000.0), "$1.25B");
/// ```
pub fn format_compact_currency(amount: f64) -> String {
    let abs = amount.abs();
    let sign = if amount < 0.0 { "-" } else { "" };

    if abs >= 1_000_000_000.0 {
        format!("{}${:.2}B", sign, abs / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{}${:.1}M", sign, abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{}${:.1}K", sign, abs / 1_000.0)
    } else {
        format!("{}${:.0}", sign, abs)
    }
}

/// Format duration into human-readable string
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use neurocinema::util::format::format_duration;
///
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if total_secs >= 60 {
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{}m {}s", minutes, seconds)
    } else if total_secs > 0 {
        if millis > 0 {
            format!("{}.{:02}s", total_secs, millis / 10)
        } else {
            format!("{}s", total_secs)
        }
    } else {
        format!("{}ms", millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.0), "$999");
        assert_eq!(format_currency(1_000.0), "$1,000");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000");
        assert_eq!(format_currency(123_456_789.4), "$123,456,789");
        assert_eq!(format_currency(-2_500.0), "-$2,500");
    }

    #[test]
    fn test_format_compact_currency() {
        assert_eq!(format_compact_currency(500.0), "$500");
        assert_eq!(format_compact_currency(1_500.0), "$1.5K");
        assert_eq!(format_compact_currency(1_000_000.0), "$1.0M");
        assert_eq!(format_compact_currency(199_960_000.0), "$200.0M");
        assert_eq!(format_compact_currency(2_000_000_000.0), "$2.00B");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_secs(3)), "3s");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
    }
}
