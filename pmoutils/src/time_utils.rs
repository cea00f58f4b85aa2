//! Time formatting and parsing helpers for the player UI.
//!
//! - [`format_time`] renders a media position or duration as `HH:MM:SS`
//! - [`format_clock_time`] renders an epoch timestamp as a 12-hour wall clock
//! - [`parse_time_flexible`] converts `HH:MM:SS`, `MM:SS` or `SS` back to seconds

use chrono::{Local, TimeZone, Timelike};

/// Value returned by [`format_clock_time`] when no timestamp is available.
pub const DEFAULT_CLOCK_TIME: &str = "0:00:00";

/// Formats a duration in seconds as `HH:MM:SS`.
///
/// Returns `None` (the "unavailable" value) when `seconds` is absent, NaN or
/// infinite. Negative values are formatted from their magnitude and prefixed
/// with `-`. The hours field is not wrapped at 24.
///
/// # Examples
/// ```
/// # use pmoutils::format_time;
/// assert_eq!(format_time(Some(3661.0)).as_deref(), Some("01:01:01"));
/// assert_eq!(format_time(Some(-61.0)).as_deref(), Some("-00:01:01"));
/// assert_eq!(format_time(None), None);
/// ```
pub fn format_time(seconds: Option<f64>) -> Option<String> {
    let seconds = seconds.filter(|s| s.is_finite())?;

    let sign = if seconds < 0.0 { "-" } else { "" };
    let total = seconds.abs().floor() as u64;

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    Some(format!("{sign}{hours:02}:{minutes:02}:{secs:02}"))
}

/// Formats an epoch timestamp (seconds) as a local 12-hour clock, e.g. `1:05:09 PM`.
///
/// A falsy input (absent, zero or NaN) yields [`DEFAULT_CLOCK_TIME`]. Zero is
/// therefore indistinguishable from "no value".
pub fn format_clock_time(seconds: Option<f64>) -> String {
    format_clock_time_in(seconds, &Local)
}

/// Same as [`format_clock_time`] but in an explicit time zone.
pub fn format_clock_time_in<Tz: TimeZone>(seconds: Option<f64>, tz: &Tz) -> String {
    let seconds = match seconds {
        Some(s) if s != 0.0 && s.is_finite() => s,
        _ => return DEFAULT_CLOCK_TIME.to_string(),
    };

    let millis = (seconds * 1000.0).trunc() as i64;
    let Some(date) = tz.timestamp_millis_opt(millis).single() else {
        return DEFAULT_CLOCK_TIME.to_string();
    };

    let hours = date.hour();
    let ampm = if hours >= 12 { "PM" } else { "AM" };
    // L'heure 0 s'affiche 12
    let hours = match hours % 12 {
        0 => 12,
        h => h,
    };

    format!("{}:{:02}:{:02} {}", hours, date.minute(), date.second(), ampm)
}

/// Parses a time string in `[-]HH:MM:SS`, `MM:SS` or `SS` format to seconds.
///
/// Returns `None` if the input has more than three parts or any part is not a
/// non-negative integer.
///
/// # Examples
/// ```
/// # use pmoutils::parse_time_flexible;
/// assert_eq!(parse_time_flexible("01:02:03"), Some(3723));
/// assert_eq!(parse_time_flexible("-00:01:01"), Some(-61));
/// assert_eq!(parse_time_flexible("02:03"), Some(123));
/// assert_eq!(parse_time_flexible("1:2:3:4"), None);
/// ```
pub fn parse_time_flexible(input: &str) -> Option<i64> {
    let input = input.trim();
    let (negative, body) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    let parts: Vec<&str> = body.split(':').collect();
    if parts.len() > 3 {
        return None;
    }

    let mut total = 0i64;
    for part in parts {
        let value = part.parse::<u32>().ok()?;
        total = total * 60 + i64::from(value);
    }

    Some(if negative { -total } else { total })
}
