//! Midnight-relative time axis.
//!
//! Bedtimes and wake times are projected onto one numeric axis: signed
//! seconds from midnight of the sleep session's calendar date. The sign is
//! inverted, so a wake time after midnight is negative and a bedtime on the
//! previous evening is positive. Bars built as `base = wakeup` and
//! `height = bedtime - wakeup` then stand upright, and the tick labels in
//! [`crate::chart`] rely on the same convention.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

const SECONDS_PER_DAY: i64 = 86_400;

/// Midnight at the start of `date`.
pub fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Seconds between `dt` and midnight on `date`, sign inverted.
///
/// `make_relative(2024-01-02T07:15, 2024-01-02)` is `-26100.0`.
pub fn make_relative(dt: NaiveDateTime, date: NaiveDate) -> f64 {
    let difference = dt - midnight(date);
    let total_seconds =
        difference.num_seconds() as f64 + f64::from(difference.subsec_nanos()) / 1e9;
    -total_seconds
}

/// Inverse of [`make_relative`]: `midnight(date) - seconds`.
///
/// Returns `None` for non-finite input or a result outside chrono's range.
pub fn seconds_to_time(seconds: f64, date: NaiveDate) -> Option<NaiveDateTime> {
    if !seconds.is_finite() {
        return None;
    }
    let micros = (seconds * 1e6).round();
    if micros.abs() >= i64::MAX as f64 {
        return None;
    }
    let offset = TimeDelta::microseconds(micros as i64);
    midnight(date).checked_sub_signed(offset)
}

/// Formats a datetime as 12-hour clock time, e.g. `07:15 AM`.
pub fn datetime_to_12hr(dt: NaiveDateTime) -> String {
    dt.format("%I:%M %p").to_string()
}

/// Relative seconds rendered as wall-clock time. Empty for missing input.
pub fn format_relative_seconds(seconds: Option<f64>, date: NaiveDate) -> String {
    seconds
        .and_then(|s| seconds_to_time(s, date))
        .map(datetime_to_12hr)
        .unwrap_or_default()
}

/// Formats a duration as `HH:MM`. Empty for missing input.
///
/// Only the hour-of-day component is shown, so durations of a day or more
/// wrap around the same way a timedelta's components do.
pub fn format_timedelta(delta: Option<TimeDelta>) -> String {
    let Some(delta) = delta else {
        return String::new();
    };
    let seconds = delta.num_seconds().rem_euclid(SECONDS_PER_DAY);
    format!("{:02}:{:02}", seconds / 3600, (seconds % 3600) / 60)
}
