//! Bulk date-range fetch loop.
//!
//! One call per calendar day, strictly sequential and in ascending order.
//! The first failure aborts the whole range; nothing fetched so far is
//! returned.

use chrono::{Days, NaiveDate};
use serde_json::Value;

use super::traits::SleepSource;
use crate::error::ServiceError;

/// Inclusive, ascending range of calendar dates.
#[derive(Debug, Clone)]
pub struct DateRange {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl DateRange {
    /// Dates from `start` through `end`. Empty when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            next: (start <= end).then_some(start),
            end,
        }
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = current.succ_opt().filter(|d| *d <= self.end);
        Some(current)
    }
}

/// Fetches one payload per day in `[start, end]`.
pub fn fetch_range<S: SleepSource + ?Sized>(
    source: &S,
    start: NaiveDate,
    end: NaiveDate,
    buffer_minutes: u32,
) -> Result<Vec<Value>, ServiceError> {
    tracing::info!(
        "Fetching sleep data from {} for {} .. {}",
        source.name(),
        start,
        end
    );

    let mut payloads = Vec::new();
    for date in DateRange::new(start, end) {
        tracing::debug!("Fetching {}", date);
        payloads.push(source.fetch_day(date, buffer_minutes)?);
    }

    tracing::info!("Fetched {} day(s)", payloads.len());
    Ok(payloads)
}

/// Fetches the last `n` days up to and including `today` (`n + 1` payloads).
pub fn last_n_days<S: SleepSource + ?Sized>(
    source: &S,
    n: u32,
    today: NaiveDate,
    buffer_minutes: u32,
) -> Result<Vec<Value>, ServiceError> {
    let start = today
        .checked_sub_days(Days::new(u64::from(n)))
        .unwrap_or(NaiveDate::MIN);
    fetch_range(source, start, today, buffer_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    struct RecordingSource {
        calls: RefCell<Vec<(NaiveDate, u32)>>,
        fail_on: Option<NaiveDate>,
    }

    impl RecordingSource {
        fn new(fail_on: Option<NaiveDate>) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail_on,
            }
        }
    }

    impl SleepSource for RecordingSource {
        fn name(&self) -> &str {
            "recording"
        }

        fn fetch_day(&self, date: NaiveDate, buffer_minutes: u32) -> Result<Value, ServiceError> {
            self.calls.borrow_mut().push((date, buffer_minutes));
            if self.fail_on == Some(date) {
                return Err(ServiceError::Status { date, status: 500 });
            }
            Ok(json!({ "dailySleepDTO": { "calendarDate": date.to_string() } }))
        }
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn date_range_is_inclusive_and_ascending() {
        let dates: Vec<_> = DateRange::new(date(1, 30), date(2, 2)).collect();
        assert_eq!(dates, vec![date(1, 30), date(1, 31), date(2, 1), date(2, 2)]);
    }

    #[test]
    fn date_range_single_day() {
        assert_eq!(DateRange::new(date(3, 1), date(3, 1)).count(), 1);
    }

    #[test]
    fn reversed_range_is_empty() {
        let source = RecordingSource::new(None);
        let payloads = fetch_range(&source, date(3, 2), date(3, 1), 60).unwrap();
        assert!(payloads.is_empty());
        assert!(source.calls.borrow().is_empty());
    }

    #[test]
    fn one_call_per_day_in_order() {
        let source = RecordingSource::new(None);
        let payloads = fetch_range(&source, date(1, 1), date(1, 5), 30).unwrap();
        assert_eq!(payloads.len(), 5);
        let calls = source.calls.borrow();
        let dates: Vec<_> = calls.iter().map(|(d, _)| *d).collect();
        assert_eq!(dates, DateRange::new(date(1, 1), date(1, 5)).collect::<Vec<_>>());
        assert!(calls.iter().all(|(_, b)| *b == 30));
    }

    #[test]
    fn first_failure_aborts_the_range() {
        let source = RecordingSource::new(Some(date(1, 3)));
        let err = fetch_range(&source, date(1, 1), date(1, 5), 60).unwrap_err();
        assert!(matches!(err, ServiceError::Status { status: 500, .. }));
        assert_eq!(source.calls.borrow().len(), 3);
    }

    #[test]
    fn last_n_days_includes_today() {
        let source = RecordingSource::new(None);
        let payloads = last_n_days(&source, 3, date(1, 10), 60).unwrap();
        assert_eq!(payloads.len(), 4);
        assert_eq!(source.calls.borrow()[0].0, date(1, 7));
    }
}
