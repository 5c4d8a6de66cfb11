use chrono::NaiveDate;
use serde_json::Value;

use crate::error::ServiceError;

/// Single-day sleep data provider.
///
/// Implementations own their session; callers only ask for one day at a
/// time and treat any error as fatal.
pub trait SleepSource {
    /// Unique identifier (e.g. "garmin").
    fn name(&self) -> &str;

    /// Fetches the raw daily sleep payload for `date`.
    ///
    /// `buffer_minutes` is the amount of non-sleep time the service should
    /// include around the sleep window.
    fn fetch_day(&self, date: NaiveDate, buffer_minutes: u32) -> Result<Value, ServiceError>;
}
