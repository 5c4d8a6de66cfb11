//! Relative-time normalization of the flat sleep table.

mod rolling;
mod sleep_table;
pub mod timeaxis;

pub use rolling::{rolling_mean, ROLLING_WINDOW};
pub use sleep_table::{SleepRecord, SleepRow, SleepTable};
pub use timeaxis::{
    datetime_to_12hr, format_relative_seconds, format_timedelta, make_relative, midnight,
    seconds_to_time,
};
