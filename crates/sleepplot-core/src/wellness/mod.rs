//! Wellness service access: the single-day fetch seam, its Garmin
//! implementation, and the date-range loop built on top of it.

pub mod credentials;
pub mod fetcher;
pub mod garmin;
pub mod traits;

pub use fetcher::{fetch_range, last_n_days, DateRange};
pub use garmin::GarminClient;
pub use traits::SleepSource;
