//! # SleepPlot Core Library
//!
//! Fetches daily sleep records from a wellness service, flattens them into a
//! CSV table, and turns that table into an interactive bedtime/wake time
//! chart. The two halves only meet through the CSV file.
//!
//! ## Architecture
//!
//! - **Wellness**: the single-day fetch seam ([`SleepSource`]), the Garmin
//!   client behind it, and the sequential date-range loop
//! - **Table**: flattening of raw payloads and the CSV interchange file
//! - **Normalize**: midnight-relative time axis, formatting, rolling means
//! - **Chart**: plotly figure builder and HTML rendering
//! - **Storage**: TOML configuration
//!
//! ## Key Components
//!
//! - [`fetch_range`]: one call per day, fail-fast
//! - [`flatten_payloads`]: payloads to [`RawTable`]
//! - [`SleepTable`]: normalized, date-sorted rows
//! - [`build_sleep_chart`]: two-row chart for a [`SleepTable`]

pub mod chart;
pub mod error;
pub mod normalize;
pub mod storage;
pub mod table;
pub mod wellness;

pub use chart::{build_sleep_chart, Figure, RenderOptions};
pub use error::{ConfigError, CoreError, ServiceError, TableError, ValidationError};
pub use normalize::{SleepRecord, SleepRow, SleepTable};
pub use storage::Config;
pub use table::{flatten_payloads, read_csv, write_csv, RawTable};
pub use wellness::{fetch_range, last_n_days, GarminClient, SleepSource};
