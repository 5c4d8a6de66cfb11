mod config;

pub use config::{ChartConfig, Config, FetchConfig, WellnessConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/sleepplot[-dev]/` based on SLEEPPLOT_ENV.
///
/// Set SLEEPPLOT_ENV=dev to use the development config directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SLEEPPLOT_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("sleepplot-dev")
    } else {
        base_dir.join("sleepplot")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DirUnavailable(format!(
        "{}: {e}",
        dir.display()
    )))?;
    Ok(dir)
}
