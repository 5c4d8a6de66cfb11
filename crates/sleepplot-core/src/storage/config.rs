//! TOML-based application configuration.
//!
//! Stores:
//! - Wellness service location and account
//! - Fetch defaults (range length, CSV path)
//! - Chart appearance and output
//!
//! Configuration is stored at `~/.config/sleepplot/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::wellness::garmin::DEFAULT_BASE_URL;

/// Wellness service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellnessConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Account identifier used in the sleep endpoint path.
    #[serde(default)]
    pub display_name: String,
    #[serde(default = "default_sleep_buffer_minutes")]
    pub sleep_buffer_minutes: u32,
}

/// Fetch defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_days")]
    pub default_days: u32,
    #[serde(default = "default_csv_path")]
    pub output_path: String,
}

/// Chart configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_true")]
    pub dark_mode: bool,
    #[serde(default = "default_html_path")]
    pub output_path: String,
    /// Open the chart in the browser after rendering.
    #[serde(default = "default_true")]
    pub show: bool,
    /// Copy plotly.js into the page instead of linking `plotly_js_url`.
    #[serde(default = "default_true")]
    pub inline_plotly_js: bool,
    /// Local plotly.js used for inlining. Empty means the copy cached in
    /// the config directory, downloaded from `plotly_js_url` on first use.
    #[serde(default)]
    pub plotly_js_path: String,
    #[serde(default = "default_plotly_js_url")]
    pub plotly_js_url: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/sleepplot/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub wellness: WellnessConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_sleep_buffer_minutes() -> u32 {
    60
}
fn default_days() -> u32 {
    100
}
fn default_csv_path() -> String {
    "data/sleep.csv".into()
}
fn default_title() -> String {
    "Sleep Schedule".into()
}
fn default_true() -> bool {
    true
}
fn default_html_path() -> String {
    "sleep_data.html".into()
}
fn default_plotly_js_url() -> String {
    "https://cdn.plot.ly/plotly-2.35.2.min.js".into()
}

impl Default for WellnessConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            display_name: String::new(),
            sleep_buffer_minutes: default_sleep_buffer_minutes(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            default_days: default_days(),
            output_path: default_csv_path(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            dark_mode: true,
            output_path: default_html_path(),
            show: true,
            inline_plotly_js: true,
            plotly_js_path: String::new(),
            plotly_js_url: default_plotly_js_url(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let parent = match parent_path {
            Some(path) => path
                .split('.')
                .try_fold(&mut *root, |node, part| node.get_mut(part))
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?,
            None => root,
        };
        let obj = parent
            .as_object_mut()
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        let existing = obj
            .get(leaf)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|e| invalid(e.to_string()))?,
            ),
            serde_json::Value::Number(_) => {
                let n = value
                    .parse::<u64>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                serde_json::Value::Number(n.into())
            }
            serde_json::Value::Object(_) => {
                return Err(invalid("cannot replace a whole section".into()));
            }
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    /// Location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = self.to_toml().map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// The config as it would be written to disk.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Falling back to default config: {e}");
            Self::default()
        })
    }
}
