//! Garmin Connect wellness client -- daily sleep data over HTTP.

use chrono::NaiveDate;
use reqwest::Client;
use serde_json::Value;
use tokio::runtime::Runtime;
use url::Url;

use super::credentials;
use super::traits::SleepSource;
use crate::error::ServiceError;
use crate::storage::WellnessConfig;

pub const DEFAULT_BASE_URL: &str =
    "https://connect.garmin.com/modern/proxy/wellness-service/wellness";

/// Blocking client for the `dailySleepData` endpoint.
///
/// Requests run on a private current-thread runtime, one at a time.
pub struct GarminClient {
    base_url: Url,
    display_name: String,
    token: String,
    http_client: Client,
    runtime: Runtime,
}

impl GarminClient {
    /// Create a client for `display_name` authenticated with `token`.
    pub fn new(base_url: &str, display_name: &str, token: &str) -> Result<Self, ServiceError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ServiceError::Setup(format!("invalid base URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ServiceError::Setup(format!(
                "base URL '{base_url}' cannot carry a path"
            )));
        }

        let http_client = Client::builder()
            .user_agent(concat!("sleepplot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ServiceError::Setup(e.to_string()))?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ServiceError::Setup(e.to_string()))?;

        Ok(Self {
            base_url,
            display_name: display_name.to_string(),
            token: token.to_string(),
            http_client,
            runtime,
        })
    }

    /// Build a client from config, reading the session token from the
    /// environment or keyring.
    pub fn from_config(config: &WellnessConfig) -> Result<Self, ServiceError> {
        let token = credentials::session_token()?
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ServiceError::NotAuthenticated {
                service: "Garmin Connect".into(),
            })?;
        if config.display_name.is_empty() {
            return Err(ServiceError::Setup(
                "wellness.display_name is not configured".into(),
            ));
        }
        Self::new(&config.base_url, &config.display_name, &token)
    }

    /// `{base}/dailySleepData/{display_name}?date=..&nonSleepBufferMinutes=..`
    fn day_url(&self, date: NaiveDate, buffer_minutes: u32) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("dailySleepData")
                .push(&self.display_name);
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("date", &date.format("%Y-%m-%d").to_string())
            .append_pair("nonSleepBufferMinutes", &buffer_minutes.to_string());
        url
    }
}

impl SleepSource for GarminClient {
    fn name(&self) -> &str {
        "garmin"
    }

    fn fetch_day(&self, date: NaiveDate, buffer_minutes: u32) -> Result<Value, ServiceError> {
        let url = self.day_url(date, buffer_minutes);

        self.runtime.block_on(async {
            let resp = self
                .http_client
                .get(url)
                .bearer_auth(&self.token)
                .send()
                .await
                .map_err(|source| ServiceError::Transport { date, source })?;

            if !resp.status().is_success() {
                return Err(ServiceError::Status {
                    date,
                    status: resp.status().as_u16(),
                });
            }

            resp.json::<Value>()
                .await
                .map_err(|e| ServiceError::Decode {
                    date,
                    message: e.to_string(),
                })
        })
    }
}
