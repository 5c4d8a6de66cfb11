//! Locating the plotly.js library that chart pages embed.
//!
//! Inlined pages need the library text itself. It comes from
//! `chart.plotly_js_path` when set, otherwise from a copy cached in the
//! config directory that is downloaded from `chart.plotly_js_url` the first
//! time a chart is rendered.

use std::path::Path;

use crate::error::{CoreError, Result};
use crate::storage::{data_dir, ChartConfig};

/// File name of the cached library inside the config directory.
pub const PLOTLY_JS_FILE: &str = "plotly.min.js";

/// Where a page gets plotly.js from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlotlyJs {
    /// Library source, written into the page.
    Inline(String),
    /// URL referenced from a `<script src>` tag.
    Remote(String),
}

impl PlotlyJs {
    /// Resolves the library according to `config`.
    ///
    /// # Errors
    ///
    /// Fails when inlining is on and the library can neither be read from
    /// disk nor downloaded.
    pub fn from_config(config: &ChartConfig) -> Result<Self> {
        if !config.inline_plotly_js {
            return Ok(Self::Remote(config.plotly_js_url.clone()));
        }

        if !config.plotly_js_path.is_empty() {
            let path = Path::new(&config.plotly_js_path);
            let source = std::fs::read_to_string(path).map_err(|e| {
                CoreError::Asset(format!("cannot read {}: {e}", path.display()))
            })?;
            return Ok(Self::Inline(source));
        }

        let cached = data_dir()?.join(PLOTLY_JS_FILE);
        load_or_download(&cached, &config.plotly_js_url).map(Self::Inline)
    }
}

/// Reads `path`, downloading it from `url` first if it does not exist.
pub fn load_or_download(path: &Path, url: &str) -> Result<String> {
    if path.exists() {
        tracing::debug!("Using cached plotly.js at {}", path.display());
        return Ok(std::fs::read_to_string(path)?);
    }

    tracing::info!("Downloading plotly.js from {}", url);
    let source = download(url)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, &source)?;
    tracing::info!("Cached plotly.js at {}", path.display());
    Ok(source)
}

fn download(url: &str) -> Result<String> {
    let fail = |message: String| CoreError::Asset(format!("{url}: {message}"));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| fail(e.to_string()))?;

    runtime.block_on(async {
        let resp = reqwest::get(url).await.map_err(|e| fail(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(fail(format!("HTTP {}", resp.status().as_u16())));
        }
        resp.text().await.map_err(|e| fail(e.to_string()))
    })
}
