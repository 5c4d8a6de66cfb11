//! HTML rendering of a [`Figure`].

use std::path::Path;

use super::assets::PlotlyJs;
use super::figure::Figure;
use crate::error::Result;
use crate::storage::ChartConfig;

const DARK_BACKGROUND: &str = "#111111";

/// How the figure is embedded into a page.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub plotly_js: PlotlyJs,
}

impl RenderOptions {
    /// Options for a page that carries `source` as its plotly.js.
    pub fn inline(source: impl Into<String>) -> Self {
        Self {
            plotly_js: PlotlyJs::Inline(source.into()),
        }
    }

    /// Options for a page that loads plotly.js from `url`.
    pub fn remote(url: impl Into<String>) -> Self {
        Self {
            plotly_js: PlotlyJs::Remote(url.into()),
        }
    }

    pub fn from_config(config: &ChartConfig) -> Result<Self> {
        Ok(Self {
            plotly_js: PlotlyJs::from_config(config)?,
        })
    }
}

/// Complete HTML page drawing `figure` with plotly.js.
pub fn render_html(figure: &Figure, options: &RenderOptions) -> String {
    // `</` inside the inline script would end it early.
    let spec = figure.to_json().to_string().replace("</", "<\\/");
    let html_open = if figure.dark_mode() {
        format!("<html style='background:{DARK_BACKGROUND}'>")
    } else {
        "<html>".to_string()
    };
    let library = match &options.plotly_js {
        PlotlyJs::Inline(source) => format!(
            "<script type=\"text/javascript\">{}</script>",
            escape_script(source)
        ),
        PlotlyJs::Remote(url) => format!("<script src=\"{url}\"></script>"),
    };

    format!(
        r#"<!DOCTYPE html>
{html_open}
<head>
<meta charset="utf-8" />
{library}
</head>
<body>
<div id="sleep-chart" style="height:100vh;width:100%;"></div>
<script>
const figure = {spec};
Plotly.newPlot("sleep-chart", figure.data, figure.layout, {{"responsive": true}});
</script>
</body>
</html>
"#
    )
}

/// Library text can mention `</script>` inside string literals.
fn escape_script(source: &str) -> String {
    source
        .replace("</script", "<\\/script")
        .replace("</SCRIPT", "<\\/SCRIPT")
}

impl Figure {
    /// Writes the chart as an HTML document at `path`.
    pub fn render_to_file(&self, path: &Path, options: &RenderOptions) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, render_html(self, options))?;
        tracing::info!("Saved chart to {}", path.display());
        Ok(())
    }

    /// Writes the chart to `path` and opens that file in the system browser.
    pub fn render_interactive(&self, path: &Path, options: &RenderOptions) -> Result<()> {
        self.render_and_open(path, options, |p| open::that(p))
    }

    fn render_and_open<F>(&self, path: &Path, options: &RenderOptions, opener: F) -> Result<()>
    where
        F: FnOnce(&Path) -> std::io::Result<()>,
    {
        self.render_to_file(path, options)?;
        tracing::debug!("Opening {}", path.display());
        opener(path)?;
        Ok(())
    }
}
