//! Interactive sleep chart: a plotly.js figure builder, the sleep-specific
//! assembly on top of it, and HTML output.

mod assets;
pub mod figure;
mod html;
mod sleep_chart;

pub use assets::{load_or_download, PlotlyJs, PLOTLY_JS_FILE};
pub use figure::{BarSpec, Figure, LineSpec, Row, Tick, Trace};
pub use html::{render_html, RenderOptions};
pub use sleep_chart::{build_sleep_chart, duration_ticks, time_of_day_ticks};
