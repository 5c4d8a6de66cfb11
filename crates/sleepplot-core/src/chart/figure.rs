//! Two-row plotly figure builder.
//!
//! Traces and axis ticks accumulate in a [`Figure`]; nothing is rendered
//! until [`Figure::to_json`] materializes the plotly.js description.

use serde::Serialize;
use serde_json::{json, Value};

/// Vertical gap between the two rows, as a fraction of the plot height.
const VERTICAL_SPACING: f64 = 0.02;

/// Subplot row. Both rows share the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Top,
    Bottom,
}

impl Row {
    fn xaxis(self) -> &'static str {
        match self {
            Row::Top => "x",
            Row::Bottom => "x2",
        }
    }

    fn yaxis(self) -> &'static str {
        match self {
            Row::Top => "y",
            Row::Bottom => "y2",
        }
    }

    fn domain(self) -> [f64; 2] {
        let half = (1.0 - VERTICAL_SPACING) / 2.0;
        match self {
            Row::Top => [1.0 - half, 1.0],
            Row::Bottom => [0.0, half],
        }
    }
}

/// One axis tick: a position on the axis and the text shown for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

/// Bar trace whose bars span `[base, base + height]`.
#[derive(Debug, Clone, Default)]
pub struct BarSpec {
    pub name: String,
    pub x: Vec<String>,
    pub base: Vec<Option<f64>>,
    pub height: Vec<Option<f64>>,
    pub customdata: Vec<Vec<String>>,
    pub hovertemplate: String,
}

/// Line trace.
#[derive(Debug, Clone, Default)]
pub struct LineSpec {
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<Option<f64>>,
    pub customdata: Vec<String>,
    pub hovertemplate: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    kind: &'static str,
    name: String,
    x: Vec<String>,
    y: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    base: Option<Vec<Option<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<&'static str>,
    customdata: Value,
    hovertemplate: String,
    xaxis: &'static str,
    yaxis: &'static str,
}

impl Trace {
    pub fn kind(&self) -> &str {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn y(&self) -> &[Option<f64>] {
        &self.y
    }

    pub fn base(&self) -> Option<&[Option<f64>]> {
        self.base.as_deref()
    }

    pub fn customdata(&self) -> &Value {
        &self.customdata
    }
}

/// Accumulates traces and layout settings for a two-row chart.
#[derive(Debug, Clone, Default)]
pub struct Figure {
    traces: Vec<Trace>,
    title: String,
    dark_mode: bool,
    top_ticks: Vec<Tick>,
    bottom_ticks: Vec<Tick>,
}

impl Figure {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn set_dark_mode(&mut self, dark: bool) -> &mut Self {
        self.dark_mode = dark;
        self
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    pub fn add_bar_trace(&mut self, row: Row, spec: BarSpec) -> &mut Self {
        self.traces.push(Trace {
            kind: "bar",
            name: spec.name,
            x: spec.x,
            y: spec.height,
            base: Some(spec.base),
            mode: None,
            customdata: json!(spec.customdata),
            hovertemplate: spec.hovertemplate,
            xaxis: row.xaxis(),
            yaxis: row.yaxis(),
        });
        self
    }

    pub fn add_line_trace(&mut self, row: Row, spec: LineSpec) -> &mut Self {
        self.traces.push(Trace {
            kind: "scatter",
            name: spec.name,
            x: spec.x,
            y: spec.y,
            base: None,
            mode: Some("lines"),
            customdata: json!(spec.customdata),
            hovertemplate: spec.hovertemplate,
            xaxis: row.xaxis(),
            yaxis: row.yaxis(),
        });
        self
    }

    /// Replaces the y-axis ticks of `row`.
    pub fn set_axis_ticks(&mut self, row: Row, ticks: Vec<Tick>) -> &mut Self {
        match row {
            Row::Top => self.top_ticks = ticks,
            Row::Bottom => self.bottom_ticks = ticks,
        }
        self
    }

    pub fn axis_ticks(&self, row: Row) -> &[Tick] {
        match row {
            Row::Top => &self.top_ticks,
            Row::Bottom => &self.bottom_ticks,
        }
    }

    /// plotly.js figure description: `{"data": [...], "layout": {...}}`.
    pub fn to_json(&self) -> Value {
        let mut layout = json!({
            "title": { "text": self.title },
            "hovermode": "x unified",
            "xaxis": {
                "anchor": Row::Top.yaxis(),
                "domain": [0.0, 1.0],
                "matches": Row::Bottom.xaxis(),
                "showticklabels": false,
            },
            "xaxis2": {
                "anchor": Row::Bottom.yaxis(),
                "domain": [0.0, 1.0],
            },
            "yaxis": axis_layout(Row::Top, &self.top_ticks),
            "yaxis2": axis_layout(Row::Bottom, &self.bottom_ticks),
        });

        if self.dark_mode {
            if let Some(obj) = layout.as_object_mut() {
                obj.insert("paper_bgcolor".into(), json!("#111111"));
                obj.insert("plot_bgcolor".into(), json!("#111111"));
                obj.insert("font".into(), json!({ "color": "#f2f5fa" }));
                for axis in ["xaxis", "xaxis2", "yaxis", "yaxis2"] {
                    if let Some(a) = obj.get_mut(axis).and_then(Value::as_object_mut) {
                        a.insert("gridcolor".into(), json!("#283442"));
                        a.insert("zerolinecolor".into(), json!("#283442"));
                    }
                }
            }
        }

        json!({ "data": self.traces, "layout": layout })
    }
}

fn axis_layout(row: Row, ticks: &[Tick]) -> Value {
    let mut axis = json!({
        "anchor": row.xaxis(),
        "domain": row.domain(),
    });
    if !ticks.is_empty() {
        if let Some(obj) = axis.as_object_mut() {
            obj.insert("tickmode".into(), json!("array"));
            obj.insert(
                "tickvals".into(),
                json!(ticks.iter().map(|t| t.value).collect::<Vec<_>>()),
            );
            obj.insert(
                "ticktext".into(),
                json!(ticks.iter().map(|t| t.label.as_str()).collect::<Vec<_>>()),
            );
        }
    }
    axis
}
