use chrono::Local;
use clap::Args;
use sleepplot_core::{build_sleep_chart, read_csv, Config, RenderOptions, SleepTable};
use std::path::PathBuf;

#[derive(Args)]
pub struct PlotArgs {
    /// CSV table written by `fetch` (defaults to fetch.output_path)
    #[arg(long)]
    input: Option<PathBuf>,
    /// HTML output path (defaults to chart.output_path)
    #[arg(long)]
    out: Option<PathBuf>,
    /// Do not open the chart in a browser
    #[arg(long)]
    no_show: bool,
}

pub fn run(args: PlotArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let input = args
        .input
        .unwrap_or_else(|| PathBuf::from(&config.fetch.output_path));

    let table = SleepTable::from_raw(&read_csv(&input)?)?;
    tracing::info!("Loaded {} night(s) from {}", table.len(), input.display());

    let mut figure = build_sleep_chart(&table, &config.chart.title, Local::now().date_naive());
    figure.set_dark_mode(config.chart.dark_mode);
    let options = RenderOptions::from_config(&config.chart)?;

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(&config.chart.output_path));
    if config.chart.show && !args.no_show {
        figure.render_interactive(&out, &options)?;
    } else {
        figure.render_to_file(&out, &options)?;
    }
    println!("chart written to {}", out.display());
    Ok(())
}
