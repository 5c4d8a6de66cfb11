use chrono::{Local, NaiveDate};
use clap::Args;
use sleepplot_core::error::ValidationError;
use sleepplot_core::{fetch_range, flatten_payloads, last_n_days, write_csv, Config, GarminClient};
use std::path::PathBuf;

#[derive(Args)]
pub struct FetchArgs {
    /// Number of days back from today (defaults to fetch.default_days)
    #[arg(long, conflicts_with_all = ["start", "end"])]
    days: Option<u32>,
    /// First day to fetch (YYYY-MM-DD)
    #[arg(long, requires = "end")]
    start: Option<NaiveDate>,
    /// Last day to fetch, inclusive (YYYY-MM-DD)
    #[arg(long, requires = "start")]
    end: Option<NaiveDate>,
    /// CSV output path (defaults to fetch.output_path)
    #[arg(long)]
    out: Option<PathBuf>,
    /// Non-sleep buffer around the sleep window, in minutes
    #[arg(long)]
    buffer_minutes: Option<u32>,
}

pub fn run(args: FetchArgs) -> Result<(), Box<dyn std::error::Error>> {
    if let (Some(start), Some(end)) = (args.start, args.end) {
        if start > end {
            return Err(ValidationError::InvalidDateRange { start, end }.into());
        }
    }

    let config = Config::load()?;
    let client = GarminClient::from_config(&config.wellness)?;
    let buffer = args
        .buffer_minutes
        .unwrap_or(config.wellness.sleep_buffer_minutes);

    let payloads = match (args.start, args.end) {
        (Some(start), Some(end)) => fetch_range(&client, start, end, buffer)?,
        _ => {
            let days = args.days.unwrap_or(config.fetch.default_days);
            last_n_days(&client, days, Local::now().date_naive(), buffer)?
        }
    };

    let table = flatten_payloads(&payloads)?;
    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(&config.fetch.output_path));
    write_csv(&table, &out)?;

    println!("{} day(s) with sleep data written to {}", table.len(), out.display());
    Ok(())
}
