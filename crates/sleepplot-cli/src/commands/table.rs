use clap::Args;
use sleepplot_core::{read_csv, Config, SleepTable};
use std::path::PathBuf;

#[derive(Args)]
pub struct TableArgs {
    /// CSV table written by `fetch` (defaults to fetch.output_path)
    #[arg(long)]
    input: Option<PathBuf>,
    /// Write the normalized table as CSV instead of printing JSON
    #[arg(long)]
    out: Option<PathBuf>,
}

pub fn run(args: TableArgs) -> Result<(), Box<dyn std::error::Error>> {
    let input = match args.input {
        Some(path) => path,
        None => PathBuf::from(Config::load_or_default().fetch.output_path),
    };
    let table = SleepTable::from_raw(&read_csv(&input)?)?;

    match args.out {
        Some(out) => {
            table.write_csv(&out)?;
            println!("{} row(s) written to {}", table.len(), out.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&table)?),
    }
    Ok(())
}
