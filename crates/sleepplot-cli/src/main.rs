use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sleepplot", version, about = "SleepPlot CLI")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download daily sleep data into a CSV table
    Fetch(commands::fetch::FetchArgs),
    /// Render the sleep chart from a CSV table
    Plot(commands::plot::PlotArgs),
    /// Print or export the normalized sleep table
    Table(commands::table::TableArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Wellness service session token
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Fetch(args) => commands::fetch::run(args),
        Commands::Plot(args) => commands::plot::run(args),
        Commands::Table(args) => commands::table::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Auth { action } => commands::auth::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
