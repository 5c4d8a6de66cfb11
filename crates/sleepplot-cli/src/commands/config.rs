//! `sleepplot config`: inspect and edit the TOML settings file.

use clap::Subcommand;
use sleepplot_core::{Config, ConfigError};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one setting (e.g. "chart.title", "wellness.display_name")
    Get {
        /// Dot-separated setting name
        key: String,
    },
    /// Change one setting and save the file
    Set {
        /// Dot-separated setting name
        key: String,
        /// Value, parsed to the setting's type
        value: String,
    },
    /// Print every setting as TOML
    List,
    /// Print the location of the settings file
    Path,
    /// Overwrite the settings file with defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let path = Config::path()?;

    match action {
        ConfigAction::Get { key } => {
            let config = Config::load_from(&path)?;
            let value = config.get(&key).ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_from(&path)?;
            config.set(&key, &value)?;
            config.save_to(&path)?;
            println!("{key} = {}", config.get(&key).unwrap_or(value));
        }
        ConfigAction::List => {
            print!("{}", Config::load_from(&path)?.to_toml()?);
        }
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Reset => {
            Config::default().save_to(&path)?;
            println!("defaults written to {}", path.display());
        }
    }
    Ok(())
}
