//! Config command implementation.
//!
//! Shows the effective settings and where they are read from.

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::config::{default_config_path, Settings};
use crate::output::{print_json, print_warning};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Show the configuration file location
    Path,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, path: Option<&Path>, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let settings = Settings::load(path)?;
            match format {
                OutputFormat::Json => print_json(&settings)?,
                _ => print!("{}", settings.to_toml()?),
            }
        }
        ConfigCommand::Path => match path.map(Path::to_path_buf).or_else(default_config_path) {
            Some(p) => {
                println!("{}", p.display());
                if !p.exists() {
                    print_warning("File does not exist, defaults are in effect");
                }
            }
            None => print_warning("No configuration directory on this platform"),
        },
    }
    Ok(())
}
