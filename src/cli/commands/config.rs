//! Show-config command - print the effective configuration

use crate::cli::output;
use crate::cli::OutputFormat;
use crate::core::config::Config;
use clap::Args;

/// Arguments for the show-config command
#[derive(Args, Debug)]
pub struct ConfigArgs {}

/// Execute the show-config command
pub fn execute(
    _args: ConfigArgs,
    config: &Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Human => {
            output::print_header("Configuration:");
            print!("{}", toml::to_string_pretty(config)?);
            Ok(())
        }
        OutputFormat::Json => output::print_json(config),
    }
}
