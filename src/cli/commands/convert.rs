//! Convert command - page dump to Markdown

use crate::cli::output::{self, colors};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the convert command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Page dump (JSON) to convert
    pub dump: PathBuf,

    /// Output root (defaults to output.save_directory)
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,
}

/// Execute the convert command
pub fn execute(
    args: ConvertArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let save_directory = args
        .out
        .unwrap_or_else(|| services.config.output.save_directory.clone());
    let report = services.convert_file_into(&args.dump, &save_directory)?;

    output::print_output(&report, format, |report| {
        println!(
            "{} {} ({} pages, {} images)",
            colors::success("Wrote"),
            colors::file_path(&report.markdown.display().to_string()),
            colors::number(&report.pages.to_string()),
            colors::number(&report.images.len().to_string())
        );
        output::print_page_failures(&report.failed_pages);
        for failure in &report.failed_images {
            output::print_warning(&format!(
                "image on page {}: {}",
                failure.page_number, failure.error
            ));
        }
    })
}
