//! To-pdf command - office document to PDF via LibreOffice

use crate::cli::output::{self, colors};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ToPdfArgs {
    /// Document to convert (docx, odt, ...)
    pub input: PathBuf,

    /// Directory for the PDF
    #[arg(long, default_value = ".")]
    pub outdir: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ToPdfResponse {
    pub input: PathBuf,
    pub pdf: PathBuf,
}

pub fn execute(
    args: ToPdfArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let pdf = services.convert_to_pdf(&args.input, &args.outdir)?;
    let response = ToPdfResponse {
        input: args.input,
        pdf,
    };

    output::print_output(&response, format, |response| {
        println!(
            "{} {}",
            colors::success("Converted to"),
            colors::file_path(&response.pdf.display().to_string())
        );
    })
}
