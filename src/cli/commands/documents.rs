//! List-documents command

use crate::cli::output::{self, colors, short_id};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;

/// Arguments for the list-documents command
#[derive(Args, Debug)]
pub struct DocumentsArgs {}

pub fn execute(
    _args: DocumentsArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let documents = services.index.list_documents()?;

    output::print_output(&documents, format, |documents| {
        if documents.is_empty() {
            println!("{}", colors::dim("No documents indexed"));
            return;
        }
        output::print_header(&format!("{} document(s)", documents.len()));
        for doc in documents {
            println!(
                "  {}  {}  {}",
                colors::id(short_id(&doc.hash)),
                colors::label(&doc.name),
                colors::file_path(&doc.path)
            );
        }
    })
}
