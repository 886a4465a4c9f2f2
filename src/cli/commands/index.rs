//! Index command - linearize, chunk and record page dumps

use crate::cli::output::{self, colors, format_duration};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::{IndexReport, IndexStats};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Arguments for the index command
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Page dump or directory of page dumps
    pub path: PathBuf,

    /// Suppress progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Indexing result response
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub path: String,
    pub documents: Vec<IndexReport>,
    pub stats: IndexStats,
}

/// Execute the index command
pub fn execute(
    args: IndexArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if !args.path.exists() {
        return Err(format!(
            "Path '{}' does not exist. Pass a page dump or a directory of dumps.",
            args.path.display()
        )
        .into());
    }

    if !args.quiet && format == OutputFormat::Human {
        eprintln!(
            "Indexing {} into {}...",
            colors::file_path(&args.path.display().to_string()),
            colors::file_path(&services.index.db_path().display().to_string())
        );
    }

    let (documents, stats) = services.index_path(&args.path)?;
    let response = IndexResponse {
        path: args.path.to_string_lossy().into_owned(),
        documents,
        stats,
    };

    output::print_output(&response, format, |response| {
        for doc in &response.documents {
            println!(
                "  {} {} nodes",
                colors::file_path(&doc.path),
                colors::number(&doc.nodes.to_string())
            );
            output::print_page_failures(&doc.failed_pages);
        }
        let stats = &response.stats;
        println!(
            "{} {} documents ({} nodes) in {}",
            colors::success("Indexed"),
            colors::number(&stats.files_indexed.to_string()),
            colors::number(&stats.nodes_created.to_string()),
            colors::number(&format_duration(stats.duration_ms as f64 / 1000.0))
        );
        if stats.files_failed > 0 {
            output::print_warning(&format!(
                "{} file(s) failed, see log for details",
                stats.files_failed
            ));
        }
    })
}
