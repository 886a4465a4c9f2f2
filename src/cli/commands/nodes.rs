//! List-nodes command

use crate::cli::output::{self, colors, format_bytes, preview};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the list-nodes command
#[derive(Args, Debug)]
pub struct NodesArgs {
    /// Document path as recorded in the index
    pub path: PathBuf,

    /// Maximum characters of node text to show
    #[arg(long, default_value = "60")]
    pub width: usize,
}

pub fn execute(
    args: NodesArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let nodes = services.index.list_nodes(&args.path)?;

    output::print_output(&nodes, format, |nodes| {
        if nodes.is_empty() {
            println!(
                "{}",
                colors::dim(&format!("No nodes recorded for {}", args.path.display()))
            );
            return;
        }
        output::print_header(&format!("{} node(s)", nodes.len()));
        for node in nodes {
            let text = node
                .metadata
                .as_deref()
                .and_then(|m| serde_json::from_str::<serde_json::Value>(m).ok())
                .and_then(|v| v.get("text").and_then(|t| t.as_str()).map(str::to_string))
                .unwrap_or_default();
            let embedding = node
                .embedding
                .as_ref()
                .map(|e| format_bytes(e.len() as u64))
                .unwrap_or_else(|| "-".to_string());

            println!(
                "  {}  {}  {}",
                colors::id(&node.node_id),
                colors::dim(&embedding),
                preview(&text, args.width)
            );
        }
    })
}
