//! CLI adapter for readorder
//!
//! Thin clap layer over `core`: each command parses its arguments,
//! calls into [`Services`](crate::core::services::Services) and
//! prints the result as human-readable text or JSON.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// readorder - reading-order text from parsed document pages
///
/// Linearizes page dumps (text, tables and images with bounding
/// boxes) into reading order, exports Markdown, and indexes linked
/// text nodes in a SQLite document index.
#[derive(Parser, Debug)]
#[command(name = "readorder")]
#[command(version)]
#[command(about = "Reading-order linearization and node indexing", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Linearize a page dump and write Markdown plus images
    Convert(commands::ConvertArgs),

    /// Linearize, chunk and index page dumps (file or directory)
    Index(commands::IndexArgs),

    /// List indexed documents
    #[command(name = "list-documents")]
    ListDocuments(commands::DocumentsArgs),

    /// List nodes recorded for a document path
    #[command(name = "list-nodes")]
    ListNodes(commands::NodesArgs),

    /// Convert an office document to PDF with LibreOffice
    #[command(name = "to-pdf")]
    ToPdf(commands::ToPdfArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  readorder completions bash > ~/.local/share/bash-completion/completions/readorder
    ///   zsh:   readorder completions zsh > ~/.zfunc/_readorder
    ///   fish:  readorder completions fish > ~/.config/fish/completions/readorder.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::XdgDirs;

    // Completions need neither config nor the index
    let command = match cli.command {
        Commands::Completions(args) => return commands::completions::execute(args),
        command => command,
    };

    let xdg = XdgDirs::new();
    xdg.log_paths();

    let config = Config::load_with_xdg(&xdg)?;
    config.log_config();

    // show-config must work even when the database cannot be opened
    if let Commands::ShowConfig(args) = command {
        return commands::config::execute(args, &config, cli.format);
    }

    let services = Services::new(config)?;

    match command {
        Commands::Convert(args) => commands::convert::execute(args, &services, cli.format),
        Commands::Index(args) => commands::index::execute(args, &services, cli.format),
        Commands::ListDocuments(args) => commands::documents::execute(args, &services, cli.format),
        Commands::ListNodes(args) => commands::nodes::execute(args, &services, cli.format),
        Commands::ToPdf(args) => commands::to_pdf::execute(args, &services, cli.format),
        Commands::ShowConfig(_) | Commands::Completions(_) => Ok(()),
    }
}
