//! readorder CLI
//!
//! # Examples
//!
//! ```bash
//! # Markdown plus images under ./processed_sources/report/
//! readorder convert report.json
//!
//! # Index every page dump under a directory
//! readorder index ./dumps
//!
//! # Inspect the index
//! readorder list-documents
//! readorder list-nodes ./dumps/report.pdf --format json
//! ```

use clap::Parser;
use readorder::cli::output::print_error;
use readorder::cli::{run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "readorder=warn".into());

    // Logs go to stderr so --format json stays parseable on stdout
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    if let Err(e) = run(cli) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
