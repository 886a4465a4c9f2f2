//! Unified service container for readorder
//!
//! Provides shared access to all core services.

use crate::core::config::Config;
use crate::core::convert::{DocumentConverter, LibreOfficeConverter};
use crate::core::error::Result;
use crate::core::index::DocumentIndex;
use crate::core::pipeline::DocumentPipeline;
use crate::core::types::{ConvertReport, IndexReport, IndexStats, NewNodeRecord};
use crate::core::walker::SourceWalker;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Unified services container
///
/// All commands use this same struct for service access.
#[derive(Clone)]
pub struct Services {
    /// Document index (SQLite)
    pub index: Arc<DocumentIndex>,

    /// Page dump processing
    pub pipeline: Arc<DocumentPipeline>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration. Opens (and if needed
    /// creates) the index database.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let index = Arc::new(DocumentIndex::open(config.storage.database.clone())?);
        let pipeline = Arc::new(DocumentPipeline::from_config(&config));

        Ok(Self {
            index,
            pipeline,
            config: Arc::new(config),
        })
    }

    /// Linearize a page dump and export it as Markdown with images
    /// under the configured save directory
    pub fn convert_file(&self, dump: &Path) -> Result<ConvertReport> {
        self.convert_file_into(dump, &self.config.output.save_directory)
    }

    pub fn convert_file_into(&self, dump: &Path, save_directory: &Path) -> Result<ConvertReport> {
        let output = self.pipeline.process(dump)?;
        let export = self.pipeline.export_markdown(&output, save_directory)?;

        Ok(ConvertReport {
            source: output.source.clone(),
            markdown: export.markdown,
            images: export.images,
            pages: output.pages.len(),
            failed_pages: output.failures,
            failed_images: export.image_failures,
        })
    }

    /// Linearize and chunk a page dump, then record its source
    /// document and append its nodes
    pub fn index_file(&self, dump: &Path) -> Result<IndexReport> {
        let output = self.pipeline.process(dump)?;
        let records = output
            .nodes
            .iter()
            .map(|node| NewNodeRecord::from_text_node(node, None))
            .collect::<Result<Vec<_>>>()?;

        let doc_id = self.index.index_document(&output.source, Some(&records))?;

        Ok(IndexReport {
            path: output.source.to_string_lossy().into_owned(),
            doc_id,
            nodes: records.len(),
            failed_pages: output.failures,
        })
    }

    /// Index every page dump under `root` (or `root` itself if it is
    /// a file). Failing files are logged and counted.
    pub fn index_path(&self, root: &Path) -> Result<(Vec<IndexReport>, IndexStats)> {
        let start = Instant::now();
        let walker = SourceWalker::from_config(&self.config.indexing)?;
        let files = walker.collect(root)?;
        tracing::info!("Found {} page dump(s) under {:?}", files.len(), root);

        let mut reports = Vec::with_capacity(files.len());
        let mut stats = IndexStats::default();

        for (idx, file) in files.iter().enumerate() {
            if idx % 100 == 0 && idx > 0 {
                tracing::info!("Progress: {}/{} files processed", idx, files.len());
            }

            match self.index_file(file) {
                Ok(report) => {
                    stats.files_indexed += 1;
                    stats.nodes_created += report.nodes;
                    stats.pages_failed += report.failed_pages.len();
                    reports.push(report);
                }
                Err(e) => {
                    tracing::warn!("Failed to index {:?}: {}", file, e);
                    stats.files_failed += 1;
                }
            }
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            "Indexing complete: {} files indexed, {} failed, {} nodes in {}ms",
            stats.files_indexed,
            stats.files_failed,
            stats.nodes_created,
            stats.duration_ms
        );

        Ok((reports, stats))
    }

    /// Convert an office document to PDF with the configured converter
    pub fn convert_to_pdf(&self, input: &Path, output_dir: &Path) -> Result<PathBuf> {
        let converter = LibreOfficeConverter::from_config(&self.config.conversion)?;
        converter.convert(input, output_dir)
    }
}
