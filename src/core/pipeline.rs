//! Document pipeline orchestration.
//!
//! Coordinates the per-document workflow:
//! 1. Load the page dump
//! 2. Linearize each page, in dump order
//! 3. Chunk the linearized pages into one linked node chain
//! 4. Optionally export Markdown and images
//!
//! A page that fails to linearize is recorded as a [`PageFailure`]
//! and left out; the remaining pages are processed normally.

use std::path::{Path, PathBuf};

use crate::core::chunker::NodeChunker;
use crate::core::config::Config;
use crate::core::error::{ReadorderError, Result};
use crate::core::layout::{LinearPage, Linearizer};
use crate::core::node::NodeArena;
use crate::core::output::{DocumentDirectory, EmbeddedImageRenderer, ImageRenderer};
use crate::core::page::{JsonPageSource, PageSource, RawDocument, RawImage, RawPage};
use crate::core::types::PageFailure;

/// Everything produced from one page dump
#[derive(Debug)]
pub struct DocumentOutput {
    /// File whose bytes identify the document in the index
    pub source: PathBuf,
    pub document: RawDocument,
    pub pages: Vec<LinearPage>,
    pub failures: Vec<PageFailure>,
    pub nodes: NodeArena,
}

impl DocumentOutput {
    /// Linearized text of all successful pages
    pub fn text(&self) -> String {
        self.pages
            .iter()
            .map(LinearPage::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Base name used for the output directory and Markdown file
    pub fn stem(&self) -> String {
        self.source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string())
    }
}

/// Paths written by [`DocumentPipeline::export_markdown`]
#[derive(Debug, Clone)]
pub struct MarkdownExport {
    pub directory: PathBuf,
    pub markdown: PathBuf,
    pub images: Vec<PathBuf>,
    /// Images that could not be written; the rest of the export stands
    pub image_failures: Vec<PageFailure>,
}

pub struct DocumentPipeline {
    source: Box<dyn PageSource>,
    linearizer: Linearizer,
    chunker: NodeChunker,
    renderer: Box<dyn ImageRenderer>,
}

impl DocumentPipeline {
    pub fn new(
        source: Box<dyn PageSource>,
        linearizer: Linearizer,
        chunker: NodeChunker,
        renderer: Box<dyn ImageRenderer>,
    ) -> Self {
        Self {
            source,
            linearizer,
            chunker,
            renderer,
        }
    }

    /// JSON page dumps, embedded images, settings from `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Box::new(JsonPageSource),
            Linearizer::from_config(&config.layout),
            NodeChunker::new(config.chunking.lines_per_node),
            Box::new(EmbeddedImageRenderer),
        )
    }

    pub fn linearizer(&self) -> &Linearizer {
        &self.linearizer
    }

    pub fn process(&self, dump_path: &Path) -> Result<DocumentOutput> {
        let document = self.source.load(dump_path)?;
        let source = document.source_path(dump_path);
        tracing::info!(
            "Processing {} ({} page(s))",
            dump_path.display(),
            document.pages.len()
        );

        let mut pages = Vec::with_capacity(document.pages.len());
        let mut failures = Vec::new();
        for page in &document.pages {
            match self.linearizer.linearize(page) {
                Ok(linear) => pages.push(linear),
                Err(e) => {
                    tracing::warn!("Page {} of {:?} failed: {}", page.page_number, dump_path, e);
                    failures.push(PageFailure {
                        page_number: page.page_number,
                        error: e.to_string(),
                    });
                }
            }
        }

        let nodes = self.chunker.chunk_pages(&pages);
        tracing::info!(
            "{}: {} page(s) linearized, {} failed, {} node(s)",
            dump_path.display(),
            pages.len(),
            failures.len(),
            nodes.len()
        );

        Ok(DocumentOutput {
            source,
            document,
            pages,
            failures,
            nodes,
        })
    }

    /// Write `<save_directory>/<stem>[-N]/<stem>.md` plus every
    /// renderable image under its `images/` folder.
    ///
    /// Images of pages that failed to linearize are not exported. An
    /// image that cannot be rendered or written is reported in
    /// [`MarkdownExport::image_failures`] and the remaining images are
    /// still written.
    pub fn export_markdown(
        &self,
        output: &DocumentOutput,
        save_directory: &Path,
    ) -> Result<MarkdownExport> {
        let stem = output.stem();
        let directory = DocumentDirectory::create(save_directory, &stem)?;
        let markdown = directory.write_markdown(&output.text())?;
        let (images, image_failures) = self.save_images(output, &directory);

        tracing::info!(
            "Wrote {} with {} image(s), {} failed",
            markdown.display(),
            images.len(),
            image_failures.len()
        );
        Ok(MarkdownExport {
            directory: directory.root().to_path_buf(),
            markdown,
            images,
            image_failures,
        })
    }

    fn save_images(
        &self,
        output: &DocumentOutput,
        directory: &DocumentDirectory,
    ) -> (Vec<PathBuf>, Vec<PageFailure>) {
        let mut saved = Vec::new();
        let mut failures = Vec::new();

        for page in &output.document.pages {
            if output.failures.iter().any(|f| f.page_number == page.page_number) {
                tracing::debug!("Page {} failed to linearize; skipping its images", page.page_number);
                continue;
            }

            for image in &page.images {
                match self.save_image(page, image, directory) {
                    Ok(Some(path)) => saved.push(path),
                    Ok(None) => tracing::debug!(
                        "No rendering for image '{}' on page {}",
                        image.name,
                        page.page_number
                    ),
                    Err(e) => {
                        tracing::warn!(
                            "Skipping image '{}' on page {}: {}",
                            image.name,
                            page.page_number,
                            e
                        );
                        failures.push(PageFailure {
                            page_number: page.page_number,
                            error: e.to_string(),
                        });
                    }
                }
            }
        }

        (saved, failures)
    }

    fn save_image(
        &self,
        page: &RawPage,
        image: &RawImage,
        directory: &DocumentDirectory,
    ) -> Result<Option<PathBuf>> {
        let crop = image.bbox(page.height)?.clamp_to_page(page.width, page.height);

        let formatter = self.linearizer.image_formatter();
        let reference = formatter.format(&image.name);
        let relative = formatter.reference_path(&reference).ok_or_else(|| {
            ReadorderError::InvalidInput(format!("Image reference '{reference}' has no file path"))
        })?;

        match self.renderer.render_png(page, image, &crop)? {
            Some(png) => directory.save_image(&relative, &png).map(Some),
            None => Ok(None),
        }
    }
}
