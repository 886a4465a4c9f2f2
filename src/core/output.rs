//! Output artifacts: per-document directory, Markdown file, images.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::error::{ReadorderError, Result};
use crate::core::geometry::BBox;
use crate::core::page::{RawImage, RawPage};

/// Subdirectory of a document directory that holds its images
pub const IMAGES_DIR: &str = "images";

/// Create a directory at `base`, or at `base-1`, `base-2`, ... when
/// that name is taken. Parents are created as needed. Returns the
/// directory actually created.
pub fn create_unique_directory(base: &Path) -> Result<PathBuf> {
    if let Some(parent) = base.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file_name = base
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| ReadorderError::InvalidPath(format!("No directory name in {base:?}")))?;

    let mut candidate = base.to_path_buf();
    let mut suffix = 0usize;
    loop {
        match fs::create_dir(&candidate) {
            Ok(()) => return Ok(candidate),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                suffix += 1;
                candidate = base.with_file_name(format!("{file_name}-{suffix}"));
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Produces PNG bytes for an image region
pub trait ImageRenderer: Send + Sync {
    /// Render `image` cropped to `crop` (already clamped to the page).
    /// `None` means nothing can be rendered.
    fn render_png(&self, page: &RawPage, image: &RawImage, crop: &BBox) -> Result<Option<Vec<u8>>>;
}

/// Uses the PNG payload embedded in the page dump as-is.
///
/// The payload is the parser's rendering of the whole image region,
/// so the crop only decides whether anything of the image is left on
/// the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedImageRenderer;

impl ImageRenderer for EmbeddedImageRenderer {
    fn render_png(&self, page: &RawPage, image: &RawImage, crop: &BBox) -> Result<Option<Vec<u8>>> {
        if crop.width() <= 0.0 || crop.height() <= 0.0 {
            tracing::debug!(
                "Image '{}' lies outside page {} ({:?})",
                image.name,
                page.page_number,
                crop
            );
            return Ok(None);
        }
        image.png_bytes()
    }
}

/// A document's output directory
#[derive(Debug, Clone)]
pub struct DocumentDirectory {
    root: PathBuf,
    stem: String,
}

impl DocumentDirectory {
    /// Create `<save_directory>/<stem>` (suffixed if taken)
    pub fn create(save_directory: &Path, stem: &str) -> Result<Self> {
        let root = create_unique_directory(&save_directory.join(stem))?;
        tracing::debug!("Created output directory {}", root.display());
        Ok(Self {
            root,
            stem: stem.to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn markdown_path(&self) -> PathBuf {
        self.root.join(format!("{}.md", self.stem))
    }

    pub fn write_markdown(&self, text: &str) -> Result<PathBuf> {
        let path = self.markdown_path();
        fs::write(&path, text)?;
        Ok(path)
    }

    /// Write image bytes at `relative` under this directory, replacing
    /// any existing file. Paths escaping the directory are rejected.
    pub fn save_image(&self, relative: &Path, png: &[u8]) -> Result<PathBuf> {
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(ReadorderError::InvalidPath(format!(
                "Image path {relative:?} is outside the output directory"
            )));
        }

        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, png)?;
        Ok(path)
    }
}
