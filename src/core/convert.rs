//! docx → pdf conversion through an external office suite.
//!
//! Subprocess contract: `<soffice> --headless --convert-to pdf
//! --outdir <dir> <input>`. A non-zero exit is a failure, and so is a
//! zero exit that leaves no `<dir>/<input stem>.pdf` behind.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::config::ConversionConfig;
use crate::core::error::{ReadorderError, Result};

const COMMAND_NAMES: [&str; 2] = ["soffice", "libreoffice"];

#[cfg(windows)]
const KNOWN_PATHS: &[&str] = &[
    r"C:\Program Files\LibreOffice\program\soffice.exe",
    r"C:\Program Files (x86)\LibreOffice\program\soffice.exe",
];

#[cfg(not(windows))]
const KNOWN_PATHS: &[&str] = &[
    "/usr/bin/soffice",
    "/usr/bin/libreoffice",
    "/Applications/LibreOffice.app/Contents/MacOS/soffice",
];

/// Converts a source document into a PDF
pub trait DocumentConverter: Send + Sync {
    /// Convert `input` into `output_dir`, returning the PDF path
    fn convert(&self, input: &Path, output_dir: &Path) -> Result<PathBuf>;
}

#[derive(Debug, Clone)]
pub struct LibreOfficeConverter {
    executable: PathBuf,
}

impl LibreOfficeConverter {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn from_config(config: &ConversionConfig) -> Result<Self> {
        Self::locate(config.soffice.as_deref())
    }

    /// Find the executable: `configured` first, then `PATH`, then
    /// well-known install locations.
    pub fn locate(configured: Option<&Path>) -> Result<Self> {
        if let Some(path) = configured {
            if path.is_file() {
                return Ok(Self::new(path));
            }
            tracing::warn!(
                "Configured converter {} not found, searching PATH",
                path.display()
            );
        }

        for name in COMMAND_NAMES {
            if let Ok(path) = which::which(name) {
                return Ok(Self::new(path));
            }
        }

        KNOWN_PATHS
            .iter()
            .map(Path::new)
            .find(|p| p.is_file())
            .map(Self::new)
            .ok_or_else(|| {
                ReadorderError::Conversion(
                    "LibreOffice ('soffice' or 'libreoffice') not found; install it or set \
                     conversion.soffice"
                        .to_string(),
                )
            })
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl DocumentConverter for LibreOfficeConverter {
    fn convert(&self, input: &Path, output_dir: &Path) -> Result<PathBuf> {
        if !input.is_file() {
            return Err(ReadorderError::InvalidPath(format!(
                "Input document not found: {}",
                input.display()
            )));
        }
        fs::create_dir_all(output_dir)?;

        tracing::info!(
            "Converting {} to PDF with {}",
            input.display(),
            self.executable.display()
        );

        let output = Command::new(&self.executable)
            .args(["--headless", "--convert-to", "pdf", "--outdir"])
            .arg(output_dir)
            .arg(input)
            .output()
            .map_err(|e| {
                ReadorderError::Conversion(format!(
                    "Failed to run {}: {e}",
                    self.executable.display()
                ))
            })?;

        if !output.status.success() {
            return Err(ReadorderError::Conversion(format!(
                "{} exited with {}: {}",
                self.executable.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let stem = input.file_stem().ok_or_else(|| {
            ReadorderError::InvalidPath(format!("No file stem in {}", input.display()))
        })?;
        let mut pdf_name = stem.to_os_string();
        pdf_name.push(".pdf");
        let expected = output_dir.join(pdf_name);

        if !expected.is_file() {
            return Err(ReadorderError::Conversion(format!(
                "Converter reported success but {} was not produced",
                expected.display()
            )));
        }

        tracing::debug!("Converted {} -> {}", input.display(), expected.display());
        Ok(expected)
    }
}
