//! Document sources — resolve a filename to an ordered sequence of pages.
//!
//! The default backend reads PDFs from a directory with `pdf-extract`,
//! which yields text only. Layout hints (font size, boldness) are optional
//! on every line so richer backends can supply them without changing the
//! downstream heading heuristics.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

/// One line of page text plus whatever layout metadata the backend knows.
#[derive(Debug, Clone)]
pub struct PageLine {
    pub text: String,
    pub font_size: Option<f32>,
    pub bold: bool,
}

impl PageLine {
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: None,
            bold: false,
        }
    }
}

/// One page of a document. Page numbers are 1-based.
#[derive(Debug, Clone)]
pub struct Page {
    pub number: u32,
    pub lines: Vec<PageLine>,
}

impl Page {
    /// True when the page carries no extractable text at all.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.text.trim().is_empty())
    }
}

/// Resolves a document filename to its pages.
///
/// Returning `Err` marks the document unreadable; the pipeline records it
/// and continues with the remaining documents.
pub trait DocumentSource: Send + Sync {
    fn load(&self, filename: &str) -> Result<Vec<Page>>;
}

/// `DocumentSource` over a directory of PDF files, backed by `pdf-extract`.
pub struct PdfDirectorySource {
    dir: PathBuf,
}

impl PdfDirectorySource {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl DocumentSource for PdfDirectorySource {
    fn load(&self, filename: &str) -> Result<Vec<Page>> {
        let path = self.dir.join(filename);
        if !path.exists() {
            anyhow::bail!("file not found: {}", path.display());
        }

        let pages = pdf_extract::extract_text_by_pages(&path)
            .with_context(|| format!("failed to extract text from {}", path.display()))?;

        if pages.iter().all(|p| p.trim().is_empty()) {
            warn!("No extractable text in {filename} (scanned or image-only?)");
        }

        Ok(pages
            .into_iter()
            .enumerate()
            .map(|(i, text)| Page {
                number: (i + 1) as u32,
                lines: text.lines().map(PageLine::text_only).collect(),
            })
            .collect())
    }
}
