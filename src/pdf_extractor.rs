use std::path::{Path, PathBuf};

use lopdf::Document;
use log::debug;

use crate::errors::ExtractionError;

// @module: PDF page-range text extraction

/// An inclusive, 1-indexed span of pages requested for translation.
///
/// Construction only checks the relationship between start and end;
/// the upper bound against the actual document happens in
/// [`PageExtractor::extract_range`], before any remote call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    start: u32,
    end: u32,
}

impl PageRange {
    /// Create a page range, rejecting zero or inverted bounds
    pub fn new(start: u32, end: u32) -> Result<Self, ExtractionError> {
        if start < 1 || start > end {
            return Err(ExtractionError::InvalidRange {
                start,
                end,
                page_count: 0,
            });
        }
        Ok(Self { start, end })
    }

    /// First page of the range (1-indexed)
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Last page of the range (inclusive)
    pub fn end(&self) -> u32 {
        self.end
    }

    /// Number of pages covered by the range
    pub fn len(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        false // start <= end is enforced at construction
    }

    /// Iterator over the 1-indexed page numbers in the range
    pub fn page_numbers(&self) -> std::ops::RangeInclusive<u32> {
        self.start..=self.end
    }

    /// Check the range against a concrete document page count
    pub fn validate_against(&self, page_count: u32) -> Result<(), ExtractionError> {
        if self.end > page_count {
            return Err(ExtractionError::InvalidRange {
                start: self.start,
                end: self.end,
                page_count,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for PageRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Raw text of a single source page
#[derive(Debug, Clone)]
pub struct PageText {
    /// 1-indexed page number in the source document
    pub page_number: u32,
    /// Extracted text, as the parser produced it
    pub text: String,
}

/// Opens a PDF and extracts per-page text for a requested range
pub struct PageExtractor {
    document: Document,
    path: PathBuf,
}

impl PageExtractor {
    /// Open a PDF file for extraction.
    ///
    /// Corrupt, encrypted, or non-PDF input is a terminal condition
    /// reported to the caller; there is no retry.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ExtractionError> {
        let path = path.as_ref().to_path_buf();
        let document = Document::load(&path).map_err(|e| ExtractionError::UnreadablePdf {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        if document.is_encrypted() {
            return Err(ExtractionError::UnreadablePdf {
                path,
                reason: "document is encrypted".to_string(),
            });
        }

        debug!(
            "Opened PDF {:?} with {} page(s)",
            path,
            document.get_pages().len()
        );

        Ok(Self { document, path })
    }

    /// Number of pages in the document
    pub fn page_count(&self) -> u32 {
        self.document.get_pages().len() as u32
    }

    /// Path of the underlying file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Extract the text of every page in the range, in page order.
    ///
    /// Returns exactly `range.len()` entries on success. Fails with
    /// `InvalidRange` when the range exceeds the document.
    pub fn extract_range(&self, range: &PageRange) -> Result<Vec<PageText>, ExtractionError> {
        range.validate_against(self.page_count())?;

        let mut pages = Vec::with_capacity(range.len());
        for page_number in range.page_numbers() {
            let text = self
                .document
                .extract_text(&[page_number])
                .map_err(|e| ExtractionError::UnreadablePdf {
                    path: self.path.clone(),
                    reason: format!("page {}: {}", page_number, e),
                })?;

            pages.push(PageText { page_number, text });
        }

        Ok(pages)
    }
}
