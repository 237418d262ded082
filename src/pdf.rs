/*!
 * Optional PDF text extraction
 *
 * Compiled in only with the `pdf` cargo feature. Callers check
 * [`is_available`] once at startup and branch on the result instead of
 * probing at each use; without the feature, extraction reports an
 * unavailability error that the converter downgrades to a warning.
 */

use std::path::Path;

use thiserror::Error;

/// Errors from PDF text extraction
#[derive(Error, Debug)]
pub enum PdfError {
    /// Crate built without the `pdf` feature
    #[error("PDF support is not compiled in (enable the `pdf` feature)")]
    Unavailable,

    /// Extraction failed for one document
    #[error("Failed to extract PDF text: {0}")]
    Extraction(String),
}

/// Whether PDF text extraction was compiled into this build
pub fn is_available() -> bool {
    cfg!(feature = "pdf")
}

/// Extract the text content of a PDF file
#[cfg(feature = "pdf")]
pub fn extract(path: &Path) -> Result<String, PdfError> {
    pdf_extract::extract_text(path).map_err(|e| PdfError::Extraction(e.to_string()))
}

/// Extract the text content of a PDF file
#[cfg(not(feature = "pdf"))]
pub fn extract(_path: &Path) -> Result<String, PdfError> {
    Err(PdfError::Unavailable)
}
