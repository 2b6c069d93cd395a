//! Text extraction for fetched resources
//!
//! One parser per supported format, each a pure function from raw bytes to
//! text. Parsers report failures as [`ExtractError`]; [`extract_text`] is the
//! boundary that turns any failure, panics included, into an empty string so
//! a single malformed document never aborts a run.
//!
//! Only PDF output is paginated: its pages are joined with [`PAGE_BREAK`].
//! Every other format yields a single implicit page.

mod html;
mod pdf;
mod spreadsheet;
mod word;

#[cfg(test)]
pub(crate) mod fixtures;

pub use html::parse_html;
pub use pdf::parse_pdf;
pub use spreadsheet::parse_spreadsheet;
pub use word::parse_word;

use crate::content::ContentKind;
use std::panic::{catch_unwind, AssertUnwindSafe};
use thiserror::Error;

/// Marker separating pages in extracted text (form feed)
pub const PAGE_BREAK: char = '\u{000C}';

/// Errors raised while extracting text from a document
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),

    #[error("Missing document part: {0}")]
    MissingPart(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parser panicked: {0}")]
    Panic(String),
}

/// Result type for extraction operations
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Runs the parser matching `kind` over `bytes`
///
/// Kinds without a parser (`Image`, `Other`) return an empty string without
/// looking at the bytes.
pub fn try_extract(kind: ContentKind, bytes: &[u8]) -> ExtractResult<String> {
    let parse: fn(&[u8]) -> ExtractResult<String> = match kind {
        ContentKind::Html => parse_html,
        ContentKind::Pdf => parse_pdf,
        ContentKind::WordDocument => parse_word,
        ContentKind::Excel => parse_spreadsheet,
        ContentKind::Image | ContentKind::Other => return Ok(String::new()),
    };

    catch_unwind(AssertUnwindSafe(|| parse(bytes))).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(ExtractError::Panic(message))
    })
}

/// Extracts text for `kind`, collapsing every failure to an empty string
///
/// # Example
///
/// ```
/// use linkalyser::content::ContentKind;
/// use linkalyser::extract::extract_text;
///
/// let text = extract_text(ContentKind::Html, b"<p>Annual <b>report</b></p>");
/// assert!(text.contains("Annual report"));
///
/// assert_eq!(extract_text(ContentKind::Pdf, b"not a pdf"), "");
/// assert_eq!(extract_text(ContentKind::Image, b"\x89PNG"), "");
/// ```
pub fn extract_text(kind: ContentKind, bytes: &[u8]) -> String {
    match try_extract(kind, bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Failed to extract {} text: {}", kind, e);
            String::new()
        }
    }
}
