/// Content classification for fetched resources
///
/// Each fetched resource lands in exactly one bucket, decided by its
/// declared `Content-Type`.
use std::fmt;

/// Content-type bucket assigned to a fetched resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentKind {
    /// `text/html` pages
    Html,

    /// `application/pdf` documents, the only paginated format
    Pdf,

    /// OOXML word-processing documents (.docx)
    WordDocument,

    /// OOXML spreadsheets (.xlsx)
    Excel,

    /// Any `image/*` resource; never parsed
    Image,

    /// Everything else, including a missing header; never parsed
    Other,
}

const PDF_MIME: &str = "application/pdf";
const WORD_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const EXCEL_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const HTML_MIME: &str = "text/html";
const IMAGE_MIME_PREFIX: &str = "image/";

/// Classifies a `Content-Type` header value
///
/// Substring checks run in a fixed order (PDF, Word, Excel, HTML, Image) and
/// the first hit wins, so a header naming several types resolves to the
/// earliest one. Parameters such as `; charset=utf-8` are ignored by
/// construction. Matching is case-sensitive on the lowercase MIME names.
///
/// # Example
///
/// ```
/// use linkalyser::content::{classify_content_type, ContentKind};
///
/// assert_eq!(classify_content_type("text/html; charset=utf-8"), ContentKind::Html);
/// assert_eq!(classify_content_type("application/json"), ContentKind::Other);
/// ```
pub fn classify_content_type(content_type: &str) -> ContentKind {
    if content_type.contains(PDF_MIME) {
        ContentKind::Pdf
    } else if content_type.contains(WORD_MIME) {
        ContentKind::WordDocument
    } else if content_type.contains(EXCEL_MIME) {
        ContentKind::Excel
    } else if content_type.contains(HTML_MIME) {
        ContentKind::Html
    } else if content_type.contains(IMAGE_MIME_PREFIX) {
        ContentKind::Image
    } else {
        ContentKind::Other
    }
}

impl ContentKind {
    /// All kinds, in reporting order
    pub const ALL: [ContentKind; 6] = [
        Self::Html,
        Self::Pdf,
        Self::WordDocument,
        Self::Excel,
        Self::Image,
        Self::Other,
    ];

    /// Human-readable label used in statistics output
    pub fn label(&self) -> &'static str {
        match self {
            Self::Html => "HTML",
            Self::Pdf => "PDF",
            Self::WordDocument => "Word Document",
            Self::Excel => "Excel",
            Self::Image => "Image",
            Self::Other => "Other",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Self::Html => 0,
            Self::Pdf => 1,
            Self::WordDocument => 2,
            Self::Excel => 3,
            Self::Image => 4,
            Self::Other => 5,
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
