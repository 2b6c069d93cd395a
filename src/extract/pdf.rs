//! PDF text extraction

use super::{ExtractResult, PAGE_BREAK};
use lopdf::Document;

/// Extracts text page by page and joins the pages with [`PAGE_BREAK`]
///
/// Every source page occupies a slot in the output, so a blank page (or one
/// whose text cannot be decoded) still shifts the page numbering of the pages
/// after it. Failing to load the document at all is an error.
pub fn parse_pdf(bytes: &[u8]) -> ExtractResult<String> {
    let doc = Document::load_mem(bytes)?;

    // get_pages is keyed by page number, already in order
    let pages: Vec<String> = doc
        .get_pages()
        .keys()
        .map(|&page_num| match doc.extract_text(&[page_num]) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("No text extracted from PDF page {}: {}", page_num, e);
                String::new()
            }
        })
        .collect();

    tracing::trace!("Extracted {} PDF pages", pages.len());

    Ok(pages.join(PAGE_BREAK.to_string().as_str()))
}
