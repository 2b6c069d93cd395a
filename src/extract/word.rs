//! Word processing (.docx) text extraction

use super::{ExtractError, ExtractResult};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Part of the OOXML package holding the main document body
const DOCUMENT_PART: &str = "word/document.xml";

/// Returns the text of every body paragraph, one paragraph per line
///
/// Only paragraphs that are direct children of `w:body` are read, so text in
/// tables, headers and footers is not included. Within a paragraph, runs are
/// concatenated, `w:tab` becomes a tab and `w:br`/`w:cr` a line break.
///
/// # Example
///
/// ```no_run
/// use linkalyser::extract::parse_word;
///
/// let bytes = std::fs::read("minutes.docx").unwrap();
/// for line in parse_word(&bytes).unwrap().lines() {
///     println!("{}", line);
/// }
/// ```
pub fn parse_word(bytes: &[u8]) -> ExtractResult<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|_| ExtractError::MissingPart(DOCUMENT_PART))?
        .read_to_string(&mut xml)?;

    Ok(body_paragraphs(&xml)?.join("\n"))
}

/// Collects the text of each top-level body paragraph
fn body_paragraphs(xml: &str) -> ExtractResult<Vec<String>> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut body_depth: Option<usize> = None;
    let mut paragraph_depth: Option<usize> = None;
    let mut in_text = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ExtractError::Xml(format!("at {}: {}", reader.buffer_position(), e)))?;

        match event {
            Event::Start(element) => {
                depth += 1;
                match element.local_name().as_ref() {
                    b"body" if body_depth.is_none() => body_depth = Some(depth),
                    b"p" if paragraph_depth.is_none() && body_depth == Some(depth - 1) => {
                        paragraph_depth = Some(depth);
                        current.clear();
                    }
                    b"t" if paragraph_depth.is_some() => in_text = true,
                    name if paragraph_depth.is_some() => push_break(&mut current, name),
                    _ => {}
                }
            }
            Event::Empty(element) => match element.local_name().as_ref() {
                b"p" if paragraph_depth.is_none() && body_depth == Some(depth) => {
                    paragraphs.push(String::new());
                }
                name if paragraph_depth.is_some() => push_break(&mut current, name),
                _ => {}
            },
            Event::End(element) => {
                match element.local_name().as_ref() {
                    b"p" if paragraph_depth == Some(depth) => {
                        paragraphs.push(std::mem::take(&mut current));
                        paragraph_depth = None;
                    }
                    b"t" => in_text = false,
                    b"body" if body_depth == Some(depth) => body_depth = None,
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Text(text) if in_text => {
                let unescaped = text
                    .unescape()
                    .map_err(|e| ExtractError::Xml(e.to_string()))?;
                current.push_str(&unescaped);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// Appends the character a run-level break element stands for
fn push_break(current: &mut String, name: &[u8]) {
    match name {
        b"tab" => current.push('\t'),
        b"br" | b"cr" => current.push('\n'),
        _ => {}
    }
}
