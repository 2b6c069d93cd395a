//! HTML text extraction

use super::ExtractResult;
use scraper::{Html, Node};

/// Elements whose text content is never rendered
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Strips markup and returns the concatenated visible text of a page
///
/// Bytes are decoded as UTF-8, replacing invalid sequences. Text nodes are
/// concatenated in document order without added separators, so whitespace
/// between elements is whatever the source had. HTML parsing is forgiving and
/// never fails; the `Result` keeps the parser signatures uniform.
///
/// # Example
///
/// ```
/// use linkalyser::extract::parse_html;
///
/// let text = parse_html(b"<h1>Budget</h1><script>var x;</script><p>2024</p>").unwrap();
/// assert_eq!(text, "Budget2024");
/// ```
pub fn parse_html(bytes: &[u8]) -> ExtractResult<String> {
    let source = String::from_utf8_lossy(bytes);
    let document = Html::parse_document(&source);

    let mut text = String::new();
    for node in document.tree.root().descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| match ancestor.value() {
            Node::Element(element) => HIDDEN_ELEMENTS.contains(&element.name()),
            _ => false,
        });

        if !hidden {
            text.push_str(fragment);
        }
    }

    Ok(text)
}
