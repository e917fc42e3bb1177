//! XML record decoding.

use beacon_types::Record;
use roxmltree::{Document, Node, ParsingOptions};
use std::borrow::Cow;
use thiserror::Error;

/// Number of characters of the offending text shown in error messages.
const PREVIEW_CHARS: usize = 120;

/// A response body could not be parsed as XML.
///
/// The full offending text is kept and available through [`DecodeError::text`].
#[derive(Error, Debug)]
#[error("Cannot parse '{}' as XML: {source}", preview(.text))]
pub struct DecodeError {
    text: String,
    #[source]
    source: roxmltree::Error,
}

impl DecodeError {
    /// Returns the text that failed to parse.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the underlying XML parser error.
    #[must_use]
    pub const fn parse_error(&self) -> &roxmltree::Error {
        &self.source
    }
}

fn preview(text: &str) -> Cow<'_, str> {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}

/// Decodes one beacon record from its XML text.
///
/// Every element in the document is visited in document order, the root
/// element included. Each contributes its local name (the namespace is
/// dropped) mapped to its direct text, or `None` if it has none.
///
/// A later element whose local name matches an earlier one replaces it. For
/// the flat records the service publishes this never happens, but it means
/// the root element's own name is also a key and a nested element sharing a
/// name with a top-level one shadows it.
///
/// # Errors
///
/// Returns an error if `xml` is not well-formed.
pub fn decode_record(xml: &str) -> Result<Record, DecodeError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let document = Document::parse_with_options(xml, options).map_err(|source| DecodeError {
        text: xml.to_owned(),
        source,
    })?;

    Ok(document
        .root_element()
        .descendants()
        .filter(|node| node.is_element())
        .map(|node| (node.tag_name().name(), direct_text(node)))
        .collect())
}

/// Text of `node` up to its first child element.
///
/// Comments and processing instructions are skipped, so text split by them
/// is joined back together.
fn direct_text(node: Node<'_, '_>) -> Option<String> {
    let mut text: Option<String> = None;
    for child in node.children().take_while(|child| !child.is_element()) {
        if let Some(chunk) = child.text().filter(|_| child.is_text()) {
            text.get_or_insert_with(String::new).push_str(chunk);
        }
    }
    text
}
