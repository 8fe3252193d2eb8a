//! Minimal AsciiDoc reader for news entries.
//!
//! Only the parts a news summary needs are recognized: the document title,
//! attribute entries and the lines of the first content block.

use std::collections::BTreeMap;

/// Header and first block of an AsciiDoc document.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NewsDocument {
    /// Document title from the `= Title` line or a `:doctitle:` entry.
    pub title: Option<String>,
    /// Attribute entries (`:name: value`) from the header and body.
    pub attributes: BTreeMap<String, String>,
    /// Lines of the first content block.
    pub first_block: Vec<String>,
}

impl NewsDocument {
    /// Look up an attribute entry.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// First block joined with newlines.
    #[must_use]
    pub fn summary(&self) -> String {
        self.first_block.join("\n")
    }
}

/// Parse the header and first block of `contents`.
///
/// # Example
///
/// ```
/// use folio_extensions::news::parse_document;
///
/// let doc = parse_document("= Release 1.0\n:page-publish_date: 2024-06-01\n\nFirst paragraph.\n\nMore.");
/// assert_eq!(doc.title.as_deref(), Some("Release 1.0"));
/// assert_eq!(doc.attribute("page-publish_date"), Some("2024-06-01"));
/// assert_eq!(doc.summary(), "First paragraph.");
/// ```
#[must_use]
pub fn parse_document(contents: &str) -> NewsDocument {
    let mut doc = NewsDocument::default();
    let mut lines = contents.lines().peekable();

    // Header: optional title, author/revision lines and attribute entries,
    // terminated by the first blank line.
    while let Some(line) = lines.peek() {
        if line.trim().is_empty() || is_comment(line) {
            lines.next();
        } else {
            break;
        }
    }
    if let Some(title) = lines.peek().and_then(|l| l.strip_prefix("= ")) {
        doc.title = Some(title.trim().to_owned());
        lines.next();
        while let Some(line) = lines.next_if(|l| !l.trim().is_empty()) {
            if let Some((name, value)) = parse_attribute_entry(line) {
                doc.attributes.insert(name, value);
            }
        }
    }

    let mut in_comment_block = false;
    for line in lines {
        let trimmed = line.trim();

        if trimmed == "////" {
            in_comment_block = !in_comment_block;
            continue;
        }
        if in_comment_block {
            continue;
        }

        if doc.first_block.is_empty() {
            if trimmed.is_empty() || is_comment(line) || is_block_metadata(trimmed) {
                continue;
            }
            if let Some((name, value)) = parse_attribute_entry(line) {
                doc.attributes.insert(name, value);
                continue;
            }
            if trimmed.starts_with("==") && trimmed.trim_start_matches('=').starts_with(' ') {
                continue;
            }
            doc.first_block.push(line.to_owned());
        } else if trimmed.is_empty() {
            break;
        } else {
            doc.first_block.push(line.to_owned());
        }
    }

    if doc.title.is_none() {
        doc.title = doc.attributes.get("doctitle").cloned();
    }
    doc
}

/// Parse `:name: value`. Unset entries (`:name!:`) are ignored.
fn parse_attribute_entry(line: &str) -> Option<(String, String)> {
    let rest = line.strip_prefix(':')?;
    let (name, value) = rest.split_once(':')?;
    if name.is_empty()
        || name.ends_with('!')
        || !name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return None;
    }
    Some((name.to_owned(), value.trim().to_owned()))
}

fn is_comment(line: &str) -> bool {
    line.starts_with("//") && !line.starts_with("////")
}

/// Block attribute lines (`[.lead]`, `[[id]]`) and block titles (`.Title`).
fn is_block_metadata(trimmed: &str) -> bool {
    (trimmed.starts_with('[') && trimmed.ends_with(']'))
        || (trimmed.starts_with('.') && !trimmed.starts_with("..") && trimmed.len() > 1)
}
