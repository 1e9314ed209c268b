use crate::error::{DocumentError, Result};
use crate::metadata::Metadata;
use regex::Regex;
use serde_yaml::Value as YamlValue;
use std::sync::OnceLock;

const BOM: char = '\u{feff}';

fn boundary() -> &'static Regex {
    static BOUNDARY: OnceLock<Regex> = OnceLock::new();
    BOUNDARY.get_or_init(|| Regex::new(r"(?m)^-{3,}[ \t\r]*$").expect("boundary pattern is valid"))
}

/// Raw pieces of a document before YAML parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split<'a> {
    /// Text between the two boundary lines, `None` when the file has no block
    pub block: Option<&'a str>,
    /// Everything after the closing boundary line
    pub body: &'a str,
    /// Whether the source started with a byte order mark
    pub bom: bool,
}

/// Separate the front matter block from the body.
///
/// A block exists only when the text (after an optional BOM) opens with a
/// boundary line; it runs until the next boundary line.
pub fn split(text: &str) -> Result<Split<'_>> {
    let (bom, text) = match text.strip_prefix(BOM) {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let mut boundaries = boundary().find_iter(text);
    let opening = match boundaries.next() {
        Some(found) if found.start() == 0 => found,
        _ => {
            return Ok(Split {
                block: None,
                body: text,
                bom,
            })
        }
    };
    let closing = boundaries.next().ok_or(DocumentError::Unterminated)?;

    let block_start = skip_newline(text, opening.end());
    let block = &text[block_start.min(closing.start())..closing.start()];
    let body = &text[skip_newline(text, closing.end())..];

    Ok(Split {
        block: Some(block),
        body,
        bom,
    })
}

/// Parse a raw block into ordered metadata
pub fn parse_block(block: &str) -> Result<Metadata> {
    if block.trim().is_empty() {
        return Ok(Metadata::new());
    }
    match serde_yaml::from_str::<YamlValue>(block)? {
        YamlValue::Mapping(mapping) => Metadata::from_mapping(mapping),
        YamlValue::Null => Ok(Metadata::new()),
        YamlValue::Bool(_) => Err(DocumentError::NotAMapping("a boolean")),
        YamlValue::Number(_) => Err(DocumentError::NotAMapping("a number")),
        YamlValue::String(_) => Err(DocumentError::NotAMapping("a string")),
        YamlValue::Sequence(_) => Err(DocumentError::NotAMapping("a sequence")),
        YamlValue::Tagged(_) => Err(DocumentError::NotAMapping("a tagged value")),
    }
}

/// Recover top-level key spellings exactly as written.
///
/// YAML parsing alone can hide keys that differ only by case once a consumer
/// folds them, so this scans the block text line by line. Indented lines,
/// comments and list items are skipped; the key is everything before the
/// first `:`.
#[must_use]
pub fn literal_keys(block: &str) -> Vec<String> {
    block
        .lines()
        .filter(|line| !line.starts_with(|c: char| c.is_whitespace()))
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('-'))
        .filter_map(|line| line.split_once(':'))
        .map(|(key, _)| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .collect()
}

fn skip_newline(text: &str, at: usize) -> usize {
    if text[at..].starts_with('\n') {
        at + 1
    } else {
        at
    }
}
