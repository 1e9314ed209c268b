use blogmeta_document::MetaValue;
use blogmeta_normalizer::TagEdit;
use thiserror::Error;

/// Invalid command-line input, always detected before any document is read
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("expected {expected}, got '{got}'")]
    Malformed { expected: &'static str, got: String },

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("refusing to add '{0}' with an empty value without confirmation (pass --yes)")]
    ConfirmationRequired(String),

    #[error("adding '{0}' with an empty value was declined")]
    Declined(String),
}

pub type ArgResult<T> = std::result::Result<T, ArgumentError>;

/// Non-empty, trimmed key or tag
pub fn required(value: &str, what: &'static str) -> ArgResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ArgumentError::Empty(what));
    }
    Ok(trimmed.to_string())
}

/// `OLD,NEW`
pub fn parse_rename(raw: &str) -> ArgResult<TagEdit> {
    let malformed = || ArgumentError::Malformed {
        expected: "OLD,NEW",
        got: raw.to_string(),
    };
    let (from, to) = raw.split_once(',').ok_or_else(malformed)?;
    if to.contains(',') {
        return Err(malformed());
    }
    Ok(TagEdit::Rename {
        from: required(from, "old tag")?,
        to: required(to, "new tag")?,
    })
}

/// `KEY[,DEFAULT]`; `None` value means no default was given
pub fn parse_key_default(raw: &str) -> ArgResult<(String, Option<MetaValue>)> {
    match raw.split_once(',') {
        Some((key, default)) => Ok((
            required(key, "key")?,
            Some(MetaValue::from_default_arg(default.trim())),
        )),
        None => Ok((required(raw, "key")?, None)),
    }
}

/// Comma-separated variant keys, minus blanks, duplicates and the target itself
pub fn parse_variants(raw: &str, target: &str) -> Vec<String> {
    let mut variants: Vec<String> = Vec::new();
    for variant in raw.split(',').map(str::trim) {
        if variant.is_empty() || variant == target || variants.iter().any(|v| v == variant) {
            continue;
        }
        variants.push(variant.to_string());
    }
    variants
}
