//! In-memory front matter mutations.
//!
//! Every function edits a [`Metadata`] and reports whether anything changed;
//! writing the document back is left to the caller.

use blogmeta_document::{KeyOrder, Metadata, MetaValue};
use serde::Serialize;

/// Apply the key order policy
pub fn reorder_keys(metadata: &mut Metadata, order: &KeyOrder) -> bool {
    metadata.reorder(order)
}

/// Insert `key` with `value` unless the key already exists
pub fn add_missing_key(metadata: &mut Metadata, key: &str, value: &MetaValue) -> bool {
    if metadata.contains_key(key) {
        return false;
    }
    metadata.insert(key, value.clone());
    true
}

pub fn remove_key(metadata: &mut Metadata, key: &str) -> bool {
    metadata.remove(key).is_some()
}

/// What [`cleanup_variants`] did to one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupOutcome {
    /// Variant whose value was moved into the target key
    pub adopted_from: Option<String>,
    /// Variant keys deleted from the document
    pub removed: Vec<String>,
}

impl CleanupOutcome {
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.removed.is_empty()
    }
}

/// Fold alternate spellings of a key into `target`.
///
/// When `target` is absent or null it takes the value of the first variant
/// (in `variants` order) that carries one. Every variant present is removed.
pub fn cleanup_variants(metadata: &mut Metadata, target: &str, variants: &[String]) -> CleanupOutcome {
    let mut outcome = CleanupOutcome::default();
    let mut value = metadata.get(target).filter(|v| !v.is_null()).cloned();

    for variant in variants.iter().filter(|v| v.as_str() != target) {
        let Some(found) = metadata.remove(variant) else {
            continue;
        };
        outcome.removed.push(variant.clone());
        if value.is_none() && !found.is_null() {
            value = Some(found);
            outcome.adopted_from = Some(variant.clone());
        }
    }

    if let Some(value) = value {
        if outcome.adopted_from.is_some() {
            metadata.insert(target, value);
        }
    }
    outcome
}

/// Edit applied to the `tags` list of every document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEdit {
    Delete { tag: String },
    Rename { from: String, to: String },
}

impl TagEdit {
    /// Tag whose case-insensitive matches are removed
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Self::Delete { tag } => tag,
            Self::Rename { from, .. } => from,
        }
    }

    /// Rewrite the `tags` list; `false` when no tag matched
    pub fn apply(&self, metadata: &mut Metadata) -> bool {
        let Some(MetaValue::List(tags)) = metadata.get_mut("tags") else {
            return false;
        };
        match edit_tags(tags, self) {
            Some(edited) => {
                *tags = edited;
                true
            }
            None => false,
        }
    }
}

/// Compute the edited tag list, or `None` when nothing matches.
///
/// The result never holds two tags that are equal ignoring case.
#[must_use]
pub fn edit_tags(tags: &[String], edit: &TagEdit) -> Option<Vec<String>> {
    let target = edit.target().to_lowercase();
    let mut matched = false;
    let mut edited: Vec<String> = Vec::with_capacity(tags.len());

    for tag in tags {
        if tag.to_lowercase() == target {
            matched = true;
            if let TagEdit::Rename { to, .. } = edit {
                push_unique(&mut edited, to);
            }
        } else {
            push_unique(&mut edited, tag);
        }
    }

    matched.then_some(edited)
}

fn push_unique(tags: &mut Vec<String>, tag: &str) {
    let lower = tag.to_lowercase();
    if !tags.iter().any(|existing| existing.to_lowercase() == lower) {
        tags.push(tag.to_string());
    }
}
