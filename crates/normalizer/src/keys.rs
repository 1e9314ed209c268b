use crate::config::ConceptualGroup;
use blogmeta_document::Metadata;
use serde::Serialize;
use std::collections::HashMap;

/// Mandatory keys absent from `metadata`, in the order they were listed
#[must_use]
pub fn missing_keys(metadata: &Metadata, required: &[String]) -> Vec<String> {
    required
        .iter()
        .filter(|key| !metadata.contains_key(key))
        .cloned()
        .collect()
}

/// Several spellings of the same key that differ only by case
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiteralConflict {
    pub identity: String,
    pub spellings: Vec<String>,
}

/// More than one member of a conceptual group present in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConceptualConflict {
    pub group: String,
    pub present: Vec<String>,
}

/// Duplicate-key findings for one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyConflicts {
    pub literal: Vec<LiteralConflict>,
    pub conceptual: Vec<ConceptualConflict>,
    /// Spellings written more than once, verbatim
    pub repeated: Vec<String>,
}

impl KeyConflicts {
    /// Inspect the literal key spellings of a metadata block
    #[must_use]
    pub fn detect(literal_keys: &[String], groups: &[ConceptualGroup]) -> Self {
        Self {
            literal: literal_duplicates(literal_keys),
            conceptual: conceptual_duplicates(literal_keys, groups),
            repeated: repeated_keys(literal_keys),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literal.is_empty() && self.conceptual.is_empty() && self.repeated.is_empty()
    }
}

/// Two or more distinct spellings of a key that fold to the same identity.
///
/// Verbatim repeats are not collisions here; see [`repeated_keys`].
#[must_use]
pub fn literal_duplicates(literal_keys: &[String]) -> Vec<LiteralConflict> {
    let mut order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, Vec<String>> = HashMap::new();

    for key in literal_keys {
        let identity = key.to_lowercase();
        let spellings = grouped.entry(identity.clone()).or_insert_with(|| {
            order.push(identity);
            Vec::new()
        });
        if !spellings.contains(key) {
            spellings.push(key.clone());
        }
    }

    order
        .into_iter()
        .filter_map(|identity| {
            let spellings = grouped.remove(&identity)?;
            (spellings.len() > 1).then_some(LiteralConflict {
                identity,
                spellings,
            })
        })
        .collect()
}

/// Spellings that appear more than once, in first-repeat order
#[must_use]
pub fn repeated_keys(literal_keys: &[String]) -> Vec<String> {
    let mut seen: Vec<&String> = Vec::new();
    let mut repeated: Vec<String> = Vec::new();
    for key in literal_keys {
        if seen.contains(&key) {
            if !repeated.contains(key) {
                repeated.push(key.clone());
            }
        } else {
            seen.push(key);
        }
    }
    repeated
}

/// Groups with two or more distinct literal keys among their members.
///
/// Membership ignores case, so `Status` next to `status` is reported here
/// as well as by [`literal_duplicates`].
#[must_use]
pub fn conceptual_duplicates(
    literal_keys: &[String],
    groups: &[ConceptualGroup],
) -> Vec<ConceptualConflict> {
    groups
        .iter()
        .filter_map(|group| {
            let members: Vec<String> = group.variants.iter().map(|v| v.to_lowercase()).collect();
            let mut present: Vec<String> = Vec::new();
            for key in literal_keys {
                if members.contains(&key.to_lowercase()) && !present.contains(key) {
                    present.push(key.clone());
                }
            }
            (present.len() > 1).then(|| ConceptualConflict {
                group: group.name.clone(),
                present,
            })
        })
        .collect()
}
