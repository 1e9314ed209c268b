use blogmeta_document::Metadata;
use serde::Serialize;
use std::collections::BTreeMap;

/// Key usage across a corpus (`list-keys`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyInventory {
    /// key -> number of documents using it
    pub keys: BTreeMap<String, usize>,
    pub with_front_matter: usize,
    /// Documents whose metadata is absent or empty
    pub without_front_matter: Vec<String>,
}

impl KeyInventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, source: &str, metadata: &Metadata) {
        if metadata.is_empty() {
            self.without_front_matter.push(source.to_string());
            return;
        }
        self.with_front_matter += 1;
        for key in metadata.keys() {
            *self.keys.entry(key.to_string()).or_default() += 1;
        }
    }
}

/// Distinct values of one key (`list-values`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueInventory {
    pub key: String,
    /// value -> occurrences; list items are counted one by one
    pub values: BTreeMap<String, usize>,
    pub documents_with_key: usize,
}

impl ValueInventory {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            values: BTreeMap::new(),
            documents_with_key: 0,
        }
    }

    pub fn record(&mut self, metadata: &Metadata) {
        let Some(value) = metadata.get(&self.key) else {
            return;
        };
        self.documents_with_key += 1;
        for item in value.display_items() {
            *self.values.entry(item).or_default() += 1;
        }
    }
}
