use crate::error::{DocumentError, Result};
use crate::order::KeyOrder;
use crate::value::MetaValue;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_yaml::{Mapping, Value as YamlValue};

/// Ordered front matter mapping.
///
/// Insertion order is preserved so that a document can be compared against
/// its policy-ordered form before deciding whether to rewrite it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    entries: Vec<(String, MetaValue)>,
}

impl Metadata {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a parsed YAML mapping, keeping the source order
    pub fn from_mapping(mapping: Mapping) -> Result<Self> {
        let mut metadata = Self::new();
        for (key, value) in mapping {
            let key = match key {
                YamlValue::String(key) => key,
                YamlValue::Number(number) => number.to_string(),
                YamlValue::Bool(flag) => flag.to_string(),
                other => {
                    let shown = serde_yaml::to_string(&other).unwrap_or_default();
                    return Err(DocumentError::invalid_key(shown.trim()));
                }
            };
            metadata.insert(key, MetaValue::from_yaml(value));
        }
        Ok(metadata)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut MetaValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Insert or replace; a replaced key keeps its position
    pub fn insert(&mut self, key: impl Into<String>, value: MetaValue) -> Option<MetaValue> {
        let key = key.into();
        if let Some(slot) = self.get_mut(&key) {
            return Some(std::mem::replace(slot, value));
        }
        self.entries.push((key, value));
        None
    }

    pub fn remove(&mut self, key: &str) -> Option<MetaValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy of this mapping arranged by `order`
    #[must_use]
    pub fn ordered(&self, order: &KeyOrder) -> Self {
        let arranged = order.arrange(self.keys());
        let entries = arranged
            .into_iter()
            .filter_map(|key| self.get(key).map(|value| (key.to_string(), value.clone())))
            .collect();
        Self { entries }
    }

    /// Rearrange in place; returns whether the key order changed
    pub fn reorder(&mut self, order: &KeyOrder) -> bool {
        let sorted = self.ordered(order);
        let changed = !self.keys().eq(sorted.keys());
        if changed {
            *self = sorted;
        }
        changed
    }
}

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
