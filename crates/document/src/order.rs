use serde::{Deserialize, Serialize};

/// Ordering rule applied to front matter keys on every write.
///
/// Keys named in `priority` come first, in that order; every other key
/// follows in ascending byte order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyOrder {
    priority: Vec<String>,
}

impl KeyOrder {
    #[must_use]
    pub fn new(priority: Vec<String>) -> Self {
        Self { priority }
    }

    #[must_use]
    pub fn priority(&self) -> &[String] {
        &self.priority
    }

    /// Return `keys` rearranged according to the policy
    pub fn arrange<'a, I>(&self, keys: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let keys: Vec<&'a str> = keys.into_iter().collect();
        let mut arranged = Vec::with_capacity(keys.len());

        for wanted in &self.priority {
            if let Some(found) = keys.iter().find(|key| **key == wanted.as_str()) {
                arranged.push(*found);
            }
        }

        let mut rest: Vec<&'a str> = keys
            .iter()
            .copied()
            .filter(|key| !self.priority.iter().any(|p| p == key))
            .collect();
        rest.sort_unstable();
        rest.dedup();
        arranged.extend(rest);
        arranged
    }
}

impl Default for KeyOrder {
    fn default() -> Self {
        Self::new(
            [
                "id",
                "slug",
                "title",
                "subtitle",
                "date",
                "updated",
                "description",
                "authors",
                "image",
                "series",
                "mainTag",
                "tags",
                "categories",
                "language",
            ]
            .iter()
            .map(|key| (*key).to_string())
            .collect(),
        )
    }
}
