//! Tag inventory across a corpus: frequencies, case variants and merge
//! suggestions.

use crate::config::MergeConfig;
use blogmeta_document::{Metadata, MetaValue};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Ordering of the frequency table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Count descending, ties broken by name
    #[default]
    Count,
    /// Name ascending
    Name,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Spellings of one tag that differ only by letter case
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseVariantGroup {
    /// Lowercase form shared by every variant
    pub identity: String,
    /// First spelling encountered; suggested as the one to keep
    pub canonical_hint: String,
    pub variants: Vec<TagCount>,
}

/// Why two tags look like duplicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeRule {
    /// One tag is the other plus a trailing `s`
    Plural,
    /// The shorter tag is contained in a slightly longer one
    Substring,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct MergeSuggestion {
    pub first: String,
    pub second: String,
    pub rule: MergeRule,
}

/// Everything `analyze-tags` reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagReport {
    pub documents: usize,
    pub frequencies: Vec<TagCount>,
    pub case_variants: Vec<CaseVariantGroup>,
    pub merge_suggestions: Vec<MergeSuggestion>,
}

/// Accumulates tag usage one document at a time.
#[derive(Debug, Default)]
pub struct TagInventory {
    counts: HashMap<String, usize>,
    // lowercase identity -> literal spellings in first-seen order
    spellings: HashMap<String, Vec<String>>,
    documents: usize,
}

impl TagInventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the `tags` list of one document; other shapes are ignored
    pub fn record_metadata(&mut self, metadata: &Metadata) {
        if let Some(MetaValue::List(tags)) = metadata.get("tags") {
            self.record(tags);
        }
    }

    pub fn record(&mut self, tags: &[String]) {
        self.documents += 1;
        for tag in tags {
            *self.counts.entry(tag.clone()).or_default() += 1;

            let spellings = self.spellings.entry(tag.to_lowercase()).or_default();
            if !spellings.contains(tag) {
                spellings.push(tag.clone());
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of documents that carried a tag list
    #[must_use]
    pub fn documents(&self) -> usize {
        self.documents
    }

    #[must_use]
    pub fn count(&self, tag: &str) -> usize {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn frequencies(&self, sort: SortMode) -> Vec<TagCount> {
        let mut table: Vec<TagCount> = self
            .counts
            .iter()
            .map(|(tag, count)| TagCount {
                tag: tag.clone(),
                count: *count,
            })
            .collect();

        match sort {
            SortMode::Count => {
                table.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
            }
            SortMode::Name => table.sort_by(|a, b| a.tag.cmp(&b.tag)),
        }
        table
    }

    /// Groups with more than one literal spelling, sorted by identity
    #[must_use]
    pub fn case_variants(&self) -> Vec<CaseVariantGroup> {
        let mut groups: Vec<CaseVariantGroup> = self
            .spellings
            .iter()
            .filter(|(_, spellings)| spellings.len() > 1)
            .map(|(identity, spellings)| {
                let mut sorted = spellings.clone();
                sorted.sort();
                CaseVariantGroup {
                    identity: identity.clone(),
                    canonical_hint: spellings[0].clone(),
                    variants: sorted
                        .into_iter()
                        .map(|tag| TagCount {
                            count: self.count(&tag),
                            tag,
                        })
                        .collect(),
                }
            })
            .collect();

        groups.sort_by(|a, b| a.identity.cmp(&b.identity));
        groups
    }

    #[must_use]
    pub fn merge_suggestions(&self, merge: &MergeConfig) -> Vec<MergeSuggestion> {
        let unique: BTreeSet<&str> = self.counts.keys().map(String::as_str).collect();
        suggest_merges(&unique.into_iter().collect::<Vec<_>>(), merge)
    }

    #[must_use]
    pub fn report(&self, sort: SortMode, merge: &MergeConfig) -> TagReport {
        TagReport {
            documents: self.documents,
            frequencies: self.frequencies(sort),
            case_variants: self.case_variants(),
            merge_suggestions: self.merge_suggestions(merge),
        }
    }
}

/// Compare every pair of distinct tags and collect likely duplicates.
///
/// `tags` must be sorted and unique; each pair is considered once with the
/// earlier tag first.
#[must_use]
pub fn suggest_merges(tags: &[&str], merge: &MergeConfig) -> Vec<MergeSuggestion> {
    let mut found = BTreeSet::new();
    for (i, first) in tags.iter().enumerate() {
        for second in &tags[i + 1..] {
            if let Some(rule) = merge_rule(first, second, merge) {
                found.insert(MergeSuggestion {
                    first: (*first).to_string(),
                    second: (*second).to_string(),
                    rule,
                });
            }
        }
    }
    found.into_iter().collect()
}

/// Decide whether two tags should be suggested for merging
#[must_use]
pub fn merge_rule(first: &str, second: &str, merge: &MergeConfig) -> Option<MergeRule> {
    let a = first.to_lowercase();
    let b = second.to_lowercase();

    // case variants are reported separately
    if a == b || merge.exceptions.contains(&a, &b) {
        return None;
    }

    if format!("{a}s") == b || format!("{b}s") == a {
        return Some(MergeRule::Plural);
    }

    let (a_len, b_len) = (a.chars().count(), b.chars().count());
    let diff = a_len.abs_diff(b_len);
    if diff == 0 || diff > merge.max_length_difference {
        return None;
    }

    let (shorter, longer) = if a_len < b_len { (&a, &b) } else { (&b, &a) };
    longer.contains(shorter.as_str()).then_some(MergeRule::Substring)
}
