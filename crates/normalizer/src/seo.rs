use crate::config::SeoRules;
use blogmeta_document::{Metadata, MetaValue};
use serde::Serialize;
use std::fmt;

/// A single SEO / quality finding for one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeoIssue {
    MissingKey { key: String },
    TooShort { key: String, length: usize, min: usize },
    TooLong { key: String, length: usize, max: usize },
    NotLowercase { key: String, value: String },
}

impl fmt::Display for SeoIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey { key } => write!(f, "missing key '{key}'"),
            Self::TooShort { key, length, min } => {
                write!(f, "'{key}' is too short ({length} < {min} characters)")
            }
            Self::TooLong { key, length, max } => {
                write!(f, "'{key}' is too long ({length} > {max} characters)")
            }
            Self::NotLowercase { key, value } => {
                write!(f, "'{key}' value '{value}' should be lowercase")
            }
        }
    }
}

/// Run every rule against one document's metadata
#[must_use]
pub fn check_seo(metadata: &Metadata, rules: &SeoRules) -> Vec<SeoIssue> {
    let mut issues: Vec<SeoIssue> = rules
        .mandatory_keys
        .iter()
        .filter(|key| !metadata.contains_key(key))
        .map(|key| SeoIssue::MissingKey { key: key.clone() })
        .collect();

    for (key, min) in &rules.min_lengths {
        if let Some(length) = text_length(metadata, key) {
            if length < *min {
                issues.push(SeoIssue::TooShort {
                    key: key.clone(),
                    length,
                    min: *min,
                });
            }
        }
    }

    for (key, max) in &rules.max_lengths {
        if let Some(length) = text_length(metadata, key) {
            if length > *max {
                issues.push(SeoIssue::TooLong {
                    key: key.clone(),
                    length,
                    max: *max,
                });
            }
        }
    }

    for key in &rules.lowercase_keys {
        let values: Vec<&str> = match metadata.get(key) {
            Some(MetaValue::Text(text)) => vec![text.as_str()],
            Some(MetaValue::List(items)) => items.iter().map(String::as_str).collect(),
            _ => continue,
        };
        if let Some(value) = values
            .into_iter()
            .find(|value| !value.is_empty() && *value != value.to_lowercase())
        {
            issues.push(SeoIssue::NotLowercase {
                key: key.clone(),
                value: value.to_string(),
            });
        }
    }

    issues
}

fn text_length(metadata: &Metadata, key: &str) -> Option<usize> {
    metadata
        .get(key)
        .and_then(MetaValue::as_text)
        .map(|text| text.trim().chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn complete() -> Metadata {
        let mut meta = Metadata::new();
        meta.insert("title", MetaValue::Text("A fine title".into()));
        meta.insert(
            "description",
            MetaValue::Text("A description that is comfortably longer than fifty characters.".into()),
        );
        meta.insert("slug", MetaValue::Text("a-fine-title".into()));
        meta.insert("date", MetaValue::Text("2024-01-01".into()));
        meta.insert("language", MetaValue::Text("en".into()));
        meta.insert("tags", MetaValue::List(vec!["rust".into(), "cli".into()]));
        meta
    }

    #[test]
    fn clean_post_has_no_issues() {
        assert!(check_seo(&complete(), &SeoRules::default()).is_empty());
    }

    #[test]
    fn length_rules_use_trimmed_text() {
        let mut meta = complete();
        meta.insert("title", MetaValue::Text("  Hi  ".into()));
        meta.insert("description", MetaValue::Text("x".repeat(161)));

        let issues = check_seo(&meta, &SeoRules::default());
        assert_eq!(
            issues,
            vec![
                SeoIssue::TooShort {
                    key: "title".into(),
                    length: 2,
                    min: 5
                },
                SeoIssue::TooLong {
                    key: "description".into(),
                    length: 161,
                    max: 160
                },
            ]
        );
    }

    #[test]
    fn only_first_uppercase_value_is_reported() {
        let mut meta = complete();
        meta.insert(
            "tags",
            MetaValue::List(vec!["rust".into(), "Docker".into(), "PHP".into()]),
        );
        meta.insert("mainTag", MetaValue::Text("Rust".into()));
        meta.remove("language");

        let issues = check_seo(&meta, &SeoRules::default());
        assert_eq!(
            issues,
            vec![
                SeoIssue::MissingKey {
                    key: "language".into()
                },
                SeoIssue::NotLowercase {
                    key: "tags".into(),
                    value: "Docker".into()
                },
                SeoIssue::NotLowercase {
                    key: "mainTag".into(),
                    value: "Rust".into()
                },
            ]
        );
        assert_eq!(issues[1].to_string(), "'tags' value 'Docker' should be lowercase");
    }
}
