use crate::error::{ConfigError, Result};
use blogmeta_document::KeyOrder;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

pub const DEFAULT_FILE_PATTERN: &str = "**/*.md*";

/// Immutable tables that drive every analysis and mutation.
///
/// Passed explicitly into each operation; nothing in the crate reads
/// process-wide state.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizerConfig {
    /// Ordering applied whenever a document is written
    pub key_order: KeyOrder,

    /// Keys every post must define
    pub mandatory_keys: Vec<String>,

    /// Glob (relative to the content root) selecting documents
    pub file_pattern: String,

    /// Tag merge heuristics
    pub merge: MergeConfig,

    /// Sets of key spellings that must never coexist
    pub conceptual_groups: Vec<ConceptualGroup>,

    /// SEO and content quality rules
    pub seo: SeoRules,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            key_order: KeyOrder::default(),
            mandatory_keys: strings(&[
                "authors",
                "date",
                "description",
                "image",
                "language",
                "mainTag",
                "slug",
                "tags",
                "title",
            ]),
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            merge: MergeConfig::default(),
            conceptual_groups: vec![
                ConceptualGroup::new(
                    "blueskyrecordkey",
                    &["blueskyRecordKey", "blukskyRecordKey", "bskyRecordKey"],
                ),
                ConceptualGroup::new("status", &["status", "postStatus", "deprecatedStatus"]),
                ConceptualGroup::new(
                    "canonicalurl",
                    &["canonicalUrl", "canonicalURL", "canonical_url"],
                ),
            ],
            seo: SeoRules::default(),
        }
    }
}

/// Settings for tag merge suggestions
#[derive(Debug, Clone, Serialize)]
pub struct MergeConfig {
    /// Largest length gap (in characters) for the substring rule
    pub max_length_difference: usize,

    /// Pairs that are never suggested
    pub exceptions: MergeExceptions,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            max_length_difference: 3,
            exceptions: MergeExceptions::new([
                ("ftp", "sftp"),
                ("git", "github"),
                ("git", "gitlab"),
                ("mysql", "sql"),
                ("php", "phpcbf"),
                ("php", "phpcs"),
                ("php", "phpdoc"),
                ("scp", "winscp"),
                ("ssh", "sshpass"),
                ("xml", "xmlstarlet"),
            ]),
        }
    }
}

/// Case-insensitive, order-independent set of exempted tag pairs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeExceptions {
    pairs: BTreeSet<(String, String)>,
}

impl MergeExceptions {
    pub fn new<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(a, b)| canonical_pair(a.as_ref(), b.as_ref()))
                .collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, a: &str, b: &str) -> bool {
        self.pairs.contains(&canonical_pair(a, b))
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, String)> {
        self.pairs.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

fn canonical_pair(a: &str, b: &str) -> (String, String) {
    let (a, b) = (a.to_lowercase(), b.to_lowercase());
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Alternate spellings of one key concept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptualGroup {
    pub name: String,
    pub variants: Vec<String>,
}

impl ConceptualGroup {
    #[must_use]
    pub fn new(name: &str, variants: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            variants: strings(variants),
        }
    }
}

/// SEO / quality rules applied by `check-seo`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoRules {
    pub mandatory_keys: Vec<String>,
    pub min_lengths: BTreeMap<String, usize>,
    pub max_lengths: BTreeMap<String, usize>,
    pub lowercase_keys: Vec<String>,
}

impl Default for SeoRules {
    fn default() -> Self {
        Self {
            mandatory_keys: strings(&["title", "description", "slug", "date", "language"]),
            min_lengths: BTreeMap::from([("title".to_string(), 5), ("description".to_string(), 50)]),
            max_lengths: BTreeMap::from([("description".to_string(), 160)]),
            lowercase_keys: strings(&["tags", "categories", "mainTag"]),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    key_order: Option<Vec<String>>,
    mandatory_keys: Option<Vec<String>>,
    file_pattern: Option<String>,
    merge: Option<RawMerge>,
    conceptual_groups: Option<Vec<ConceptualGroup>>,
    seo: Option<RawSeo>,
}

#[derive(Debug, Default, Deserialize)]
struct RawMerge {
    max_length_difference: Option<usize>,
    exceptions: Option<Vec<(String, String)>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSeo {
    mandatory_keys: Option<Vec<String>>,
    min_lengths: Option<BTreeMap<String, usize>>,
    max_lengths: Option<BTreeMap<String, usize>>,
    lowercase_keys: Option<Vec<String>>,
}

impl NormalizerConfig {
    /// Parse a JSON or TOML document; omitted fields keep their defaults
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw = parse_raw(bytes)?;
        let config = Self::merge(raw);
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let config = Self::from_bytes(&bytes)?;
        log::debug!("Loaded normalizer config from {}", path.display());
        Ok(config)
    }

    fn merge(raw: RawConfig) -> Self {
        let defaults = Self::default();
        let merge = raw.merge.unwrap_or_default();
        let seo = raw.seo.unwrap_or_default();

        Self {
            key_order: raw
                .key_order
                .map_or(defaults.key_order, KeyOrder::new),
            mandatory_keys: raw.mandatory_keys.unwrap_or(defaults.mandatory_keys),
            file_pattern: raw.file_pattern.unwrap_or(defaults.file_pattern),
            merge: MergeConfig {
                max_length_difference: merge
                    .max_length_difference
                    .unwrap_or(defaults.merge.max_length_difference),
                exceptions: merge
                    .exceptions
                    .map_or(defaults.merge.exceptions, MergeExceptions::new),
            },
            conceptual_groups: raw.conceptual_groups.unwrap_or(defaults.conceptual_groups),
            seo: SeoRules {
                mandatory_keys: seo.mandatory_keys.unwrap_or(defaults.seo.mandatory_keys),
                min_lengths: seo.min_lengths.unwrap_or(defaults.seo.min_lengths),
                max_lengths: seo.max_lengths.unwrap_or(defaults.seo.max_lengths),
                lowercase_keys: seo.lowercase_keys.unwrap_or(defaults.seo.lowercase_keys),
            },
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for key in self.key_order.priority() {
            if key.trim().is_empty() {
                return Err(ConfigError::invalid_config("key_order contains an empty key"));
            }
            if !seen.insert(key.as_str()) {
                return Err(ConfigError::invalid_config(format!(
                    "key_order lists '{key}' more than once"
                )));
            }
        }

        check_key_list("mandatory_keys", &self.mandatory_keys)?;
        check_key_list("seo.mandatory_keys", &self.seo.mandatory_keys)?;
        check_key_list("seo.lowercase_keys", &self.seo.lowercase_keys)?;

        if self.file_pattern.trim().is_empty() {
            return Err(ConfigError::invalid_config("file_pattern must not be empty"));
        }

        if self.merge.max_length_difference == 0 {
            return Err(ConfigError::invalid_config(
                "merge.max_length_difference must be > 0",
            ));
        }
        for (a, b) in self.merge.exceptions.iter() {
            if a.trim().is_empty() || b.trim().is_empty() {
                return Err(ConfigError::invalid_config(
                    "merge.exceptions contains an empty tag",
                ));
            }
            if a == b {
                return Err(ConfigError::invalid_config(format!(
                    "merge.exceptions pair ('{a}', '{b}') names the same tag twice"
                )));
            }
        }

        for group in &self.conceptual_groups {
            if group.name.trim().is_empty() {
                return Err(ConfigError::invalid_config(
                    "conceptual_groups entry has an empty name",
                ));
            }
            if group.variants.is_empty() {
                return Err(ConfigError::invalid_config(format!(
                    "conceptual group '{}' has no variants",
                    group.name
                )));
            }
            check_key_list(&format!("conceptual_groups.{}", group.name), &group.variants)?;
        }

        for (key, min) in &self.seo.min_lengths {
            if let Some(max) = self.seo.max_lengths.get(key) {
                if min > max {
                    return Err(ConfigError::invalid_config(format!(
                        "seo.min_lengths.{key} ({min}) cannot exceed seo.max_lengths.{key} ({max})"
                    )));
                }
            }
        }

        Ok(())
    }
}

fn check_key_list(label: &str, keys: &[String]) -> Result<()> {
    if keys.iter().any(|key| key.trim().is_empty()) {
        return Err(ConfigError::invalid_config(format!(
            "{label} contains an empty key"
        )));
    }
    Ok(())
}

fn parse_raw(bytes: &[u8]) -> Result<RawConfig> {
    let value: serde_json::Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(json_err) => {
            let utf8 = std::str::from_utf8(bytes)
                .map_err(|err| ConfigError::parse(format!("{json_err}; {err}")))?;
            let toml_value: toml::Value = toml::from_str(utf8).map_err(|toml_err| {
                ConfigError::parse(format!(
                    "Config is not valid JSON or TOML ({json_err}); TOML parse error: {toml_err}"
                ))
            })?;
            serde_json::to_value(toml_value).map_err(|err| {
                ConfigError::parse(format!("Failed to convert TOML config to JSON: {err}"))
            })?
        }
    };

    validate_config_value(&value)?;
    serde_json::from_value(value).map_err(|err| ConfigError::parse(err.to_string()))
}

fn validate_config_value(value: &serde_json::Value) -> Result<()> {
    fn validate_object_keys(
        unknown: &mut Vec<String>,
        obj: &serde_json::Map<String, serde_json::Value>,
        base: &str,
        allowed: &[&str],
    ) {
        for key in obj.keys() {
            if !allowed.iter().any(|a| a == &key.as_str()) {
                if base.is_empty() {
                    unknown.push(key.clone());
                } else {
                    unknown.push(format!("{base}.{key}"));
                }
            }
        }
    }

    let serde_json::Value::Object(root) = value else {
        return Err(ConfigError::parse("Config must be an object"));
    };

    let mut unknown = Vec::new();
    validate_object_keys(
        &mut unknown,
        root,
        "",
        &[
            "key_order",
            "mandatory_keys",
            "file_pattern",
            "merge",
            "conceptual_groups",
            "seo",
        ],
    );

    if let Some(serde_json::Value::Object(merge)) = root.get("merge") {
        validate_object_keys(
            &mut unknown,
            merge,
            "merge",
            &["max_length_difference", "exceptions"],
        );
    }
    if let Some(serde_json::Value::Object(seo)) = root.get("seo") {
        validate_object_keys(
            &mut unknown,
            seo,
            "seo",
            &["mandatory_keys", "min_lengths", "max_lengths", "lowercase_keys"],
        );
    }
    if let Some(serde_json::Value::Array(groups)) = root.get("conceptual_groups") {
        for (idx, group) in groups.iter().enumerate() {
            if let serde_json::Value::Object(group) = group {
                validate_object_keys(
                    &mut unknown,
                    group,
                    &format!("conceptual_groups[{idx}]"),
                    &["name", "variants"],
                );
            }
        }
    }

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::UnknownFields(unknown))
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_valid() {
        let config = NormalizerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.merge.exceptions.len(), 10);
        assert_eq!(config.conceptual_groups.len(), 3);
    }

    #[test]
    fn exceptions_ignore_case_and_order() {
        let exceptions = MergeExceptions::new([("Git", "github")]);
        assert!(exceptions.contains("GITHUB", "git"));
        assert!(!exceptions.contains("git", "gitlab"));
    }

    #[test]
    fn toml_overrides_keep_other_defaults() {
        let toml = br#"
            mandatory_keys = ["title"]

            [merge]
            max_length_difference = 2
            exceptions = [["rust", "rustc"]]

            [[conceptual_groups]]
            name = "series"
            variants = ["series", "serie", "Series"]
        "#;
        let config = NormalizerConfig::from_bytes(toml).unwrap();

        assert_eq!(config.mandatory_keys, vec!["title".to_string()]);
        assert_eq!(config.merge.max_length_difference, 2);
        assert!(config.merge.exceptions.contains("rustc", "rust"));
        assert!(!config.merge.exceptions.contains("git", "github"));
        assert_eq!(config.conceptual_groups[0].name, "series");
        assert_eq!(config.key_order, KeyOrder::default());
        assert_eq!(config.seo, SeoRules::default());
    }

    #[test]
    fn json_is_accepted() {
        let json = br#"{"key_order": ["title", "date"], "seo": {"lowercase_keys": ["tags"]}}"#;
        let config = NormalizerConfig::from_bytes(json).unwrap();
        assert_eq!(config.key_order.priority(), &["title", "date"]);
        assert_eq!(config.seo.lowercase_keys, vec!["tags".to_string()]);
    }

    #[test]
    fn unknown_fields_are_reported_with_paths() {
        let toml = br#"
            colour = "red"

            [merge]
            max_len = 3

            [[conceptual_groups]]
            name = "x"
            variants = ["a"]
            typo = true
        "#;
        let err = NormalizerConfig::from_bytes(toml).unwrap_err();
        match err {
            ConfigError::UnknownFields(fields) => assert_eq!(
                fields,
                vec![
                    "colour".to_string(),
                    "merge.max_len".to_string(),
                    "conceptual_groups[0].typo".to_string()
                ]
            ),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = NormalizerConfig::default();

        config.merge.max_length_difference = 0;
        assert!(config.validate().is_err());
        config.merge.max_length_difference = 3;

        config.key_order = KeyOrder::new(vec!["title".into(), "title".into()]);
        assert!(config.validate().is_err());
        config.key_order = KeyOrder::default();

        config.merge.exceptions = MergeExceptions::new([("php", "PHP")]);
        assert!(config.validate().is_err());
        config.merge.exceptions = MergeExceptions::default();

        config.seo.min_lengths.insert("description".into(), 500);
        assert!(config.validate().is_err());
        config.seo.min_lengths.insert("description".into(), 50);

        assert!(config.validate().is_ok());
    }
}
