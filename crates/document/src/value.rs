use serde::Serialize;
use serde_yaml::Value as YamlValue;
use std::fmt;

/// A front matter value.
///
/// The normalizer only ever inspects `Text`, `Bool` and `List`. The remaining
/// variants carry whatever else a real document contains so that rewriting a
/// file never loses data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    /// Plain string (single or multi-line)
    Text(String),

    /// Boolean flag
    Bool(bool),

    /// Sequence of scalars, each kept in its textual form
    List(Vec<String>),

    /// Number, kept as written
    Number(String),

    /// Explicit null / empty value
    Null,

    /// Anything else (mappings, sequences of mappings, tagged nodes)
    Nested(YamlValue),
}

impl MetaValue {
    /// Convert a parsed YAML node into the closed value type
    pub fn from_yaml(value: YamlValue) -> Self {
        match value {
            YamlValue::Null => Self::Null,
            YamlValue::Bool(flag) => Self::Bool(flag),
            YamlValue::Number(number) => Self::Number(number.to_string()),
            YamlValue::String(text) => Self::Text(text),
            YamlValue::Sequence(items) => {
                let scalars: Option<Vec<String>> = items.iter().map(scalar_text).collect();
                match scalars {
                    Some(list) => Self::List(list),
                    None => Self::Nested(YamlValue::Sequence(items)),
                }
            }
            other => Self::Nested(other),
        }
    }

    /// Coerce a command-line default into a typed value.
    ///
    /// `true`/`false` (any case) become booleans, `[a, b]` becomes a list of
    /// trimmed strings, anything else stays a string.
    pub fn from_default_arg(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("true") {
            return Self::Bool(true);
        }
        if raw.eq_ignore_ascii_case("false") {
            return Self::Bool(false);
        }
        if raw.len() >= 2 && raw.starts_with('[') && raw.ends_with(']') {
            let inner = &raw[1..raw.len() - 1];
            if inner.trim().is_empty() {
                return Self::List(Vec::new());
            }
            return Self::List(inner.split(',').map(|item| item.trim().to_string()).collect());
        }
        Self::Text(raw.to_string())
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Individual display values: one per list item, otherwise the value itself
    #[must_use]
    pub fn display_items(&self) -> Vec<String> {
        match self {
            Self::List(items) => items.clone(),
            other => vec![other.to_string()],
        }
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) | Self::Number(text) => f.write_str(text),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::List(items) => write!(f, "[{}]", items.join(", ")),
            Self::Null => f.write_str("null"),
            Self::Nested(value) => {
                let rendered = serde_json::to_string(value).unwrap_or_default();
                f.write_str(&rendered)
            }
        }
    }
}

fn scalar_text(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::String(text) => Some(text.clone()),
        YamlValue::Number(number) => Some(number.to_string()),
        YamlValue::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
