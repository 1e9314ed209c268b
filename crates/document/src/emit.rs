//! Fixed front matter formatting.
//!
//! Lists are written as single-line flow sequences, strings that contain
//! newlines as literal block scalars, and every other string on one line
//! regardless of its length. Scalars are quoted only when the plain form
//! would read back as something else.

use crate::metadata::Metadata;
use crate::value::MetaValue;
use serde_yaml::Value as YamlValue;

const INDENT: &str = "  ";

#[derive(Clone, Copy, PartialEq, Eq)]
enum Context {
    Block,
    Flow,
}

/// Render metadata as YAML lines (each terminated by `\n`)
#[must_use]
pub fn render_metadata(metadata: &Metadata) -> String {
    let mut out = String::new();
    for (key, value) in metadata.iter() {
        push_entry(&mut out, key, value);
    }
    out
}

fn push_entry(out: &mut String, key: &str, value: &MetaValue) {
    out.push_str(&scalar(key, Context::Block));
    out.push(':');

    match value {
        MetaValue::Text(text) if fits_literal_block(text) => {
            out.push(' ');
            push_literal_block(out, text);
        }
        MetaValue::Text(text) => {
            out.push(' ');
            out.push_str(&scalar(text, Context::Block));
            out.push('\n');
        }
        MetaValue::Bool(flag) => {
            out.push_str(if *flag { " true\n" } else { " false\n" });
        }
        MetaValue::Number(number) => {
            out.push(' ');
            out.push_str(number);
            out.push('\n');
        }
        MetaValue::Null => out.push_str(" null\n"),
        MetaValue::List(items) => {
            let rendered: Vec<String> = items
                .iter()
                .map(|item| scalar(item, Context::Flow))
                .collect();
            out.push_str(" [");
            out.push_str(&rendered.join(", "));
            out.push_str("]\n");
        }
        MetaValue::Nested(node) => {
            let rendered = serde_yaml::to_string(node).unwrap_or_default();
            let rendered = rendered.trim_end_matches('\n');
            if rendered.contains('\n') || rendered.starts_with("- ") || rendered.contains(": ") {
                out.push('\n');
                for line in rendered.lines() {
                    if !line.is_empty() {
                        out.push_str(INDENT);
                    }
                    out.push_str(line);
                    out.push('\n');
                }
            } else {
                out.push(' ');
                out.push_str(rendered);
                out.push('\n');
            }
        }
    }
}

fn push_literal_block(out: &mut String, text: &str) {
    let trailing = text.len() - text.trim_end_matches('\n').len();
    let chomp = match trailing {
        0 => "-",
        1 => "",
        _ => "+",
    };
    // indentation is detected from the leading lines up to the first content line
    let mut needs_indicator = false;
    for line in text.split('\n') {
        if line.starts_with(' ') {
            needs_indicator = true;
            break;
        }
        if !line.is_empty() {
            break;
        }
    }

    out.push('|');
    if needs_indicator {
        out.push_str("2");
    }
    out.push_str(chomp);
    out.push('\n');

    let content = text.strip_suffix('\n').unwrap_or(text);
    for line in content.split('\n') {
        if !line.is_empty() {
            out.push_str(INDENT);
            out.push_str(line);
        }
        out.push('\n');
    }
}

fn scalar(text: &str, context: Context) -> String {
    if has_control(text) || text.contains('\n') {
        return double_quoted(text);
    }
    if needs_quotes(text, context) {
        return format!("'{}'", text.replace('\'', "''"));
    }
    text.to_string()
}

/// Multi-line text with at least one non-blank line and nothing to escape
fn fits_literal_block(text: &str) -> bool {
    text.contains('\n') && !has_control(text) && text.lines().any(|line| !line.trim().is_empty())
}

fn has_control(text: &str) -> bool {
    text.chars().any(|c| c != '\n' && needs_escape(c))
}

/// Characters a YAML reader treats as line breaks or rejects when unescaped
fn needs_escape(c: char) -> bool {
    c.is_control() || matches!(c, '\u{2028}' | '\u{2029}' | '\u{feff}' | '\u{fffe}' | '\u{ffff}')
}

fn double_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if needs_escape(c) => out.push_str(&format!("\\u{:04X}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn needs_quotes(text: &str, context: Context) -> bool {
    if text.is_empty() || text.trim() != text {
        return true;
    }
    if text.starts_with(|c: char| "-?:,[]{}#&*!|>'\"%@`".contains(c)) {
        return true;
    }
    if text.contains(": ") || text.contains(" #") || text.ends_with(':') {
        return true;
    }
    if context == Context::Flow && text.contains(|c: char| ",[]{}".contains(c)) {
        return true;
    }
    looks_like_non_string(text)
}

fn looks_like_non_string(text: &str) -> bool {
    const RESERVED: &[&str] = &[
        "true", "false", "yes", "no", "on", "off", "y", "n", "null", "~", ".inf", "-.inf",
        "+.inf", ".nan",
    ];
    if RESERVED.contains(&text.to_ascii_lowercase().as_str()) {
        return true;
    }
    !matches!(
        serde_yaml::from_str::<YamlValue>(text),
        Ok(YamlValue::String(parsed)) if parsed == text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(entries: Vec<(&str, MetaValue)>) -> String {
        let mut meta = Metadata::new();
        for (key, value) in entries {
            meta.insert(key, value);
        }
        render_metadata(&meta)
    }

    #[test]
    fn lists_use_flow_style() {
        let out = render(vec![(
            "tags",
            MetaValue::List(vec!["php".into(), "c#".into(), "a, b".into()]),
        )]);
        assert_eq!(out, "tags: [php, c#, 'a, b']\n");
    }

    #[test]
    fn long_lines_are_never_folded() {
        let long = "word ".repeat(200).trim_end().to_string();
        let out = render(vec![("description", MetaValue::Text(long.clone()))]);
        assert_eq!(out, format!("description: {long}\n"));
    }

    #[test]
    fn multiline_strings_use_literal_blocks() {
        let out = render(vec![
            ("clip", MetaValue::Text("one\ntwo\n".into())),
            ("strip", MetaValue::Text("one\ntwo".into())),
            ("keep", MetaValue::Text("one\n\n".into())),
        ]);
        assert_eq!(
            out,
            "clip: |\n  one\n  two\nstrip: |-\n  one\n  two\nkeep: |+\n  one\n\n"
        );
    }

    #[test]
    fn ambiguous_scalars_are_quoted() {
        let out = render(vec![
            ("a", MetaValue::Text("true".into())),
            ("b", MetaValue::Text("42".into())),
            ("c", MetaValue::Text(String::new())),
            ("d", MetaValue::Text("Title: subtitle".into())),
            ("e", MetaValue::Text("it's".into())),
            ("f", MetaValue::Text("2024-11-19".into())),
        ]);
        assert_eq!(
            out,
            "a: 'true'\nb: '42'\nc: ''\nd: 'Title: subtitle'\ne: it's\nf: 2024-11-19\n"
        );
    }

    #[test]
    fn typed_scalars_are_plain() {
        let out = render(vec![
            ("draft", MetaValue::Bool(false)),
            ("weight", MetaValue::Number("3".into())),
            ("empty", MetaValue::Null),
            ("none", MetaValue::List(Vec::new())),
        ]);
        assert_eq!(out, "draft: false\nweight: 3\nempty: null\nnone: []\n");
    }

    #[test]
    fn rendered_output_parses_back() {
        let original = vec![
            ("title", MetaValue::Text("Hello: world #1".into())),
            ("tags", MetaValue::List(vec!["yes".into(), "[x]".into()])),
            ("summary", MetaValue::Text("  indented\nnext\n".into())),
        ];
        let out = render(original.clone());
        let parsed: serde_yaml::Mapping = serde_yaml::from_str(&out).unwrap();
        let meta = Metadata::from_mapping(parsed).unwrap();
        for (key, value) in original {
            assert_eq!(meta.get(key), Some(&value), "key {key}");
        }
    }

    fn read_back(out: &str) -> Metadata {
        let parsed: serde_yaml::Mapping = serde_yaml::from_str(out).unwrap();
        Metadata::from_mapping(parsed).unwrap()
    }

    #[test]
    fn blank_leading_line_with_spaces_gets_indentation_indicator() {
        let note = MetaValue::Text("   \nx".into());
        let out = render(vec![("note", note.clone()), ("draft", MetaValue::Bool(true))]);

        assert_eq!(out, "note: |2-\n     \n  x\ndraft: true\n");
        assert_eq!(read_back(&out).get("note"), Some(&note));
    }

    #[test]
    fn blank_only_text_is_double_quoted() {
        let out = render(vec![
            ("a", MetaValue::Text("\n".into())),
            ("b", MetaValue::Text(" \n\n".into())),
        ]);
        assert_eq!(out, "a: \"\\n\"\nb: \" \\n\\n\"\n");

        let meta = read_back(&out);
        assert_eq!(meta.get("a"), Some(&MetaValue::Text("\n".into())));
        assert_eq!(meta.get("b"), Some(&MetaValue::Text(" \n\n".into())));
    }

    #[test]
    fn radix_literals_stay_strings() {
        let original = vec![
            ("bin", MetaValue::Text("0b101".into())),
            ("hex", MetaValue::Text("+0x1F".into())),
            ("oct", MetaValue::Text("+0o17".into())),
            ("tags", MetaValue::List(vec!["0b11".into(), "0x10".into()])),
        ];
        let out = render(original.clone());

        assert!(out.starts_with("bin: '0b101'\n"), "{out}");
        assert!(out.ends_with("tags: ['0b11', '0x10']\n"), "{out}");
        let meta = read_back(&out);
        for (key, value) in original {
            assert_eq!(meta.get(key), Some(&value), "key {key}");
        }
    }

    #[test]
    fn unicode_line_breaks_are_escaped() {
        let original = vec![
            ("nel", MetaValue::Text("x\u{85}y".into())),
            ("ls", MetaValue::Text("x\u{2028}y".into())),
            ("ps", MetaValue::Text("x\u{2029}y\nz".into())),
            ("del", MetaValue::Text("x\u{7f}".into())),
        ];
        let out = render(original.clone());

        assert!(out.starts_with("nel: \"x\\u0085y\"\n"), "{out}");
        let meta = read_back(&out);
        for (key, value) in original {
            assert_eq!(meta.get(key), Some(&value), "key {key}");
        }
    }
}
