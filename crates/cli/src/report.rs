use crate::command::domain::{
    CommandOutcome, CommandOutput, CommandStatus, DuplicatesOutput, FileFindings, MutationOutput,
    PresenceOutput,
};
use blogmeta_normalizer::{KeyInventory, MergeRule, TagReport, ValueInventory};
use console::style;
use std::fmt::Display;

/// Human-readable report for stdout
pub fn render_outcome(outcome: &CommandOutcome) -> String {
    let mut out = String::new();

    match &outcome.output {
        CommandOutput::Tags(report) => render_tags(&mut out, report),
        CommandOutput::Presence(presence) => render_presence(&mut out, presence),
        CommandOutput::Mutation(mutation) => render_mutation(&mut out, mutation),
        CommandOutput::Duplicates(duplicates) => render_duplicates(&mut out, duplicates),
        CommandOutput::Missing(files) => render_findings(&mut out, "Missing mandatory keys", files),
        CommandOutput::Seo(files) => render_findings(&mut out, "SEO issues", files),
        CommandOutput::Keys(keys) => render_keys(&mut out, keys),
        CommandOutput::Values(values) => render_values(&mut out, values),
        CommandOutput::None => {}
    }

    if let Some(message) = &outcome.message {
        let line = match outcome.status {
            CommandStatus::Ok => style(message.as_str()).green(),
            CommandStatus::Warning => style(message.as_str()).yellow(),
            CommandStatus::Error => style(message.as_str()).red(),
        };
        out.push_str(&format!("{line}\n"));
    }

    if let Some(summary) = &outcome.summary {
        out.push_str(&format!("{} {summary}\n", style("Summary:").bold()));
        for failure in &summary.failed {
            out.push_str(&format!(
                "  {} {}: {}\n",
                style("failed").red(),
                failure.path,
                failure.error
            ));
        }
    }

    out.trim_end().to_string()
}

fn heading(out: &mut String, title: impl Display) {
    out.push_str(&format!("{}\n", style(title).bold().underlined()));
}

fn render_tags(out: &mut String, report: &TagReport) {
    heading(
        out,
        format!(
            "Tags ({} distinct, {} documents)",
            report.frequencies.len(),
            report.documents
        ),
    );
    for entry in &report.frequencies {
        out.push_str(&format!("{:>6}  {}\n", entry.count, entry.tag));
    }

    if !report.case_variants.is_empty() {
        out.push('\n');
        heading(out, "Case variants");
        for group in &report.case_variants {
            let variants: Vec<String> = group
                .variants
                .iter()
                .map(|v| format!("{} ({})", v.tag, v.count))
                .collect();
            out.push_str(&format!(
                "  {}: {} -> keep '{}'\n",
                style(&group.identity).cyan(),
                variants.join(", "),
                group.canonical_hint
            ));
        }
    }

    if !report.merge_suggestions.is_empty() {
        out.push('\n');
        heading(out, "Possible duplicates");
        for suggestion in &report.merge_suggestions {
            let rule = match suggestion.rule {
                MergeRule::Plural => "plural",
                MergeRule::Substring => "substring",
            };
            out.push_str(&format!(
                "  {} <-> {} ({rule})\n",
                suggestion.first, suggestion.second
            ));
        }
    }
}

fn render_presence(out: &mut String, presence: &PresenceOutput) {
    let relation = if presence.present { "with" } else { "without" };
    heading(
        out,
        format!(
            "{} files {relation} '{}'",
            presence.files.len(),
            presence.key
        ),
    );
    for file in &presence.files {
        out.push_str(&format!("  {file}\n"));
    }
}

fn render_mutation(out: &mut String, mutation: &MutationOutput) {
    for file in &mutation.changed {
        match &file.note {
            Some(note) => out.push_str(&format!(
                "{} {} ({note})\n",
                style("updated").green(),
                file.path
            )),
            None => out.push_str(&format!("{} {}\n", style("updated").green(), file.path)),
        }
    }
}

fn render_duplicates(out: &mut String, duplicates: &DuplicatesOutput) {
    if !duplicates.literal.is_empty() {
        heading(out, "Keys differing only by case");
        for file in &duplicates.literal {
            for conflict in &file.findings {
                out.push_str(&format!("  {}: {}\n", file.path, conflict.spellings.join(", ")));
            }
        }
    }
    if !duplicates.conceptual.is_empty() {
        heading(out, "Conceptual duplicates");
        for file in &duplicates.conceptual {
            for conflict in &file.findings {
                out.push_str(&format!(
                    "  {}: {} [{}]\n",
                    file.path,
                    style(&conflict.group).cyan(),
                    conflict.present.join(", ")
                ));
            }
        }
    }
    if !duplicates.repeated.is_empty() {
        heading(out, "Keys written more than once");
        for file in &duplicates.repeated {
            out.push_str(&format!("  {}: {}\n", file.path, file.findings.join(", ")));
        }
    }
}

fn render_findings<T: Display>(out: &mut String, title: &str, files: &[FileFindings<T>]) {
    if files.is_empty() {
        return;
    }
    heading(out, title);
    for file in files {
        out.push_str(&format!("{}\n", style(&file.path).yellow()));
        for finding in &file.findings {
            out.push_str(&format!("  - {finding}\n"));
        }
    }
}

fn render_keys(out: &mut String, keys: &KeyInventory) {
    heading(out, format!("Keys ({} distinct)", keys.keys.len()));
    for (key, count) in &keys.keys {
        out.push_str(&format!("{count:>6}  {key}\n"));
    }
    out.push_str(&format!(
        "\nFiles with front matter: {}\nFiles without front matter: {}\n",
        keys.with_front_matter,
        keys.without_front_matter.len()
    ));
    for file in &keys.without_front_matter {
        out.push_str(&format!("  {file}\n"));
    }
}

fn render_values(out: &mut String, values: &ValueInventory) {
    heading(
        out,
        format!(
            "Values of '{}' ({} files)",
            values.key, values.documents_with_key
        ),
    );
    for (value, count) in &values.values {
        out.push_str(&format!("{count:>6}  {value}\n"));
    }
}
