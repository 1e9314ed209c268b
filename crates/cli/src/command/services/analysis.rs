use crate::command::domain::{
    CommandOutcome, CommandOutput, DuplicatesOutput, FileFindings, PresenceOutput,
};
use blogmeta_corpus::Corpus;
use blogmeta_normalizer::{
    check_seo, missing_keys, KeyConflicts, KeyInventory, NormalizerConfig, SortMode,
    TagInventory, ValueInventory,
};

pub fn list_tags(corpus: &Corpus, config: &NormalizerConfig, sort: SortMode) -> CommandOutcome {
    let mut inventory = TagInventory::new();
    let summary = corpus.inspect(|_, doc| {
        inventory.record_metadata(doc.metadata());
        false
    });

    let report = inventory.report(sort, &config.merge);
    let mut outcome = CommandOutcome::ok(CommandOutput::Tags(report), summary);
    if inventory.is_empty() {
        outcome.message = Some("No tags found".to_string());
    }
    outcome
}

/// Files that have (`present`) or lack the key
pub fn find_key(corpus: &Corpus, key: &str, present: bool) -> CommandOutcome {
    let mut files = Vec::new();
    let summary = corpus.inspect(|path, doc| {
        let matched = doc.metadata().contains_key(key) == present;
        if matched {
            files.push(path.to_string());
        }
        matched
    });

    let output = PresenceOutput {
        key: key.to_string(),
        present,
        files,
    };
    CommandOutcome::ok(CommandOutput::Presence(output), summary)
}

pub fn check_mandatory(corpus: &Corpus, config: &NormalizerConfig) -> CommandOutcome {
    let mut files = Vec::new();
    let summary = corpus.inspect(|path, doc| {
        let missing = missing_keys(doc.metadata(), &config.mandatory_keys);
        if missing.is_empty() {
            return false;
        }
        files.push(FileFindings {
            path: path.to_string(),
            findings: missing,
        });
        true
    });

    let mut outcome = CommandOutcome::ok(CommandOutput::Missing(files), summary);
    if outcome.summary.as_ref().is_some_and(|s| s.flagged == 0) {
        outcome.message = Some("All files define every mandatory key".to_string());
    }
    outcome
}

/// Runs on the raw blocks, so files whose YAML rejects a repeated key are
/// still reported instead of failing
pub fn check_duplicates(corpus: &Corpus, config: &NormalizerConfig) -> CommandOutcome {
    let mut output = DuplicatesOutput::default();
    let summary = corpus.inspect_keys(|path, literal_keys| {
        let conflicts = KeyConflicts::detect(literal_keys, &config.conceptual_groups);
        if conflicts.is_empty() {
            return false;
        }
        if !conflicts.literal.is_empty() {
            output.literal.push(FileFindings {
                path: path.to_string(),
                findings: conflicts.literal,
            });
        }
        if !conflicts.conceptual.is_empty() {
            output.conceptual.push(FileFindings {
                path: path.to_string(),
                findings: conflicts.conceptual,
            });
        }
        if !conflicts.repeated.is_empty() {
            output.repeated.push(FileFindings {
                path: path.to_string(),
                findings: conflicts.repeated,
            });
        }
        true
    });

    let message = format!(
        "{} files with case-variant keys, {} files with conceptual duplicates, {} files with repeated keys",
        output.literal.len(),
        output.conceptual.len(),
        output.repeated.len()
    );
    let mut outcome = CommandOutcome::ok(CommandOutput::Duplicates(output), summary);
    outcome.message = Some(message);
    outcome
}

pub fn check_seo_rules(corpus: &Corpus, config: &NormalizerConfig) -> CommandOutcome {
    let mut files = Vec::new();
    let summary = corpus.inspect(|path, doc| {
        let issues = check_seo(doc.metadata(), &config.seo);
        if issues.is_empty() {
            return false;
        }
        files.push(FileFindings {
            path: path.to_string(),
            findings: issues,
        });
        true
    });

    CommandOutcome::ok(CommandOutput::Seo(files), summary)
}

pub fn list_keys(corpus: &Corpus) -> CommandOutcome {
    let mut inventory = KeyInventory::new();
    let summary = corpus.inspect(|path, doc| {
        inventory.record(path, doc.metadata());
        false
    });
    CommandOutcome::ok(CommandOutput::Keys(inventory), summary)
}

pub fn list_values(corpus: &Corpus, key: &str) -> CommandOutcome {
    let mut inventory = ValueInventory::new(key);
    let summary = corpus.inspect(|_, doc| {
        inventory.record(doc.metadata());
        false
    });

    let message = (inventory.documents_with_key == 0).then(|| format!("No file defines '{key}'"));
    let mut outcome = CommandOutcome::ok(CommandOutput::Values(inventory), summary);
    outcome.message = message;
    outcome
}
