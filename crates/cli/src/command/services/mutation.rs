use crate::command::domain::{ChangedFile, CommandOutcome, CommandOutput, MutationOutput};
use blogmeta_corpus::{Corpus, RunSummary};
use blogmeta_document::{Document, MetaValue};
use blogmeta_normalizer::{
    add_missing_key, cleanup_variants, remove_key, reorder_keys, NormalizerConfig, TagEdit,
};

/// Run `edit` over every document, remembering which files it changed.
///
/// `edit` returns `None` for an untouched document, otherwise an optional
/// note shown next to the file.
fn rewrite_with<F>(corpus: &Corpus, config: &NormalizerConfig, mut edit: F) -> CommandOutcome
where
    F: FnMut(&mut Document) -> Option<Option<String>>,
{
    let mut changed = Vec::new();
    let summary = corpus.rewrite(&config.key_order, |path, doc| match edit(doc) {
        Some(note) => {
            changed.push(ChangedFile {
                path: path.to_string(),
                note,
            });
            true
        }
        None => false,
    });

    finish(changed, summary)
}

fn finish(mut changed: Vec<ChangedFile>, summary: RunSummary) -> CommandOutcome {
    // files whose write failed are reported under `failed` only
    changed.retain(|file| !summary.failed.iter().any(|f| f.path == file.path));

    let mut outcome = CommandOutcome::ok(CommandOutput::Mutation(MutationOutput { changed }), summary);
    if outcome.summary.as_ref().is_some_and(|s| s.modified == 0) {
        outcome.message = Some("No files needed changes".to_string());
    }
    outcome
}

pub fn reorder(corpus: &Corpus, config: &NormalizerConfig) -> CommandOutcome {
    rewrite_with(corpus, config, |doc| {
        reorder_keys(doc.metadata_mut(), &config.key_order).then_some(None)
    })
}

pub fn add_key(
    corpus: &Corpus,
    config: &NormalizerConfig,
    key: &str,
    value: &MetaValue,
) -> CommandOutcome {
    rewrite_with(corpus, config, |doc| {
        add_missing_key(doc.metadata_mut(), key, value).then_some(None)
    })
}

pub fn remove(corpus: &Corpus, config: &NormalizerConfig, key: &str) -> CommandOutcome {
    rewrite_with(corpus, config, |doc| {
        remove_key(doc.metadata_mut(), key).then_some(None)
    })
}

pub fn edit_tags(corpus: &Corpus, config: &NormalizerConfig, edit: &TagEdit) -> CommandOutcome {
    rewrite_with(corpus, config, |doc| edit.apply(doc.metadata_mut()).then_some(None))
}

pub fn cleanup(
    corpus: &Corpus,
    config: &NormalizerConfig,
    target: &str,
    variants: &[String],
) -> CommandOutcome {
    rewrite_with(corpus, config, |doc| {
        let outcome = cleanup_variants(doc.metadata_mut(), target, variants);
        if !outcome.changed() {
            return None;
        }
        let mut note = format!("removed {}", outcome.removed.join(", "));
        if let Some(source) = &outcome.adopted_from {
            note.push_str(&format!("; '{target}' set from '{source}'"));
        }
        Some(Some(note))
    })
}
