pub mod args;
pub mod domain;
mod services;

pub use domain::{CommandOutcome, CommandRequest, CommandResponse};

use anyhow::{Context, Result};
use blogmeta_corpus::{Corpus, CorpusError};
use blogmeta_normalizer::NormalizerConfig;
use services::Services;
use std::path::Path;

/// Discover the corpus under `root` and run `request` against it.
///
/// A missing root or an empty selection is a warning, not an error.
pub fn execute(
    request: &CommandRequest,
    root: &Path,
    config: &NormalizerConfig,
) -> Result<CommandOutcome> {
    if let CommandRequest::CleanupVariants { target, variants } = request {
        if variants.is_empty() {
            return Ok(warn(format!(
                "No variant keys besides '{target}' were given, nothing to do"
            )));
        }
    }

    let corpus = match Corpus::discover(root, &config.file_pattern) {
        Ok(corpus) => corpus,
        Err(CorpusError::MissingRoot(path)) => {
            return Ok(warn(format!(
                "Content root {} does not exist",
                path.display()
            )));
        }
        Err(err) => return Err(err).context("Failed to scan content root"),
    };

    if corpus.is_empty() {
        return Ok(warn(format!(
            "No files matching '{}' under {}",
            config.file_pattern,
            root.display()
        )));
    }

    if request.mutates() {
        log::info!(
            "Running {} over {} documents under {}",
            request.name(),
            corpus.len(),
            root.display()
        );
    } else {
        log::debug!("Running {} over {} documents", request.name(), corpus.len());
    }
    Ok(Services::new(&corpus, config).route(request))
}

fn warn(message: String) -> CommandOutcome {
    log::warn!("{message}");
    CommandOutcome::warning(message)
}
