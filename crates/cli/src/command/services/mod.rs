mod analysis;
mod mutation;

use super::domain::{CommandOutcome, CommandRequest};
use blogmeta_corpus::Corpus;
use blogmeta_normalizer::NormalizerConfig;

pub struct Services<'a> {
    corpus: &'a Corpus,
    config: &'a NormalizerConfig,
}

impl<'a> Services<'a> {
    pub fn new(corpus: &'a Corpus, config: &'a NormalizerConfig) -> Self {
        Self { corpus, config }
    }

    pub fn route(&self, request: &CommandRequest) -> CommandOutcome {
        let (corpus, config) = (self.corpus, self.config);
        match request {
            CommandRequest::ListTags { sort } => analysis::list_tags(corpus, config, *sort),
            CommandRequest::FindPresent { key } => analysis::find_key(corpus, key, true),
            CommandRequest::FindMissing { key } => analysis::find_key(corpus, key, false),
            CommandRequest::CheckMandatory => analysis::check_mandatory(corpus, config),
            CommandRequest::CheckDuplicates => analysis::check_duplicates(corpus, config),
            CommandRequest::CheckSeo => analysis::check_seo_rules(corpus, config),
            CommandRequest::ListKeys => analysis::list_keys(corpus),
            CommandRequest::ListValues { key } => analysis::list_values(corpus, key),
            CommandRequest::Reorder => mutation::reorder(corpus, config),
            CommandRequest::AddKey { key, value } => mutation::add_key(corpus, config, key, value),
            CommandRequest::RemoveKey { key } => mutation::remove(corpus, config, key),
            CommandRequest::EditTags(edit) => mutation::edit_tags(corpus, config, edit),
            CommandRequest::CleanupVariants { target, variants } => {
                mutation::cleanup(corpus, config, target, variants)
            }
        }
    }
}
