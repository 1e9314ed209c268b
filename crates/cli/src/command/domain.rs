use blogmeta_corpus::RunSummary;
use blogmeta_document::MetaValue;
use blogmeta_normalizer::{
    ConceptualConflict, KeyInventory, LiteralConflict, SeoIssue, SortMode, TagEdit, TagReport,
    ValueInventory,
};
use serde::Serialize;

/// A validated command, ready to run against the corpus
#[derive(Debug, Clone, PartialEq)]
pub enum CommandRequest {
    ListTags { sort: SortMode },
    FindPresent { key: String },
    FindMissing { key: String },
    AddKey { key: String, value: MetaValue },
    RemoveKey { key: String },
    EditTags(TagEdit),
    Reorder,
    CleanupVariants { target: String, variants: Vec<String> },
    CheckDuplicates,
    CheckMandatory,
    CheckSeo,
    ListKeys,
    ListValues { key: String },
}

impl CommandRequest {
    pub const fn name(&self) -> &'static str {
        match self {
            CommandRequest::ListTags { .. } => "list",
            CommandRequest::FindPresent { .. } => "find-present",
            CommandRequest::FindMissing { .. } => "find-missing",
            CommandRequest::AddKey { .. } => "add-key",
            CommandRequest::RemoveKey { .. } => "remove-key",
            CommandRequest::EditTags(TagEdit::Rename { .. }) => "rename",
            CommandRequest::EditTags(TagEdit::Delete { .. }) => "delete",
            CommandRequest::Reorder => "reorder",
            CommandRequest::CleanupVariants { .. } => "cleanup-variants",
            CommandRequest::CheckDuplicates => "check-duplicates",
            CommandRequest::CheckMandatory => "check-mandatory",
            CommandRequest::CheckSeo => "check-seo",
            CommandRequest::ListKeys => "list-keys",
            CommandRequest::ListValues { .. } => "list-values",
        }
    }

    /// Whether the command writes documents back
    pub const fn mutates(&self) -> bool {
        matches!(
            self,
            CommandRequest::AddKey { .. }
                | CommandRequest::RemoveKey { .. }
                | CommandRequest::EditTags(_)
                | CommandRequest::Reorder
                | CommandRequest::CleanupVariants { .. }
        )
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Ok,
    Warning,
    Error,
}

/// Findings for one document
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct FileFindings<T> {
    pub path: String,
    pub findings: Vec<T>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct PresenceOutput {
    pub key: String,
    pub present: bool,
    pub files: Vec<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct MutationOutput {
    pub changed: Vec<ChangedFile>,
}

#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct DuplicatesOutput {
    pub literal: Vec<FileFindings<LiteralConflict>>,
    pub conceptual: Vec<FileFindings<ConceptualConflict>>,
    pub repeated: Vec<FileFindings<String>>,
}

/// Command-specific payload; serialized as the `data` field
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum CommandOutput {
    Tags(TagReport),
    Presence(PresenceOutput),
    Mutation(MutationOutput),
    Duplicates(DuplicatesOutput),
    Missing(Vec<FileFindings<String>>),
    Seo(Vec<FileFindings<SeoIssue>>),
    Keys(KeyInventory),
    Values(ValueInventory),
    None,
}

/// Result of running one command
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutcome {
    pub status: CommandStatus,
    pub message: Option<String>,
    pub output: CommandOutput,
    pub summary: Option<RunSummary>,
}

impl CommandOutcome {
    pub fn ok(output: CommandOutput, summary: RunSummary) -> Self {
        Self {
            status: CommandStatus::Ok,
            message: None,
            output,
            summary: Some(summary),
        }
    }

    /// Nothing to do; the run still succeeds with an empty summary
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Warning,
            message: Some(message.into()),
            output: CommandOutput::None,
            summary: Some(RunSummary::new()),
        }
    }
}

/// Envelope printed with `--json`
#[derive(Debug, Serialize)]
pub struct CommandResponse<'a> {
    pub status: CommandStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<&'a str>,
    pub message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<&'a CommandOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<&'a RunSummary>,
}

impl<'a> CommandResponse<'a> {
    pub fn from_outcome(command: &'a str, outcome: &'a CommandOutcome) -> Self {
        Self {
            status: outcome.status,
            command: Some(command),
            message: outcome.message.as_deref(),
            data: Some(&outcome.output),
            summary: outcome.summary.as_ref(),
        }
    }

    pub fn error(message: &'a str) -> Self {
        Self {
            status: CommandStatus::Error,
            command: None,
            message: Some(message),
            data: None,
            summary: None,
        }
    }
}
