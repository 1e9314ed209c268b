//! # Blogmeta Normalizer
//!
//! Analysis and normalization rules for blog front matter.
//!
//! ## Features
//!
//! - **Tag inventory**: frequencies, case variants, merge suggestions
//! - **Key checks**: mandatory keys, literal and conceptual duplicates
//! - **SEO checks**: required keys, text lengths, lowercase taxonomies
//! - **Mutations**: reorder, add/remove keys, fold key variants, rename/delete tags
//!
//! Everything here is pure: functions take a [`Metadata`](blogmeta_document::Metadata)
//! and a [`NormalizerConfig`] and never touch the filesystem.
//!
//! ## Example
//!
//! ```rust
//! use blogmeta_normalizer::{MergeConfig, SortMode, TagInventory};
//!
//! let mut tags = TagInventory::new();
//! tags.record(&["snippet".to_string(), "Rust".to_string()]);
//! tags.record(&["snippets".to_string(), "rust".to_string()]);
//!
//! let report = tags.report(SortMode::Count, &MergeConfig::default());
//! assert_eq!(report.case_variants.len(), 1);
//! assert_eq!(report.merge_suggestions.len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod inventory;
pub mod keys;
pub mod mutate;
pub mod seo;
pub mod tags;

pub use config::{ConceptualGroup, MergeConfig, MergeExceptions, NormalizerConfig, SeoRules};
pub use error::{ConfigError, Result};
pub use inventory::{KeyInventory, ValueInventory};
pub use keys::{
    conceptual_duplicates, literal_duplicates, missing_keys, repeated_keys, ConceptualConflict,
    KeyConflicts, LiteralConflict,
};
pub use mutate::{
    add_missing_key, cleanup_variants, edit_tags, remove_key, reorder_keys, CleanupOutcome,
    TagEdit,
};
pub use seo::{check_seo, SeoIssue};
pub use tags::{
    merge_rule, suggest_merges, CaseVariantGroup, MergeRule, MergeSuggestion, SortMode, TagCount,
    TagInventory, TagReport,
};
