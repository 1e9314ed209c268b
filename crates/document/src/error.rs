use std::path::PathBuf;
use thiserror::Error;

/// Result type for document operations
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Errors that can occur while reading, parsing or writing a document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The front matter block is not valid YAML
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The front matter parsed, but its root is not a mapping
    #[error("Front matter must be a mapping, found {0}")]
    NotAMapping(&'static str),

    /// Opening boundary without a closing one
    #[error("Front matter block is not terminated (missing closing boundary)")]
    Unterminated,

    /// A mapping key that is not a plain scalar
    #[error("Unsupported front matter key: {0}")]
    InvalidKey(String),

    /// The rendered front matter would not read back as the in-memory metadata
    #[error("Rendered front matter does not read back unchanged: {0}")]
    UnstableRender(String),

    /// Write target has no parent directory or file name
    #[error("Invalid document path: {}", .0.display())]
    InvalidPath(PathBuf),
}

impl DocumentError {
    /// Create an invalid key error
    pub fn invalid_key(key: impl Into<String>) -> Self {
        Self::InvalidKey(key.into())
    }
}
