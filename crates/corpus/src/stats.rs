use serde::Serialize;
use std::fmt;

/// A document that could not be read, parsed or written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentFailure {
    pub path: String,
    pub error: String,
}

/// Statistics about one run over the corpus
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Documents visited
    pub scanned: usize,

    /// Documents written back
    pub modified: usize,

    /// Documents with at least one finding
    pub flagged: usize,

    /// Per-document errors, in scan order
    pub failed: Vec<DocumentFailure>,
}

impl RunSummary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_failure(&mut self, path: impl Into<String>, error: impl fmt::Display) {
        let path = path.into();
        log::warn!("{path}: {error}");
        self.failed.push(DocumentFailure {
            path,
            error: error.to_string(),
        });
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} scanned, {} modified, {} flagged, {} failed",
            self.scanned,
            self.modified,
            self.flagged,
            self.failed.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_line_counts_failures() {
        let mut summary = RunSummary::new();
        summary.scanned = 3;
        summary.modified = 1;
        summary.add_failure("blog/bad.md", "Unterminated front matter block");

        assert!(summary.has_failures());
        assert_eq!(summary.to_string(), "3 scanned, 1 modified, 0 flagged, 1 failed");
    }
}
