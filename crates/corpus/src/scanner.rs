use crate::error::{CorpusError, Result};
use globset::{GlobBuilder, GlobMatcher};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Finds blog documents under a content root
pub struct DocumentScanner {
    root: PathBuf,
    matcher: GlobMatcher,
}

impl DocumentScanner {
    /// `pattern` is matched against paths relative to `root`
    pub fn new(root: impl AsRef<Path>, pattern: &str) -> Result<Self> {
        let matcher = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| CorpusError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?
            .compile_matcher();

        Ok(Self {
            root: root.as_ref().to_path_buf(),
            matcher,
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Matching files, sorted by path
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(CorpusError::MissingRoot(self.root.clone()));
        }

        let mut files = Vec::new();
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .standard_filters(false)
            .hidden(true) // drafts and tooling dirs such as .obsidian
            .follow_links(false);

        for result in builder.build() {
            match result {
                Ok(entry) => {
                    let Some(file_type) = entry.file_type() else {
                        continue;
                    };
                    if !file_type.is_file() {
                        continue;
                    }

                    let path = entry.path();
                    let Ok(relative) = path.strip_prefix(&self.root) else {
                        continue;
                    };
                    if !self.matcher.is_match(relative) {
                        log::debug!("Skipping {} (pattern mismatch)", path.display());
                        continue;
                    }

                    files.push(path.to_path_buf());
                }
                Err(e) => log::warn!("Failed to read entry: {e}"),
            }
        }

        files.sort();
        log::debug!("Found {} documents under {}", files.len(), self.root.display());
        Ok(files)
    }
}
