use crate::error::Result;
use crate::scanner::DocumentScanner;
use crate::stats::RunSummary;
use blogmeta_document::{Document, KeyOrder};
use std::path::{Path, PathBuf};

/// The set of documents selected for one run.
///
/// Each document is loaded fresh when visited; a failure on one file is
/// recorded in the [`RunSummary`] and the run moves on to the next.
#[derive(Debug, Clone)]
pub struct Corpus {
    root: PathBuf,
    files: Vec<PathBuf>,
}

impl Corpus {
    /// Scan `root` for files matching `pattern`
    pub fn discover(root: impl AsRef<Path>, pattern: &str) -> Result<Self> {
        let scanner = DocumentScanner::new(root, pattern)?;
        let files = scanner.scan()?;
        Ok(Self {
            root: scanner.root().to_path_buf(),
            files,
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Visit every document read-only; `visit` returns whether the document
    /// has findings
    pub fn inspect<F>(&self, visit: F) -> RunSummary
    where
        F: FnMut(&str, &Document) -> bool,
    {
        self.inspect_with(|path| Document::load(path), visit)
    }

    /// Like [`Corpus::inspect`], but hands `visit` the literal top-level key
    /// spellings of each block; the YAML is never parsed
    pub fn inspect_keys<F>(&self, mut visit: F) -> RunSummary
    where
        F: FnMut(&str, &[String]) -> bool,
    {
        self.inspect_with(
            |path| Document::read_literal_keys(path),
            |shown, keys: &Vec<String>| visit(shown, keys),
        )
    }

    fn inspect_with<T, L, F>(&self, load: L, mut visit: F) -> RunSummary
    where
        L: Fn(&Path) -> blogmeta_document::Result<T>,
        F: FnMut(&str, &T) -> bool,
    {
        let mut summary = RunSummary::new();
        for path in &self.files {
            let shown = path.display().to_string();
            summary.scanned += 1;

            match load(path.as_path()) {
                Ok(loaded) => {
                    if visit(&shown, &loaded) {
                        summary.flagged += 1;
                    }
                }
                Err(e) => summary.add_failure(shown, e),
            }
        }
        summary
    }

    /// Edit every document and write back the ones `edit` reports as changed
    pub fn rewrite<F>(&self, order: &KeyOrder, mut edit: F) -> RunSummary
    where
        F: FnMut(&str, &mut Document) -> bool,
    {
        let mut summary = RunSummary::new();
        for path in &self.files {
            let shown = path.display().to_string();
            summary.scanned += 1;

            let mut doc = match Document::load(path) {
                Ok(doc) => doc,
                Err(e) => {
                    summary.add_failure(shown, e);
                    continue;
                }
            };

            if !edit(&shown, &mut doc) {
                continue;
            }

            match doc.save(path, order) {
                Ok(()) => {
                    summary.modified += 1;
                    log::info!("Updated {shown}");
                }
                Err(e) => summary.add_failure(shown, e),
            }
        }
        summary
    }
}
