use crate::emit::render_metadata;
use crate::error::{DocumentError, Result};
use crate::frontmatter::{literal_keys, parse_block, split};
use crate::metadata::Metadata;
use crate::order::KeyOrder;
use std::fs;
use std::path::Path;

/// A Markdown file split into front matter and an opaque body
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    metadata: Metadata,
    body: String,
    raw_block: Option<String>,
    bom: bool,
}

impl Document {
    /// Parse document text
    pub fn parse(text: &str) -> Result<Self> {
        let parts = split(text)?;
        let metadata = match parts.block {
            Some(block) => parse_block(block)?,
            None => Metadata::new(),
        };

        Ok(Self {
            metadata,
            body: parts.body.to_string(),
            raw_block: parts.block.map(str::to_string),
            bom: parts.bom,
        })
    }

    /// Read and parse a document from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::parse(&text)
    }

    /// Top-level key spellings of the file at `path`, read from the raw
    /// block without YAML parsing, so repeated keys are still visible
    pub fn read_literal_keys(path: impl AsRef<Path>) -> Result<Vec<String>> {
        let text = fs::read_to_string(path.as_ref())?;
        let parts = split(&text)?;
        Ok(parts.block.map(literal_keys).unwrap_or_default())
    }

    #[must_use]
    pub const fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Whether the source had a delimited front matter block
    #[must_use]
    pub const fn has_front_matter(&self) -> bool {
        self.raw_block.is_some()
    }

    /// Top-level key spellings as they appear in the source block
    #[must_use]
    pub fn literal_keys(&self) -> Vec<String> {
        self.raw_block
            .as_deref()
            .map(literal_keys)
            .unwrap_or_default()
    }

    /// Render the full file with keys arranged by `order`
    #[must_use]
    pub fn render(&self, order: &KeyOrder) -> String {
        let ordered = self.metadata.ordered(order);
        let mut out = String::with_capacity(self.body.len() + 256);
        if self.bom {
            out.push('\u{feff}');
        }
        out.push_str("---\n");
        out.push_str(&render_metadata(&ordered));
        out.push_str("---\n");
        out.push_str(&self.body);
        out
    }

    /// Write the rendered document, replacing `path` atomically.
    ///
    /// Nothing is written unless the rendered text parses back to the same
    /// metadata and body.
    pub fn save(&self, path: impl AsRef<Path>, order: &KeyOrder) -> Result<()> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .ok_or_else(|| DocumentError::InvalidPath(path.to_path_buf()))?;
        let mut tmp_name = std::ffi::OsString::from(".");
        tmp_name.push(file_name);
        tmp_name.push(".blogmeta.tmp");
        let tmp = path.with_file_name(tmp_name);

        let rendered = self.render(order);
        verify_round_trip(&rendered, &self.metadata.ordered(order), &self.body)?;

        fs::write(&tmp, rendered)?;
        if let Err(err) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }
        log::debug!("Wrote {}", path.display());
        Ok(())
    }
}

fn verify_round_trip(rendered: &str, metadata: &Metadata, body: &str) -> Result<()> {
    let reread =
        Document::parse(rendered).map_err(|err| DocumentError::UnstableRender(err.to_string()))?;
    if reread.metadata != *metadata {
        return Err(DocumentError::UnstableRender(
            "metadata changed after rendering".to_string(),
        ));
    }
    if reread.body != body {
        return Err(DocumentError::UnstableRender(
            "body changed after rendering".to_string(),
        ));
    }
    Ok(())
}
