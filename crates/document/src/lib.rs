//! # Blogmeta Document
//!
//! Front matter model for Markdown blog posts.
//!
//! ## Layout of a document
//!
//! ```text
//! ---              <- opening boundary (three or more dashes, first line)
//! title: Hello
//! tags: [rust]     <- metadata block (YAML mapping)
//! ---              <- closing boundary
//! Body text...     <- opaque body, written back byte for byte
//! ```
//!
//! ## Example
//!
//! ```rust
//! use blogmeta_document::{Document, KeyOrder, MetaValue};
//!
//! let mut doc = Document::parse("---\ntags: [rust]\ntitle: Hello\n---\nBody\n").unwrap();
//! doc.metadata_mut().insert("language", MetaValue::Text("en".into()));
//!
//! let rendered = doc.render(&KeyOrder::default());
//! assert_eq!(rendered, "---\ntitle: Hello\ntags: [rust]\nlanguage: en\n---\nBody\n");
//! ```

mod document;
mod emit;
mod error;
mod frontmatter;
mod metadata;
mod order;
mod value;

pub use document::Document;
pub use emit::render_metadata;
pub use error::{DocumentError, Result};
pub use frontmatter::literal_keys;
pub use metadata::Metadata;
pub use order::KeyOrder;
pub use value::MetaValue;
