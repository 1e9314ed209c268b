//! # Blogmeta Corpus
//!
//! Discovery of blog documents under a content root and batch processing
//! with per-document failure isolation.
//!
//! ```no_run
//! use blogmeta_corpus::Corpus;
//!
//! let corpus = Corpus::discover("blog", "**/*.md*").unwrap();
//! let summary = corpus.inspect(|_, doc| !doc.has_front_matter());
//! println!("{summary}");
//! ```

mod corpus;
mod error;
mod scanner;
mod stats;

pub use corpus::Corpus;
pub use error::{CorpusError, Result};
pub use scanner::DocumentScanner;
pub use stats::{DocumentFailure, RunSummary};
