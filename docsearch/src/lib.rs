//! # Docsearch
//!
//! A small in-process document search engine.
//!
//! Docsearch provides:
//! - **Inverted index** of term frequencies per document
//! - **TF-IDF ranking** with rating tie-breaks and a top-5 cutoff
//! - **Plus/minus queries**: `-word` excludes every document containing `word`
//! - **Status and predicate filters** over document lifecycle tags
//!
//! ## Quick Start
//!
//! ```rust
//! use docsearch::{DocumentStatus, SearchEngine};
//!
//! let mut engine = SearchEngine::new("and with").unwrap();
//! engine
//!     .add_document(1, "funny pet and nasty rat", DocumentStatus::Actual, &[7, 2, 7])
//!     .unwrap();
//! engine
//!     .add_document(2, "funny pet with curly hair", DocumentStatus::Actual, &[1, 2, 3])
//!     .unwrap();
//!
//! let results = engine.find_top_documents("curly dog").unwrap();
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].id, 2);
//!
//! let matched = engine.match_document("funny -rat", 1).unwrap();
//! assert!(matched.words.is_empty());
//! ```

pub mod corpus;
pub mod document;
pub mod error;
pub mod log_duration;
pub mod paginator;
pub mod query;
pub mod search;
pub mod session;
pub mod tokenizer;

// Re-exports for convenience
pub use corpus::{Corpus, CorpusDocument, LoadStats, StopWords};
pub use document::{Document, DocumentStatus, MatchResult};
pub use error::{Error, ErrorKind, Result};
pub use log_duration::LogDuration;
pub use paginator::{paginate, Paginator};
pub use query::Query;
pub use search::{SearchEngine, SharedSearchEngine, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
pub use session::Session;
pub use tokenizer::StopWordSet;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
