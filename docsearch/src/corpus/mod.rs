//! Corpus files: stop words plus documents, in YAML or JSON

use crate::document::DocumentStatus;
use crate::error::{Error, Result};
use crate::search::SearchEngine;
use crate::tokenizer::StopWordSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant};

/// Stop words given as one line of text or as a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StopWords {
    /// Whitespace-separated words
    Text(String),
    /// Explicit word list
    List(Vec<String>),
}

impl Default for StopWords {
    fn default() -> Self {
        StopWords::Text(String::new())
    }
}

impl StopWords {
    /// Validate and collect into a set
    pub fn to_set(&self) -> Result<StopWordSet> {
        match self {
            StopWords::Text(text) => StopWordSet::from_text(text),
            StopWords::List(words) => StopWordSet::from_words(words),
        }
    }
}

/// One document entry in a corpus file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusDocument {
    /// Document id
    pub id: i64,
    /// Document text
    pub text: String,
    /// Lifecycle status
    #[serde(default)]
    pub status: DocumentStatus,
    /// Per-user ratings
    #[serde(default)]
    pub ratings: Vec<i32>,
}

/// Stop words and documents to index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    /// Stop words
    #[serde(default)]
    pub stop_words: StopWords,
    /// Documents in insertion order
    #[serde(default)]
    pub documents: Vec<CorpusDocument>,
}

/// Statistics from loading a corpus
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    /// Number of documents indexed
    pub documents_added: usize,
    /// Time taken
    pub duration: Duration,
}

impl Corpus {
    /// Read a corpus file, choosing the format by extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Get file extension
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml(&std::fs::read_to_string(path)?),
            "json" => Self::from_json(&std::fs::read_to_string(path)?),
            _ => Err(Error::ConfigError(format!(
                "Unsupported corpus format: {} (expected .yaml, .yml or .json)",
                path.display()
            ))),
        }
    }

    /// Parse YAML text
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Parse JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build a fresh engine holding every document
    pub fn build_engine(&self) -> Result<SearchEngine> {
        let mut engine = SearchEngine::with_stop_word_set(self.stop_words.to_set()?);
        self.load_into(&mut engine)?;
        Ok(engine)
    }

    /// Add every document to `engine`, stopping at the first rejection.
    ///
    /// Documents added before the failure stay indexed.
    pub fn load_into(&self, engine: &mut SearchEngine) -> Result<LoadStats> {
        let start = Instant::now();
        let mut stats = LoadStats::default();

        for doc in &self.documents {
            engine.add_document(doc.id, &doc.text, doc.status, &doc.ratings)?;
            stats.documents_added += 1;
        }

        stats.duration = start.elapsed();
        tracing::info!(
            documents = stats.documents_added,
            "Loaded corpus in {:?}",
            stats.duration
        );
        Ok(stats)
    }
}
