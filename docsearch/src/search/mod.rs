//! Search engine: inverted index, TF-IDF relevance, top-K ranking

use crate::document::{compute_average_rating, Document, DocumentStatus, MatchResult};
use crate::error::{Error, Result};
use crate::query::Query;
use crate::tokenizer::StopWordSet;
use std::collections::{BTreeMap, HashMap};

pub mod shared;

pub use shared::SharedSearchEngine;

/// Maximum number of documents returned by a top-K search
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevances closer than this are ranked by rating instead
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Per-document metadata
#[derive(Debug, Clone)]
struct DocumentData {
    rating: i32,
    status: DocumentStatus,
    word_freqs: BTreeMap<String, f64>,
}

/// In-memory document search engine.
///
/// Documents are added once and never updated or removed. Searches rank by
/// TF-IDF relevance and break near-ties by rating.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    stop_words: StopWordSet,
    // term -> document id -> term frequency
    word_to_document_freqs: BTreeMap<String, BTreeMap<i64, f64>>,
    documents: BTreeMap<i64, DocumentData>,
    document_ids: Vec<i64>,
}

impl SearchEngine {
    /// Create an engine from whitespace-separated stop words
    pub fn new(stop_words_text: &str) -> Result<Self> {
        Ok(Self::with_stop_word_set(StopWordSet::from_text(
            stop_words_text,
        )?))
    }

    /// Create an engine from a collection of stop words
    pub fn with_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::with_stop_word_set(StopWordSet::from_words(stop_words)?))
    }

    /// Create an engine from a prepared stop-word set
    pub fn with_stop_word_set(stop_words: StopWordSet) -> Self {
        SearchEngine {
            stop_words,
            ..Default::default()
        }
    }

    /// Index a document.
    ///
    /// Either the whole document is indexed or nothing changes.
    pub fn add_document(
        &mut self,
        id: i64,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        let word_freqs = match self.prepare_document(id, text) {
            Ok(freqs) => freqs,
            Err(e) => {
                tracing::warn!(id, "Rejected document: {}", e);
                return Err(e);
            }
        };

        for (word, tf) in &word_freqs {
            self.word_to_document_freqs
                .entry(word.clone())
                .or_default()
                .insert(id, *tf);
        }

        let rating = compute_average_rating(ratings);
        self.documents.insert(
            id,
            DocumentData {
                rating,
                status,
                word_freqs,
            },
        );
        self.document_ids.push(id);

        tracing::debug!(id, %status, rating, "Added document");
        Ok(())
    }

    /// Validate a document and compute its term frequencies without touching the index
    fn prepare_document(&self, id: i64, text: &str) -> Result<BTreeMap<String, f64>> {
        if id < 0 {
            return Err(Error::InvalidDocumentId(id));
        }
        if self.documents.contains_key(&id) {
            return Err(Error::DuplicateDocumentId(id));
        }

        let words = self.stop_words.split_words_no_stop(text)?;
        if words.is_empty() {
            return Err(Error::EmptyDocument(id));
        }

        let inv_word_count = 1.0 / words.len() as f64;
        let mut word_freqs = BTreeMap::new();
        for word in words {
            *word_freqs.entry(word.to_string()).or_insert(0.0) += inv_word_count;
        }
        Ok(word_freqs)
    }

    /// Top documents with status `Actual`
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    /// Top documents with the given status
    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_by(raw_query, |_, document_status, _| {
            document_status == status
        })
    }

    /// Top documents accepted by `predicate(id, status, rating)`.
    ///
    /// At most [`MAX_RESULT_DOCUMENT_COUNT`] results, ordered by relevance
    /// descending; relevances within [`RELEVANCE_EPSILON`] are ordered by
    /// rating descending, then by id.
    pub fn find_top_documents_by<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(i64, DocumentStatus, i32) -> bool,
    {
        let query = Query::parse(raw_query, &self.stop_words)?;
        let mut matched = self.find_all_documents(&query, predicate);
        rank_documents(&mut matched);
        matched.truncate(MAX_RESULT_DOCUMENT_COUNT);
        Ok(matched)
    }

    /// Every document matching the query and accepted by the predicate, unranked
    pub fn find_all_documents<P>(&self, query: &Query, predicate: P) -> Vec<Document>
    where
        P: Fn(i64, DocumentStatus, i32) -> bool,
    {
        let mut document_to_relevance: HashMap<i64, f64> = HashMap::new();

        for word in &query.plus_words {
            let Some(freqs) = self.word_to_document_freqs.get(word) else {
                continue;
            };
            let idf = self.inverse_document_freq(freqs.len());
            tracing::trace!(word = %word, idf, "idf");
            for (&id, &tf) in freqs {
                let data = &self.documents[&id];
                if predicate(id, data.status, data.rating) {
                    *document_to_relevance.entry(id).or_insert(0.0) += tf * idf;
                }
            }
        }

        for word in &query.minus_words {
            if let Some(freqs) = self.word_to_document_freqs.get(word) {
                for id in freqs.keys() {
                    document_to_relevance.remove(id);
                }
            }
        }

        document_to_relevance
            .into_iter()
            .map(|(id, relevance)| Document::new(id, relevance, self.documents[&id].rating))
            .collect()
    }

    /// ln(N / df); `containing` is never zero for an indexed term
    fn inverse_document_freq(&self, containing: usize) -> f64 {
        (self.document_count() as f64 / containing as f64).ln()
    }

    /// Plus-words of the query found in the document.
    ///
    /// The word list is emptied when any minus-word is present.
    pub fn match_document(&self, raw_query: &str, id: i64) -> Result<MatchResult> {
        let query = Query::parse(raw_query, &self.stop_words)?;
        let data = self
            .documents
            .get(&id)
            .ok_or(Error::DocumentNotFound(id))?;

        let excluded = query
            .minus_words
            .iter()
            .any(|word| data.word_freqs.contains_key(word));

        let words = if excluded {
            Vec::new()
        } else {
            query
                .plus_words
                .into_iter()
                .filter(|word| data.word_freqs.contains_key(word))
                .collect()
        };

        Ok(MatchResult {
            words,
            status: data.status,
        })
    }

    /// Number of indexed documents
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Id of the document added at `index` (0-based insertion order)
    pub fn document_id_at(&self, index: usize) -> Result<i64> {
        self.document_ids
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index,
                count: self.document_ids.len(),
            })
    }

    /// Document ids in insertion order
    pub fn document_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.document_ids.iter().copied()
    }

    /// Term frequencies of one document
    pub fn word_frequencies(&self, id: i64) -> Result<&BTreeMap<String, f64>> {
        self.documents
            .get(&id)
            .map(|data| &data.word_freqs)
            .ok_or(Error::DocumentNotFound(id))
    }

    /// Check whether `word` is a stop word
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Configured stop words
    pub fn stop_words(&self) -> &StopWordSet {
        &self.stop_words
    }
}

/// Sort by relevance descending, ordering near-equal relevances by rating.
///
/// Documents are grouped against the first (highest) relevance of each group
/// so that every pair inside a group is within [`RELEVANCE_EPSILON`].
fn rank_documents(documents: &mut [Document]) {
    documents.sort_by(|a, b| b.relevance.total_cmp(&a.relevance).then(a.id.cmp(&b.id)));

    let mut start = 0;
    while start < documents.len() {
        let anchor = documents[start].relevance;
        let mut end = start + 1;
        while end < documents.len() && anchor - documents[end].relevance < RELEVANCE_EPSILON {
            end += 1;
        }
        documents[start..end].sort_by(|a, b| {
            b.rating
                .cmp(&a.rating)
                .then(b.relevance.total_cmp(&a.relevance))
                .then(a.id.cmp(&b.id))
        });
        start = end;
    }
}
