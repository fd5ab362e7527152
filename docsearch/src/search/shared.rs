//! Engine shared across threads behind a read-write lock

use super::SearchEngine;
use crate::document::{Document, DocumentStatus, MatchResult};
use crate::error::Result;
use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::Arc;

/// Cloneable handle to one engine.
///
/// Searches take the read lock and may run in parallel; `add_document`
/// takes the write lock for the whole index.
#[derive(Debug, Clone, Default)]
pub struct SharedSearchEngine {
    inner: Arc<RwLock<SearchEngine>>,
}

impl SharedSearchEngine {
    /// Wrap an engine
    pub fn new(engine: SearchEngine) -> Self {
        SharedSearchEngine {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    /// Index a document under the write lock
    pub fn add_document(
        &self,
        id: i64,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        self.inner.write().add_document(id, text, status, ratings)
    }

    /// See [`SearchEngine::find_top_documents`]
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.inner.read().find_top_documents(raw_query)
    }

    /// See [`SearchEngine::find_top_documents_with_status`]
    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.inner
            .read()
            .find_top_documents_with_status(raw_query, status)
    }

    /// See [`SearchEngine::find_top_documents_by`]
    pub fn find_top_documents_by<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(i64, DocumentStatus, i32) -> bool,
    {
        self.inner.read().find_top_documents_by(raw_query, predicate)
    }

    /// See [`SearchEngine::match_document`]
    pub fn match_document(&self, raw_query: &str, id: i64) -> Result<MatchResult> {
        self.inner.read().match_document(raw_query, id)
    }

    /// Number of indexed documents
    pub fn document_count(&self) -> usize {
        self.inner.read().document_count()
    }

    /// See [`SearchEngine::document_id_at`]
    pub fn document_id_at(&self, index: usize) -> Result<i64> {
        self.inner.read().document_id_at(index)
    }

    /// Hold the read lock for several calls against one consistent view
    pub fn read(&self) -> RwLockReadGuard<'_, SearchEngine> {
        self.inner.read()
    }
}

impl From<SearchEngine> for SharedSearchEngine {
    fn from(engine: SearchEngine) -> Self {
        SharedSearchEngine::new(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_adds_and_searches() {
        let shared = SharedSearchEngine::new(SearchEngine::new("the").unwrap());

        let writers: Vec<_> = (0..4)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        let id = t * 100 + i;
                        shared
                            .add_document(id, "the shared word", DocumentStatus::Actual, &[1])
                            .unwrap();
                        shared.find_top_documents("shared").unwrap();
                    }
                })
            })
            .collect();
        for handle in writers {
            handle.join().unwrap();
        }

        assert_eq!(shared.document_count(), 100);
        let results = shared.find_top_documents("shared").unwrap();
        assert_eq!(results.len(), crate::MAX_RESULT_DOCUMENT_COUNT);
    }

    #[test]
    fn test_duplicate_rejected_through_handle() {
        let shared = SharedSearchEngine::from(SearchEngine::default());
        shared
            .add_document(1, "cat", DocumentStatus::Actual, &[])
            .unwrap();
        assert!(shared
            .add_document(1, "dog", DocumentStatus::Actual, &[])
            .is_err());
        assert_eq!(shared.read().document_ids().collect::<Vec<_>>(), vec![1]);
        assert_eq!(shared.document_id_at(0).unwrap(), 1);
    }
}
