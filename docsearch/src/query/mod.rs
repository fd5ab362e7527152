//! Query parsing: plus-words and minus-words

use crate::error::{Error, Result};
use crate::tokenizer::{is_valid_word, split_words, StopWordSet};
use std::collections::BTreeSet;

/// Marker that negates a query word
pub const MINUS_MARKER: char = '-';

/// A single classified query word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryWord<'a> {
    /// Word with the negation marker removed
    pub data: &'a str,
    /// Word was prefixed with `-`
    pub is_minus: bool,
    /// Word is a stop word
    pub is_stop: bool,
}

/// Parse one raw token
pub fn parse_query_word<'a>(token: &'a str, stop_words: &StopWordSet) -> Result<QueryWord<'a>> {
    let (data, is_minus) = match token.strip_prefix(MINUS_MARKER) {
        Some(rest) => (rest, true),
        None => (token, false),
    };

    if data.is_empty() || (is_minus && data.starts_with(MINUS_MARKER)) || !is_valid_word(data) {
        return Err(Error::MalformedQueryWord(token.to_string()));
    }

    Ok(QueryWord {
        data,
        is_minus,
        is_stop: stop_words.contains(data),
    })
}

/// Parsed query: required and excluded terms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Terms that contribute to relevance
    pub plus_words: BTreeSet<String>,
    /// Terms that exclude a document outright
    pub minus_words: BTreeSet<String>,
}

impl Query {
    /// Parse raw query text.
    ///
    /// Stop words are dropped whether negated or not. Duplicate terms collapse.
    ///
    /// # Examples
    /// ```
    /// use docsearch::query::Query;
    /// use docsearch::tokenizer::StopWordSet;
    ///
    /// let stop = StopWordSet::from_text("in the").unwrap();
    /// let query = Query::parse("cat in the -dog cat", &stop).unwrap();
    /// assert_eq!(query.plus_words.iter().collect::<Vec<_>>(), vec!["cat"]);
    /// assert_eq!(query.minus_words.iter().collect::<Vec<_>>(), vec!["dog"]);
    /// ```
    pub fn parse(text: &str, stop_words: &StopWordSet) -> Result<Self> {
        let mut query = Query::default();
        for token in split_words(text) {
            let word = parse_query_word(token, stop_words)?;
            if word.is_stop {
                continue;
            }
            if word.is_minus {
                query.minus_words.insert(word.data.to_string());
            } else {
                query.plus_words.insert(word.data.to_string());
            }
        }
        tracing::debug!(
            plus = query.plus_words.len(),
            minus = query.minus_words.len(),
            "parsed query"
        );
        Ok(query)
    }

    /// True when the query has no plus-words and no minus-words
    pub fn is_empty(&self) -> bool {
        self.plus_words.is_empty() && self.minus_words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop() -> StopWordSet {
        StopWordSet::from_text("and with").unwrap()
    }

    #[test]
    fn test_parse_plus_and_minus() {
        let query = Query::parse("curly -dog hair", &stop()).unwrap();
        assert!(query.plus_words.contains("curly"));
        assert!(query.plus_words.contains("hair"));
        assert!(query.minus_words.contains("dog"));
        assert_eq!(query.plus_words.len(), 2);
        assert_eq!(query.minus_words.len(), 1);
    }

    #[test]
    fn test_parse_drops_stop_words() {
        let query = Query::parse("cat and -with", &stop()).unwrap();
        assert_eq!(query.plus_words.len(), 1);
        assert!(query.minus_words.is_empty());
    }

    #[test]
    fn test_parse_dedups() {
        let query = Query::parse("cat cat -dog -dog", &stop()).unwrap();
        assert_eq!(query.plus_words.len(), 1);
        assert_eq!(query.minus_words.len(), 1);
    }

    #[test]
    fn test_parse_keeps_inner_dash() {
        let query = Query::parse("well-known -x-ray", &stop()).unwrap();
        assert!(query.plus_words.contains("well-known"));
        assert!(query.minus_words.contains("x-ray"));
    }

    #[test]
    fn test_parse_malformed_negation() {
        for raw in ["--x", "cat -", "-", "cat --"] {
            let err = Query::parse(raw, &stop()).unwrap_err();
            assert!(matches!(err, Error::MalformedQueryWord(_)), "{raw}");
        }
    }

    #[test]
    fn test_parse_control_characters() {
        let err = Query::parse("ca\x11t", &stop()).unwrap_err();
        assert!(matches!(err, Error::MalformedQueryWord(w) if w == "ca\x11t"));
        assert!(Query::parse("-d\x01g", &stop()).is_err());
    }

    #[test]
    fn test_parse_empty() {
        let query = Query::parse("   ", &stop()).unwrap();
        assert!(query.is_empty());
    }
}
