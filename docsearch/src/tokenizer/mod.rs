//! Whitespace tokenizer and stop-word set

use crate::error::{Error, Result};
use std::collections::BTreeSet;

/// Split text into words on runs of whitespace.
///
/// Empty tokens are discarded and order is preserved.
///
/// # Examples
/// ```
/// use docsearch::tokenizer::split_words;
///
/// assert_eq!(split_words("  funny  pet\tand rat "), vec!["funny", "pet", "and", "rat"]);
/// assert!(split_words("").is_empty());
/// ```
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// A word is valid when it has no control characters (code points below space)
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| c < ' ')
}

/// Words excluded from indexing and from queries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWordSet {
    words: BTreeSet<String>,
}

impl StopWordSet {
    /// Build from whitespace-separated text
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_words(split_words(text))
    }

    /// Build from a collection of words.
    ///
    /// Empty entries are skipped and duplicates collapse. Fails on the first
    /// word containing control characters.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for word in words {
            let word = word.as_ref();
            if !is_valid_word(word) {
                return Err(Error::InvalidStopWord(word.to_string()));
            }
            if !word.is_empty() {
                set.insert(word.to_string());
            }
        }
        Ok(StopWordSet { words: set })
    }

    /// Check membership
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of distinct stop words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when no stop words are configured
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate stop words in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Split `text` and drop stop words, validating every word first
    pub fn split_words_no_stop<'t>(&self, text: &'t str) -> Result<Vec<&'t str>> {
        let mut words = Vec::new();
        for word in split_words(text) {
            if !is_valid_word(word) {
                return Err(Error::InvalidWord(word.to_string()));
            }
            if !self.contains(word) {
                words.push(word);
            }
        }
        Ok(words)
    }
}
