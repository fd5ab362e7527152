//! Line-oriented session input
//!
//! Layout, one item per line:
//!
//! ```text
//! <stop words>
//! <document count N>
//! <document text>        \  repeated
//! <k> <r1> ... <rk>      /  N times
//! <query>
//! ```
//!
//! Documents are numbered `0..N` in input order and get status `Actual`.

use crate::document::{Document, DocumentStatus};
use crate::error::{Error, Result};
use crate::search::SearchEngine;
use std::io::BufRead;

/// One document read from a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDocument {
    /// Document text
    pub text: String,
    /// Ratings line contents
    pub ratings: Vec<i32>,
}

/// Parsed session input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Stop-words line
    pub stop_words: String,
    /// Documents in input order
    pub documents: Vec<SessionDocument>,
    /// Query line
    pub query: String,
}

/// Pulls lines from a reader, tracking the line number for error messages
struct LineReader<R> {
    reader: R,
    line_number: usize,
}

impl<R: BufRead> LineReader<R> {
    fn read_line(&mut self, what: &str) -> Result<String> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line)?;
        self.line_number += 1;
        if read == 0 {
            return Err(Error::ParseError(format!(
                "unexpected end of input at line {}, expected {}",
                self.line_number, what
            )));
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    fn parse_number<T: std::str::FromStr>(&self, token: &str, what: &str) -> Result<T> {
        token.parse().map_err(|_| {
            Error::ParseError(format!(
                "line {}: invalid {} {:?}",
                self.line_number, what, token
            ))
        })
    }

    fn read_count(&mut self) -> Result<usize> {
        let line = self.read_line("document count")?;
        self.parse_number(line.trim(), "document count")
    }

    fn read_ratings(&mut self) -> Result<Vec<i32>> {
        let line = self.read_line("ratings")?;
        let mut tokens = line.split_whitespace();
        let count: usize = match tokens.next() {
            Some(token) => self.parse_number(token, "rating count")?,
            None => {
                return Err(Error::ParseError(format!(
                    "line {}: missing rating count",
                    self.line_number
                )))
            }
        };

        let ratings = tokens
            .map(|token| self.parse_number(token, "rating"))
            .collect::<Result<Vec<i32>>>()?;
        if ratings.len() != count {
            return Err(Error::ParseError(format!(
                "line {}: expected {} ratings, found {}",
                self.line_number,
                count,
                ratings.len()
            )));
        }
        Ok(ratings)
    }
}

impl Session {
    /// Read a complete session
    pub fn read_from<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = LineReader {
            reader,
            line_number: 0,
        };

        let stop_words = lines.read_line("stop words")?;
        let count = lines.read_count()?;

        let mut documents = Vec::new();
        for _ in 0..count {
            let text = lines.read_line("document text")?;
            let ratings = lines.read_ratings()?;
            documents.push(SessionDocument { text, ratings });
        }

        let query = lines.read_line("query")?;
        Ok(Session {
            stop_words,
            documents,
            query,
        })
    }

    /// Build an engine from the session's stop words and documents
    pub fn build_engine(&self) -> Result<SearchEngine> {
        let mut engine = SearchEngine::new(&self.stop_words)?;
        for (id, doc) in self.documents.iter().enumerate() {
            engine.add_document(id as i64, &doc.text, DocumentStatus::Actual, &doc.ratings)?;
        }
        Ok(engine)
    }

    /// Index the documents and run the query
    pub fn run(&self) -> Result<Vec<Document>> {
        self.build_engine()?.find_top_documents(&self.query)
    }
}
