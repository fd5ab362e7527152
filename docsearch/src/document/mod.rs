//! Document model: search hits, lifecycle status, match results

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle tag assigned when a document is added
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    /// Live document (default search filter)
    #[default]
    Actual,
    /// Kept but no longer relevant
    Irrelevant,
    /// Banned from default results
    Banned,
    /// Logically removed
    Removed,
}

impl DocumentStatus {
    /// Canonical upper-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Actual => "ACTUAL",
            DocumentStatus::Irrelevant => "IRRELEVANT",
            DocumentStatus::Banned => "BANNED",
            DocumentStatus::Removed => "REMOVED",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "actual" => Ok(DocumentStatus::Actual),
            "irrelevant" => Ok(DocumentStatus::Irrelevant),
            "banned" => Ok(DocumentStatus::Banned),
            "removed" => Ok(DocumentStatus::Removed),
            _ => Err(Error::ConfigError(format!("Unknown document status: {}", s))),
        }
    }
}

/// A ranked search hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document id
    pub id: i64,
    /// TF-IDF relevance
    pub relevance: f64,
    /// Mean user rating
    pub rating: i32,
}

impl Document {
    /// Create a new hit
    pub fn new(id: i64, relevance: f64, rating: i32) -> Self {
        Document {
            id,
            relevance,
            rating,
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id,
            format_relevance(self.relevance),
            self.rating
        )
    }
}

/// Six significant digits, trailing zeros trimmed.
///
/// Exponents below -4 or at least 6 switch to scientific form (`1e+06`).
fn format_relevance(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}", value);
    }

    // Rounded to six significant digits first so 999999.7 counts as 1e+06
    let scientific = format!("{:.5e}", value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if !(-4..6).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        );
    }

    let decimals = (5 - exponent) as usize;
    trim_fraction(&format!("{:.*}", decimals, value)).to_string()
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// Result of matching a query against one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Plus-words present in the document, empty if any minus-word matched
    pub words: Vec<String>,
    /// Status of the document
    pub status: DocumentStatus,
}

/// Truncating integer mean, 0 for no ratings
pub fn compute_average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}
