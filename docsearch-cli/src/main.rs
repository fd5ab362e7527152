//! Docsearch CLI - command-line front end for the docsearch engine

use anyhow::Result;
use clap::{Parser, Subcommand};
use docsearch::{log_duration, paginate, Corpus, Document, DocumentStatus, SearchEngine, Session};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "docsearch")]
#[command(author, version, about = "Docsearch - TF-IDF document search")]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a corpus and print the top documents page by page
    Search {
        /// Search query (prefix a word with '-' to exclude it)
        #[arg(allow_hyphen_values = true)]
        query: String,

        /// Corpus file (.yaml, .yml or .json)
        #[arg(long, short = 'c', env = "DOCSEARCH_CORPUS")]
        corpus: PathBuf,

        /// Only return documents with this status (actual, irrelevant, banned, removed)
        #[arg(long, short = 's', default_value = "actual")]
        status: String,

        /// Documents per page
        #[arg(long, short = 'p', default_value = "2")]
        page_size: usize,

        /// Output format (text, json)
        #[arg(long, short = 'o', default_value = "text")]
        format: String,
    },

    /// Show which query words a document matches
    Match {
        /// Search query
        #[arg(allow_hyphen_values = true)]
        query: String,

        /// Document id
        #[arg(long)]
        id: i64,

        /// Corpus file (.yaml, .yml or .json)
        #[arg(long, short = 'c', env = "DOCSEARCH_CORPUS")]
        corpus: PathBuf,

        /// Output format (text, json)
        #[arg(long, short = 'o', default_value = "text")]
        format: String,
    },

    /// Show corpus statistics
    Stats {
        /// Corpus file (.yaml, .yml or .json)
        #[arg(long, short = 'c', env = "DOCSEARCH_CORPUS")]
        corpus: PathBuf,
    },

    /// Read stop words, documents, ratings and a query from standard input
    Stdin,
}

/// Search options
#[derive(Debug, Clone)]
struct SearchOptions {
    /// Status filter
    status: DocumentStatus,
    /// Documents per page
    page_size: usize,
    /// Output format
    format: OutputFormat,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            status: DocumentStatus::Actual,
            page_size: 2,
            format: OutputFormat::Text,
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => anyhow::bail!("Unknown output format: {} (expected text or json)", s),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Search {
            query,
            corpus,
            status,
            page_size,
            format,
        } => {
            let options = SearchOptions {
                status: status.parse()?,
                page_size,
                format: format.parse()?,
            };
            cmd_search(&corpus, &query, &options)
        }
        Commands::Match {
            query,
            id,
            corpus,
            format,
        } => cmd_match(&corpus, &query, id, format.parse()?),
        Commands::Stats { corpus } => cmd_stats(&corpus),
        Commands::Stdin => cmd_stdin(),
    }
}

/// Load a corpus file into a fresh engine
fn load_engine(corpus_path: &Path) -> Result<SearchEngine> {
    log_duration!("Loading corpus");
    let corpus = Corpus::from_path(corpus_path)?;
    Ok(corpus.build_engine()?)
}

fn cmd_search(corpus_path: &Path, query: &str, options: &SearchOptions) -> Result<()> {
    if options.page_size == 0 {
        anyhow::bail!("--page-size must be at least 1");
    }

    let engine = load_engine(corpus_path)?;
    let results = {
        log_duration!(format!("Search for '{}'", query));
        engine.find_top_documents_with_status(query, options.status)?
    };

    match options.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        OutputFormat::Text => {
            if results.is_empty() {
                println!("No results found for '{}'", query);
                return Ok(());
            }
            print_pages(&results, options.page_size)?;
        }
    }

    Ok(())
}

/// Print each page followed by a page break line
fn print_pages(results: &[Document], page_size: usize) -> Result<()> {
    for page in &paginate(results, page_size)? {
        for document in page {
            println!("{}", document);
        }
        println!("Page break");
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchOutput<'a> {
    document_id: i64,
    query: &'a str,
    words: &'a [String],
    status: DocumentStatus,
}

fn cmd_match(corpus_path: &Path, query: &str, id: i64, format: OutputFormat) -> Result<()> {
    let engine = load_engine(corpus_path)?;
    let matched = {
        log_duration!(format!("Match document {}", id));
        engine.match_document(query, id)?
    };

    match format {
        OutputFormat::Json => {
            let output = MatchOutput {
                document_id: id,
                query,
                words: &matched.words,
                status: matched.status,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!(
                "{{ document_id = {}, status = {}, words = {} }}",
                id,
                matched.status,
                matched.words.join(" ")
            );
        }
    }

    Ok(())
}

fn cmd_stats(corpus_path: &Path) -> Result<()> {
    let engine = load_engine(corpus_path)?;

    println!("Docsearch Status");
    println!("================");
    println!("Corpus: {}", corpus_path.display());
    println!("Stop words: {}", engine.stop_words().len());
    println!("Documents: {}", engine.document_count());

    let ids: Vec<String> = engine.document_ids().map(|id| id.to_string()).collect();
    if !ids.is_empty() {
        println!("Insertion order: {}", ids.join(", "));
    }
    Ok(())
}

fn cmd_stdin() -> Result<()> {
    let stdin = std::io::stdin();
    let session = Session::read_from(stdin.lock())?;

    let results = {
        log_duration!("Operation time");
        session.run()?
    };

    for document in &results {
        println!("{}", document);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_search_options_default() {
        let options = SearchOptions::default();
        assert_eq!(options.status, DocumentStatus::Actual);
        assert_eq!(options.page_size, 2);
        assert_eq!(options.format, OutputFormat::Text);
    }

    #[test]
    fn test_cli_parses_search() {
        let cli = Cli::try_parse_from([
            "docsearch",
            "search",
            "curly -dog",
            "--corpus",
            "pets.yaml",
            "--status",
            "banned",
        ])
        .unwrap();
        match cli.command {
            Commands::Search { query, status, .. } => {
                assert_eq!(query, "curly -dog");
                assert_eq!(status, "banned");
            }
            _ => panic!("expected search command"),
        }
    }
}
