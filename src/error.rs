//! Unified error handling for the wikisense crate
//!
//! All fallible operations in the library return [`Result`], which wraps
//! the single [`Error`] enum. Canonicalization failures (decode loops,
//! lookup mismatches) are hard errors: a silently degraded canonical title
//! would corrupt every aggregate built on top of it.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for the wikisense crate
#[derive(Error, Debug)]
pub enum Error {
    /// Percent-decoding did not reach a fixed point within the round bound
    #[error("percent-decoding of {input:?} did not converge within {rounds} rounds")]
    DecodeLoop { input: String, rounds: u32 },

    /// The redirect query returned zero or multiple page entries
    #[error("redirect lookup for {title:?} returned {pages} page entries, expected exactly 1")]
    Lookup { title: String, pages: usize },

    /// The external API answered with a non-success status or kept failing
    #[error("external service error: {0}")]
    ExternalService(String),

    /// A corpus line did not have the expected tab-field count
    #[error("{file}:{line}: malformed {tag} record, expected at least {expected} tab fields, got {got}")]
    Parse {
        file: PathBuf,
        line: usize,
        tag: &'static str,
        expected: usize,
        got: usize,
    },

    /// The corpus directory does not exist
    #[error("corpus directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// An expected shard file is absent from the corpus directory
    #[error("missing corpus shard: {0}")]
    MissingShard(PathBuf),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
