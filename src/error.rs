//! Error types.

use crate::lookup::TableError;

/// Errors produced by this crate.
///
/// Segmentation and romanization never fail; only entry building, table
/// construction and the I/O-facing collaborators return these.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A dictionary entry was requested for an empty word
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The lookup table definition is inconsistent
    #[error("lookup table error: {0}")]
    Table(#[from] TableError),
    /// Configuration could not be parsed
    #[error("config error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
