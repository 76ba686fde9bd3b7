//! Error types for Transit operations.
//!
//! This module provides the main error type [`TransitError`] which wraps
//! the error conditions that can occur while translating documents.

use std::io;

use thiserror::Error;

use transit_parser::error::ParseError;

/// The main error type for Transit operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries every diagnostic of the failed phase along
/// with the source text it was produced from, so callers can render rich
/// reports.
#[derive(Debug, Error)]
pub enum TransitError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TransitError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
