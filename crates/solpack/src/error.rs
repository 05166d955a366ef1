//! Error types for solpack operations.
//!
//! This module provides the main error type [`SolpackError`] which wraps
//! the error conditions that can occur while building, relaxing and
//! exporting a scene.

use std::io;

use thiserror::Error;

use solpack_core::scale::ScaleError;
use solpack_data::error::ParseError;

/// The main error type for solpack operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries the dataset diagnostics together with the
/// source text, so that row and cell spans can be rendered by a reporter.
#[derive(Debug, Error)]
pub enum SolpackError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for SolpackError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl From<ScaleError> for SolpackError {
    fn from(error: ScaleError) -> Self {
        Self::Layout(error.to_string())
    }
}

impl SolpackError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
