//! Error and diagnostic system for body dataset ingestion.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Multiple labeled spans pointing into the CSV source
//! - Severity levels
//! - Diagnostic collector for accumulating multiple errors
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning message with optional error code, multiple source
//! locations, and help text. Multiple diagnostics are wrapped in [`ParseError`]
//! for returning from [`parse`](crate::parse) and catalog lookups.
//!
//! # Example
//!
//! ```
//! # use solpack_data::error::{Diagnostic, ErrorCode};
//! # use solpack_data::Span;
//!
//! let span = Span::new(100..120);
//! let original_span = Span::new(0..20);
//!
//! let diag = Diagnostic::error("column `volume` appears more than once")
//!     .with_code(ErrorCode::E102)
//!     .with_label(span, "duplicate column")
//!     .with_secondary_label(original_span, "first declared here")
//!     .with_help("rename or remove one of the columns");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
