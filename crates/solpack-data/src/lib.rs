//! # solpack data
//!
//! Ingestion of the celestial-body dataset: a comma-separated file with a
//! header row, one body per row. Parsing runs in three passes:
//!
//! 1. **Tokenize** - Split the source into records of (possibly quoted) fields
//! 2. **Table** - Check the header and the shape of every row
//! 3. **Catalog** - Coerce fields into typed [`BodyRecord`]s keyed by name
//!
//! Every problem found along the way is reported as a [`Diagnostic`] carrying
//! an error code and a [`Span`] into the source text.
//!
//! ## Usage
//!
//! ```
//! # use solpack_data::{parse, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = "eName,isPlanet,volume\nSun,FALSE,1.412e18\nEarth,TRUE,1.08321e12\n";
//!
//!     let catalog = parse(source)?;
//!     assert_eq!(catalog.len(), 2);
//!     assert!(catalog.find("Earth").unwrap().is_planet());
//!     Ok(())
//! }
//! ```
//!
//! [`Diagnostic`]: error::Diagnostic

mod catalog;
pub mod coerce;
pub mod error;
mod lexer;
mod span;
mod table;

pub use catalog::{BodyRecord, Catalog, columns};
pub use span::Span;

use log::debug;

use error::ParseError;
use table::Table;

/// Parse dataset source text into a [`Catalog`].
///
/// # Errors
///
/// Returns a [`ParseError`] holding every diagnostic found: tokenizer errors
/// (`E0xx`), table shape errors (`E1xx`) or a missing `eName` column (`E200`).
pub fn parse(source: &str) -> Result<Catalog, ParseError> {
    debug!(bytes = source.len(); "Tokenizing dataset");
    let records = lexer::tokenize(source)?;

    debug!(records = records.len(); "Building dataset table");
    let table = Table::from_records(records)?;

    Catalog::from_table(&table)
}
