//! Error codes for dataset diagnostics.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Tokenizer errors
//! - `E1xx` - Table shape errors
//! - `E2xx` - Schema errors
//! - `E3xx` - Catalog lookup errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Tokenizer Errors (E0xx)
    // =========================================================================
    /// Unterminated quoted field.
    ///
    /// A field was opened with `"` but the input ended before it was closed.
    E001,

    /// Unexpected character after a closing quote.
    ///
    /// A quoted field must be followed by `,`, a line break or the end of
    /// the input. Quotes inside a quoted field are written as `""`.
    E002,

    // =========================================================================
    // Table Errors (E1xx)
    // =========================================================================
    /// Empty input.
    ///
    /// The dataset has no header row.
    E100,

    /// Ragged row.
    ///
    /// A data row has a different number of fields than the header.
    E101,

    /// Duplicate column.
    ///
    /// The same column name appears more than once in the header.
    E102,

    // =========================================================================
    // Schema Errors (E2xx)
    // =========================================================================
    /// Missing required column.
    ///
    /// The header lacks a column the catalog cannot be built without.
    E200,

    // =========================================================================
    // Catalog Errors (E3xx)
    // =========================================================================
    /// Body not found.
    ///
    /// A body was requested by name but no row carries that name.
    E300,

    /// Invalid magnitude.
    ///
    /// The requested magnitude of a body is missing, zero, negative or not
    /// a finite number.
    E301,
}

impl ErrorCode {
    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E200 => "E200",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
        }
    }

    /// Get a short description of this error code.
    pub fn description(&self) -> &'static str {
        match self {
            // Tokenizer errors
            ErrorCode::E001 => "unterminated quoted field",
            ErrorCode::E002 => "unexpected character after closing quote",
            // Table errors
            ErrorCode::E100 => "empty input",
            ErrorCode::E101 => "ragged row",
            ErrorCode::E102 => "duplicate column",
            // Schema errors
            ErrorCode::E200 => "missing required column",
            // Catalog errors
            ErrorCode::E300 => "body not found",
            ErrorCode::E301 => "invalid magnitude",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E101.to_string(), "E101");
        assert_eq!(ErrorCode::E200.to_string(), "E200");
        assert_eq!(ErrorCode::E301.to_string(), "E301");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "unterminated quoted field");
        assert_eq!(ErrorCode::E102.description(), "duplicate column");
        assert_eq!(ErrorCode::E300.description(), "body not found");
    }
}
