//! Error types for table construction and rendering.
//!
//! One semantic enum covers shape violations (arity, empty header) and
//! rendering failures, following the project's error handling conventions
//! with `thiserror`.

use thiserror::Error;

/// Errors that can occur when building or rendering a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TabularError {
    /// The header row was empty; a table needs at least one column.
    #[error("table header must contain at least one column")]
    EmptyHeader,

    /// A data row's cell count did not match the header's column count.
    #[error("row arity mismatch: header has {expected} columns, row has {found}")]
    ColumnArityMismatch {
        /// Number of columns declared by the header.
        expected: usize,
        /// Number of cells supplied in the offending row.
        found: usize,
    },

    /// The delimited-text writer reported a failure.
    #[error("failed to render delimited text: {message}")]
    Render {
        /// Description of the underlying writer error.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_header_formats_correctly() {
        assert_eq!(
            TabularError::EmptyHeader.to_string(),
            "table header must contain at least one column"
        );
    }

    #[test]
    fn arity_mismatch_formats_correctly() {
        let err = TabularError::ColumnArityMismatch {
            expected: 3,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "row arity mismatch: header has 3 columns, row has 2"
        );
    }

    #[test]
    fn render_formats_correctly() {
        let err = TabularError::Render {
            message: "disk full".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "failed to render delimited text: disk full"
        );
    }
}
