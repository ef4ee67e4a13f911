//! Error types for courtside operations.

use thiserror::Error;

use crate::data::model::ColumnKind;

/// All errors produced by the analyzers, the chart engine, and the harness.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// A referenced column is absent from the dataset.
    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },

    /// A column exists but holds the wrong kind of data.
    #[error("column '{column}' is not {expected} (found {found} values)")]
    TypeMismatch {
        column: String,
        expected: ColumnKind,
        found: &'static str,
    },

    /// A column's length disagrees with the rest of the table.
    #[error("column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("alpha must be within [0, 1], got {0}")]
    InvalidAlpha(f64),

    #[error("unknown palette '{0}'")]
    UnknownPalette(String),

    /// A result check rejected the computed result.
    #[error("assertion failed: {0}")]
    Assertion(String),

    /// The rendering collaborator could not display a figure.
    #[error("render error: {0}")]
    Render(String),
}
