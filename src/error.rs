//! Error types for configuration loading and maze compilation.
//!
//! The simulation itself never fails; these cover the fallible edges
//! (reading JSON, compiling a symbolic layout).

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors raised while compiling a symbolic maze layout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("Layout has no rows")]
    Empty,

    #[error("Unknown tile code {code:?} at row {row}, column {col}")]
    UnknownTile { code: char, row: usize, col: usize },

    #[error("Row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}
