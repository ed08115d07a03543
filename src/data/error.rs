use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Load-time errors
// ---------------------------------------------------------------------------

/// Fatal errors while reading the listings file.  Any of these aborts the
/// load; no partial table is ever produced.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("required column '{0}' is missing")]
    MissingColumn(String),

    #[error("no price column found (expected a header starting with 'Price_')")]
    NoPriceColumn,
}

// ---------------------------------------------------------------------------
// Per-row errors
// ---------------------------------------------------------------------------

/// A single row whose numeric field could not be parsed.
///
/// Rows carrying one of these are skipped by the loader (and logged), they
/// never abort the load.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("row {row}: column '{column}' has unusable value '{value}' ({reason})")]
pub struct MalformedField {
    /// 1-based data row number (header excluded).
    pub row: usize,
    pub column: String,
    pub value: String,
    pub reason: String,
}

impl MalformedField {
    pub fn new(
        row: usize,
        column: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            row,
            column: column.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
