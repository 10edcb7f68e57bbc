//! Error types for the ECAD codec.
//!
//! - [`DecodeError`] - a fixed-width line that matches no layout
//! - [`TableError`] - unreadable return-file tables
//! - [`ReturnFileError`] - return-file processing errors
//! - [`ExportError`] - assembling and writing export files
//! - [`CliError`] - top-level errors of the `ecad` binary
//!
//! Malformed field values are never errors: the formatters default them.
//! Layout width mismatches are programming errors and panic instead.
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

use crate::layout::RecordKind;

// =============================================================================
// Decoding Errors
// =============================================================================

/// Errors while slicing a fixed-width line back into fields.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// No layout has this tag and width.
    #[error("Unknown record '{prefix}' ({width} chars)")]
    UnknownRecord { width: usize, prefix: String },

    /// The line is not as wide as its layout.
    #[error("{kind:?} record must be {expected} chars, found {found}")]
    WidthMismatch {
        kind: RecordKind,
        expected: usize,
        found: usize,
    },
}

// =============================================================================
// Table Errors
// =============================================================================

/// Errors while reading a delimited table.
#[derive(Debug, Error)]
pub enum TableError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to detect encoding.
    #[error("Failed to detect encoding: {0}")]
    EncodingError(String),

    /// Invalid CSV format.
    #[error("Invalid table format{}: {message}", location(.line))]
    ParseError { message: String, line: Option<usize> },

    /// Empty file.
    #[error("Table is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found in table")]
    NoHeaders,
}

fn location(line: &Option<usize>) -> String {
    match line {
        Some(l) => format!(" at line {}", l),
        None => String::new(),
    }
}

impl TableError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
            line: None,
        }
    }

    pub fn with_line(self, at: usize) -> Self {
        match self {
            Self::ParseError { message, .. } => Self::ParseError {
                message,
                line: Some(at),
            },
            other => other,
        }
    }
}

impl From<csv::Error> for TableError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line() as usize);
        let parsed = Self::parse(err.to_string());
        match line {
            Some(l) => parsed.with_line(l),
            None => parsed,
        }
    }
}

// =============================================================================
// Return File Errors
// =============================================================================

/// Errors while processing an ECAD return file.
///
/// Any of these aborts the whole file: nothing is partially applied.
#[derive(Debug, Error)]
pub enum ReturnFileError {
    /// The table could not be read.
    #[error("Unreadable return file: {0}")]
    Table(#[from] TableError),

    /// Required logical columns did not resolve to any header.
    #[error("Missing required columns {missing:?} (found: {found:?})")]
    MissingColumns {
        missing: Vec<&'static str>,
        found: Vec<String>,
    },

    /// Headers but no data rows.
    #[error("Return file has no data rows")]
    Empty,
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors while assembling or writing an export file.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to write the output file.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A work was pushed after the phonogram section started, or anything
    /// was pushed after the file was finished.
    #[error("Cannot add {record} in the {section} section")]
    SectionOrder {
        record: &'static str,
        section: &'static str,
    },
}

// =============================================================================
// CLI Errors (top-level)
// =============================================================================

/// Top-level errors of the `ecad` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Export error.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Return file error.
    #[error("Return file error: {0}")]
    Return(#[from] ReturnFileError),

    /// Fixed-width decoding error.
    #[error("Decode error at line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: DecodeError,
    },

    /// IO error reading an input file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error in an input file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for table reading.
pub type TableResult<T> = Result<T, TableError>;

/// Result type for return-file processing.
pub type ReturnResult<T> = Result<T, ReturnFileError>;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for the CLI.
pub type CliResult<T> = Result<T, CliError>;
