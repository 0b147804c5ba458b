//! Unified error types for the transcript validation engine.
//!
//! This module provides a single error type covering container/markup
//! parsing failures and batch-level input rejection, presenting a
//! consistent API to users.
use thiserror::Error;

/// Main error type for validation operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Document bytes are not a readable DOCX package
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// Reference spreadsheet is not a readable XLSX workbook, or the
    /// required column is absent
    #[error("Malformed spreadsheet: {0}")]
    MalformedSpreadsheet(String),

    /// Batch input carries no usable file
    #[error("No valid input: {0}")]
    NoValidInput(String),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),
}

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, Error>;
