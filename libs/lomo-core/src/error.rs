//! Error types for lomo-core.

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while parsing a dictionary file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid header at line {line}: expected 'Number\\tSpanish\\tin English'")]
    InvalidHeader { line: usize },

    #[error("empty file")]
    EmptyFile,

    #[error("invalid XML dictionary: {0}")]
    Xml(#[from] quick_xml::DeError),
}

/// Errors reported by a lesson session or its controller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("cannot start a session without words")]
    EmptySession,

    #[error("session has already exited")]
    Exited,
}
