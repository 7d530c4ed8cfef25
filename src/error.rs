//! Error taxonomy for the fingerprinting pipeline.

use thiserror::Error;

/// Failure kinds produced by the Detective pipeline.
///
/// Configuration errors are raised synchronously and leave state untouched;
/// source failures terminate processing but any subfingerprints already
/// appended are retained by the caller.
#[derive(Error, Debug)]
pub enum DetectiveError {
    #[error("invalid argument: {0}")]
    ArgumentInvalid(String),

    #[error("sample source failed: {0}")]
    SourceFailure(String),

    #[error("source exhausted before a subfingerprint could be produced")]
    Exhausted,

    #[error("audio decode error: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration file error: {0}")]
    ConfigFile(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DetectiveError>;
