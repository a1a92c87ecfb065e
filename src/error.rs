//! Error types for assembly operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while assembling an EPUB archive.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("source file not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("unclassified input file: {0}")]
    Unclassified(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
