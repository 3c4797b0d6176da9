//! Folder ingestion error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for folder ingestion.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Errors that abort a whole folder load.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The directory could not be listed.
    #[error("cannot read directory '{}': {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// More candidate files than the configured ceiling.
    #[error("folder contains {found} point-cloud files, more than the limit of {limit}")]
    TooManyFiles { found: usize, limit: usize },

    /// Every candidate failed to load (or there were none).
    #[error("no valid point-cloud files found in '{}'", path.display())]
    NoneValid { path: PathBuf },
}
