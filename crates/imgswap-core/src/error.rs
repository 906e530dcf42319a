//! Fatal error taxonomy for the media cache.
//!
//! Per-URL problems (network failures, unrecognized content) are not errors at
//! this level; they become sticky failure markers in the ledger and are
//! reported through [`crate::media::ResolveFailure`]. Everything here aborts
//! the run.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for media cache operations.
pub type MediaResult<T> = Result<T, MediaError>;

#[derive(Error, Debug)]
pub enum MediaError {
    /// The media path exists but is a file (or something else) rather than a directory.
    #[error("media path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// `known.json` exists but is not a JSON object of URL -> filename-or-null.
    #[error("corrupt ledger at {}: {source}", path.display())]
    CorruptLedger {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// `known.json` exists but could not be read.
    #[error("failed to read ledger {}: {source}", path.display())]
    LedgerRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Media directory, cached file, or ledger could not be written.
    #[error("storage write failed for {}: {source}", path.display())]
    StorageWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Category key outside the img/video/audio table.
    #[error("unknown media category: {0:?} (expected img, video or audio)")]
    UnknownCategory(String),
}

impl MediaError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StorageWriteFailure {
            path: path.into(),
            source,
        }
    }
}
