use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiskFillError>;

/// Everything a fill, clear or probe can fail with.
///
/// Any error leaves the session's [`StatusRecord`](crate::StatusRecord)
/// untouched; only a successful operation publishes a new one.
#[derive(Debug, Error)]
pub enum DiskFillError {
    /// Free space is already below the headroom, so nothing was written.
    #[error("Not enough disk space available - try clearing your disk space! \
             ({available} bytes free, {headroom} bytes must stay free)")]
    InsufficientSpace { available: u64, headroom: u64 },

    #[error("cannot query free space for {}: {source}", path.display())]
    Probe {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot delete {}: {source}", path.display())]
    Delete {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot stat {}: {source}", path.display())]
    Stat {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    /// The written file does not have the planned length.
    #[error("temp file is {actual} bytes, expected {expected}")]
    SizeMismatch { expected: u64, actual: u64 },

    #[error("another fill or clear is still running")]
    Busy,

    /// The worker thread went away without reporting a result.
    #[error("operation worker exited without a result")]
    WorkerLost,
}

impl DiskFillError {
    /// True for the one failure the user is expected to fix themselves.
    pub fn is_insufficient_space(&self) -> bool {
        matches!(self, DiskFillError::InsufficientSpace { .. })
    }
}
