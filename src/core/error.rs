use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures while enumerating or reading source files.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("load directory '{0}' does not exist")]
    DirectoryMissing(PathBuf),

    #[error("'{0}' is not a directory")]
    NotADirectory(PathBuf),

    #[error("invalid file pattern \"{pattern}\": {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read task for {path:?} did not complete: {message}")]
    TaskFailed { path: PathBuf, message: String },
}

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("failed to start the load runtime: {0}")]
    Runtime(#[from] io::Error),

    #[error("blocking setup was called inside an async runtime; use the async setup instead")]
    InsideRuntime,
}
