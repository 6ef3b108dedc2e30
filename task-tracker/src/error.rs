//! Error types shared across the tracker.
//!
//! [`Error`] is the per-command taxonomy: every variant is recovered within a single
//! command cycle and turned into user text by the presenter. [`StoreError`] covers
//! failures of the backing blob that cannot be recovered as "start fresh".

use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading or writing the persisted task collection.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read task file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write task file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize tasks")]
    Serialize(#[from] serde_json::Error),
}

/// Everything that can go wrong while handling one command line.
#[derive(Error, Debug)]
pub enum Error {
    /// Unrecognized prefix or command keyword.
    #[error("invalid command")]
    InvalidCommand,
    /// Known command with the wrong shape or sub-keyword.
    #[error("invalid parameter")]
    InvalidParameter,
    /// The id did not parse or no task holds it.
    #[error("no task with id {0:?}")]
    NotFound(String),
    /// The description was empty.
    #[error("task description cannot be empty")]
    InvalidInput,
    /// The highest task id is already taken.
    #[error("no task id left to assign")]
    NoFreeId,
    #[error("unknown status {0:?}")]
    InvalidStatus(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
}
