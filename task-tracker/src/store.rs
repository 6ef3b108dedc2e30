use crate::error::StoreError;
use crate::task::Task;
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Durable home of the complete task collection.
///
/// A missing blob, or one that is not a valid collection (bad JSON, repeated ids),
/// loads as an empty collection; `save` always replaces the whole collection.
#[cfg_attr(test, mockall::automock)]
pub trait Store {
    fn load(&self) -> Result<Vec<Task>, StoreError>;
    fn save(&self, tasks: &[Task]) -> Result<(), StoreError>;
}

/// Stores tasks as a pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = OsString::from(self.path.as_os_str());
        staging.push(".tmp");
        PathBuf::from(staging)
    }
}

impl Store for JsonFileStore {
    fn load(&self) -> Result<Vec<Task>, StoreError> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No task file yet, starting empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        match serde_json::from_slice::<Vec<Task>>(&contents) {
            Ok(tasks) if has_duplicate_ids(&tasks) => {
                warn!(path = %self.path.display(), "Task file repeats an id, starting empty");
                Ok(Vec::new())
            }
            Ok(tasks) => {
                debug!(path = %self.path.display(), count = tasks.len(), "Loaded tasks");
                Ok(tasks)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Task file is corrupt, starting empty");
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let contents = serde_json::to_vec_pretty(tasks)?;
        let staging = self.staging_path();

        // Write to a sibling file, then rename over the target so readers never see a
        // half-written collection.
        fs::write(&staging, contents).map_err(|source| StoreError::Write {
            path: staging.clone(),
            source,
        })?;
        fs::rename(&staging, &self.path).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), count = tasks.len(), "Saved tasks");
        Ok(())
    }
}

fn has_duplicate_ids(tasks: &[Task]) -> bool {
    let mut seen = HashSet::with_capacity(tasks.len());
    !tasks.iter().all(|task| seen.insert(task.id()))
}
