//! Append-only NDJSON log of issued policies.
//!
//! One compact JSON object per line. Lines already in the file are never
//! read, rewritten or truncated. A single process is assumed to own the file;
//! there is no locking.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::PersistenceError;
use crate::policy::PolicyRecord;

#[derive(Debug, Clone)]
pub struct PolicyLog {
    path: PathBuf,
}

impl PolicyLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        PolicyLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the log if absent. The line is serialized in full before the
    /// file is touched, so a serialization failure writes nothing.
    pub fn append(&self, record: &PolicyRecord) -> Result<(), PersistenceError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let io_err = |source| PersistenceError::Io { path: self.path.clone(), source };
        let mut file =
            OpenOptions::new().create(true).append(true).open(&self.path).map_err(io_err)?;
        file.write_all(&line).map_err(io_err)?;
        file.flush().map_err(io_err)?;

        info!(
            policy_number = %record.policy_number,
            path = %self.path.display(),
            "policy appended"
        );
        Ok(())
    }
}
