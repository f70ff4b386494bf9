//! Error types for the policy desk.
//!
//! Each failure is fatal to the transaction that raised it. Constants
//! problems are also fatal to the process: the constants value does not
//! change mid-session, so every later customer would fail the same way.

use std::io;
use std::path::PathBuf;

/// Constants file could not be read, parsed or rewritten.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read constants file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write constants file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("constants file {} already exists", path.display())]
    AlreadyExists { path: PathBuf },

    /// Line without a single `=` separator, or with an empty key.
    #[error("malformed constants line {line}: {content:?}")]
    Malformed { line: usize, content: String },

    #[error("constant {key} has non-numeric value {value:?}")]
    InvalidValue { key: String, value: String },
}

/// A pricing constant the calculator needs is absent from the mapping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing constant {0}")]
pub struct MissingConstantError(pub String);

impl MissingConstantError {
    pub fn key(&self) -> &str {
        &self.0
    }
}

/// Policy log could not be appended to.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("cannot append to policy log {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot serialize policy record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Everything that can abort a single customer's transaction.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    MissingConstant(#[from] MissingConstantError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl TransactionError {
    /// True when the session cannot go on to the next customer.
    #[must_use]
    pub fn is_fatal_to_process(&self) -> bool {
        matches!(self, TransactionError::Config(_) | TransactionError::MissingConstant(_))
    }
}

/// Why an interactive session stopped early.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("console i/o failed: {0}")]
    Console(#[from] io::Error),

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}
