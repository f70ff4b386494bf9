//! Auto-insurance policy desk: prices multi-car policies from a constants
//! file, appends each issued policy to an NDJSON log and advances the shared
//! policy-number counter.
//!
//! Exactly one process is expected to use a given constants file and policy
//! log at a time. Nothing here locks either file.

pub mod config;
pub mod desk;
pub mod error;
pub mod interview;
pub mod ledger;
pub mod policy;
pub mod premium;
pub mod receipt;
pub mod session;
pub mod types;
pub mod validate;

pub use config::Constants;
pub use desk::PolicyDesk;
pub use error::{ConfigError, MissingConstantError, PersistenceError, TransactionError};
pub use policy::{Claim, Customer, PolicyApplication, PolicyRecord};
pub use premium::{Coverage, calculate};
