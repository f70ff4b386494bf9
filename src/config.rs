//! Pricing constants and the policy-number counter.
//!
//! The constants file is plain `key=value` text. A value with a decimal point
//! is a float, anything else must be an integer. Entry order is preserved so
//! a load/save cycle leaves the file layout untouched.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use indexmap::IndexMap;
use tracing::info;

use crate::error::{ConfigError, MissingConstantError};
use crate::types::PolicyNumber;

/// Names of the constants the pricing rules and the counter rely on.
pub mod keys {
    pub const BASIC_PREMIUM: &str = "basic_premium";
    pub const DISCOUNT_PER_ADDITIONAL_CAR: &str = "discount_per_additional_car";
    pub const EXTRA_LIABILITY_COST: &str = "extra_liability_cost";
    pub const GLASS_COVERAGE_COST: &str = "glass_coverage_cost";
    pub const LOANER_CAR_COST: &str = "loaner_car_cost";
    pub const HST_RATE: &str = "hst_rate";
    pub const PROCESSING_FEE: &str = "processing_fee";
    pub const NEXT_POLICY_NUMBER: &str = "next_policy_number";
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstantValue {
    Int(i64),
    Float(f64),
}

impl ConstantValue {
    pub fn as_f64(self) -> f64 {
        match self {
            ConstantValue::Int(i) => i as f64,
            ConstantValue::Float(f) => f,
        }
    }

    /// `None` for anything that is not a finite number.
    fn parse(raw: &str) -> Option<Self> {
        if raw.contains('.') {
            raw.parse::<f64>().ok().filter(|f| f.is_finite()).map(ConstantValue::Float)
        } else {
            raw.parse::<i64>().ok().map(ConstantValue::Int)
        }
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Int(i) => write!(f, "{i}"),
            ConstantValue::Float(x) => {
                // Floats must keep their decimal point or they reload as integers.
                let s = x.to_string();
                if s.contains('.') { f.write_str(&s) } else { write!(f, "{s}.0") }
            }
        }
    }
}

impl From<i64> for ConstantValue {
    fn from(i: i64) -> Self {
        ConstantValue::Int(i)
    }
}

impl From<i32> for ConstantValue {
    fn from(i: i32) -> Self {
        ConstantValue::Int(i64::from(i))
    }
}

impl From<f64> for ConstantValue {
    fn from(f: f64) -> Self {
        ConstantValue::Float(f)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Constants {
    entries: IndexMap<String, ConstantValue>,
}

impl Constants {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starter rate card written by `onestop init`.
    pub fn canonical() -> Self {
        let mut c = Constants::new();
        c.insert(keys::BASIC_PREMIUM, 500);
        c.insert(keys::DISCOUNT_PER_ADDITIONAL_CAR, 0.1);
        c.insert(keys::EXTRA_LIABILITY_COST, 50);
        c.insert(keys::GLASS_COVERAGE_COST, 30);
        c.insert(keys::LOANER_CAR_COST, 20);
        c.insert(keys::HST_RATE, 0.13);
        c.insert(keys::PROCESSING_FEE, 10);
        c.insert(keys::NEXT_POLICY_NUMBER, 1);
        c
    }

    /// Inserts or replaces; a replaced key keeps its original position.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ConstantValue>,
    ) -> Option<ConstantValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<ConstantValue> {
        self.entries.shift_remove(key)
    }

    pub fn get(&self, key: &str) -> Option<ConstantValue> {
        self.entries.get(key).copied()
    }

    /// Numeric value of a constant the caller cannot do without.
    pub fn require(&self, key: &str) -> Result<f64, MissingConstantError> {
        self.get(key)
            .map(ConstantValue::as_f64)
            .ok_or_else(|| MissingConstantError(key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ConstantValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// The number the next issued policy will carry.
    ///
    /// A counter stored as a float or a negative integer is treated as absent.
    pub fn next_policy_number(&self) -> Result<PolicyNumber, MissingConstantError> {
        match self.get(keys::NEXT_POLICY_NUMBER) {
            Some(ConstantValue::Int(n)) if n >= 0 => Ok(PolicyNumber(n as u64)),
            _ => Err(MissingConstantError(keys::NEXT_POLICY_NUMBER.to_string())),
        }
    }

    /// Returns a copy with the counter moved past `issued`.
    #[must_use]
    pub fn after_issuing(&self, issued: PolicyNumber) -> Constants {
        let mut next = self.clone();
        next.insert(keys::NEXT_POLICY_NUMBER, issued.next().0 as i64);
        next
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut constants = Constants::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut parts = line.split('=');
            let (Some(key), Some(raw), None) = (parts.next(), parts.next(), parts.next()) else {
                return Err(ConfigError::Malformed { line: idx + 1, content: line.to_string() });
            };
            let (key, raw) = (key.trim(), raw.trim());
            if key.is_empty() {
                return Err(ConfigError::Malformed { line: idx + 1, content: line.to_string() });
            }
            let value = ConstantValue::parse(raw).ok_or_else(|| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw.to_string(),
            })?;
            constants.insert(key, value);
        }
        Ok(constants)
    }

    /// One `key=value` line per entry, newline-terminated.
    pub fn render(&self) -> String {
        self.iter().map(|(k, v)| format!("{k}={v}\n")).collect()
    }
}

pub fn load(path: &Path) -> Result<Constants, ConfigError> {
    let text = fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    let constants = Constants::parse(&text)?;
    info!(path = %path.display(), entries = constants.len(), "loaded constants");
    Ok(constants)
}

/// Replaces the file through a sibling temp file and a rename, so a failed
/// write leaves the previous constants intact. An existing file keeps its
/// permissions.
pub fn save(path: &Path, constants: &Constants) -> Result<(), ConfigError> {
    let write_err = |source| ConfigError::Write { path: path.to_path_buf(), source };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(constants.render().as_bytes()).map_err(write_err)?;
    match fs::metadata(path) {
        Ok(existing) => tmp.as_file().set_permissions(existing.permissions()).map_err(write_err)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(write_err(e)),
    }
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    info!(path = %path.display(), entries = constants.len(), "saved constants");
    Ok(())
}

/// Writes the [`Constants::canonical`] rate card to a path that must not exist yet.
pub fn init(path: &Path) -> Result<Constants, ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists { path: path.to_path_buf() });
    }
    let constants = Constants::canonical();
    save(path, &constants)?;
    Ok(constants)
}
