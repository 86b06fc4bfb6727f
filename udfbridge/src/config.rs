///
/// Registration options.
///
/// Extra function flags OR'd into the text representation passed to SQLite.
/// `SQLITE_UTF8` is always set; the defaults add nothing else. Options can be
/// built in code or loaded from a TOML file:
///
/// ```toml
/// deterministic = true
/// direct_only = false
/// innocuous = false
/// ```
///

use std::ffi::c_int;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{SQLITE_DETERMINISTIC, SQLITE_DIRECTONLY, SQLITE_INNOCUOUS, SQLITE_UTF8};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegisterOptions {
    /// Same inputs always give the same output within one statement.
    pub deterministic: bool,
    /// Not callable from triggers, views or schema expressions.
    pub direct_only: bool,
    pub innocuous: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read options file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse options: {0}")]
    Parse(#[from] toml::de::Error),
}

impl RegisterOptions {
    pub fn deterministic() -> Self {
        Self {
            deterministic: true,
            ..Self::default()
        }
    }

    /// The `eTextRep` argument for SQLite's registration calls.
    pub fn text_rep(&self) -> c_int {
        let mut flags = SQLITE_UTF8;
        if self.deterministic {
            flags |= SQLITE_DETERMINISTIC;
        }
        if self.direct_only {
            flags |= SQLITE_DIRECTONLY;
        }
        if self.innocuous {
            flags |= SQLITE_INNOCUOUS;
        }
        flags
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}
