//! Storage layer: `config.ini` persistence.
//!
//! - `fields` declares, once, which INI section and key every struct field
//!   maps to (and which fields are never persisted).
//! - `codec` turns a [`Config`](crate::Config) into INI text and back, walking
//!   that table.
//! - `file` adds the filesystem: default path substitution, one read per
//!   load, one write per save.
//!
//! Keeping the mapping in one table means a new setting only has to be added
//! in one place for both the read and the write path to pick it up.

pub mod codec;
pub mod fields;
pub mod file;

use std::path::PathBuf;

use thiserror::Error;

pub use fields::{Field, Mapping, FIELDS, SECTIONS};

/// Error type for config file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read, or its contents do not describe a config.
    #[error("failed to parse config at {path}: {reason}")]
    Parse {
        path: PathBuf,
        #[source]
        reason: ParseReason,
    },

    /// The file could not be created or written.
    #[error("failed to write config to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// The resolved path of the file the failed operation targeted.
    pub fn path(&self) -> &std::path::Path {
        match self {
            ConfigError::Parse { path, .. } | ConfigError::Write { path, .. } => path,
        }
    }
}

/// Why a load failed.
#[derive(Debug, Error)]
pub enum ParseReason {
    /// Missing file, permission denied, invalid UTF-8, ...
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The text is not valid sectioned `key = value` syntax.
    #[error("malformed INI: {0}")]
    Syntax(#[from] ini::ParseError),

    /// A key was present but its value does not fit the field's type.
    #[error("[{section}] {key}: {source}")]
    Value {
        section: &'static str,
        key: &'static str,
        #[source]
        source: InvalidValue,
    },
}

/// A raw INI value that could not be coerced to the field's type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, found {found:?}")]
pub struct InvalidValue {
    pub expected: &'static str,
    pub found: String,
}
