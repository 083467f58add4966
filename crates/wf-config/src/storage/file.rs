//! Reading and writing `config.ini` on disk.
//!
//! Each call performs exactly one blocking filesystem operation.  File
//! handles live only inside `std::fs::read_to_string` / `std::fs::write`, so
//! they are closed on every exit path.  There is no temp-file-and-rename:
//! a save truncates and rewrites the target in place.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::config::Config;

use super::codec::{parse, render};
use super::{ConfigError, ParseReason};

/// Default configuration file name, used when an empty path is given.
pub const FILE_NAME: &str = "config.ini";

/// Substitutes [`FILE_NAME`] for an empty path.
pub fn resolve_path(path: &Path) -> &Path {
    if path.as_os_str().is_empty() {
        Path::new(FILE_NAME)
    } else {
        path
    }
}

/// Reads and parses the config file at `path` (or [`FILE_NAME`] when empty).
///
/// Keys missing from the file keep their zero value; see [`parse`].
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] when the file cannot be read, is not valid
/// INI, or holds a value that does not fit its field.  No config is returned
/// in that case.
pub fn load(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = resolve_path(path.as_ref());
    let fail = |reason: ParseReason| ConfigError::Parse {
        path: path.to_path_buf(),
        reason,
    };

    let text = std::fs::read_to_string(path).map_err(|e| fail(e.into()))?;
    let config = parse(&text).map_err(fail)?;

    debug!(path = %path.display(), bytes = text.len(), "loaded config");
    Ok(config)
}

/// Writes `config` to `path` (or [`FILE_NAME`] when empty), creating or
/// truncating the file.  `server.dev` is not written.
///
/// # Errors
///
/// Returns [`ConfigError::Write`] if rendering or the filesystem write fails
/// (permission denied, missing parent directory, disk full, ...).
pub fn save(config: &Config, path: impl AsRef<Path>) -> Result<(), ConfigError> {
    let path = resolve_path(path.as_ref());
    let fail = |source: std::io::Error| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    let text = render(config).map_err(fail)?;
    std::fs::write(path, &text).map_err(fail)?;

    debug!(path = %path.display(), bytes = text.len(), "saved config");
    Ok(())
}

/// Returns the resolved path as an owned value, for callers that need to
/// report where a config was read from or written to.
pub fn resolved_path_buf(path: impl AsRef<Path>) -> PathBuf {
    resolve_path(path.as_ref()).to_path_buf()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_resolves_to_default_file_name() {
        assert_eq!(resolve_path(Path::new("")), Path::new("config.ini"));
        assert_eq!(resolved_path_buf(""), PathBuf::from(FILE_NAME));
    }

    #[test]
    fn test_non_empty_path_is_used_as_is() {
        let path = Path::new("/etc/blog/custom.ini");
        assert_eq!(resolve_path(path), path);
    }

    #[test]
    fn test_load_missing_file_is_parse_error_with_path() {
        // Arrange
        let path = Path::new("/nonexistent/path/that/cannot/exist/config.ini");

        // Act
        let err = load(path).unwrap_err();

        // Assert
        assert!(matches!(
            err,
            ConfigError::Parse {
                reason: ParseReason::Io(_),
                ..
            }
        ));
        assert_eq!(err.path(), path);
    }

    #[test]
    fn test_save_into_missing_directory_is_write_error() {
        let path = Path::new("/nonexistent/path/that/cannot/exist/config.ini");
        let err = save(&Config::new(), path).unwrap_err();
        assert!(matches!(err, ConfigError::Write { .. }));
        assert_eq!(err.path(), path);
    }
}
