// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::{Path, PathBuf};

use crate::ast::{Document, Value};
use crate::serializer::{self, Dialect};
use crate::ConfigError;

mod access;
mod conversion;
mod helpers;

/// A parsed SimpleConfig document plus the text it came from, with typed
/// dot-path access on top.
pub struct Config {
    document: Document,
    raw_content: String, // kept for line lookups in error messages
    source: Option<PathBuf>,
}

impl Config {
    /// Load and parse a config file. A leading `~/` is expanded to the home directory.
    ///
    /// # Example
    /// ```no_run
    /// # use simple_cfg::Config;
    /// let config = Config::from_file("~/.config/app/app.conf")?;
    /// # Ok::<(), simple_cfg::ConfigError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = expand_home(path.as_ref())?;
        log::debug!("loading config from {}", path.display());

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::FileError {
            message: format!("Failed to read file: {}", e),
            path: path.to_string_lossy().to_string(),
            hint: Some("Check that the file exists and is readable".into()),
            code: Some(301),
        })?;

        let mut config = Self::from_str(&content)?;
        config.source = Some(path);
        Ok(config)
    }

    /// Load from `primary`, or from `fallback` when `primary` cannot be read.
    ///
    /// Syntax errors in `primary` are returned as-is; only file errors fall through.
    pub fn from_file_with_fallback<P: AsRef<Path>>(primary: P, fallback: P) -> Result<Self, ConfigError> {
        match Self::from_file(&primary) {
            Ok(config) => Ok(config),
            Err(ConfigError::FileError { .. }) => {
                log::debug!(
                    "primary config {} unavailable, trying {}",
                    primary.as_ref().display(),
                    fallback.as_ref().display()
                );
                Self::from_file(&fallback).map_err(|e| match e {
                    ConfigError::FileError { message, .. } => ConfigError::FileError {
                        message: format!(
                            "Failed to load config from primary path '{}' or fallback path '{}': {}",
                            primary.as_ref().display(),
                            fallback.as_ref().display(),
                            message
                        ),
                        path: format!(
                            "{} (fallback: {})",
                            primary.as_ref().display(),
                            fallback.as_ref().display()
                        ),
                        hint: Some("Check that at least one of the config files exists".into()),
                        code: Some(302),
                    },
                    other => other,
                })
            }
            Err(other) => Err(other),
        }
    }

    /// Parse a config from a string (no file I/O).
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let document = crate::parse(content)?;
        Ok(Self {
            document,
            raw_content: content.to_string(),
            source: None,
        })
    }

    /// Wrap a document built in code. Error messages will carry no line numbers.
    pub fn from_document(document: Document) -> Self {
        Self {
            document,
            raw_content: String::new(),
            source: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// Path the config was loaded from, after `~/` expansion.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Write the canonical rendering of this config to `path`.
    pub fn to_file<P: AsRef<Path>>(&self, path: P, dialect: Dialect) -> Result<(), ConfigError> {
        let path = expand_home(path.as_ref())?;
        let text = serializer::to_string_with(&self.document, dialect)?;
        log::debug!("writing config to {}", path.display());

        fs::write(&path, text).map_err(|e| ConfigError::FileError {
            message: format!("Failed to write file: {}", e),
            path: path.to_string_lossy().to_string(),
            hint: Some("Check that the directory exists and is writable".into()),
            code: Some(303),
        })
    }
}

/// Expand a leading `~/` to the user's home directory.
fn expand_home(path: &Path) -> Result<PathBuf, ConfigError> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };

    let home = dirs::home_dir().ok_or_else(|| ConfigError::FileError {
        message: "Could not determine home directory for ~ expansion".into(),
        path: path.to_string_lossy().to_string(),
        hint: Some("Set HOME or use an absolute path".into()),
        code: Some(300),
    })?;
    Ok(home.join(rest))
}

#[cfg(test)]
mod tests;
