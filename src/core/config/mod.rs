//! core::config
//!
//! Configuration document location and loading.
//!
//! # Locations
//!
//! Searched in order:
//! 1. `$METADV_CONFIG` if set and the file exists
//! 2. `<project>/models/metadv/metadv.yml` (canonical)
//!
//! A missing document is fatal ([`ConfigError::NotFound`]); resolution is
//! never attempted without one. A malformed document is equally fatal
//! ([`ConfigError::Parse`]).
//!
//! # Example
//!
//! ```no_run
//! use metadv::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Path::new("/path/to/dbt/project")).unwrap();
//! println!("loaded {}", result.path.display());
//! println!("{} targets", result.document.targets().len());
//! ```

pub mod packages;
pub mod schema;

pub use packages::Package;
pub use schema::MetadvDocument;

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the document location.
pub const CONFIG_ENV: &str = "METADV_CONFIG";

/// Document path relative to the project root.
pub const CANONICAL_RELATIVE_PATH: &str = "models/metadv/metadv.yml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("project path does not exist: {}", path.display())]
    ProjectNotFound { path: PathBuf },

    #[error("metadv.yml not found at '{}'", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

impl ConfigError {
    /// Check if this error means the document is absent (as opposed to broken).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConfigError::NotFound { .. } | ConfigError::ProjectNotFound { .. }
        )
    }
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The parsed document.
    pub document: MetadvDocument,
    /// Where the document was loaded from.
    pub path: PathBuf,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Configuration locator and loader.
pub struct Config;

impl Config {
    /// Load the configuration document for a project.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ProjectNotFound`] or [`ConfigError::NotFound`]
    /// if nothing can be loaded, [`ConfigError::Parse`] if the document is
    /// malformed.
    pub fn load(project: &Path) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();
        let path = Self::locate(project, &mut warnings)?;
        let document = Self::read_document(&path)?;

        log::debug!(
            "loaded {} ({} targets, {} sources)",
            path.display(),
            document.targets().len(),
            document.sources().len()
        );

        Ok(ConfigLoadResult {
            document,
            path,
            warnings,
        })
    }

    /// Get the canonical document path for a project.
    pub fn canonical_path(project: &Path) -> PathBuf {
        project.join(CANONICAL_RELATIVE_PATH)
    }

    fn locate(project: &Path, warnings: &mut Vec<ConfigWarning>) -> Result<PathBuf, ConfigError> {
        // 1. Check $METADV_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.is_file() {
                return Ok(path);
            }
            warnings.push(ConfigWarning {
                message: format!("{} points to a missing file, ignoring", CONFIG_ENV),
                path,
            });
        }

        // 2. Check the canonical project location
        if !project.exists() {
            return Err(ConfigError::ProjectNotFound {
                path: project.to_path_buf(),
            });
        }
        let canonical = Self::canonical_path(project);
        if canonical.is_file() {
            Ok(canonical)
        } else {
            Err(ConfigError::NotFound { path: canonical })
        }
    }

    /// Read and parse a configuration document.
    pub fn read_document(path: &Path) -> Result<MetadvDocument, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse_document(path, &contents)
    }

    /// Parse document text. `path` is only used for error reporting.
    pub fn parse_document(path: &Path, contents: &str) -> Result<MetadvDocument, ConfigError> {
        // An empty file parses as YAML null.
        if contents.trim().is_empty() {
            return Ok(MetadvDocument::default());
        }
        serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
