// src/error.rs

//! Error types for the solder library

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the dependency and installation pipeline
///
/// Resources that may legitimately be absent (registry, `package.json`,
/// component sources during resolution) are not errors; loaders return
/// `Option` for those. The variants here are conditions the operator has to
/// act on.
#[derive(Error, Debug)]
pub enum Error {
    /// A file the caller explicitly asked for does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// `components.json` is missing from the target project
    #[error("Project is not initialized: {} not found (run `solder init`)", .0.display())]
    NotInitialized(PathBuf),

    /// `components.json` already exists and overwriting was not requested
    #[error("Project is already initialized: {}", .0.display())]
    AlreadyInitialized(PathBuf),

    /// A configuration file exists but could not be parsed
    #[error("Failed to parse {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A requested component is not part of the component library
    #[error("Component not found in library: {0}")]
    ComponentNotFound(String),

    /// The package manager exited unsuccessfully or could not be spawned
    #[error("Package installation failed: {0}")]
    PackageManager(String),

    /// The operator cancelled an interactive prompt
    #[error("Operation cancelled")]
    Cancelled,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configured name produced an invalid pattern
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, Error>;
