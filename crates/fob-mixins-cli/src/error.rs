//! Error handling for the fob-mixins CLI.
//!
//! Library errors (`ConfigError`, `TransformError`) already carry miette
//! codes and help text, so they are wrapped transparently. CLI-level
//! failures add their own.

use fob_mixins::{ConfigError, TransformError};
use miette::{Diagnostic, Report};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    /// Rule loading or resolution failed
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    /// A single component could not be transformed
    #[error(transparent)]
    #[diagnostic(transparent)]
    Transform(#[from] TransformError),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    #[diagnostic(code(fob::mixins::cli::not_found))]
    FileNotFound(PathBuf),

    /// Paths become module ids, which must be UTF-8
    #[error("Path is not valid UTF-8: {}", .0.display())]
    #[diagnostic(code(fob::mixins::cli::non_utf8_path))]
    NonUtf8Path(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error on {}: {source}", .path.display())]
    #[diagnostic(code(fob::mixins::cli::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed
    #[error("Failed to walk project: {0}")]
    #[diagnostic(code(fob::mixins::cli::walk))]
    Walk(#[from] walkdir::Error),

    /// At least one component failed during `build`
    #[error("{failed} of {total} component(s) failed to transform")]
    #[diagnostic(
        code(fob::mixins::cli::build_failed),
        help("Fix the reported components; nothing was written for them")
    )]
    BuildFailed { failed: usize, total: usize },
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Attaches the offending path to I/O errors.
pub trait ResultExt<T> {
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T> ResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                CliError::FileNotFound(path.to_path_buf())
            } else {
                CliError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })
    }
}

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    Report::new(err)
}
