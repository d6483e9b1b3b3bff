//! Error types for ckv-cli

use std::path::PathBuf;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error raised on a ckv file, reported with its path and line
    #[error("{}", ckv::report::render(.path, .source))]
    Ckv {
        path: PathBuf,
        #[source]
        source: ckv::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn ckv(path: impl Into<PathBuf>, source: ckv::Error) -> Self {
        Self::Ckv {
            path: path.into(),
            source,
        }
    }
}
