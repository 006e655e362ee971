use thiserror::Error;

/// Unified error type for release-tag operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Version format error: {0}")]
    Format(String),

    #[error("Tag already exists: {0}")]
    TagExists(String),

    #[error("Nothing to commit: {0}")]
    NothingToCommit(String),

    #[error("Version file error: {0}")]
    VersionFile(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-tag
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a version format error with context
    pub fn format(msg: impl Into<String>) -> Self {
        ReleaseError::Format(msg.into())
    }

    /// Create a version file error with context
    pub fn version_file(msg: impl Into<String>) -> Self {
        ReleaseError::VersionFile(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        ReleaseError::Remote(msg.into())
    }
}
