use thiserror::Error;

/// Unified error type for cut-release operations
///
/// Every variant is fatal to a run. The orchestrator surfaces them before any
/// file or git side effect whenever the failure belongs to validation or
/// upstream lookup.
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Invalid version '{0}'. Version must be in the form of <major>.<minor>.<patch> where each level is 0-999")]
    InvalidVersionFormat(String),

    #[error("Version '{0}' is reserved: *.999.999 marks a closed release line")]
    ReservedVersion(String),

    #[error("Version {0} is already in use")]
    VersionAlreadyReleased(String),

    #[error("Cannot find release {0}")]
    DerivedReleaseNotFound(String),

    #[error("Malformed pull request record: {0}")]
    MalformedPullRequestRecord(String),

    #[error("Upstream lookup failed: {0}")]
    UpstreamLookupFailure(String),

    #[error("You have uncommitted changes in this clone: {}", .0.join(", "))]
    DirtyWorkingTree(Vec<String>),

    #[error("Editor failed: {0}")]
    Editor(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in cut-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a malformed pull request error with context
    pub fn malformed(msg: impl Into<String>) -> Self {
        ReleaseError::MalformedPullRequestRecord(msg.into())
    }

    /// Create an upstream lookup error with context
    pub fn upstream(msg: impl Into<String>) -> Self {
        ReleaseError::UpstreamLookupFailure(msg.into())
    }

    /// Create an editor error with context
    pub fn editor(msg: impl Into<String>) -> Self {
        ReleaseError::Editor(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }
}

impl From<reqwest::Error> for ReleaseError {
    fn from(err: reqwest::Error) -> Self {
        ReleaseError::UpstreamLookupFailure(err.to_string())
    }
}
