//! Local repository operations
//!
//! This module provides a trait-based abstraction over the git operations a
//! release run performs, so the orchestrator can be exercised against a mock.
//!
//! - [repository::Git2Workspace]: A real implementation using the `git2` crate
//! - [mock::MockWorkspace]: A mock implementation for testing
//!
//! ```rust,no_run
//! # use cut_release::git::{Git2Workspace, Workspace};
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let workspace = Git2Workspace::open(".")?;
//! if workspace.uncommitted_changes()?.is_empty() {
//!     println!("Git repo is clean.");
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::{GitOperation, MockWorkspace};
pub use repository::Git2Workspace;

use crate::error::Result;
use std::path::Path;

/// Common git operation trait for abstraction
///
/// Implementations map underlying errors (like `git2::Error`) to
/// [crate::error::ReleaseError] variants.
pub trait Workspace {
    /// Root of the working tree; release files are resolved against it
    fn workdir(&self) -> &Path;

    /// Uncommitted changes to tracked files
    ///
    /// Untracked files are ignored. Each entry is a short status code and a
    /// path, e.g. `"M src/agentversion"`.
    ///
    /// # Returns
    /// * `Ok(vec![])` - The working tree is clean
    /// * `Ok(changes)` - Modified, staged, deleted or renamed tracked paths
    fn uncommitted_changes(&self) -> Result<Vec<String>>;

    /// Add paths (relative to [Workspace::workdir]) to the index
    fn stage(&self, paths: &[&str]) -> Result<()>;

    /// Create a branch at HEAD and make it the current branch
    ///
    /// The index and working tree are left as they are, like
    /// `git checkout -b <name>`.
    fn create_branch(&self, name: &str) -> Result<()>;

    /// Commit the index on the current branch
    ///
    /// # Returns
    /// * `Ok(String)` - The new commit hash
    fn commit(&self, message: &str, user_name: &str, user_email: &str) -> Result<String>;

    /// Push a local branch and record it as the branch's upstream
    fn push_branch(&self, remote: &str, branch: &str) -> Result<()>;
}
