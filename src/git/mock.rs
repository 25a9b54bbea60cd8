use crate::error::{ReleaseError, Result};
use crate::git::Workspace;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A git operation recorded by [MockWorkspace]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitOperation {
    Stage(Vec<String>),
    CreateBranch(String),
    Commit {
        message: String,
        user_name: String,
        user_email: String,
    },
    Push {
        remote: String,
        branch: String,
    },
}

/// Mock workspace for testing without actual git operations
///
/// Files are still read and written under `workdir`, usually a temp dir;
/// only the git side is simulated.
pub struct MockWorkspace {
    workdir: PathBuf,
    changes: Vec<String>,
    fail_push: bool,
    operations: Mutex<Vec<GitOperation>>,
}

impl MockWorkspace {
    /// Create a clean mock workspace rooted at `workdir`
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        MockWorkspace {
            workdir: workdir.into(),
            changes: Vec::new(),
            fail_push: false,
            operations: Mutex::new(Vec::new()),
        }
    }

    /// Report an uncommitted change
    pub fn add_uncommitted_change(&mut self, change: impl Into<String>) {
        self.changes.push(change.into());
    }

    /// Make pushes fail
    pub fn set_fail_push(&mut self, fail: bool) {
        self.fail_push = fail;
    }

    /// Operations performed so far, in order
    pub fn operations(&self) -> Vec<GitOperation> {
        self.operations
            .lock()
            .map(|ops| ops.clone())
            .unwrap_or_default()
    }

    fn record(&self, op: GitOperation) {
        if let Ok(mut ops) = self.operations.lock() {
            ops.push(op);
        }
    }
}

impl Workspace for MockWorkspace {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn uncommitted_changes(&self) -> Result<Vec<String>> {
        Ok(self.changes.clone())
    }

    fn stage(&self, paths: &[&str]) -> Result<()> {
        self.record(GitOperation::Stage(
            paths.iter().map(|p| p.to_string()).collect(),
        ));
        Ok(())
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        self.record(GitOperation::CreateBranch(name.to_string()));
        Ok(())
    }

    fn commit(&self, message: &str, user_name: &str, user_email: &str) -> Result<String> {
        self.record(GitOperation::Commit {
            message: message.to_string(),
            user_name: user_name.to_string(),
            user_email: user_email.to_string(),
        });
        Ok("0000000000000000000000000000000000000000".to_string())
    }

    fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        if self.fail_push {
            return Err(ReleaseError::Git(git2::Error::from_str(&format!(
                "Push rejected for refs/heads/{}",
                branch
            ))));
        }
        self.record(GitOperation::Push {
            remote: remote.to_string(),
            branch: branch.to_string(),
        });
        Ok(())
    }
}
