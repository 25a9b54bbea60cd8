use crate::error::{ReleaseError, Result};
use git2::{Repository as Git2Repo, Signature, Status, StatusOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Workspace {
    repo: Git2Repo,
    workdir: PathBuf,
}

impl Git2Workspace {
    /// Open or discover a git repository with a working tree
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        Self::from_git2(repo)
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Result<Self> {
        let workdir = repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| git2::Error::from_str("repository has no working tree"))?;

        Ok(Git2Workspace { repo, workdir })
    }
}

/// Porcelain-style code for a status entry
fn status_code(status: Status) -> &'static str {
    if status.intersects(Status::INDEX_NEW) {
        "A"
    } else if status.intersects(Status::INDEX_DELETED | Status::WT_DELETED) {
        "D"
    } else if status.intersects(Status::INDEX_RENAMED | Status::WT_RENAMED) {
        "R"
    } else if status.intersects(Status::INDEX_TYPECHANGE | Status::WT_TYPECHANGE) {
        "T"
    } else if status.intersects(Status::CONFLICTED) {
        "U"
    } else {
        "M"
    }
}

fn credentials(
    config: &git2::Config,
    url: &str,
    username_from_url: Option<&str>,
    allowed_types: git2::CredentialType,
) -> std::result::Result<git2::Cred, git2::Error> {
    let username = username_from_url.unwrap_or("git");

    if allowed_types.contains(git2::CredentialType::SSH_KEY) {
        if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
            return Ok(cred);
        }

        if let Some(home) = dirs::home_dir() {
            for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                let path = home.join(".ssh").join(key);
                if path.exists() {
                    if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                        return Ok(cred);
                    }
                }
            }
        }
    }

    if allowed_types.contains(git2::CredentialType::USER_PASS_PLAINTEXT) {
        if let Ok(cred) = git2::Cred::credential_helper(config, url, username_from_url) {
            return Ok(cred);
        }
    }

    git2::Cred::default()
}

impl super::Workspace for Git2Workspace {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn uncommitted_changes(&self) -> Result<Vec<String>> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(false)
            .include_ignored(false)
            .renames_head_to_index(true);

        let statuses = self.repo.statuses(Some(&mut options))?;

        Ok(statuses
            .iter()
            .filter(|entry| entry.status() != Status::CURRENT)
            .map(|entry| {
                format!(
                    "{} {}",
                    status_code(entry.status()),
                    entry.path().unwrap_or("(non-utf8 path)")
                )
            })
            .collect())
    }

    fn stage(&self, paths: &[&str]) -> Result<()> {
        let mut index = self.repo.index()?;
        for path in paths {
            debug!(path, "git add");
            index.add_path(Path::new(path))?;
        }
        index.write()?;
        Ok(())
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        self.repo.branch(name, &head, false).map_err(|e| {
            ReleaseError::Git(git2::Error::from_str(&format!(
                "Cannot create branch '{}': {}",
                name,
                e.message()
            )))
        })?;
        self.repo.set_head(&format!("refs/heads/{}", name))?;
        debug!(branch = name, "switched to new branch");
        Ok(())
    }

    fn commit(&self, message: &str, user_name: &str, user_email: &str) -> Result<String> {
        let mut index = self.repo.index()?;
        let tree_oid = index.write_tree()?;
        let tree = self.repo.find_tree(tree_oid)?;
        let parent = self.repo.head()?.peel_to_commit()?;
        let signature = Signature::now(user_name, user_email)?;

        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &[&parent])?;
        debug!(%oid, "committed");
        Ok(oid.to_string())
    }

    fn push_branch(&self, remote_name: &str, branch: &str) -> Result<()> {
        let mut remote = self.repo.find_remote(remote_name).map_err(|e| {
            ReleaseError::Git(git2::Error::from_str(&format!(
                "No remote named '{}' found: {}",
                remote_name,
                e.message()
            )))
        })?;

        let git_config = self.repo.config()?;
        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|url, username_from_url, allowed_types| {
            credentials(&git_config, url, username_from_url, allowed_types)
        });

        // A rejected ref is reported here rather than as a push error
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "Push rejected for {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/heads/{}:refs/heads/{}", branch, branch);
        remote.push(&[refspec.as_str()], Some(&mut push_options))?;

        let mut config = self.repo.config()?;
        config.set_str(&format!("branch.{}.remote", branch), remote_name)?;
        config.set_str(
            &format!("branch.{}.merge", branch),
            &format!("refs/heads/{}", branch),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Workspace;
    use std::fs;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, Git2Workspace) {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        fs::write(dir.path().join("README.md"), "hello\n").unwrap();

        {
            let mut index = repo.index().unwrap();
            index.add_path(Path::new("README.md")).unwrap();
            index.write().unwrap();
            let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
            let sig = Signature::now("Test", "test@example.com").unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
                .unwrap();
        }

        let workspace = Git2Workspace::from_git2(repo).unwrap();
        (dir, workspace)
    }

    #[test]
    fn test_clean_repository() {
        let (_dir, workspace) = init_repo();
        assert!(workspace.uncommitted_changes().unwrap().is_empty());
    }

    #[test]
    fn test_untracked_files_are_ignored() {
        let (dir, workspace) = init_repo();
        fs::write(dir.path().join("scratch.txt"), "x").unwrap();
        assert!(workspace.uncommitted_changes().unwrap().is_empty());
    }

    #[test]
    fn test_modified_tracked_file_is_reported() {
        let (dir, workspace) = init_repo();
        fs::write(dir.path().join("README.md"), "changed\n").unwrap();
        assert_eq!(
            workspace.uncommitted_changes().unwrap(),
            vec!["M README.md".to_string()]
        );
    }

    #[test]
    fn test_branch_and_commit() {
        let (dir, workspace) = init_repo();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/agentversion"), "2.150.0\n").unwrap();

        workspace.stage(&["src/agentversion"]).unwrap();
        workspace.create_branch("releases/2.150.0").unwrap();
        let hash = workspace
            .commit("Agent Release 2.150.0", "bot", "bot@example.com")
            .unwrap();

        let repo = Git2Repo::open(dir.path()).unwrap();
        let head = repo.head().unwrap();
        assert_eq!(head.shorthand(), Some("releases/2.150.0"));
        let commit = head.peel_to_commit().unwrap();
        assert_eq!(commit.id().to_string(), hash);
        assert_eq!(commit.message(), Some("Agent Release 2.150.0"));
        assert_eq!(commit.author().name(), Some("bot"));
        assert!(workspace.uncommitted_changes().unwrap().is_empty());
    }

    #[test]
    fn test_create_existing_branch_fails() {
        let (_dir, workspace) = init_repo();
        workspace.create_branch("releases/1.0.0").unwrap();
        assert!(workspace.create_branch("releases/1.0.0").is_err());
    }

    #[test]
    fn test_push_to_missing_remote_fails() {
        let (_dir, workspace) = init_repo();
        let err = workspace.push_branch("origin", "main").unwrap_err();
        assert!(err.to_string().contains("No remote named 'origin'"));
    }
}
