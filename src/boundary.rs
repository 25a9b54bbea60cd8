use std::fmt;

/// Non-fatal conditions met while preparing a release.
/// These are reported to the user and the run continues.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Tracked files are modified; only tolerated in a dry run
    DirtyWorkingTree { changes: Vec<String> },
    /// Nothing was merged since the baseline release
    NoPullRequests { baseline_tag: String },
    /// The search did not return every match
    IncompleteSearch { fetched: usize, total: u64 },
    /// The new version does not sort after the baseline release
    VersionNotNewer { version: String, baseline_tag: String },
    /// The notes file does not exist yet and is treated as empty
    NotesFileMissing { path: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::DirtyWorkingTree { changes } => {
                write!(
                    f,
                    "You have uncommitted changes in this clone ({} file{})",
                    changes.len(),
                    if changes.len() == 1 { "" } else { "s" }
                )
            }
            BoundaryWarning::NoPullRequests { baseline_tag } => {
                write!(f, "No pull requests merged since release '{}'", baseline_tag)
            }
            BoundaryWarning::IncompleteSearch { fetched, total } => {
                write!(
                    f,
                    "Pull request search is incomplete: got {} of {} matches",
                    fetched, total
                )
            }
            BoundaryWarning::VersionNotNewer {
                version,
                baseline_tag,
            } => {
                write!(
                    f,
                    "Version {} is not newer than baseline release '{}'",
                    version, baseline_tag
                )
            }
            BoundaryWarning::NotesFileMissing { path } => {
                write!(f, "Release notes file '{}' not found, starting empty", path)
            }
        }
    }
}
