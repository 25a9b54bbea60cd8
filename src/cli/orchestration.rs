//! Release workflow orchestration
//!
//! Sequences one release run. Everything that can fail for domain reasons
//! (version validation, upstream lookups, malformed pull requests, a dirty
//! tree) happens before the first write, so a failed run leaves the working
//! tree and the remote untouched.

use tracing::{debug, info};

use crate::boundary::BoundaryWarning;
use crate::classifier::{classify, ClassifiedPullRequests};
use crate::config::Config;
use crate::domain::{BaselineRelease, DerivedFrom, ReleaseVersion};
use crate::editor::NotesEditor;
use crate::error::{ReleaseError, Result};
use crate::files::{read_notes, write_atomic, write_version_file};
use crate::git::Workspace;
use crate::github::ReleaseSource;
use crate::notes::compose;

/// Arguments for the release workflow
///
/// Mirrors the CLI arguments without depending on clap, so the workflow can
/// be called programmatically.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseArgs {
    /// Proposed version, unvalidated
    pub version: String,

    /// Release the notes window starts from
    pub derived_from: DerivedFrom,

    /// Preview mode - no file, editor or git side effects
    pub dry_run: bool,
}

/// Result of a successful release run
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOutcome {
    pub version: ReleaseVersion,

    /// Release branch name
    pub branch: String,

    pub baseline: BaselineRelease,

    pub classified: ClassifiedPullRequests,

    /// Composed release notes, before any manual edit
    pub notes: String,

    pub warnings: Vec<BoundaryWarning>,

    /// Hash of the release commit; `None` in a dry run
    pub commit: Option<String>,

    /// Whether the branch was pushed to the remote
    pub pushed: bool,

    pub dry_run: bool,
}

/// Collects boundary warnings and hands each one to the caller as it is raised
struct Warnings<'a> {
    recorded: Vec<BoundaryWarning>,
    on_warning: &'a mut dyn FnMut(&BoundaryWarning),
}

impl Warnings<'_> {
    fn record(&mut self, warning: BoundaryWarning) {
        debug!(%warning, "boundary warning");
        (self.on_warning)(&warning);
        self.recorded.push(warning);
    }
}

/// Main release workflow
///
/// Orchestrates the whole run:
/// 1. Validate the version and check that its tag is free upstream
/// 2. Check the working tree is clean
/// 3. Resolve the baseline release and fetch pull requests merged since
/// 4. Classify them and compose the new release notes
/// 5. Unless dry run: write the version and notes files, open the editor,
///    commit on a new release branch and push it
///
/// # Arguments
///
/// * `args` - Version, baseline marker and dry-run flag
/// * `config` - File layout, remote and commit identity
/// * `source` - Upstream release metadata
/// * `workspace` - Local repository
/// * `editor` - Notes editor
pub fn run_release<S, W, E>(
    args: &ReleaseArgs,
    config: &Config,
    source: &S,
    workspace: &W,
    editor: &E,
) -> Result<ReleaseOutcome>
where
    S: ReleaseSource + ?Sized,
    W: Workspace + ?Sized,
    E: NotesEditor + ?Sized,
{
    run_release_reporting(args, config, source, workspace, editor, |_| {})
}

/// Same as [run_release], but calls `on_warning` for each boundary warning
/// as soon as it is raised.
///
/// Every warning is reported before the first file is written, so the user
/// sees it before the editor opens, and also when a later step fails.
pub fn run_release_reporting<S, W, E, F>(
    args: &ReleaseArgs,
    config: &Config,
    source: &S,
    workspace: &W,
    editor: &E,
    mut on_warning: F,
) -> Result<ReleaseOutcome>
where
    S: ReleaseSource + ?Sized,
    W: Workspace + ?Sized,
    E: NotesEditor + ?Sized,
    F: FnMut(&BoundaryWarning),
{
    let version = ReleaseVersion::validate(&args.version)?;

    if !source.is_available(&version)? {
        return Err(ReleaseError::VersionAlreadyReleased(version.to_string()));
    }
    info!(%version, "version is available for use");

    let mut warnings = Warnings {
        recorded: Vec::new(),
        on_warning: &mut on_warning,
    };

    let changes = workspace.uncommitted_changes()?;
    if !changes.is_empty() {
        if !args.dry_run {
            return Err(ReleaseError::DirtyWorkingTree(changes));
        }
        warnings.record(BoundaryWarning::DirtyWorkingTree { changes });
    }

    let baseline = source.resolve_baseline(&args.derived_from)?;
    info!(
        derived_from = %args.derived_from,
        tag = %baseline.tag_name,
        published_at = %baseline.published_at,
        "resolved baseline release"
    );
    if let Some(baseline_version) = baseline.version() {
        if baseline_version >= version.as_semver() {
            warnings.record(BoundaryWarning::VersionNotNewer {
                version: version.to_string(),
                baseline_tag: baseline.tag_name.clone(),
            });
        }
    }

    let merged = source.merged_pull_requests_since(baseline.published_at)?;
    if merged.incomplete_results || (merged.records.len() as u64) < merged.total_count {
        warnings.record(BoundaryWarning::IncompleteSearch {
            fetched: merged.records.len(),
            total: merged.total_count,
        });
    }
    if merged.records.is_empty() {
        warnings.record(BoundaryWarning::NoPullRequests {
            baseline_tag: baseline.tag_name.clone(),
        });
    }

    let classified = classify(&merged.records);
    info!(
        entries = classified.len(),
        excluded = classified.excluded().len(),
        "classified pull requests"
    );

    let notes_path = workspace.workdir().join(&config.release.notes_file);
    let prior_notes = match read_notes(&notes_path)? {
        Some(text) => text,
        None => {
            warnings.record(BoundaryWarning::NotesFileMissing {
                path: config.release.notes_file.clone(),
            });
            String::new()
        }
    };
    let notes = compose(&classified, &prior_notes);

    let mut outcome = ReleaseOutcome {
        branch: config.release.branch_name(version.as_str()),
        version,
        baseline,
        classified,
        notes,
        warnings: warnings.recorded,
        commit: None,
        pushed: false,
        dry_run: args.dry_run,
    };

    if args.dry_run {
        info!("dry run, skipping writes, editor and git");
        return Ok(outcome);
    }

    let version_path = workspace.workdir().join(&config.release.version_file);
    write_version_file(&version_path, &outcome.version)?;
    write_atomic(&notes_path, &outcome.notes)?;
    info!(
        version_file = %config.release.version_file,
        notes_file = %config.release.notes_file,
        "wrote release files"
    );

    editor.edit(&notes_path)?;

    workspace.stage(&[
        config.release.version_file.as_str(),
        config.release.notes_file.as_str(),
    ])?;
    workspace.create_branch(&outcome.branch)?;
    let commit = workspace.commit(
        &format!("Agent Release {}", outcome.version),
        &config.git.user_name,
        &config.git.user_email,
    )?;
    info!(branch = %outcome.branch, %commit, "committed release");
    outcome.commit = Some(commit);

    workspace.push_branch(&config.release.remote, &outcome.branch)?;
    info!(branch = %outcome.branch, remote = %config.release.remote, "pushed release branch");
    outcome.pushed = true;

    Ok(outcome)
}
