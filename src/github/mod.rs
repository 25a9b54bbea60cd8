//! Upstream release metadata
//!
//! The [ReleaseSource] trait covers the three lookups a release run needs:
//! whether a version tag is free, which release the notes window starts from,
//! and which pull requests were merged since then.
//!
//! - [client::GitHubClient]: blocking client for the GitHub REST API
//! - [mock::MockReleaseSource]: in-memory implementation for testing
//!
//! Lookup failures (network, unexpected status, unparsable body) are always
//! reported as [crate::error::ReleaseError::UpstreamLookupFailure] and never
//! folded into a "not found" answer.

pub mod client;
pub mod mock;
pub mod response;

pub use client::GitHubClient;
pub use mock::MockReleaseSource;

use chrono::{DateTime, Utc};

use crate::domain::{BaselineRelease, DerivedFrom, PullRequestRecord, ReleaseVersion};
use crate::error::Result;

/// Pull requests merged since a baseline, in search order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergedPullRequests {
    pub records: Vec<PullRequestRecord>,
    /// Total matches reported by the search
    pub total_count: u64,
    /// The search timed out upstream and may be missing matches
    pub incomplete_results: bool,
}

/// Source of upstream release information
pub trait ReleaseSource: Send + Sync {
    /// Check that no release is tagged `v<version>` upstream
    ///
    /// # Returns
    /// * `Ok(true)` - No release uses the tag
    /// * `Ok(false)` - A release already uses the tag
    /// * `Err(UpstreamLookupFailure)` - The lookup itself failed
    fn is_available(&self, version: &ReleaseVersion) -> Result<bool>;

    /// Resolve a derived-from marker to a published release
    ///
    /// # Returns
    /// * `Ok(BaselineRelease)` - Tag and publish timestamp of the release
    /// * `Err(DerivedReleaseNotFound)` - No published release matches the marker
    /// * `Err(UpstreamLookupFailure)` - The lookup itself failed
    fn resolve_baseline(&self, derived_from: &DerivedFrom) -> Result<BaselineRelease>;

    /// Fetch pull requests merged at or after `since`, oldest close first
    fn merged_pull_requests_since(&self, since: DateTime<Utc>) -> Result<MergedPullRequests>;
}
