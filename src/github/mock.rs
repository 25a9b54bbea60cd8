use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::domain::{BaselineRelease, DerivedFrom, PullRequestRecord, ReleaseVersion};
use crate::error::{ReleaseError, Result};
use crate::github::{MergedPullRequests, ReleaseSource};

/// Mock release source for testing without network access
pub struct MockReleaseSource {
    released_tags: HashSet<String>,
    releases: HashMap<String, BaselineRelease>,
    latest: Option<BaselineRelease>,
    pull_requests: Vec<PullRequestRecord>,
    incomplete_results: bool,
    failing: bool,
    calls: Mutex<Vec<String>>,
}

impl MockReleaseSource {
    /// Create a new empty mock source
    pub fn new() -> Self {
        MockReleaseSource {
            released_tags: HashSet::new(),
            releases: HashMap::new(),
            latest: None,
            pull_requests: Vec::new(),
            incomplete_results: false,
            failing: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Publish a release; the most recently added one becomes `latest`
    pub fn add_release(&mut self, tag_name: impl Into<String>, published_at: DateTime<Utc>) {
        let release = BaselineRelease {
            tag_name: tag_name.into(),
            published_at,
        };
        self.released_tags.insert(release.tag_name.clone());
        self.releases.insert(release.tag_name.clone(), release.clone());
        self.latest = Some(release);
    }

    /// Add a merged pull request; search order is insertion order
    pub fn add_pull_request(&mut self, record: PullRequestRecord) {
        self.pull_requests.push(record);
    }

    /// Report the search as incomplete
    pub fn set_incomplete_results(&mut self, incomplete: bool) {
        self.incomplete_results = incomplete;
    }

    /// Make every lookup fail as if the network were down
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Lookups performed so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) -> Result<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        if self.failing {
            return Err(ReleaseError::upstream("connection refused"));
        }
        Ok(())
    }
}

impl Default for MockReleaseSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseSource for MockReleaseSource {
    fn is_available(&self, version: &ReleaseVersion) -> Result<bool> {
        self.record(format!("is_available {}", version))?;
        Ok(!self.released_tags.contains(&version.tag_name()))
    }

    fn resolve_baseline(&self, derived_from: &DerivedFrom) -> Result<BaselineRelease> {
        self.record(format!("resolve_baseline {}", derived_from))?;
        let found = match derived_from {
            DerivedFrom::Latest => self.latest.clone(),
            DerivedFrom::Tag(tag) => self.releases.get(tag).cloned(),
        };
        found.ok_or_else(|| ReleaseError::DerivedReleaseNotFound(derived_from.to_string()))
    }

    fn merged_pull_requests_since(&self, since: DateTime<Utc>) -> Result<MergedPullRequests> {
        self.record(format!("merged_pull_requests_since {}", since.to_rfc3339()))?;
        let records: Vec<PullRequestRecord> = self
            .pull_requests
            .iter()
            .filter(|pr| pr.merged_at >= since)
            .cloned()
            .collect();
        Ok(MergedPullRequests {
            total_count: records.len() as u64,
            records,
            incomplete_results: self.incomplete_results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ts: &str) -> DateTime<Utc> {
        ts.parse().unwrap()
    }

    #[test]
    fn test_mock_availability() {
        let mut source = MockReleaseSource::new();
        source.add_release("v2.149.0", at("2024-04-02T00:00:00Z"));

        let taken = ReleaseVersion::validate("2.149.0").unwrap();
        let free = ReleaseVersion::validate("2.150.0").unwrap();
        assert!(!source.is_available(&taken).unwrap());
        assert!(source.is_available(&free).unwrap());
    }

    #[test]
    fn test_mock_latest_is_last_added() {
        let mut source = MockReleaseSource::new();
        source.add_release("v2.148.0", at("2024-03-01T00:00:00Z"));
        source.add_release("v2.149.0", at("2024-04-02T00:00:00Z"));

        let latest = source.resolve_baseline(&DerivedFrom::Latest).unwrap();
        assert_eq!(latest.tag_name, "v2.149.0");
        let older = source.resolve_baseline(&DerivedFrom::parse("2.148.0")).unwrap();
        assert_eq!(older.tag_name, "v2.148.0");
    }

    #[test]
    fn test_mock_unknown_baseline() {
        let source = MockReleaseSource::new();
        assert!(matches!(
            source.resolve_baseline(&DerivedFrom::Latest),
            Err(ReleaseError::DerivedReleaseNotFound(_))
        ));
    }

    #[test]
    fn test_mock_filters_by_merge_time() {
        let mut source = MockReleaseSource::new();
        let old = PullRequestRecord::new(1, "old", ["bug"], at("2024-04-01T00:00:00Z"));
        let new = PullRequestRecord::new(2, "new", ["bug"], at("2024-04-03T00:00:00Z"));
        source.add_pull_request(old);
        source.add_pull_request(new);

        let merged = source
            .merged_pull_requests_since(at("2024-04-02T00:00:00Z"))
            .unwrap();
        assert_eq!(merged.records.len(), 1);
        assert_eq!(merged.records[0].number, 2);
    }

    #[test]
    fn test_mock_failing() {
        let mut source = MockReleaseSource::new();
        source.set_failing(true);
        let version = ReleaseVersion::validate("1.0.0").unwrap();
        assert!(matches!(
            source.is_available(&version),
            Err(ReleaseError::UpstreamLookupFailure(_))
        ));
        assert_eq!(source.calls(), vec!["is_available 1.0.0"]);
    }
}
