//! GitHub REST payloads and how a release run interprets them.
//!
//! The functions here take a status code and a body so they can be tested
//! without a network.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{BaselineRelease, DerivedFrom, PullRequestRecord};
use crate::error::{ReleaseError, Result};
use crate::github::MergedPullRequests;

/// Items requested per search page
pub const SEARCH_PAGE_SIZE: usize = 100;
/// The search API stops returning results after the first 1000 matches
pub const MAX_SEARCH_PAGES: u32 = 10;

const NOT_FOUND_MESSAGE: &str = "Not Found";

/// `GET /repos/{owner}/{repo}/releases/...` body (or its error object)
#[derive(Debug, Deserialize)]
pub struct ReleaseResponse {
    pub tag_name: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub message: Option<String>,
}

/// `GET /search/issues` body
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<serde_json::Value>,
}

/// One search hit. Every field is optional so that missing data is reported
/// as a malformed record instead of a generic parse failure.
#[derive(Debug, Deserialize)]
pub struct SearchItem {
    pub number: Option<u64>,
    pub title: Option<String>,
    #[serde(default)]
    pub labels: Option<Vec<LabelItem>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub pull_request: Option<PullRequestLink>,
}

#[derive(Debug, Deserialize)]
pub struct LabelItem {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestLink {
    pub merged_at: Option<DateTime<Utc>>,
}

impl TryFrom<SearchItem> for PullRequestRecord {
    type Error = ReleaseError;

    fn try_from(item: SearchItem) -> Result<Self> {
        let number = item
            .number
            .ok_or_else(|| ReleaseError::malformed("search item has no number"))?;
        let title = item
            .title
            .ok_or_else(|| ReleaseError::malformed(format!("#{} has no title", number)))?;

        let labels = item
            .labels
            .unwrap_or_default()
            .into_iter()
            .map(|label| {
                label.name.ok_or_else(|| {
                    ReleaseError::malformed(format!("#{} has a label without a name", number))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let merged_at = item
            .pull_request
            .and_then(|pr| pr.merged_at)
            .or(item.closed_at)
            .ok_or_else(|| {
                ReleaseError::malformed(format!("#{} has no merge timestamp", number))
            })?;

        Ok(PullRequestRecord {
            number,
            title,
            labels,
            merged_at,
        })
    }
}

fn upstream_status(what: &str, status: u16, body: &str) -> ReleaseError {
    let message = serde_json::from_str::<ReleaseResponse>(body)
        .ok()
        .and_then(|r| r.message)
        .unwrap_or_else(|| body.chars().take(200).collect());
    ReleaseError::upstream(format!("{} returned status {}: {}", what, status, message))
}

fn parse_release(what: &str, body: &str) -> Result<ReleaseResponse> {
    serde_json::from_str(body)
        .map_err(|e| ReleaseError::upstream(format!("{} returned an unparsable body: {}", what, e)))
}

/// Interpret the release-by-tag lookup for a candidate version.
///
/// 404 or a `Not Found` message means the tag is free.
pub fn interpret_availability(status: u16, body: &str) -> Result<bool> {
    const WHAT: &str = "release tag lookup";
    match status {
        404 => Ok(true),
        200..=299 => {
            let release = parse_release(WHAT, body)?;
            Ok(release.message.as_deref() == Some(NOT_FOUND_MESSAGE))
        }
        _ => Err(upstream_status(WHAT, status, body)),
    }
}

/// Interpret the baseline release lookup.
pub fn interpret_baseline(
    derived_from: &DerivedFrom,
    status: u16,
    body: &str,
) -> Result<BaselineRelease> {
    const WHAT: &str = "baseline release lookup";
    let not_found = || ReleaseError::DerivedReleaseNotFound(derived_from.to_string());

    match status {
        404 => Err(not_found()),
        200..=299 => {
            let release = parse_release(WHAT, body)?;
            let published_at = release.published_at.ok_or_else(not_found)?;
            let tag_name = release.tag_name.unwrap_or_else(|| derived_from.to_string());
            Ok(BaselineRelease {
                tag_name,
                published_at,
            })
        }
        _ => Err(upstream_status(WHAT, status, body)),
    }
}

/// One page of search results
#[derive(Debug)]
pub struct SearchPage {
    pub records: Vec<PullRequestRecord>,
    /// Items on the page before conversion
    pub item_count: usize,
    pub total_count: u64,
    pub incomplete_results: bool,
}

/// Interpret one page of the merged pull request search.
pub fn interpret_search_page(status: u16, body: &str) -> Result<SearchPage> {
    const WHAT: &str = "pull request search";
    if !(200..=299).contains(&status) {
        return Err(upstream_status(WHAT, status, body));
    }

    let response: SearchResponse = serde_json::from_str(body).map_err(|e| {
        ReleaseError::upstream(format!("{} returned an unparsable body: {}", WHAT, e))
    })?;

    let item_count = response.items.len();
    let records = response
        .items
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let item: SearchItem = serde_json::from_value(value)
                .map_err(|e| ReleaseError::malformed(format!("search item {}: {}", index, e)))?;
            PullRequestRecord::try_from(item)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SearchPage {
        records,
        item_count,
        total_count: response.total_count,
        incomplete_results: response.incomplete_results,
    })
}

/// Fold one search page into the running result.
///
/// Returns `true` when another page should be requested: the page was full,
/// fewer records than `total_count` have been collected, and the page limit
/// has not been reached.
pub fn absorb_search_page(
    merged: &mut MergedPullRequests,
    page: SearchPage,
    page_number: u32,
) -> bool {
    merged.total_count = page.total_count;
    merged.incomplete_results |= page.incomplete_results;
    merged.records.extend(page.records);

    page.item_count >= SEARCH_PAGE_SIZE
        && (merged.records.len() as u64) < merged.total_count
        && page_number < MAX_SEARCH_PAGES
}
