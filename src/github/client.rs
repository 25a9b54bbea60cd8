use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::GitHubConfig;
use crate::domain::{BaselineRelease, DerivedFrom, ReleaseVersion};
use crate::error::Result;
use crate::github::response::{
    absorb_search_page, interpret_availability, interpret_baseline, interpret_search_page,
    SEARCH_PAGE_SIZE,
};
use crate::github::{MergedPullRequests, ReleaseSource};

/// Search query for pull requests merged into `repository` at or after `since`
pub fn merged_since_query(repository: &str, since: DateTime<Utc>) -> String {
    format!(
        "type:pr is:merged repo:{} merged:>={}",
        repository,
        since.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}

/// Blocking GitHub REST client for one repository
pub struct GitHubClient {
    http: Client,
    api_url: String,
    repository: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Build a client from configuration and an optional API token
    pub fn new(config: &GitHubConfig, token: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("cut-release/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(GitHubClient {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            repository: config.repository.clone(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    fn release_url(&self, path: &str) -> String {
        format!("{}/repos/{}/releases/{}", self.api_url, self.repository, path)
    }

    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<(u16, String)> {
        debug!(url, ?query, "GET");
        let mut request = self
            .http
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        debug!(url, status, "response");
        Ok((status, body))
    }
}

impl ReleaseSource for GitHubClient {
    fn is_available(&self, version: &ReleaseVersion) -> Result<bool> {
        let url = self.release_url(&format!("tags/{}", version.tag_name()));
        let (status, body) = self.get(&url, &[])?;
        interpret_availability(status, &body)
    }

    fn resolve_baseline(&self, derived_from: &DerivedFrom) -> Result<BaselineRelease> {
        let url = self.release_url(&derived_from.release_path());
        let (status, body) = self.get(&url, &[])?;
        interpret_baseline(derived_from, status, &body)
    }

    fn merged_pull_requests_since(&self, since: DateTime<Utc>) -> Result<MergedPullRequests> {
        let url = format!("{}/search/issues", self.api_url);
        let query = merged_since_query(&self.repository, since);
        let mut merged = MergedPullRequests::default();

        let mut page = 1;
        loop {
            let params = [
                ("q", query.clone()),
                ("sort", "closed_at".to_string()),
                ("order", "asc".to_string()),
                ("per_page", SEARCH_PAGE_SIZE.to_string()),
                ("page", page.to_string()),
            ];
            let (status, body) = self.get(&url, &params)?;
            let result = interpret_search_page(status, &body)?;

            if !absorb_search_page(&mut merged, result, page) {
                break;
            }
            page += 1;
        }

        info!(
            fetched = merged.records.len(),
            total = merged.total_count,
            "fetched merged pull requests"
        );
        Ok(merged)
    }
}
