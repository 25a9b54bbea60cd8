use chrono::{DateTime, Utc};
use std::fmt;

/// Which published release the "merged since" window starts from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DerivedFrom {
    /// The most recent published release
    #[default]
    Latest,
    /// A specific release tag, always `v`-prefixed
    Tag(String),
}

impl DerivedFrom {
    /// Parse a derived-from marker
    ///
    /// `latest` selects the newest release; anything else is treated as a
    /// version and gets a `v` prefix when it does not already carry one.
    pub fn parse(marker: &str) -> Self {
        let marker = marker.trim();
        if marker == "latest" {
            return DerivedFrom::Latest;
        }
        if marker.starts_with('v') {
            DerivedFrom::Tag(marker.to_string())
        } else {
            DerivedFrom::Tag(format!("v{}", marker))
        }
    }

    /// Path under `/repos/<owner>/<repo>/releases/` for this marker
    pub fn release_path(&self) -> String {
        match self {
            DerivedFrom::Latest => "latest".to_string(),
            DerivedFrom::Tag(tag) => format!("tags/{}", tag),
        }
    }
}

impl fmt::Display for DerivedFrom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DerivedFrom::Latest => f.write_str("latest"),
            DerivedFrom::Tag(tag) => f.write_str(tag),
        }
    }
}

/// A resolved baseline release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaselineRelease {
    pub tag_name: String,
    pub published_at: DateTime<Utc>,
}

impl BaselineRelease {
    /// Version of the baseline tag, when it follows `v<major>.<minor>.<patch>`
    pub fn version(&self) -> Option<semver::Version> {
        let clean = self
            .tag_name
            .trim_start_matches('v')
            .trim_start_matches('V');
        semver::Version::parse(clean).ok()
    }
}
