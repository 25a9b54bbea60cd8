use chrono::{DateTime, Utc};
use std::fmt;

/// A merged pull request as returned by the upstream search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRecord {
    pub number: u64,
    pub title: String,
    /// Label names in the order they are attached to the pull request
    pub labels: Vec<String>,
    pub merged_at: DateTime<Utc>,
}

impl PullRequestRecord {
    pub fn new(
        number: u64,
        title: impl Into<String>,
        labels: impl IntoIterator<Item = impl Into<String>>,
        merged_at: DateTime<Utc>,
    ) -> Self {
        PullRequestRecord {
            number,
            title: title.into(),
            labels: labels.into_iter().map(Into::into).collect(),
            merged_at,
        }
    }

    /// Label names in attachment order
    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

/// One release-notes line, rendered as ` - <title> (#<number>)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseNoteEntry {
    pub number: u64,
    pub title: String,
}

impl From<&PullRequestRecord> for ReleaseNoteEntry {
    fn from(record: &PullRequestRecord) -> Self {
        ReleaseNoteEntry {
            number: record.number,
            title: record.title.clone(),
        }
    }
}

impl fmt::Display for ReleaseNoteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " - {} (#{})", self.title, self.number)
    }
}
