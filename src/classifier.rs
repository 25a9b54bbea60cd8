//! Pull request classification into release-notes categories.
//!
//! Each pull request is classified by folding over its labels in the order
//! they are attached. The fold starts at [`Category::Misc`]; `bug` moves it to
//! [`Category::Bugs`], `enhancement` to [`Category::Features`], and `internal`
//! stops the fold with the pull request excluded. Later labels overwrite
//! earlier ones, so a pull request labelled `bug` then `enhancement` lands in
//! Features.

use std::ops::ControlFlow;

use crate::domain::{Category, Classification, PullRequestRecord, ReleaseNoteEntry};

pub const BUG_LABEL: &str = "bug";
pub const ENHANCEMENT_LABEL: &str = "enhancement";
pub const INTERNAL_LABEL: &str = "internal";

/// Apply one label to the running category.
///
/// Returns `Break` once the pull request is excluded.
pub fn apply_label(current: Category, label: &str) -> ControlFlow<(), Category> {
    match label {
        BUG_LABEL => ControlFlow::Continue(Category::Bugs),
        ENHANCEMENT_LABEL => ControlFlow::Continue(Category::Features),
        INTERNAL_LABEL => ControlFlow::Break(()),
        _ => ControlFlow::Continue(current),
    }
}

/// Classify a label sequence
pub fn classify_labels<'a, I>(labels: I) -> Classification
where
    I: IntoIterator<Item = &'a str>,
{
    match labels.into_iter().try_fold(Category::Misc, apply_label) {
        ControlFlow::Continue(category) => Classification::Included(category),
        ControlFlow::Break(()) => Classification::Excluded,
    }
}

/// Classify a single pull request
pub fn classify_record(record: &PullRequestRecord) -> Classification {
    classify_labels(record.label_names())
}

/// Release-notes entries grouped by category
///
/// Entries keep the order in which their pull requests were classified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedPullRequests {
    features: Vec<ReleaseNoteEntry>,
    bugs: Vec<ReleaseNoteEntry>,
    misc: Vec<ReleaseNoteEntry>,
    excluded: Vec<u64>,
}

impl ClassifiedPullRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the end of a category
    pub fn push(&mut self, category: Category, entry: ReleaseNoteEntry) {
        self.entries_mut(category).push(entry);
    }

    /// Entries of a category in arrival order
    pub fn entries(&self, category: Category) -> &[ReleaseNoteEntry] {
        match category {
            Category::Features => &self.features,
            Category::Bugs => &self.bugs,
            Category::Misc => &self.misc,
        }
    }

    fn entries_mut(&mut self, category: Category) -> &mut Vec<ReleaseNoteEntry> {
        match category {
            Category::Features => &mut self.features,
            Category::Bugs => &mut self.bugs,
            Category::Misc => &mut self.misc,
        }
    }

    /// Categories with their entries, in document order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[ReleaseNoteEntry])> {
        Category::ALL
            .into_iter()
            .map(move |category| (category, self.entries(category)))
    }

    /// Numbers of pull requests left out because they are internal
    pub fn excluded(&self) -> &[u64] {
        &self.excluded
    }

    /// Number of entries across all categories
    pub fn len(&self) -> usize {
        self.features.len() + self.bugs.len() + self.misc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classify pull requests into release-notes entries
///
/// Excluded pull requests contribute no entry. Relative order of `records`
/// is preserved within each category.
pub fn classify(records: &[PullRequestRecord]) -> ClassifiedPullRequests {
    records
        .iter()
        .fold(ClassifiedPullRequests::new(), |mut classified, record| {
            match classify_record(record) {
                Classification::Included(category) => {
                    classified.push(category, ReleaseNoteEntry::from(record))
                }
                Classification::Excluded => classified.excluded.push(record.number),
            }
            classified
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn merged() -> DateTime<Utc> {
        "2024-05-01T12:00:00Z".parse().unwrap()
    }

    fn pr(number: u64, title: &str, labels: &[&str]) -> PullRequestRecord {
        PullRequestRecord::new(number, title, labels.iter().copied(), merged())
    }

    #[test]
    fn test_no_labels_is_misc() {
        assert_eq!(
            classify_labels(Vec::<&str>::new()),
            Classification::Included(Category::Misc)
        );
    }

    #[test]
    fn test_unknown_labels_leave_misc() {
        assert_eq!(
            classify_labels(["docs", "Bug", "ENHANCEMENT", "area/agent"]),
            Classification::Included(Category::Misc)
        );
    }

    #[test]
    fn test_single_labels() {
        assert_eq!(
            classify_labels(["bug"]),
            Classification::Included(Category::Bugs)
        );
        assert_eq!(
            classify_labels(["enhancement"]),
            Classification::Included(Category::Features)
        );
        assert_eq!(classify_labels(["internal"]), Classification::Excluded);
    }

    #[test]
    fn test_last_matching_label_wins() {
        assert_eq!(
            classify_labels(["bug", "enhancement"]),
            Classification::Included(Category::Features)
        );
        assert_eq!(
            classify_labels(["enhancement", "bug"]),
            Classification::Included(Category::Bugs)
        );
        assert_eq!(
            classify_labels(["enhancement", "bug", "docs"]),
            Classification::Included(Category::Bugs)
        );
    }

    #[test]
    fn test_internal_excludes_regardless_of_position() {
        assert_eq!(classify_labels(["internal", "bug"]), Classification::Excluded);
        assert_eq!(classify_labels(["bug", "internal"]), Classification::Excluded);
        assert_eq!(
            classify_labels(["enhancement", "internal", "enhancement"]),
            Classification::Excluded
        );
    }

    #[test]
    fn test_internal_short_circuits_the_scan() {
        let mut seen = Vec::new();
        let labels = ["bug", "internal", "enhancement", "bug"];
        let result = labels.into_iter().try_fold(Category::Misc, |current, label| {
            seen.push(label);
            apply_label(current, label)
        });
        assert_eq!(result, ControlFlow::Break(()));
        assert_eq!(seen, vec!["bug", "internal"]);
    }

    #[test]
    fn test_classify_preserves_order_per_category() {
        let records = vec![
            pr(1, "one", &["bug"]),
            pr(2, "two", &["enhancement"]),
            pr(3, "three", &[]),
            pr(4, "four", &["bug"]),
            pr(5, "five", &["enhancement"]),
            pr(6, "six", &["docs"]),
        ];

        let classified = classify(&records);
        let numbers = |category| -> Vec<u64> {
            classified
                .entries(category)
                .iter()
                .map(|e| e.number)
                .collect()
        };

        assert_eq!(numbers(Category::Features), vec![2, 5]);
        assert_eq!(numbers(Category::Bugs), vec![1, 4]);
        assert_eq!(numbers(Category::Misc), vec![3, 6]);
        assert_eq!(classified.len(), 6);
        assert!(classified.excluded().is_empty());
    }

    #[test]
    fn test_classify_records_excluded_numbers() {
        let records = vec![
            pr(10, "internal cleanup", &["internal"]),
            pr(11, "ship it", &["enhancement"]),
            pr(12, "bump deps", &["bug", "internal"]),
        ];

        let classified = classify(&records);
        assert_eq!(classified.excluded(), &[10, 12]);
        assert_eq!(classified.len(), 1);
        assert_eq!(classified.entries(Category::Features)[0].title, "ship it");
    }

    #[test]
    fn test_classify_empty_input() {
        let classified = classify(&[]);
        assert!(classified.is_empty());
        let categories: Vec<Category> = classified.iter().map(|(c, _)| c).collect();
        assert_eq!(categories, Category::ALL.to_vec());
    }
}
