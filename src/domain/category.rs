use std::fmt;

/// Release-notes section a pull request lands in
///
/// Declaration order is the order sections appear in the notes document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Features,
    Bugs,
    Misc,
}

impl Category {
    /// All categories in document order
    pub const ALL: [Category; 3] = [Category::Features, Category::Bugs, Category::Misc];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Features => "Features",
            Category::Bugs => "Bugs",
            Category::Misc => "Misc",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of classifying a single pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Included(Category),
    /// Carries the `internal` label; left out of the notes
    Excluded,
}
