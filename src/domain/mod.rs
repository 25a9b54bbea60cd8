//! Domain logic - pure release rules independent of GitHub and git

pub mod baseline;
pub mod category;
pub mod pull_request;
pub mod version;

pub use baseline::{BaselineRelease, DerivedFrom};
pub use category::{Category, Classification};
pub use pull_request::{PullRequestRecord, ReleaseNoteEntry};
pub use version::ReleaseVersion;
