//! Command-line workflow, decoupled from argument parsing

pub mod orchestration;

pub use orchestration::{run_release, run_release_reporting, ReleaseArgs, ReleaseOutcome};
