pub mod boundary;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod domain;
pub mod editor;
pub mod error;
pub mod files;
pub mod git;
pub mod github;
pub mod notes;
pub mod ui;

pub use error::{ReleaseError, Result};
