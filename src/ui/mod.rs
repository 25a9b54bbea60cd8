//! User interface module - terminal output.
//!
//! A release run is non-interactive apart from the external editor, so this
//! module only formats and prints; see [formatter].

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_classified, display_dry_run_plan, display_error,
    display_notes_preview, display_status, display_success, format_classified,
};
