//! Pure formatting functions for UI output.
//!
//! `format_*` functions build strings and are testable; `display_*` functions
//! print them.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::classifier::ClassifiedPullRequests;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Status line with a yellow arrow.
pub fn format_status(message: &str) -> String {
    format!("{} {}", style("→").yellow(), message)
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{}", format_status(message));
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Summary of classified pull requests, one block per category.
///
/// Excluded pull requests are listed by number at the end.
pub fn format_classified(classified: &ClassifiedPullRequests) -> String {
    let mut out = String::new();
    for (category, entries) in classified.iter() {
        out.push_str(&format!("{} ({})\n", category, entries.len()));
        for entry in entries {
            out.push_str(&format!("  {}\n", entry));
        }
    }
    if !classified.excluded().is_empty() {
        let numbers: Vec<String> = classified
            .excluded()
            .iter()
            .map(|n| format!("#{}", n))
            .collect();
        out.push_str(&format!("Excluded as internal: {}\n", numbers.join(", ")));
    }
    out
}

/// Display the pull requests found for the release.
pub fn display_classified(classified: &ClassifiedPullRequests) {
    println!(
        "\n{}",
        style(format!("Found {} pull requests:", classified.len())).bold()
    );
    print!("{}", format_classified(classified));
}

/// Display the release notes that would be written.
pub fn display_notes_preview(path: &str, notes: &str) {
    println!("\n{}", style(format!("New contents of {}:", path)).bold());
    println!("{}", notes);
}

/// Steps a real run would take, listed after a dry run.
pub fn format_dry_run_plan(version: &str, branch: &str, remote: &str) -> String {
    let mut out = format_status("Dry run, nothing was written or pushed. A real run would:");
    out.push('\n');
    out.push_str(&format!("  1. write version {} and the release notes\n", version));
    out.push_str("  2. open the notes in the editor\n");
    out.push_str(&format!(
        "  3. commit \"Agent Release {}\" on branch {}\n",
        version, branch
    ));
    out.push_str(&format!("  4. push {} to {}\n", style(branch).cyan(), remote));
    out
}

/// Display the manual follow-up after a dry run.
pub fn display_dry_run_plan(version: &str, branch: &str, remote: &str) {
    print!("{}", format_dry_run_plan(version, branch, remote));
}
