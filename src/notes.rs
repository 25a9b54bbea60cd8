//! Release notes composition.
//!
//! New notes are one section per category in fixed order, each made of a
//! `## <Category>` heading, the entries, and a blank line, followed by the
//! previous notes verbatim. Empty categories still get their heading so the
//! document shape stays stable between releases.

use crate::classifier::ClassifiedPullRequests;

/// Render the category sections for a release
pub fn render_sections(classified: &ClassifiedPullRequests) -> String {
    let mut sections = String::new();
    for (category, entries) in classified.iter() {
        let lines: Vec<String> = entries.iter().map(ToString::to_string).collect();
        sections.push_str(&format!("## {}\n{}\n\n", category, lines.join("\n")));
    }
    sections
}

/// Prepend the new release sections to the prior notes
pub fn compose(classified: &ClassifiedPullRequests, prior_notes: &str) -> String {
    let mut notes = render_sections(classified);
    notes.push_str(prior_notes);
    notes
}
