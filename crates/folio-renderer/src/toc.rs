//! Table of contents construction.

use crate::model::Section;

/// One line of the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry<'a> {
    /// Hierarchical number ("1", "2.3").
    pub number: String,
    pub title: &'a str,
    pub level: u8,
    /// Assigned page number.
    pub page: usize,
}

impl TocEntry<'_> {
    /// Indentation step for the entry (0 for top-level headings).
    pub fn indent(&self) -> u8 {
        self.level.saturating_sub(1)
    }
}

/// Flatten the section forest in depth-first pre-order.
///
/// Every section node is assumed to occupy exactly one page, so the entry at
/// position `n` is assigned page `n + 1`, shifted by one more when a table of
/// contents page precedes the content. Sections that overflow a page make the
/// later numbers drift; this is the documented numbering scheme.
pub fn build_toc(sections: &[Section], has_toc_page: bool) -> Vec<TocEntry<'_>> {
    let mut entries = Vec::new();
    flatten(sections, "", usize::from(has_toc_page), &mut entries);
    entries
}

fn flatten<'a>(sections: &'a [Section], prefix: &str, offset: usize, entries: &mut Vec<TocEntry<'a>>) {
    for (index, section) in sections.iter().enumerate() {
        let number = format!("{prefix}{}", index + 1);
        let child_prefix = format!("{number}.");
        entries.push(TocEntry {
            number,
            title: section.display_title(),
            level: section.level,
            page: entries.len() + 1 + offset,
        });
        flatten(&section.subsections, &child_prefix, offset, entries);
    }
}
