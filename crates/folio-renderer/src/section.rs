//! Section tree rendering.

use std::fmt::Write;

use crate::block::render_block;
use crate::model::Section;
use crate::template::Template;
use crate::util::escape_html;

/// Heading tag and class for a clamped section level.
fn heading(level: u8) -> (&'static str, &'static str) {
    match level {
        0 | 1 => ("h1", "title"),
        2 => ("h2", "subtitle"),
        _ => ("h3", "subsubtitle"),
    }
}

/// Render a section, its blocks and all nested subsections.
///
/// `numbering` is the section's own number ("2", "2.1"); children extend it
/// with `.<position>`. An empty `numbering` omits the number span and starts
/// children at "1".
pub fn render_section<T: Template>(section: &Section, numbering: &str, out: &mut String) {
    let accent = T::accent(section);
    let accent = accent.as_deref();
    let (tag, class) = heading(section.level);

    write!(out, r#"<{tag} class="{class}""#).unwrap();
    if let Some(style) = T::heading_style(section.level, accent) {
        write!(out, r#" style="{style}""#).unwrap();
    }
    out.push('>');
    if !numbering.is_empty() {
        write!(out, r#"<span class="section-number">{numbering}</span>"#).unwrap();
    }
    write!(out, "{}</{tag}>", escape_html(section.display_title())).unwrap();

    for block in &section.blocks {
        render_block::<T>(block, accent, out);
    }
    T::section_end(out);

    for (index, subsection) in section.subsections.iter().enumerate() {
        let child = if numbering.is_empty() {
            (index + 1).to_string()
        } else {
            format!("{numbering}.{}", index + 1)
        };
        render_section::<T>(subsection, &child, out);
    }
}
