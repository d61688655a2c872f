//! Full document assembly.

use std::fmt::Write;
use std::marker::PhantomData;

use crate::model::{Formatting, Section};
use crate::section::render_section;
use crate::template::{PageContext, Template};
use crate::toc::build_toc;
use crate::util::escape_html;

/// Error produced when a document exceeds structural limits.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Sections nested deeper than allowed.
    #[error("Section nesting exceeds the maximum depth of {max}")]
    TooDeep { max: usize },

    /// More section nodes than allowed.
    #[error("Document exceeds the maximum of {max} sections")]
    TooManySections { max: usize },
}

/// Structural limits on the section tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderLimits {
    /// Maximum nesting depth; top-level sections are depth 1.
    pub max_depth: usize,
    /// Maximum number of section nodes in the whole tree.
    pub max_sections: usize,
}

impl Default for RenderLimits {
    fn default() -> Self {
        Self {
            max_depth: 8,
            max_sections: 2000,
        }
    }
}

impl RenderLimits {
    /// Check a section forest against these limits.
    pub fn check(&self, sections: &[Section]) -> Result<(), RenderError> {
        let mut count = 0;
        self.walk(sections, 1, &mut count)
    }

    fn walk(&self, sections: &[Section], depth: usize, count: &mut usize) -> Result<(), RenderError> {
        if sections.is_empty() {
            return Ok(());
        }
        if depth > self.max_depth {
            return Err(RenderError::TooDeep {
                max: self.max_depth,
            });
        }
        for section in sections {
            *count += 1;
            if *count > self.max_sections {
                return Err(RenderError::TooManySections {
                    max: self.max_sections,
                });
            }
            self.walk(&section.subsections, depth + 1, count)?;
        }
        Ok(())
    }
}

/// Renders sections into a standalone, print-ready HTML document.
///
/// # Example
///
/// ```
/// use folio_renderer::{Academic, DocumentRenderer, Formatting, Section};
///
/// let sections = vec![Section::new("Introduction")];
/// let html = DocumentRenderer::<Academic>::new()
///     .with_toc(true)
///     .render(&sections, &Formatting::default())
///     .unwrap();
/// assert!(html.contains("Table of Contents"));
/// ```
pub struct DocumentRenderer<T: Template> {
    include_toc: bool,
    title: Option<String>,
    limits: RenderLimits,
    _template: PhantomData<T>,
}

impl<T: Template> Default for DocumentRenderer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Template> DocumentRenderer<T> {
    pub fn new() -> Self {
        Self {
            include_toc: false,
            title: None,
            limits: RenderLimits::default(),
            _template: PhantomData,
        }
    }

    /// Emit a table of contents page before the content.
    #[must_use]
    pub fn with_toc(mut self, include_toc: bool) -> Self {
        self.include_toc = include_toc;
        self
    }

    /// Set the document title (templates may ignore it).
    #[must_use]
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title.filter(|t| !t.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_limits(mut self, limits: RenderLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Render the document.
    ///
    /// The TOC page, when present, comes first; each top-level section then
    /// gets its own page with the section's 1-based position as its number.
    pub fn render(&self, sections: &[Section], formatting: &Formatting) -> Result<String, RenderError> {
        self.limits.check(sections)?;

        let title = T::document_title(self.title.as_deref());
        let page = PageContext {
            sections,
            title: &title,
            include_toc: self.include_toc,
        };

        let mut body = String::new();
        if self.include_toc {
            T::toc_page(&build_toc(sections, true), &page, &mut body);
        }
        for (index, section) in sections.iter().enumerate() {
            let mut content = String::new();
            render_section::<T>(section, &(index + 1).to_string(), &mut content);
            T::content_page(&page, index, &content, &mut body);
        }

        let css = T::stylesheet(formatting);
        let mut out = String::with_capacity(body.len() + css.len() + 256);
        write!(
            out,
            "<!DOCTYPE html><html lang='zh-TW'><head><meta charset='UTF-8'>\
             <meta name='viewport' content='width=device-width, initial-scale=1.0'>\
             <title>{}</title><style>\n{css}</style></head><body>{body}</body></html>",
            escape_html(&title)
        )
        .unwrap();
        Ok(out)
    }
}
