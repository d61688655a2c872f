//! Visual templates.
//!
//! The rendering engine is shared; everything that differs between templates
//! (stylesheet, accent colors, markup details, page chrome) is supplied by a
//! [`Template`] implementation. [`TemplateKind`] selects one at runtime.

mod academic;
mod portfolio;

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

pub use academic::Academic;
pub use portfolio::Portfolio;

use crate::document::{DocumentRenderer, RenderError, RenderLimits};
use crate::model::{Align, Document, Formatting, Section};
use crate::toc::TocEntry;
use crate::util::sanitize_css_value;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__[A-Z_]+__").unwrap());

/// Default typography for a template.
#[derive(Debug, Clone, Copy)]
pub struct FontDefaults {
    pub english_font: &'static str,
    pub chinese_font: &'static str,
    pub body_size: &'static str,
    pub line_height: &'static str,
}

/// How figures of an image group are split into rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPolicy {
    /// Fixed layouts for 1 to 6 images; other counts produce no rows.
    Balanced,
    /// Rows of two, with any remainder in the last row.
    Pairs,
}

impl RowPolicy {
    /// Index ranges of the figures in each row.
    pub fn rows(self, count: usize) -> Vec<Range<usize>> {
        match self {
            Self::Balanced => match count {
                1 | 2 => vec![0..count],
                3 | 5 => vec![0..2, 2..count],
                4 | 6 => vec![0..count / 2, count / 2..count],
                _ => Vec::new(),
            },
            Self::Pairs => (0..count)
                .step_by(2)
                .map(|start| start..(start + 2).min(count))
                .collect(),
        }
    }
}

/// Document-wide values available while emitting page chrome.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// All top-level sections, for side navigation.
    pub sections: &'a [Section],
    /// Resolved document title.
    pub title: &'a str,
    /// Whether a table of contents page precedes the content pages.
    pub include_toc: bool,
}

/// Template-specific rendering conventions.
///
/// All output methods append to `out`. Content passed in is already
/// formatted HTML; implementations are responsible for escaping any raw
/// values (colors, titles) they interpolate themselves.
pub trait Template {
    /// Identifier used in logs.
    const NAME: &'static str;

    /// Stylesheet with `__EN_FONT__`, `__ZH_FONT__`, `__BODY_SIZE__` and
    /// `__LINE_HEIGHT__` placeholders.
    const STYLESHEET: &'static str;

    const DEFAULT_FONTS: FontDefaults;

    /// Whether `*text*` renders as emphasis.
    const ITALICS: bool;

    /// Inline style for generated links.
    const LINK_STYLE: &'static str;

    /// Placeholder for empty table cells.
    const EMPTY_CELL: &'static str;

    /// Image group width in percent when a block does not set one.
    const DEFAULT_GROUP_WIDTH: f64;

    /// List style key when a block does not set one.
    const DEFAULT_LIST_STYLE: &'static str;

    const ROW_POLICY: RowPolicy;

    /// Opening tag for list items.
    const LIST_ITEM_OPEN: &'static str;

    /// Accent color for a section, if the template colors sections.
    fn accent(section: &Section) -> Option<String>;

    /// Document title shown in `<title>` and page chrome.
    fn document_title(title: Option<&str>) -> String;

    /// Inline style for a section heading.
    fn heading_style(level: u8, accent: Option<&str>) -> Option<String>;

    /// Escaped caption text for the figure at `index` of `count`.
    fn caption(caption: &str, index: usize, count: usize) -> String;

    fn table_start(out: &mut String);

    fn header_cell(content: &str, accent: Option<&str>, out: &mut String);

    fn body_cell(content: &str, out: &mut String);

    /// CSS class for a list style key.
    fn list_class(style: &str) -> &'static str;

    /// Opening `<ul>` tag for a list.
    fn list_start(style: &str, align: Align, accent: Option<&str>, out: &mut String);

    /// Markup appended after a section's blocks, before its subsections.
    fn section_end(_out: &mut String) {}

    /// Table of contents page.
    fn toc_page(entries: &[TocEntry<'_>], page: &PageContext<'_>, out: &mut String);

    /// Page wrapping the rendered tree of the top-level section at `index`.
    fn content_page(page: &PageContext<'_>, index: usize, body: &str, out: &mut String);

    /// Stylesheet with formatting values (or defaults) substituted.
    ///
    /// Placeholders are replaced in one pass, so a submitted value is never
    /// itself scanned for placeholders.
    fn stylesheet(formatting: &Formatting) -> String {
        let value = |option: &Option<String>, default: &str| {
            option
                .as_deref()
                .map_or_else(|| default.to_owned(), sanitize_css_value)
        };
        let defaults = Self::DEFAULT_FONTS;

        PLACEHOLDER
            .replace_all(Self::STYLESHEET, |caps: &Captures<'_>| match &caps[0] {
                "__EN_FONT__" => value(&formatting.english_font, defaults.english_font),
                "__ZH_FONT__" => value(&formatting.chinese_font, defaults.chinese_font),
                "__BODY_SIZE__" => value(&formatting.body_size, defaults.body_size),
                "__LINE_HEIGHT__" => value(&formatting.line_height, defaults.line_height),
                other => other.to_owned(),
            })
            .into_owned()
    }
}

/// Runtime template selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TemplateKind {
    /// Decorated portfolio layout with colored sections and side navigation
    /// (also known as `nctu`).
    #[default]
    Portfolio,
    /// Plain academic layout with running headers and page numbers.
    Academic,
}

impl TemplateKind {
    /// Resolve a template name. Anything other than `academic` selects the
    /// portfolio template.
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some(n) if n.eq_ignore_ascii_case("academic") => Self::Academic,
            _ => Self::Portfolio,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Portfolio => Portfolio::NAME,
            Self::Academic => Academic::NAME,
        }
    }

    /// Render a full document with this template.
    pub fn render(self, document: &Document, limits: RenderLimits) -> Result<String, RenderError> {
        match self {
            Self::Portfolio => render_with::<Portfolio>(document, limits),
            Self::Academic => render_with::<Academic>(document, limits),
        }
    }
}

fn render_with<T: Template>(document: &Document, limits: RenderLimits) -> Result<String, RenderError> {
    DocumentRenderer::<T>::new()
        .with_toc(document.include_toc)
        .with_title(document.title.clone())
        .with_limits(limits)
        .render(&document.sections, &document.formatting)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stylesheet_substitutes_once() {
        let formatting = Formatting {
            english_font: Some("__BODY_SIZE__".to_owned()),
            body_size: Some("15".to_owned()),
            ..Default::default()
        };
        let css = Portfolio::stylesheet(&formatting);

        assert!(css.contains("font-family: __BODY_SIZE__,"));
        assert!(css.contains("15"));
        assert!(!css.contains("__EN_FONT__"));
        assert!(!css.contains("__LINE_HEIGHT__"));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            TemplateKind::from_name(Some("academic")),
            TemplateKind::Academic
        );
        assert_eq!(
            TemplateKind::from_name(Some("nctu")),
            TemplateKind::Portfolio
        );
        assert_eq!(
            TemplateKind::from_name(Some("portfolio")),
            TemplateKind::Portfolio
        );
        assert_eq!(
            TemplateKind::from_name(Some("unknown_value")),
            TemplateKind::Portfolio
        );
        assert_eq!(TemplateKind::from_name(None), TemplateKind::Portfolio);
    }

    #[test]
    fn test_balanced_rows() {
        assert_eq!(RowPolicy::Balanced.rows(1), vec![0..1]);
        assert_eq!(RowPolicy::Balanced.rows(2), vec![0..2]);
        assert_eq!(RowPolicy::Balanced.rows(3), vec![0..2, 2..3]);
        assert_eq!(RowPolicy::Balanced.rows(4), vec![0..2, 2..4]);
        assert_eq!(RowPolicy::Balanced.rows(5), vec![0..2, 2..5]);
        assert_eq!(RowPolicy::Balanced.rows(6), vec![0..3, 3..6]);
        assert!(RowPolicy::Balanced.rows(7).is_empty());
        assert!(RowPolicy::Balanced.rows(0).is_empty());
    }

    #[test]
    fn test_pair_rows() {
        assert_eq!(RowPolicy::Pairs.rows(1), vec![0..1]);
        assert_eq!(RowPolicy::Pairs.rows(4), vec![0..2, 2..4]);
        assert_eq!(RowPolicy::Pairs.rows(5), vec![0..2, 2..4, 4..5]);
        assert_eq!(RowPolicy::Pairs.rows(7).len(), 4);
    }

    #[test]
    fn test_stylesheet_uses_defaults() {
        let css = Portfolio::stylesheet(&Formatting::default());
        assert!(css.contains("font-family: 'Times New Roman', serif, 'DFKai-SB', '標楷體', serif"));
        assert!(css.contains("font-size: 14px"));
        assert!(css.contains("line-height: 1.6"));
        assert!(!css.contains("__"));
    }

    #[test]
    fn test_stylesheet_interpolates_formatting() {
        let formatting = Formatting {
            english_font: Some("Arial".to_owned()),
            body_size: Some("11".to_owned()),
            ..Default::default()
        };
        let css = Academic::stylesheet(&formatting);
        assert!(css.contains("font-family: Arial, 'SimSun', '宋体', serif"));
        assert!(css.contains("font-size: 11pt"));
        assert!(css.contains("line-height: 1.8"));
    }

    #[test]
    fn test_stylesheet_strips_style_breakout() {
        let formatting = Formatting {
            english_font: Some("x}</style><script>alert(1)</script>".to_owned()),
            ..Default::default()
        };
        let css = Portfolio::stylesheet(&formatting);
        assert!(!css.contains("</style>"));
        assert!(!css.contains("<script>"));
    }
}
