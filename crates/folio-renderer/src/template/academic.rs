//! Plain academic template.

use std::fmt::Write;

use super::{FontDefaults, PageContext, RowPolicy, Template};
use crate::model::{Align, Section};
use crate::toc::TocEntry;
use crate::util::escape_html;

/// Academic layout: monochrome headings, running header and page numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Academic;

impl Template for Academic {
    const NAME: &'static str = "academic";
    const STYLESHEET: &'static str = include_str!("academic.css");
    const DEFAULT_FONTS: FontDefaults = FontDefaults {
        english_font: "'Garamond', 'Georgia', serif",
        chinese_font: "'SimSun', '宋体', serif",
        body_size: "12",
        line_height: "1.8",
    };
    const ITALICS: bool = true;
    const LINK_STYLE: &'static str = "color: #000; text-decoration: underline;";
    const EMPTY_CELL: &'static str = "—";
    const DEFAULT_GROUP_WIDTH: f64 = 80.0;
    const DEFAULT_LIST_STYLE: &'static str = "bullets";
    const ROW_POLICY: RowPolicy = RowPolicy::Pairs;
    const LIST_ITEM_OPEN: &'static str = "<li>";

    fn accent(_section: &Section) -> Option<String> {
        None
    }

    fn document_title(title: Option<&str>) -> String {
        title.unwrap_or("Academic Document").to_owned()
    }

    fn heading_style(_level: u8, _accent: Option<&str>) -> Option<String> {
        None
    }

    fn caption(caption: &str, index: usize, count: usize) -> String {
        if count == 1 {
            format!("Figure: {}", escape_html(caption))
        } else {
            format!("Figure {}: {}", index + 1, escape_html(caption))
        }
    }

    fn table_start(out: &mut String) {
        out.push_str(r#"<table class="content-table">"#);
    }

    fn header_cell(content: &str, _accent: Option<&str>, out: &mut String) {
        write!(out, "<th>{content}</th>").unwrap();
    }

    fn body_cell(content: &str, out: &mut String) {
        write!(out, "<td>{content}</td>").unwrap();
    }

    fn list_class(style: &str) -> &'static str {
        match style {
            "1" => "list-parens",
            "roman" => "list-roman",
            _ => "list-bullets",
        }
    }

    fn list_start(style: &str, align: Align, _accent: Option<&str>, out: &mut String) {
        write!(
            out,
            r#"<ul class="custom-list {} {}">"#,
            Self::list_class(style),
            align.class()
        )
        .unwrap();
    }

    fn toc_page(entries: &[TocEntry<'_>], page: &PageContext<'_>, out: &mut String) {
        write!(
            out,
            r#"<div class="page"><div class="running-header">{}</div><div class="page-content"><h1 class="title">Table of Contents</h1><ul class="toc-list">"#,
            escape_html(page.title)
        )
        .unwrap();
        for entry in entries {
            write!(
                out,
                r#"<li class="toc-item indent-{}"><span class="toc-label">{} {}</span><span class="toc-dots"></span><span class="toc-page">{}</span></li>"#,
                entry.indent(),
                entry.number,
                escape_html(entry.title),
                entry.page
            )
            .unwrap();
        }
        out.push_str(r#"</ul></div><div class="page-number">i</div></div>"#);
    }

    fn content_page(page: &PageContext<'_>, index: usize, body: &str, out: &mut String) {
        let number = index + 1 + usize::from(page.include_toc);
        write!(
            out,
            r#"<div class="page"><div class="running-header">{}</div><div class="page-content">{body}</div><div class="page-number">{number}</div></div>"#,
            escape_html(page.title)
        )
        .unwrap();
    }
}
