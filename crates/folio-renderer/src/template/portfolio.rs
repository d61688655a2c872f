//! Decorated portfolio template.

use std::fmt::Write;

use super::{FontDefaults, PageContext, RowPolicy, Template};
use crate::model::{Align, Section, SectionKind};
use crate::toc::TocEntry;
use crate::util::escape_html;

const TOC_COLOR: &str = "#2c3e50";
const INACTIVE_PILL: &str = "#f5f5f5";

/// Portfolio layout: colored headings, a sidebar stripe and a navigation
/// pill per top-level section on every page.
#[derive(Debug, Clone, Copy, Default)]
pub struct Portfolio;

impl Portfolio {
    fn kind_color(kind: SectionKind) -> &'static str {
        match kind {
            SectionKind::Autobiography => "#3498db",
            SectionKind::StudyPlan => "#2ecc71",
            SectionKind::Resume => "#7f8c8d",
            SectionKind::Other => "#95a5a6",
        }
    }

    /// Short label for a navigation pill.
    fn pill_label(section: &Section) -> String {
        match section.kind {
            SectionKind::Autobiography => "自傳".to_owned(),
            SectionKind::StudyPlan => "計畫".to_owned(),
            SectionKind::Resume => "簡歷".to_owned(),
            SectionKind::Other => section
                .title
                .as_deref()
                .filter(|t| !t.is_empty())
                .map_or_else(|| "其他".to_owned(), |t| t.chars().take(2).collect()),
        }
    }

    fn nav_pills(page: &PageContext<'_>, active: usize, out: &mut String) {
        out.push_str(r#"<div class="section-nav-container">"#);
        for (index, section) in page.sections.iter().enumerate() {
            if section.level > 1 {
                continue;
            }
            let color = Self::accent(section).unwrap_or_default();
            let (class, background) = if index == active {
                ("active", escape_html(&color))
            } else {
                ("", INACTIVE_PILL.to_owned())
            };
            write!(
                out,
                r#"<div class="section-nav-pill {class}" style="background-color:{background};">{}</div>"#,
                escape_html(&Self::pill_label(section))
            )
            .unwrap();
        }
        out.push_str("</div>");
    }
}

impl Template for Portfolio {
    const NAME: &'static str = "nctu";
    const STYLESHEET: &'static str = include_str!("portfolio.css");
    const DEFAULT_FONTS: FontDefaults = FontDefaults {
        english_font: "'Times New Roman', serif",
        chinese_font: "'DFKai-SB', '標楷體', serif",
        body_size: "14",
        line_height: "1.6",
    };
    const ITALICS: bool = false;
    const LINK_STYLE: &'static str = "text-decoration: underline; color: inherit;";
    const EMPTY_CELL: &'static str = "&nbsp;";
    const DEFAULT_GROUP_WIDTH: f64 = 75.0;
    const DEFAULT_LIST_STYLE: &'static str = "dot";
    const ROW_POLICY: RowPolicy = RowPolicy::Balanced;
    const LIST_ITEM_OPEN: &'static str = r#"<li style="color:#333;">"#;

    fn accent(section: &Section) -> Option<String> {
        Some(
            section
                .custom_color
                .clone()
                .unwrap_or_else(|| Self::kind_color(section.kind).to_owned()),
        )
    }

    fn document_title(_title: Option<&str>) -> String {
        "Portfolio Document".to_owned()
    }

    fn heading_style(level: u8, accent: Option<&str>) -> Option<String> {
        let color = escape_html(accent?);
        if level <= 1 {
            Some(format!("color:{color};border-color:{color};"))
        } else {
            Some(format!("color:{color};"))
        }
    }

    fn caption(caption: &str, _index: usize, _count: usize) -> String {
        escape_html(caption)
    }

    fn table_start(out: &mut String) {
        out.push_str(
            r#"<table class="content-table" style="width:100%; border-collapse:collapse; margin:10px 0;">"#,
        );
    }

    fn header_cell(content: &str, accent: Option<&str>, out: &mut String) {
        write!(
            out,
            r#"<th style="border:1px solid #ddd; padding:8px; background:{}15; font-weight:600; text-align:left;">{content}</th>"#,
            escape_html(accent.unwrap_or_default())
        )
        .unwrap();
    }

    fn body_cell(content: &str, out: &mut String) {
        write!(
            out,
            r#"<td style="border:1px solid #ddd; padding:8px;">{content}</td>"#
        )
        .unwrap();
    }

    fn list_class(style: &str) -> &'static str {
        match style {
            "1" => "list-parens",
            "arrow" => "list-arrows",
            _ => "list-dot",
        }
    }

    fn list_start(style: &str, align: Align, accent: Option<&str>, out: &mut String) {
        let color = match accent {
            Some(color) if style == "arrow" => format!("color:{};", escape_html(color)),
            _ => String::new(),
        };
        write!(
            out,
            r#"<ul class="custom-list {} {}" style="{color}">"#,
            Self::list_class(style),
            align.class()
        )
        .unwrap();
    }

    fn section_end(out: &mut String) {
        out.push_str(r#"<div style="clear:both;"></div>"#);
    }

    fn toc_page(entries: &[TocEntry<'_>], _page: &PageContext<'_>, out: &mut String) {
        write!(
            out,
            concat!(
                r#"<div class="page"><div class="page-sidebar"></div>"#,
                r#"<div class="section-nav-container"><div class="section-nav-pill active" style="background-color:{color};">目錄</div></div>"#,
                r#"<div class="page-content"><h1 class="title" style="border-color:{color};">目錄 (Table of Contents)</h1>"#,
                r#"<ul class="toc-list">"#
            ),
            color = TOC_COLOR
        )
        .unwrap();
        for entry in entries {
            write!(
                out,
                r#"<li class="toc-item indent-{}"><span class="toc-label">{} {}</span><span class="toc-page">Page {}</span></li>"#,
                entry.indent(),
                entry.number,
                escape_html(entry.title),
                entry.page
            )
            .unwrap();
        }
        out.push_str("</ul></div></div>");
    }

    fn content_page(page: &PageContext<'_>, index: usize, body: &str, out: &mut String) {
        out.push_str(r#"<div class="page"><div class="page-sidebar"></div>"#);
        Self::nav_pills(page, index, out);
        write!(out, r#"<div class="page-content">{body}</div></div>"#).unwrap();
    }
}
