//! Content block rendering.

use std::fmt::Write;

use crate::inline::{InlineStyle, format_inline};
use crate::model::{Block, ImageBlock, ListBlock, TableBlock};
use crate::template::Template;
use crate::util::escape_html;

/// Inline style for a template and section accent.
pub(crate) fn inline_style<T: Template>(accent: Option<&str>) -> InlineStyle<'_> {
    InlineStyle {
        accent,
        italics: T::ITALICS,
        link_style: T::LINK_STYLE,
    }
}

/// Render one block of a section whose accent color is `accent`.
pub fn render_block<T: Template>(block: &Block, accent: Option<&str>, out: &mut String) {
    let style = inline_style::<T>(accent);
    match block {
        Block::Text(text) => {
            write!(
                out,
                r#"<div class="content-block {}"><p>{}</p></div>"#,
                text.align.class(),
                format_inline(&text.content, &style)
            )
            .unwrap();
        }
        Block::Image(image) => render_image::<T>(image, out),
        Block::Table(table) => render_table::<T>(table, &style, accent, out),
        Block::List(list) => render_list::<T>(list, &style, accent, out),
        Block::Unsupported(_) => {}
    }
}

fn render_image<T: Template>(image: &ImageBlock, out: &mut String) {
    if image.images.is_empty() {
        return;
    }

    let count = image.images.len();
    let width = image.group_width.unwrap_or(T::DEFAULT_GROUP_WIDTH);
    write!(
        out,
        r#"<div class="figure-group {}" style="max-width: {width}%;">"#,
        image.layout.class()
    )
    .unwrap();

    for row in T::ROW_POLICY.rows(count) {
        out.push_str(r#"<div class="figure-row">"#);
        for index in row {
            let figure = &image.images[index];
            write!(
                out,
                r#"<div class="figure-item"><img src="{}" alt="{}"><div class="figure-caption">{}</div></div>"#,
                escape_html(&figure.url),
                escape_html(&figure.caption),
                T::caption(&figure.caption, index, count)
            )
            .unwrap();
        }
        out.push_str("</div>");
    }

    out.push_str("</div>");
}

fn render_table<T: Template>(
    table: &TableBlock,
    style: &InlineStyle<'_>,
    accent: Option<&str>,
    out: &mut String,
) {
    if table.rows.is_empty() {
        return;
    }

    write!(out, r#"<div class="content-block {}">"#, table.align.class()).unwrap();
    T::table_start(out);

    for (row_index, row) in table.rows.iter().enumerate() {
        out.push_str("<tr>");
        for cell in row {
            let content = if cell.is_empty() {
                T::EMPTY_CELL.to_owned()
            } else {
                format_inline(cell, style)
            };
            if row_index == 0 {
                T::header_cell(&content, accent, out);
            } else {
                T::body_cell(&content, out);
            }
        }
        out.push_str("</tr>");
    }

    out.push_str("</table></div>");
}

fn render_list<T: Template>(
    list: &ListBlock,
    style: &InlineStyle<'_>,
    accent: Option<&str>,
    out: &mut String,
) {
    let key = list.style.as_deref().unwrap_or(T::DEFAULT_LIST_STYLE);
    T::list_start(key, list.align, accent, out);
    for item in list.items() {
        out.push_str(T::LIST_ITEM_OPEN);
        out.push_str(&format_inline(item, style));
        out.push_str("</li>");
    }
    out.push_str("</ul>");
}
