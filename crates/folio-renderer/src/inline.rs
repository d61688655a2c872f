//! Inline markup formatting.
//!
//! User text is plain text with a tiny markup vocabulary: `**bold**`,
//! `*italic*` and `[label](url)`. The input is always escaped first so the
//! only tags in the output are the ones generated here.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::util::escape_html;

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());

/// Per-template inline conventions.
#[derive(Debug, Clone, Copy)]
pub struct InlineStyle<'a> {
    /// Color for bold text; `None` leaves `<strong>` unstyled.
    pub accent: Option<&'a str>,
    /// Whether single-asterisk emphasis is recognized.
    pub italics: bool,
    /// Inline `style` attribute for generated links.
    pub link_style: &'a str,
}

/// Convert raw user text to HTML.
///
/// # Examples
///
/// ```
/// use folio_renderer::{InlineStyle, format_inline};
///
/// let style = InlineStyle { accent: None, italics: true, link_style: "" };
/// assert_eq!(format_inline("**a** *b*", &style), "<strong>a</strong> <em>b</em>");
/// ```
pub fn format_inline(text: &str, style: &InlineStyle<'_>) -> String {
    if text.is_empty() {
        return String::new();
    }

    let escaped = escape_html(text);

    let bolded = match style.accent {
        Some(color) => {
            let color = escape_html(color);
            BOLD.replace_all(&escaped, |caps: &Captures<'_>| {
                format!(r#"<strong style="color: {color}">{}</strong>"#, &caps[1])
            })
        }
        None => BOLD.replace_all(&escaped, "<strong>$1</strong>"),
    };

    let emphasized = if style.italics {
        ITALIC.replace_all(&bolded, "<em>$1</em>")
    } else {
        bolded.as_ref().into()
    };

    let linked = LINK.replace_all(&emphasized, |caps: &Captures<'_>| {
        format!(
            r#"<a href="{}" target="_blank" style="{}">{}</a>"#,
            &caps[2], style.link_style, &caps[1]
        )
    });

    linked.replace('\n', "<br>")
}
