//! Document data model.
//!
//! Request bodies come from a browser editor and are loosely shaped: fields
//! may be missing, `null`, or sent as strings where numbers are expected.
//! Every type here deserializes through a `Raw*` mirror and is normalized
//! exactly once, so the renderer only ever sees typed values.

use serde::{Deserialize, Deserializer};

/// A complete document as submitted for generation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Document {
    /// Top-level sections in display order.
    pub sections: Vec<Section>,
    /// Font and spacing options.
    pub formatting: Formatting,
    /// Emit a table of contents page before the content pages.
    #[serde(deserialize_with = "nullable_bool")]
    pub include_toc: bool,
    /// Template name (`academic`, `nctu`, `portfolio`).
    pub template: Option<String>,
    /// Document title used for running headers and `<title>`.
    pub title: Option<String>,
}

/// Typography options. `None` means "use the template default".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Formatting {
    #[serde(deserialize_with = "css_value")]
    pub english_font: Option<String>,
    #[serde(deserialize_with = "css_value")]
    pub chinese_font: Option<String>,
    #[serde(deserialize_with = "css_value")]
    pub body_size: Option<String>,
    #[serde(deserialize_with = "css_value")]
    pub line_height: Option<String>,
}

/// Section category, used by the portfolio template for colors and pills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Autobiography,
    StudyPlan,
    Resume,
    #[default]
    #[serde(other)]
    Other,
}

/// A titled node in the document outline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawSection")]
pub struct Section {
    /// Title as submitted; `None` when the field was absent.
    pub title: Option<String>,
    /// Heading level, always within `1..=3`.
    pub level: u8,
    pub kind: SectionKind,
    pub custom_color: Option<String>,
    pub blocks: Vec<Block>,
    pub subsections: Vec<Section>,
}

impl Section {
    /// Create a level-1 section with no content.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            level: 1,
            kind: SectionKind::Other,
            custom_color: None,
            blocks: Vec::new(),
            subsections: Vec::new(),
        }
    }

    /// Set the heading level (clamped to `1..=3`).
    #[must_use]
    pub fn with_level(mut self, level: i64) -> Self {
        self.level = clamp_level(level);
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: SectionKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    #[must_use]
    pub fn with_subsection(mut self, section: Section) -> Self {
        self.subsections.push(section);
        self
    }

    /// Title for headings and the table of contents.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }

    /// Visit every figure in this section and all nested subsections.
    pub fn visit_figures_mut(&mut self, visit: &mut impl FnMut(&mut Figure)) {
        for block in &mut self.blocks {
            if let Block::Image(image) = block {
                image.images.iter_mut().for_each(&mut *visit);
            }
        }
        for subsection in &mut self.subsections {
            subsection.visit_figures_mut(visit);
        }
    }
}

fn clamp_level(level: i64) -> u8 {
    u8::try_from(level.clamp(1, 3)).unwrap_or(1)
}

/// Fractional levels round down before clamping.
fn level_from_number(level: f64) -> u8 {
    match level.floor() {
        l if l >= 3.0 => 3,
        l if l >= 2.0 => 2,
        _ => 1,
    }
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RawSection {
    title: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    level: Option<f64>,
    #[serde(rename = "type")]
    kind: Option<SectionKind>,
    custom_color: Option<String>,
    blocks: Option<Vec<Block>>,
    content: Option<String>,
    subsections: Option<Vec<Section>>,
}

impl From<RawSection> for Section {
    fn from(raw: RawSection) -> Self {
        let mut blocks = raw.blocks.unwrap_or_default();
        // Older clients stored a single text body on the section itself
        if blocks.is_empty()
            && let Some(content) = raw.content.filter(|c| !c.is_empty())
        {
            blocks.push(Block::Text(TextBlock {
                content,
                align: Align::Left,
            }));
        }

        Self {
            title: raw.title,
            level: raw.level.map_or(1, level_from_number),
            kind: raw.kind.unwrap_or_default(),
            custom_color: raw
                .custom_color
                .map(|c| c.trim().to_owned())
                .filter(|c| !c.is_empty()),
            blocks,
            subsections: raw.subsections.unwrap_or_default(),
        }
    }
}

/// Horizontal alignment of a block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
}

impl Align {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("center") => Self::Center,
            _ => Self::Left,
        }
    }

    /// CSS class applied to the block container.
    pub fn class(self) -> &'static str {
        match self {
            Self::Left => "align-left",
            Self::Center => "align-center",
        }
    }
}

/// Placement of an image group relative to the surrounding text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FigureLayout {
    Wrapped,
    #[default]
    Standalone,
}

impl FigureLayout {
    pub fn class(self) -> &'static str {
        match self {
            Self::Wrapped => "wrapped",
            Self::Standalone => "standalone",
        }
    }
}

/// One image with its caption.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Figure {
    #[serde(deserialize_with = "nullable_string")]
    pub url: String,
    #[serde(deserialize_with = "nullable_string")]
    pub caption: String,
}

impl Figure {
    pub fn new(url: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caption: caption.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBlock {
    pub content: String,
    pub align: Align,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageBlock {
    pub images: Vec<Figure>,
    pub layout: FigureLayout,
    /// Maximum group width in percent; `None` uses the template default.
    pub group_width: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableBlock {
    /// Cell text by row. Row 0 is the header.
    pub rows: Vec<Vec<String>>,
    pub align: Align,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListBlock {
    /// Newline-separated items.
    pub content: String,
    /// Marker style key; `None` uses the template default.
    pub style: Option<String>,
    pub align: Align,
}

impl ListBlock {
    /// Trimmed, non-blank lines of the list content.
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.content
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }
}

/// One typed unit of section content.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawBlock")]
pub enum Block {
    Text(TextBlock),
    Image(ImageBlock),
    Table(TableBlock),
    List(ListBlock),
    /// A block type this renderer does not know; renders nothing.
    Unsupported(String),
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RawBlock {
    #[serde(rename = "type")]
    kind: Option<String>,
    content: Option<String>,
    align: Option<String>,
    images: Option<Vec<Figure>>,
    layout: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    group_width: Option<f64>,
    table_data: Option<Vec<Vec<Option<String>>>>,
    list_style: Option<String>,
    url: Option<String>,
    src: Option<String>,
    caption: Option<String>,
}

impl From<RawBlock> for Block {
    fn from(raw: RawBlock) -> Self {
        let align = Align::parse(raw.align.as_deref());
        match raw.kind.as_deref().unwrap_or("text") {
            "text" => Self::Text(TextBlock {
                content: raw.content.unwrap_or_default(),
                align,
            }),
            "image" => {
                let mut images = raw.images.unwrap_or_default();
                // Single-image blocks from older clients carry the URL inline
                if images.is_empty()
                    && let Some(url) = raw.url.or(raw.src).filter(|u| !u.is_empty())
                {
                    images.push(Figure::new(url, raw.caption.unwrap_or_default()));
                }
                Self::Image(ImageBlock {
                    images,
                    layout: match raw.layout.as_deref() {
                        Some("wrapped") => FigureLayout::Wrapped,
                        _ => FigureLayout::Standalone,
                    },
                    group_width: raw.group_width,
                })
            }
            "table" => Self::Table(TableBlock {
                rows: raw
                    .table_data
                    .unwrap_or_default()
                    .into_iter()
                    .map(|row| row.into_iter().map(Option::unwrap_or_default).collect())
                    .collect(),
                align,
            }),
            "list" => Self::List(ListBlock {
                content: raw.content.unwrap_or_default(),
                style: raw.list_style.filter(|s| !s.is_empty()),
                align,
            }),
            other => Self::Unsupported(other.to_owned()),
        }
    }
}

/// A formatting value sent as either a string or a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum CssValue {
    Text(String),
    Number(f64),
}

/// Deserialize a CSS value, treating blank strings as absent.
fn css_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<CssValue>::deserialize(deserializer)?;
    Ok(value.and_then(|v| {
        let text = match v {
            CssValue::Text(s) => s.trim().to_owned(),
            CssValue::Number(n) => n.to_string(),
        };
        (!text.is_empty()).then_some(text)
    }))
}

/// Deserialize a number that may arrive as a numeric string.
fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<CssValue>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        CssValue::Number(n) => Some(n),
        CssValue::Text(s) => s.trim().parse().ok(),
    })
    .filter(|n: &f64| n.is_finite()))
}

fn nullable_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Option::<bool>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn nullable_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
