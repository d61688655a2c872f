//! Section tree to printable HTML renderer with pluggable templates.
//!
//! This crate turns a [`Document`] (a forest of [`Section`]s holding content
//! [`Block`]s) into one self-contained HTML page ready for the browser's
//! print dialog.
//!
//! # Architecture
//!
//! A single generic engine walks the tree; template-specific conventions
//! are supplied through the [`Template`] trait:
//! - [`Portfolio`]: colored sections, sidebar and navigation pills
//! - [`Academic`]: monochrome layout with running headers and page numbers
//!
//! Inline formatting, image rows, tables, lists, numbering and the table of
//! contents are shared, so both templates agree on structure and escaping.
//!
//! # Example
//!
//! ```
//! use folio_renderer::{Document, RenderLimits, TemplateKind};
//!
//! let document: Document = serde_json::from_str(
//!     r#"{"sections": [{"title": "About me", "type": "autobiography",
//!         "blocks": [{"type": "text", "content": "**Hello**"}]}]}"#,
//! )
//! .unwrap();
//! let html = TemplateKind::from_name(document.template.as_deref())
//!     .render(&document, RenderLimits::default())
//!     .unwrap();
//! assert!(html.contains("About me"));
//! ```

mod block;
mod document;
mod inline;
mod model;
mod section;
mod template;
mod toc;
mod util;

pub use block::render_block;
pub use document::{DocumentRenderer, RenderError, RenderLimits};
pub use inline::{InlineStyle, format_inline};
pub use model::{
    Align, Block, Document, Figure, FigureLayout, Formatting, ImageBlock, ListBlock, Section,
    SectionKind, TableBlock, TextBlock,
};
pub use section::render_section;
pub use template::{
    Academic, FontDefaults, PageContext, Portfolio, RowPolicy, Template, TemplateKind,
};
pub use toc::{TocEntry, build_toc};
pub use util::escape_html;
