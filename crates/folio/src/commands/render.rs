//! `folio render` command implementation.
//!
//! Renders a document JSON file (the body of `POST /api/generate-document`)
//! to an HTML file without starting the server.

use std::path::{Path, PathBuf};

use clap::Args;
use folio_config::Config;
use folio_renderer::{Document, RenderLimits, TemplateKind};
use folio_server::UploadStore;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Document JSON file.
    input: PathBuf,

    /// Output HTML file (default: input with `.html` extension).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Template name (`portfolio`, `nctu` or `academic`), overrides the document.
    #[arg(long)]
    template: Option<String>,

    /// Include a table of contents page.
    #[arg(long)]
    toc: bool,

    /// Document title, overrides the document.
    #[arg(long)]
    title: Option<String>,

    /// Directory holding uploaded images to inline (overrides config).
    #[arg(long)]
    upload_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or parsed, the document
    /// exceeds the configured limits, or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;

        let mut document: Document = serde_json::from_str(&std::fs::read_to_string(&self.input)?)?;
        if let Some(template) = self.template {
            document.template = Some(template);
        }
        if let Some(title) = self.title {
            document.title = Some(title);
        }
        document.include_toc |= self.toc;

        let upload_dir = self
            .upload_dir
            .unwrap_or_else(|| config.storage_resolved.upload_dir.clone());
        let limits = RenderLimits {
            max_depth: config.render.max_depth,
            max_sections: config.render.max_sections,
        };

        let target = self
            .output
            .unwrap_or_else(|| self.input.with_extension("html"));
        let summary = render_file(&document, &upload_dir, limits, &target)?;

        output.field("Template", summary.template.name());
        output.field("Images inlined", summary.inlined);
        output.success(&format!("Wrote {}", target.display()));
        Ok(())
    }
}

/// Outcome of one render.
#[derive(Debug)]
struct RenderSummary {
    template: TemplateKind,
    inlined: usize,
}

fn render_file(
    document: &Document,
    upload_dir: &Path,
    limits: RenderLimits,
    target: &Path,
) -> Result<RenderSummary, CliError> {
    limits.check(&document.sections)?;

    let mut document = document.clone();
    let inlined = UploadStore::new(upload_dir).inline_images(&mut document.sections);

    let template = TemplateKind::from_name(document.template.as_deref());
    let html = template.render(&document, limits)?;
    std::fs::write(target, html)?;

    tracing::info!(
        template = template.name(),
        sections = document.sections.len(),
        inlined,
        target = %target.display(),
        "Rendered document"
    );
    Ok(RenderSummary { template, inlined })
}
