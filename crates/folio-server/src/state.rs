//! Application state.
//!
//! Shared state for all request handlers.

use std::path::PathBuf;
use std::sync::Arc;

use folio_gemini::LanguageModel;
use folio_renderer::RenderLimits;

use crate::uploads::UploadStore;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Upload directory for images.
    pub(crate) uploads: UploadStore,
    /// Model used for rephrasing and HTML refinement.
    pub(crate) model: Arc<dyn LanguageModel>,
    /// Structural limits for generated documents.
    pub(crate) limits: RenderLimits,
    /// Directory served under `/static`.
    pub(crate) static_dir: PathBuf,
    /// Maximum request body size in bytes.
    pub(crate) max_body_bytes: usize,
}
