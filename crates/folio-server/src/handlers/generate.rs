//! Document generation endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use folio_renderer::{Document, TemplateKind};
use serde::Serialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Response for POST /api/generate-document.
#[derive(Serialize)]
pub(crate) struct GenerateResponse {
    success: bool,
    html: String,
}

/// Handle POST /api/generate-document.
///
/// Local upload URLs are inlined as data URIs before rendering, so the
/// returned HTML has no dependency on the server.
pub(crate) async fn generate_document(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Document>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ServerError> {
    let Json(mut document) = payload?;
    state.limits.check(&document.sections)?;
    let template = TemplateKind::from_name(document.template.as_deref());

    let worker = Arc::clone(&state);
    let (html, inlined) = tokio::task::spawn_blocking(move || {
        let inlined = worker.uploads.inline_images(&mut document.sections);
        template
            .render(&document, worker.limits)
            .map(|html| (html, inlined))
    })
    .await??;

    tracing::info!(
        template = template.name(),
        images_inlined = inlined,
        size = html.len(),
        "Generated document"
    );

    Ok(Json(GenerateResponse {
        success: true,
        html,
    }))
}
