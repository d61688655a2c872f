//! Generated HTML refinement endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use folio_gemini::{DEFAULT_FIX_INSTRUCTION, fix_html_prompt, strip_code_fences};
use serde::{Deserialize, Serialize};

use super::{complete, require};
use crate::error::ServerError;
use crate::state::AppState;

/// Request for POST /api/fix-html.
#[derive(Deserialize, Default)]
#[serde(default)]
pub(crate) struct FixHtmlRequest {
    html: Option<String>,
    api_key: Option<String>,
    /// Free-form editing instruction; blank means the default.
    instruction: Option<String>,
}

/// Response for POST /api/fix-html.
#[derive(Serialize)]
pub(crate) struct FixHtmlResponse {
    success: bool,
    fixed_html: String,
}

/// Handle POST /api/fix-html.
pub(crate) async fn fix_html(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FixHtmlRequest>, JsonRejection>,
) -> Result<Json<FixHtmlResponse>, ServerError> {
    let Json(request) = payload?;
    let html = require(request.html, "No HTML provided")?;
    let api_key = require(request.api_key, "No API key provided")?;
    let instruction = request
        .instruction
        .filter(|i| !i.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FIX_INSTRUCTION.to_owned());

    let completion = complete(&state, api_key, fix_html_prompt(&html, &instruction)).await?;
    let fixed_html = strip_code_fences(&completion);
    tracing::info!(input_len = html.len(), output_len = fixed_html.len(), "Refined HTML");

    Ok(Json(FixHtmlResponse {
        success: true,
        fixed_html,
    }))
}
