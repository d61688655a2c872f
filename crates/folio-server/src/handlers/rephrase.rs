//! Text rephrasing endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use folio_gemini::rephrase_prompt;
use serde::{Deserialize, Serialize};

use super::{complete, require};
use crate::error::ServerError;
use crate::state::AppState;

/// Request for POST /api/rephrase.
#[derive(Deserialize, Default)]
#[serde(default)]
pub(crate) struct RephraseRequest {
    text: Option<String>,
    api_key: Option<String>,
}

/// Response for POST /api/rephrase.
#[derive(Serialize)]
pub(crate) struct RephraseResponse {
    success: bool,
    rephrased: String,
}

/// Handle POST /api/rephrase.
pub(crate) async fn rephrase(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RephraseRequest>, JsonRejection>,
) -> Result<Json<RephraseResponse>, ServerError> {
    let Json(request) = payload?;
    let text = require(request.text, "No text provided")?;
    let api_key = require(request.api_key, "No API key provided")?;

    let rephrased = complete(&state, api_key, rephrase_prompt(&text)).await?;
    tracing::info!(input_len = text.len(), output_len = rephrased.len(), "Rephrased text");

    Ok(Json(RephraseResponse {
        success: true,
        rephrased: rephrased.trim().to_owned(),
    }))
}
