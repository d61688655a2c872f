//! HTTP request handlers.

pub(crate) mod fix_html;
pub(crate) mod generate;
pub(crate) mod rephrase;
pub(crate) mod upload;

use std::sync::Arc;

use crate::error::ServerError;
use crate::state::AppState;

/// Return `value` when present and non-empty, otherwise a 400 with `message`.
pub(crate) fn require(value: Option<String>, message: &str) -> Result<String, ServerError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ServerError::BadRequest(message.to_owned()))
}

/// Run a model completion on the blocking pool.
pub(crate) async fn complete(
    state: &Arc<AppState>,
    api_key: String,
    prompt: String,
) -> Result<String, ServerError> {
    let model = Arc::clone(&state.model);
    let text = tokio::task::spawn_blocking(move || model.generate(&api_key, &prompt)).await??;
    Ok(text)
}
