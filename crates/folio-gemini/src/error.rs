//! Error types for the Gemini client.

/// Error from a language model call.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    /// The request never produced a response (connect failure, timeout).
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] ureq::Error),

    /// Gemini answered with a non-success status, e.g. a rejected API key.
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        status: u16,
        /// Raw error body from the API.
        body: String,
    },

    /// The model returned no text.
    #[error("No response from Gemini")]
    EmptyResponse,

    /// The response body was not the expected JSON.
    #[error("Malformed Gemini response: {0}")]
    Json(#[from] serde_json::Error),
}
