//! Error types for the HTTP server.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_gemini::GeminiError;
use folio_renderer::RenderError;
use serde_json::json;

use crate::uploads::UploadError;

/// Server error type.
///
/// Every variant renders as a JSON `{"error": message}` body.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Missing or invalid request field.
    #[error("{0}")]
    BadRequest(String),

    /// Request body that could not be parsed as JSON.
    #[error("{0}")]
    Json(#[from] JsonRejection),

    /// Request that is not a readable multipart form.
    #[error("{0}")]
    MultipartRejection(#[from] MultipartRejection),

    /// Multipart stream failed while reading a field.
    #[error("{0}")]
    Multipart(#[from] MultipartError),

    /// Document rejected by renderer limits.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Language model call failed.
    #[error(transparent)]
    Model(#[from] GeminiError),

    /// Upload storage failed.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// Blocking task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Render(_) | Self::Model(GeminiError::EmptyResponse) => {
                StatusCode::BAD_REQUEST
            }
            Self::Json(JsonRejection::JsonDataError(_)) => StatusCode::BAD_REQUEST,
            Self::Json(rejection) => rejection.status(),
            Self::MultipartRejection(rejection) => rejection.status(),
            Self::Multipart(e) => e.status(),
            Self::Model(_) | Self::Upload(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (status, axum::Json(json!({"error": self.to_string()}))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ServerError::BadRequest("No text provided".to_owned()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::Render(RenderError::TooDeep { max: 8 }).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::Model(GeminiError::EmptyResponse).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::Model(GeminiError::HttpResponse {
                status: 403,
                body: "denied".to_owned()
            })
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServerError::Upload(UploadError::Io(std::io::Error::other("disk full"))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages_pass_through() {
        assert_eq!(
            ServerError::Model(GeminiError::EmptyResponse).to_string(),
            "No response from Gemini"
        );
        assert_eq!(
            ServerError::Model(GeminiError::HttpResponse {
                status: 403,
                body: "denied".to_owned()
            })
            .to_string(),
            "HTTP error: 403 - denied"
        );
    }
}
