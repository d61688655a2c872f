//! Static file serving.
//!
//! `/static/uploads/*` is served from the upload directory and every other
//! `/static/*` path from the static directory, so uploads may live outside
//! the static tree. `/` serves the editor's `index.html`.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

use crate::state::AppState;
use crate::uploads::UPLOAD_URL_PREFIX;

const STATIC_PREFIX: &str = "/static";

/// Create router for static file serving.
pub(crate) fn static_router(state: &AppState) -> Router<Arc<AppState>> {
    Router::new()
        .route_service("/", ServeFile::new(state.static_dir.join("index.html")))
        .route("/static/{*path}", get(serve_static))
}

/// Serve a file below `/static`, choosing the root by path prefix.
async fn serve_static(State(state): State<Arc<AppState>>, mut req: Request<Body>) -> Response {
    let path = req.uri().path().to_owned();
    let (root, rest) = match path.strip_prefix(UPLOAD_URL_PREFIX) {
        Some(rest) => (state.uploads.dir().to_path_buf(), format!("/{rest}")),
        None => (
            state.static_dir.clone(),
            path.strip_prefix(STATIC_PREFIX).unwrap_or(&path).to_owned(),
        ),
    };

    let Ok(uri) = rest.parse::<Uri>() else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    *req.uri_mut() = uri;

    match ServeDir::new(root).oneshot(req).await {
        Ok(response) => response.into_response(),
        Err(infallible) => match infallible {},
    }
}
