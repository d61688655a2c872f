//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        .route("/api/upload-image", post(handlers::upload::upload_image))
        .route("/api/rephrase", post(handlers::rephrase::rephrase))
        .route("/api/fix-html", post(handlers::fix_html::fix_html))
        .route(
            "/api/generate-document",
            post(handlers::generate::generate_document),
        );

    Router::new()
        .merge(api_routes)
        .merge(static_files::static_router(&state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::nosniff_layer())
                .layer(security::same_origin_frames_layer())
                .layer(DefaultBodyLimit::max(state.max_body_bytes)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Mutex;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use folio_gemini::{GeminiError, LanguageModel};
    use folio_renderer::RenderLimits;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::uploads::UploadStore;

    const BOUNDARY: &str = "folio-test-boundary";

    /// Canned model reply.
    enum Reply {
        Text(&'static str),
        Empty,
        Denied,
    }

    struct MockModel {
        reply: Reply,
        prompts: Mutex<Vec<(String, String)>>,
    }

    impl MockModel {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn last_prompt(&self) -> (String, String) {
            self.prompts.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl LanguageModel for MockModel {
        fn generate(&self, api_key: &str, prompt: &str) -> Result<String, GeminiError> {
            self.prompts
                .lock()
                .unwrap()
                .push((api_key.to_owned(), prompt.to_owned()));
            match self.reply {
                Reply::Text(text) => Ok(text.to_owned()),
                Reply::Empty => Err(GeminiError::EmptyResponse),
                Reply::Denied => Err(GeminiError::HttpResponse {
                    status: 403,
                    body: "API key not valid".to_owned(),
                }),
            }
        }
    }

    fn router_with(model: Arc<MockModel>, root: &Path) -> Router {
        create_router(Arc::new(AppState {
            uploads: UploadStore::new(root.join("uploads")),
            model,
            limits: RenderLimits {
                max_depth: 3,
                max_sections: 50,
            },
            static_dir: root.join("static"),
            max_body_bytes: 1024 * 1024,
        }))
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart(field: &str, filename: &str, data: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::post("/api/upload-image")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_rephrase_trims_completion() {
        let dir = tempfile::tempdir().unwrap();
        let model = MockModel::new(Reply::Text("  A polished sentence.\n"));
        let router = router_with(Arc::clone(&model), dir.path());

        let (status, body) = send(
            router,
            post_json("/api/rephrase", &json!({"text": "i like code", "api_key": "k-1"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "rephrased": "A polished sentence."}));
        let (api_key, prompt) = model.last_prompt();
        assert_eq!(api_key, "k-1");
        assert!(prompt.ends_with("\n\ni like code"));
    }

    #[tokio::test]
    async fn test_rephrase_requires_text_and_key() {
        let dir = tempfile::tempdir().unwrap();
        let model = MockModel::new(Reply::Text("unused"));

        let (status, body) = send(
            router_with(Arc::clone(&model), dir.path()),
            post_json("/api/rephrase", &json!({"text": "", "api_key": "k"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No text provided");

        let (status, body) = send(
            router_with(Arc::clone(&model), dir.path()),
            post_json("/api/rephrase", &json!({"text": "hello"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No API key provided");
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rephrase_empty_completion_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(
            router_with(MockModel::new(Reply::Empty), dir.path()),
            post_json("/api/rephrase", &json!({"text": "x", "api_key": "k"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No response from Gemini");
    }

    #[tokio::test]
    async fn test_model_failure_is_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(
            router_with(MockModel::new(Reply::Denied), dir.path()),
            post_json("/api/fix-html", &json!({"html": "<p>x</p>", "api_key": "bad"})),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "HTTP error: 403 - API key not valid");
    }

    #[tokio::test]
    async fn test_fix_html_strips_fences_and_uses_default_instruction() {
        let dir = tempfile::tempdir().unwrap();
        let model = MockModel::new(Reply::Text("```html\n<div class=\"page\">Fixed</div>\n```"));

        let (status, body) = send(
            router_with(Arc::clone(&model), dir.path()),
            post_json("/api/fix-html", &json!({"html": "<div class=\"page\">fxd</div>", "api_key": "k"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"success": true, "fixed_html": "<div class=\"page\">Fixed</div>"})
        );
        let (_, prompt) = model.last_prompt();
        assert!(prompt.contains(folio_gemini::DEFAULT_FIX_INSTRUCTION));
        assert!(prompt.contains("<div class=\"page\">fxd</div>"));
    }

    #[tokio::test]
    async fn test_fix_html_custom_instruction() {
        let dir = tempfile::tempdir().unwrap();
        let model = MockModel::new(Reply::Text("<p>ok</p>"));

        send(
            router_with(Arc::clone(&model), dir.path()),
            post_json(
                "/api/fix-html",
                &json!({"html": "<p>x</p>", "api_key": "k", "instruction": "Translate to English"}),
            ),
        )
        .await;

        assert!(model.last_prompt().1.contains("\"Translate to English\""));
    }

    #[tokio::test]
    async fn test_fix_html_requires_html() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(
            router_with(MockModel::new(Reply::Text("x")), dir.path()),
            post_json("/api/fix-html", &json!({"api_key": "k"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No HTML provided");
    }

    #[tokio::test]
    async fn test_invalid_json_is_client_error() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::post("/api/rephrase")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(router_with(MockModel::new(Reply::Empty), dir.path()), request).await;

        assert!(status.is_client_error());
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_upload_then_generate_inlines_image() {
        let dir = tempfile::tempdir().unwrap();
        let model = MockModel::new(Reply::Empty);

        let (status, body) = send(
            router_with(Arc::clone(&model), dir.path()),
            multipart("image", "photo.JPG", b"jpegdata"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let url = body["url"].as_str().unwrap().to_owned();
        assert!(url.starts_with("/static/uploads/img_"));
        assert!(url.ends_with(".jpg"));

        let document = json!({
            "template": "academic",
            "include_toc": true,
            "sections": [{
                "title": "Gallery",
                "blocks": [{"type": "image", "images": [{"url": url, "caption": "Me"}]}]
            }]
        });
        let (status, body) = send(
            router_with(model, dir.path()),
            post_json("/api/generate-document", &document),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let html = body["html"].as_str().unwrap();
        assert!(html.contains("data:image/jpeg;base64,anBlZ2RhdGE="));
        assert!(!html.contains("/static/uploads/"));
        assert!(html.contains("Table of Contents"));
    }

    #[tokio::test]
    async fn test_upload_missing_part() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(
            router_with(MockModel::new(Reply::Empty), dir.path()),
            multipart("file", "photo.png", b"x"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No image part");
    }

    #[tokio::test]
    async fn test_upload_empty_filename() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(
            router_with(MockModel::new(Reply::Empty), dir.path()),
            multipart("image", "", b"x"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No selected file");
    }

    #[tokio::test]
    async fn test_generate_unknown_template_uses_portfolio() {
        let dir = tempfile::tempdir().unwrap();
        let document = json!({
            "template": "unknown_value",
            "sections": [{"title": "About", "type": "autobiography", "content": "Hello"}]
        });

        let (status, body) = send(
            router_with(MockModel::new(Reply::Empty), dir.path()),
            post_json("/api/generate-document", &document),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let html = body["html"].as_str().unwrap();
        assert!(html.contains("section-nav-pill"));
        assert!(html.contains("<p>Hello</p>"));
    }

    #[tokio::test]
    async fn test_generate_accepts_loosely_typed_fields() {
        let dir = tempfile::tempdir().unwrap();
        let bodies = [
            json!({"sections": [{"level": "2", "title": "A"}]}),
            json!({"sections": [{"level": 2.0, "title": "A"}]}),
            json!({"include_toc": null, "sections": [{"level": 2, "title": "A"}]}),
        ];

        for document in bodies {
            let (status, body) = send(
                router_with(MockModel::new(Reply::Empty), dir.path()),
                post_json("/api/generate-document", &document),
            )
            .await;

            assert_eq!(status, StatusCode::OK, "{document}");
            assert!(body["html"].as_str().unwrap().contains("<h2"), "{document}");
        }
    }

    #[tokio::test]
    async fn test_generate_wrong_shape_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();

        let (status, body) = send(
            router_with(MockModel::new(Reply::Empty), dir.path()),
            post_json("/api/generate-document", &json!({"sections": "not a list"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_generate_rejects_deep_nesting() {
        let dir = tempfile::tempdir().unwrap();
        let document = json!({
            "sections": [{"title": "1", "subsections": [{"title": "2", "subsections": [
                {"title": "3", "subsections": [{"title": "4"}]}
            ]}]}]
        });

        let (status, body) = send(
            router_with(MockModel::new(Reply::Empty), dir.path()),
            post_json("/api/generate-document", &document),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("depth"));
    }

    #[tokio::test]
    async fn test_uploads_served_with_security_headers() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = dir.path().join("uploads");
        std::fs::create_dir_all(&uploads).unwrap();
        std::fs::write(uploads.join("a.png"), b"png").unwrap();

        let response = router_with(MockModel::new(Reply::Empty), dir.path())
            .oneshot(Request::get("/static/uploads/a.png").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        assert_eq!(response.headers()["x-frame-options"], "SAMEORIGIN");
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"png");
    }

    #[tokio::test]
    async fn test_index_and_static_assets() {
        let dir = tempfile::tempdir().unwrap();
        let static_dir = dir.path().join("static");
        std::fs::create_dir_all(static_dir.join("js")).unwrap();
        std::fs::write(static_dir.join("index.html"), "<html>editor</html>").unwrap();
        std::fs::write(static_dir.join("js/app.js"), "console.log(1)").unwrap();

        let router = router_with(MockModel::new(Reply::Empty), dir.path());
        let index = router
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(index.status(), StatusCode::OK);
        let bytes = to_bytes(index.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<html>editor</html>");

        let script = router
            .clone()
            .oneshot(Request::get("/static/js/app.js").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(script.status(), StatusCode::OK);

        let missing = router
            .oneshot(Request::get("/static/missing.css").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
