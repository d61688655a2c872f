//! Response headers that keep browsers from sniffing uploaded files or
//! framing the editor on foreign origins.

use axum::http::HeaderValue;
use axum::http::header::{HeaderName, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS};
use tower_http::set_header::SetResponseHeaderLayer;

fn fixed(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}

/// `X-Content-Type-Options: nosniff`.
pub(crate) fn nosniff_layer() -> SetResponseHeaderLayer<HeaderValue> {
    fixed(X_CONTENT_TYPE_OPTIONS, "nosniff")
}

/// `X-Frame-Options: SAMEORIGIN`.
pub(crate) fn same_origin_frames_layer() -> SetResponseHeaderLayer<HeaderValue> {
    fixed(X_FRAME_OPTIONS, "SAMEORIGIN")
}
