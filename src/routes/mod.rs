//! HTTP route handlers and router assembly.
//!
//! Every route sits behind the same pipeline: the request ID span is the
//! outermost layer, the header-hardening layers decorate every response on the
//! way out, and the rate limiter rejects excess requests before they reach a
//! handler. Content-Security-Policy is intentionally not set; this service
//! serves no HTML.

pub mod health;
pub mod home;

use axum::{middleware, routing::get, Router};
use http::header::{self, HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::middleware::{rate_limit_layer, request_id_layer};
use crate::state::AppState;

/// Protective response headers applied to every route.
fn hardening_headers() -> [(HeaderName, HeaderValue); 9] {
    [
        (
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ),
        (
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ),
        (header::X_XSS_PROTECTION, HeaderValue::from_static("0")),
        (
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ),
        (
            HeaderName::from_static("x-dns-prefetch-control"),
            HeaderValue::from_static("off"),
        ),
        (
            HeaderName::from_static("x-download-options"),
            HeaderValue::from_static("noopen"),
        ),
        (
            HeaderName::from_static("x-permitted-cross-domain-policies"),
            HeaderValue::from_static("none"),
        ),
        (
            HeaderName::from_static("cross-origin-opener-policy"),
            HeaderValue::from_static("same-origin"),
        ),
        (
            HeaderName::from_static("cross-origin-resource-policy"),
            HeaderValue::from_static("same-origin"),
        ),
    ]
}

/// Creates the Axum router with all routes and the security pipeline.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(home::index))
        .route("/health", get(health::health))
        .with_state(state.clone())
        // Rate limiter - rejects excess requests before they reach a handler
        .layer(middleware::from_fn_with_state(state, rate_limit_layer));

    // Header hardening - wraps the rate limiter so every response gets the
    // headers, including 429s
    for (name, value) in hardening_headers() {
        router = router.layer(SetResponseHeaderLayer::if_not_present(name, value));
    }

    router
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
