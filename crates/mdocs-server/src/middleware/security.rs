//! Security headers middleware.
//!
//! Adds security headers to all responses:
//! - Content-Security-Policy
//! - X-Content-Type-Options
//! - X-Frame-Options

use axum::http::HeaderValue;
use axum::http::header::HeaderName;
use tower_http::set_header::SetResponseHeaderLayer;

/// Content-Security-Policy used when no external origins are needed.
const BASE_CSP: &str = "default-src 'self'; \
                        script-src 'self'; \
                        style-src 'self' 'unsafe-inline'; \
                        font-src 'self' data:; \
                        img-src 'self' data:; \
                        frame-ancestors 'none'";

/// Content-Security-Policy allowing scripts and styles from `origins`.
fn content_security_policy(origins: &[&str]) -> String {
    if origins.is_empty() {
        return BASE_CSP.to_owned();
    }
    let extra = origins.join(" ");
    format!(
        "default-src 'self'; \
         script-src 'self' {extra}; \
         style-src 'self' 'unsafe-inline' {extra}; \
         font-src 'self' data: {extra}; \
         img-src 'self' data:; \
         frame-ancestors 'none'"
    )
}

/// Create layer that adds Content-Security-Policy header.
pub(crate) fn csp_layer(origins: &[&str]) -> SetResponseHeaderLayer<HeaderValue> {
    let value = HeaderValue::from_str(&content_security_policy(origins)).unwrap_or_else(|_| {
        tracing::warn!(?origins, "Invalid script origin, falling back to same-origin CSP");
        HeaderValue::from_static(BASE_CSP)
    });
    SetResponseHeaderLayer::overriding(HeaderName::from_static("content-security-policy"), value)
}

/// Create layer that adds X-Content-Type-Options header.
pub(crate) fn content_type_options_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    )
}

/// Create layer that adds X-Frame-Options header.
pub(crate) fn frame_options_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    )
}
