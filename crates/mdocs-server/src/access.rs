//! Capability checks in front of the documentation routes.
//!
//! Every documentation route requires the [`DOCUMENTATION`] capability. The
//! check runs as route middleware before any handler, so an unauthorized
//! caller gets the same 403 whether or not the requested document exists.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ServerError;
use crate::state::AppState;

/// Capability required by every documentation route.
pub const DOCUMENTATION: &str = "Documentation";

/// Decides whether a request holds a named capability.
pub trait AccessControl: Send + Sync {
    /// Whether the request with these headers holds `capability`.
    fn has_capability(&self, capability: &str, headers: &HeaderMap) -> bool;
}

/// Grants every capability.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowAll;

impl AccessControl for AllowAll {
    fn has_capability(&self, _capability: &str, _headers: &HeaderMap) -> bool {
        true
    }
}

/// Grants [`DOCUMENTATION`] to requests carrying `Authorization: Bearer <token>`
/// with one of the configured tokens.
#[derive(Clone, Debug)]
pub struct BearerTokens {
    tokens: Vec<String>,
}

impl BearerTokens {
    /// Accept any of `tokens`.
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }
}

impl AccessControl for BearerTokens {
    fn has_capability(&self, capability: &str, headers: &HeaderMap) -> bool {
        if capability != DOCUMENTATION {
            return false;
        }
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .is_some_and(|token| self.tokens.iter().any(|t| t == token.trim()))
    }
}

/// Access control for a list of tokens: open when the list is empty.
pub fn access_from_tokens(tokens: &[String]) -> Arc<dyn AccessControl> {
    if tokens.is_empty() {
        Arc::new(AllowAll)
    } else {
        Arc::new(BearerTokens::new(tokens.to_vec()))
    }
}

/// Middleware rejecting requests without the documentation capability.
pub(crate) async fn require_documentation(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    if !state.access.has_capability(DOCUMENTATION, request.headers()) {
        tracing::debug!(path = %request.uri().path(), "Documentation capability denied");
        return Err(ServerError::Forbidden);
    }
    Ok(next.run(request).await)
}
