//! Client bootstrap script served at [`SCRIPT_PATH`].

use axum::Router;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;

/// URL of the client bootstrap script.
pub(crate) const SCRIPT_PATH: &str = "/static/mdocs.js";

/// Initialises mermaid and highlight.js once the page has loaded.
const SCRIPT: &str = include_str!("../static/mdocs.js");

/// Router serving the client script.
pub(crate) fn static_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route(SCRIPT_PATH, get(serve_script))
}

async fn serve_script() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/javascript; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        SCRIPT,
    )
}
