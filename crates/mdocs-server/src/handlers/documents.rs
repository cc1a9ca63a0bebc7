//! Document pages.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use md5::{Digest, Md5};
use mdocs_site::{Doc, RenderError, build_navigation, join_compound_id};

use crate::error::ServerError;
use crate::layout::{self, PageContent};
use crate::state::AppState;

/// Handle GET /docs/{doc_id} by redirecting to the canonical URL.
pub(crate) async fn redirect_root_document(
    State(state): State<Arc<AppState>>,
    Path(doc_id): Path<String>,
) -> Redirect {
    Redirect::permanent(&state.urls.document("", &doc_id))
}

/// Handle GET /docs/{doc_id}/.
pub(crate) async fn get_root_document(
    State(state): State<Arc<AppState>>,
    Path(doc_id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    render_document(&state, "", &doc_id, &headers)
}

/// Handle GET /docs/{folder_id}/{doc_id}/.
pub(crate) async fn get_folder_document(
    State(state): State<Arc<AppState>>,
    Path((folder_id, doc_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    render_document(&state, &folder_id, &doc_id, &headers)
}

fn render_document(
    state: &AppState,
    folder_id: &str,
    doc_id: &str,
    headers: &HeaderMap,
) -> Result<Response, ServerError> {
    let registry = state.registry()?;
    let doc = registry
        .find(folder_id, doc_id)
        .ok_or_else(|| ServerError::UnknownDocument(join_compound_id(folder_id, doc_id)))?;

    let page = state
        .renderer
        .render(doc)
        .map_err(|e| document_unavailable(doc, e))?;

    let nav = build_navigation(&registry, &state.urls);
    let html = layout::page(
        &PageContent {
            title: &page.title,
            description: page.description.as_deref(),
            active: Some(doc.id()),
            body: &page.html,
        },
        &nav,
        &state.client,
    );

    let etag = compute_etag(&state.version, &html);
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && etag_matches(if_none_match.as_bytes(), &etag)
    {
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
    }

    Ok((
        [
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "private, max-age=60".to_owned()),
        ],
        Html(html),
    )
        .into_response())
}

/// Both read failures surface as not found; the log keeps them apart.
fn document_unavailable(doc: &Doc, err: RenderError) -> ServerError {
    match err {
        RenderError::FileNotFound(path) => {
            tracing::warn!(doc = %doc.id(), path = %path.display(), "Documentation file missing");
            ServerError::MissingFile(path)
        }
        RenderError::Io { path, source } => {
            tracing::error!(
                doc = %doc.id(),
                path = %path.display(),
                error = %source,
                "Failed to read documentation file"
            );
            ServerError::MissingFile(path)
        }
    }
}

/// Compute `ETag` from version and content.
///
/// Uses MD5 hash truncated to 64 bits (16 hex chars).
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}

/// Weak comparison of an `If-None-Match` value against `etag`.
///
/// Accepts `*`, a comma-separated list, and `W/` prefixed tags.
fn etag_matches(if_none_match: &[u8], etag: &str) -> bool {
    let Ok(value) = std::str::from_utf8(if_none_match) else {
        return false;
    };
    value.split(',').map(str::trim).any(|candidate| {
        candidate == "*" || candidate.strip_prefix("W/").unwrap_or(candidate) == etag
    })
}
