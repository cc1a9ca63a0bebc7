//! Files served next to a document.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Redirect, Response};
use mdocs_site::{AssetError, Doc, DocRegistry, join_compound_id};

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET /docs/{first}/{second}.
///
/// An asset of root document `first` when that document exists, otherwise
/// the slash-less URL of folder document `first/second`, which redirects.
pub(crate) async fn get_root_asset(
    State(state): State<Arc<AppState>>,
    Path((first, second)): Path<(String, String)>,
) -> Result<Response, ServerError> {
    let registry = state.registry()?;
    if registry.find("", &first).is_none() && registry.find(&first, &second).is_some() {
        return Ok(Redirect::permanent(&state.urls.document(&first, &second)).into_response());
    }
    serve_asset(&state, &registry, "", &first, &second).await
}

/// Handle GET /docs/{folder_id}/{doc_id}/{file_name}.
pub(crate) async fn get_folder_asset(
    State(state): State<Arc<AppState>>,
    Path((folder_id, doc_id, file_name)): Path<(String, String, String)>,
) -> Result<Response, ServerError> {
    let registry = state.registry()?;
    serve_asset(&state, &registry, &folder_id, &doc_id, &file_name).await
}

/// Checks in order: document known, document file present, asset allowed,
/// asset present.
async fn serve_asset(
    state: &AppState,
    registry: &DocRegistry,
    folder_id: &str,
    doc_id: &str,
    file_name: &str,
) -> Result<Response, ServerError> {
    let doc = registry
        .find(folder_id, doc_id)
        .ok_or_else(|| ServerError::UnknownDocument(join_compound_id(folder_id, doc_id)))?;

    if !doc.path().is_file() {
        tracing::warn!(doc = %doc.id(), path = %doc.path().display(), "Documentation file missing");
        return Err(ServerError::MissingFile(doc.path().to_path_buf()));
    }

    let path = state
        .assets
        .resolve(doc, file_name)
        .map_err(|e| asset_unavailable(doc, e))?;

    let content = tokio::fs::read(&path).await.map_err(|e| {
        tracing::warn!(doc = %doc.id(), path = %path.display(), error = %e, "Failed to read asset");
        ServerError::MissingFile(path.clone())
    })?;

    let mime = mime_guess::from_path(&path).first_or_octet_stream();
    Ok(([(header::CONTENT_TYPE, mime.to_string())], content).into_response())
}

fn asset_unavailable(doc: &Doc, err: AssetError) -> ServerError {
    match err {
        AssetError::InvalidName(name) => {
            tracing::warn!(doc = %doc.id(), file = %name.escape_debug(), "Rejected asset name");
            ServerError::MissingFile(PathBuf::from(name))
        }
        AssetError::DisallowedType { file_name } => {
            tracing::warn!(doc = %doc.id(), file = %file_name, "Asset type not allowed");
            ServerError::DisallowedAssetType(file_name)
        }
        AssetError::NotFound(path) => {
            tracing::debug!(doc = %doc.id(), path = %path.display(), "Asset not found");
            ServerError::MissingFile(path)
        }
    }
}
