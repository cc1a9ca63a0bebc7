//! Listing of all documents.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use mdocs_site::build_navigation;

use crate::error::ServerError;
use crate::layout::{self, PageContent};
use crate::state::AppState;

/// Handle GET /docs and /docs/.
pub(crate) async fn get_listing(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ServerError> {
    let registry = state.registry()?;
    let nav = build_navigation(&registry, &state.urls);
    let body = layout::listing(&registry, &state.urls);

    Ok(Html(layout::page(
        &PageContent {
            title: "All documents",
            description: None,
            active: None,
            body: &body,
        },
        &nav,
        &state.client,
    )))
}
