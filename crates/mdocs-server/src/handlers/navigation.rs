//! Navigation API endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use mdocs_site::{NavItem, build_navigation};

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET /api/navigation.
pub(crate) async fn get_navigation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<NavItem>, ServerError> {
    let registry = state.registry()?;
    Ok(Json(build_navigation(&registry, &state.urls).to_item()))
}
