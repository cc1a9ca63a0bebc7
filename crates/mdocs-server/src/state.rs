//! Application state.
//!
//! Shared state for all request handlers. Nothing here caches the
//! documentation: the registry is rebuilt from the source on every request.

use std::sync::Arc;

use mdocs_site::{AssetPolicy, DocRegistry, DocUrls, DocumentationSource, PageRenderer};

use crate::access::AccessControl;
use crate::error::ServerError;
use crate::layout::ClientAssets;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Provider of the name → path mapping.
    pub(crate) source: Arc<dyn DocumentationSource>,
    /// Capability checks.
    pub(crate) access: Arc<dyn AccessControl>,
    /// URL factory for the documentation routes.
    pub(crate) urls: DocUrls,
    pub(crate) renderer: PageRenderer,
    pub(crate) assets: AssetPolicy,
    /// Scripts and styles referenced by every page.
    pub(crate) client: ClientAssets,
    /// Application version for cache invalidation.
    pub(crate) version: String,
}

impl AppState {
    /// Build the registry from the current configuration.
    pub(crate) fn registry(&self) -> Result<DocRegistry, ServerError> {
        DocRegistry::load(self.source.as_ref()).map_err(|e| {
            tracing::error!(error = %e, "Failed to build documentation registry");
            ServerError::from(e)
        })
    }
}
