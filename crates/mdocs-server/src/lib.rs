//! HTTP server for mdocs documentation pages.
//!
//! Serves, under `/docs`:
//! - the listing of all configured documents
//! - rendered document pages with a navigation sidebar
//! - allow-listed files stored next to a document (images, text files)
//!
//! plus the navigation tree as JSON at `/api/navigation` and the client
//! bootstrap script at `/static/mdocs.js`.
//!
//! Every route except the client script requires the
//! [`DOCUMENTATION`] capability, checked before any lookup.
//!
//! # Embedding
//!
//! [`docs_router`] returns a plain [`axum::Router`] that a host application can
//! merge into its own router, supplying its own [`DocumentationSource`] and
//! [`AccessControl`]:
//!
//! ```no_run
//! use std::sync::Arc;
//! use mdocs_server::{AllowAll, ServerConfig, docs_router};
//! use mdocs_site::StaticSource;
//!
//! let docs = docs_router(
//!     &ServerConfig::default(),
//!     Arc::new(StaticSource::new([("Readme", "README.md")])),
//!     Arc::new(AllowAll),
//! );
//! let app = axum::Router::new().merge(docs);
//! # let _ = app;
//! ```

mod access;
mod app;
mod error;
mod handlers;
mod layout;
mod middleware;
mod source;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexMap;
use mdocs_site::{AssetPolicy, DocUrls, DocumentationSource, PageRenderer, StaticSource};

pub use access::{AccessControl, AllowAll, BearerTokens, DOCUMENTATION, access_from_tokens};
pub use error::ServerError;
pub use layout::ClientAssets;
pub use source::ConfigFileSource;

use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Config file re-read on every request for the documentation mapping.
    ///
    /// When `None`, [`documentation`](Self::documentation) is served as is.
    pub config_path: Option<PathBuf>,
    /// Documentation mapping used without a config file.
    pub documentation: IndexMap<String, PathBuf>,
    /// Asset extensions that may be served, with leading dot.
    pub allowed_extensions: Vec<String>,
    /// Bearer tokens; empty means open access.
    pub tokens: Vec<String>,
    /// CSS class for rendered tables.
    pub table_class: String,
    /// Client-side scripts and stylesheet.
    pub client: ClientAssets,
    /// Application version (for `ETag`s).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let config = mdocs_config::Config::default();
        server_config_from_config(&config, String::new())
    }
}

/// Build the documentation router.
///
/// `source` is consulted on every request; nothing is cached.
pub fn docs_router(
    config: &ServerConfig,
    source: Arc<dyn DocumentationSource>,
    access: Arc<dyn AccessControl>,
) -> axum::Router {
    let state = Arc::new(AppState {
        source,
        access,
        urls: DocUrls::default(),
        renderer: PageRenderer::new(config.table_class.clone()),
        assets: AssetPolicy::new(config.allowed_extensions.iter().cloned()),
        client: config.client.clone(),
        version: config.version.clone(),
    });
    app::create_router(state)
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let source: Arc<dyn DocumentationSource> = match &config.config_path {
        Some(path) => Arc::new(ConfigFileSource::new(path.clone())),
        None => Arc::new(StaticSource::new(config.documentation.clone())),
    };
    let access = access_from_tokens(&config.tokens);
    let app = docs_router(&config, source, access);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from mdocs config.
#[must_use]
pub fn server_config_from_config(config: &mdocs_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        config_path: config.config_path.clone(),
        documentation: config.documentation_resolved.clone(),
        allowed_extensions: config.assets.allowed_extensions.clone(),
        tokens: config.access.tokens.clone(),
        table_class: config.render.table_class.clone(),
        client: ClientAssets::from(&config.client),
        version,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    static_assertions::assert_impl_all!(ServerConfig: Send, Sync);
    static_assertions::assert_impl_all!(ConfigFileSource: Send, Sync);

    #[test]
    fn test_default_server_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 7979);
        assert_eq!(config.allowed_extensions, vec![".txt", ".png", ".gif", ".jpg", ".jpeg"]);
        assert_eq!(config.table_class, "table");
        assert!(config.tokens.is_empty());
        assert!(config.config_path.is_none());
    }
}
