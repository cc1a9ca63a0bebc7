//! Document registry built from the configured name → path mapping.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::ident::{compound_id, join_compound_id, split_compound_id};
use crate::source::DocumentationSource;

/// Error raised while building the registry.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// A display name has more than one folder level.
    #[error("Only one folder level allowed: {name}")]
    Configuration {
        /// The offending display name.
        name: String,
    },
    /// The documentation mapping could not be obtained.
    #[error("Documentation source unavailable: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A configured markdown document.
///
/// The compound id is derived from the display name on construction and
/// never changes. The path is not checked; it may not exist yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Doc {
    id: String,
    name: String,
    path: PathBuf,
}

impl Doc {
    /// Create a document, deriving its compound id from `name`.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let name = name.into();
        Self {
            id: compound_id(&name),
            name,
            path: path.into(),
        }
    }

    /// Compound id (`folder_id/doc_id` or `doc_id`).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name as configured.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path to the markdown file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `(folder_id, doc_id)`; the folder id is empty for root documents.
    pub fn ids(&self) -> (&str, &str) {
        split_compound_id(&self.id)
    }

    /// Name of the folder this doc is in, empty for root documents.
    pub fn folder_name(&self) -> &str {
        self.split_name().map_or("", |(folder, _)| folder)
    }

    /// Page title for menus: the display name without its folder.
    pub fn page_name(&self) -> &str {
        self.split_name().map_or(self.name.as_str(), |(_, page)| page)
    }

    /// Split the display name, but only when the id has a folder too.
    fn split_name(&self) -> Option<(&str, &str)> {
        if self.id.contains('/') {
            self.name.split_once('/')
        } else {
            None
        }
    }
}

/// Ordered mapping from compound id to [`Doc`].
///
/// Built fresh from the configuration for every request; nothing is cached.
#[derive(Clone, Debug, Default)]
pub struct DocRegistry {
    docs: IndexMap<String, Doc>,
}

impl DocRegistry {
    /// Build the registry from `(display name, path)` entries in order.
    ///
    /// When two names derive the same compound id the later entry replaces
    /// the earlier one but keeps its position.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Configuration`] for a name with more than one `/`.
    pub fn build<I, N, P>(entries: I) -> Result<Self, SiteError>
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: Into<PathBuf>,
    {
        let mut docs = IndexMap::new();
        for (name, path) in entries {
            let name = name.into();
            if name.matches('/').count() > 1 {
                return Err(SiteError::Configuration { name });
            }
            let doc = Doc::new(name, path);
            if let Some(previous) = docs.insert(doc.id.clone(), doc) {
                tracing::warn!(
                    id = %previous.id,
                    replaced = %previous.name,
                    "Duplicate documentation id, later entry wins"
                );
            }
        }
        Ok(Self { docs })
    }

    /// Build the registry from the current state of `source`.
    ///
    /// # Errors
    ///
    /// Returns the source's error, or [`SiteError::Configuration`].
    pub fn load(source: &dyn DocumentationSource) -> Result<Self, SiteError> {
        Self::build(source.documentation()?)
    }

    /// Look up a document by compound id.
    pub fn get(&self, id: &str) -> Option<&Doc> {
        self.docs.get(id)
    }

    /// Look up a document by its URL parts.
    pub fn find(&self, folder_id: &str, doc_id: &str) -> Option<&Doc> {
        self.get(&join_compound_id(folder_id, doc_id))
    }

    /// Documents in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &Doc> {
        self.docs.values()
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether no documents are configured.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}
