//! Where the display name → path mapping comes from.

use std::path::PathBuf;

use indexmap::IndexMap;

use crate::registry::SiteError;

/// Provider of the documentation mapping.
///
/// Consulted on every registry build, so implementations should return the
/// current configuration rather than a snapshot taken at startup.
pub trait DocumentationSource: Send + Sync {
    /// Ordered mapping of display name to markdown path.
    fn documentation(&self) -> Result<IndexMap<String, PathBuf>, SiteError>;
}

/// Fixed in-memory mapping.
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    entries: IndexMap<String, PathBuf>,
}

impl StaticSource {
    /// Create a source from `(display name, path)` pairs.
    pub fn new<I, N, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: Into<PathBuf>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, path)| (name.into(), path.into()))
                .collect(),
        }
    }
}

impl DocumentationSource for StaticSource {
    fn documentation(&self) -> Result<IndexMap<String, PathBuf>, SiteError> {
        Ok(self.entries.clone())
    }
}
