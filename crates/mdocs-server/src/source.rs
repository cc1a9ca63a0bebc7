//! Documentation mapping read from `mdocs.toml` on every request.

use std::path::PathBuf;

use indexmap::IndexMap;
use mdocs_config::Config;
use mdocs_site::{DocumentationSource, SiteError};

/// Re-reads the `[documentation]` table of a config file each time it is asked.
#[derive(Clone, Debug)]
pub struct ConfigFileSource {
    path: PathBuf,
}

impl ConfigFileSource {
    /// Read from the config file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentationSource for ConfigFileSource {
    fn documentation(&self) -> Result<IndexMap<String, PathBuf>, SiteError> {
        Config::load_documentation(&self.path).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to read documentation config");
            SiteError::Source(Box::new(e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_reflects_file_changes() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("mdocs.toml");
        std::fs::write(&config, "[documentation]\n\"A\" = \"a.md\"\n").unwrap();
        let source = ConfigFileSource::new(&config);

        let first: Vec<String> = source.documentation().unwrap().into_keys().collect();
        assert_eq!(first, vec!["A"]);

        std::fs::write(&config, "[documentation]\n\"B\" = \"b.md\"\n\"A\" = \"a.md\"\n").unwrap();
        let second = source.documentation().unwrap();
        assert_eq!(second.keys().collect::<Vec<_>>(), vec!["B", "A"]);
        assert_eq!(second["B"], dir.path().join("b.md"));
    }

    #[test]
    fn test_missing_file_is_source_error() {
        let dir = TempDir::new().unwrap();
        let source = ConfigFileSource::new(dir.path().join("missing.toml"));
        assert!(matches!(source.documentation(), Err(SiteError::Source(_))));
    }
}
