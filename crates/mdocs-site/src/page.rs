//! Reading and rendering a single document.

use std::path::PathBuf;

use mdocs_renderer::{MarkdownRenderer, MermaidFence};
use serde::Deserialize;

use crate::registry::Doc;

/// Default CSS class placed on rendered `<table>` elements.
pub const DEFAULT_TABLE_CLASS: &str = "table";

/// Error returned when a document cannot be rendered.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Backing markdown file does not exist.
    #[error("Source file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    /// Backing file exists but could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fields recognised in a document's YAML front matter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl FrontMatter {
    /// Parse front matter, ignoring it with a warning when it is malformed.
    fn parse(raw: &str, doc: &Doc) -> Self {
        match serde_yaml::from_str::<Option<Self>>(raw) {
            Ok(front_matter) => front_matter.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(doc = %doc.id(), error = %e, "Ignoring invalid front matter");
                Self::default()
            }
        }
    }
}

/// A rendered document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedPage {
    /// Front matter title, or the document's page name.
    pub title: String,
    pub description: Option<String>,
    pub html: String,
    pub source_path: PathBuf,
}

/// Renders documents with tables, footnotes, definition lists and diagrams.
#[derive(Clone, Debug)]
pub struct PageRenderer {
    table_class: String,
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_CLASS)
    }
}

impl PageRenderer {
    /// Create a renderer that tags tables with `table_class`.
    pub fn new(table_class: impl Into<String>) -> Self {
        Self {
            table_class: table_class.into(),
        }
    }

    /// Read and render `doc`.
    ///
    /// Existence is checked here, not when the registry is built, so a file
    /// removed after startup is reported as [`RenderError::FileNotFound`].
    pub fn render(&self, doc: &Doc) -> Result<RenderedPage, RenderError> {
        let path = doc.path();
        if !path.is_file() {
            return Err(RenderError::FileNotFound(path.to_path_buf()));
        }

        let markdown = std::fs::read_to_string(path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => RenderError::FileNotFound(path.to_path_buf()),
            _ => RenderError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        tracing::debug!(doc = %doc.id(), path = %path.display(), "Rendering document");
        Ok(self.render_markdown(doc, &markdown))
    }

    /// Render already loaded markdown for `doc`.
    pub fn render_markdown(&self, doc: &Doc, markdown: &str) -> RenderedPage {
        let result = MarkdownRenderer::new()
            .with_table_class(self.table_class.clone())
            .with_fence_extension(MermaidFence::install)
            .render_markdown(markdown);

        let front_matter = result
            .front_matter
            .as_deref()
            .map(|raw| FrontMatter::parse(raw, doc))
            .unwrap_or_default();

        RenderedPage {
            title: front_matter
                .title
                .unwrap_or_else(|| doc.page_name().to_owned()),
            description: front_matter.description,
            html: result.html,
            source_path: doc.path().to_path_buf(),
        }
    }
}
