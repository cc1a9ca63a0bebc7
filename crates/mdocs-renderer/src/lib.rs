//! Markdown to HTML rendering for mdocs.
//!
//! [`MarkdownRenderer`] walks `pulldown-cmark` events and writes HTML. Tables,
//! footnotes, definition lists and YAML front matter are enabled; front
//! matter is returned separately and never rendered.
//!
//! Fenced code blocks go through a chain of [`FenceRenderer`]s. The chain
//! starts at [`DefaultFence`] and every extension wraps the renderer that was
//! registered before it. [`MermaidFence`] is such an extension: it turns
//! diagram fences into `<div class="mermaid">` and passes the rest on.
//!
//! # Example
//!
//! ```
//! use mdocs_renderer::{MarkdownRenderer, MermaidFence};
//!
//! let markdown = "| A |\n|---|\n| 1 |\n\n```graph LR\nA --- B\n```";
//! let result = MarkdownRenderer::new()
//!     .with_table_class("table")
//!     .with_fence_extension(MermaidFence::install)
//!     .render_markdown(markdown);
//!
//! assert!(result.html.contains(r#"<table class="table">"#));
//! assert!(result.html.contains("<div class=\"mermaid\">graph LR\nA --- B</div>"));
//! ```

mod fence;
mod mermaid;
mod renderer;
mod state;

pub use fence::{BoxedFenceRenderer, DefaultFence, Fence, FenceRenderer};
pub use mermaid::{DIAGRAM_KEYWORDS, MermaidFence, diagram_source};
pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::escape_html;
