//! Mermaid diagram fence extension.
//!
//! Rewrites diagram fences into `<div class="mermaid">…</div>` so the mermaid
//! script on the page can lay them out in the browser:
//!
//! ````markdown
//! ```mermaid
//! graph LR
//!   A --- B
//! ```
//!
//! ```graph TD
//!   A --> B
//! ```
//! ````
//!
//! No diagram layout happens here. The page must load mermaid and call
//! `mermaid.initialize(...)` after the content is in the DOM.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::fence::{BoxedFenceRenderer, Fence, FenceRenderer};
use crate::state::escape_html;

/// Info strings that name a self-describing mermaid diagram.
pub const DIAGRAM_KEYWORDS: [&str; 5] = [
    "mermaid",
    "gantt",
    "sequenceDiagram",
    "classDiagram",
    "gitGraph",
];

/// `graph`, an optional direction and an optional `;`, nothing else.
static GRAPH_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^graph(?: (?:TB|BT|RL|LR|TD))?;?$").expect("invalid graph declaration regex")
});

/// Markup substituted for a literal `\n` inside diagram source.
const LINE_BREAK: &str = "<br/>";

/// Fence renderer that claims mermaid diagrams and delegates everything else.
pub struct MermaidFence {
    previous: BoxedFenceRenderer,
}

impl MermaidFence {
    /// Wrap the previously registered fence renderer.
    #[must_use]
    pub fn new(previous: BoxedFenceRenderer) -> Self {
        Self { previous }
    }

    /// Install on top of `previous`.
    ///
    /// Shaped for [`MarkdownRenderer::with_fence_extension`](crate::MarkdownRenderer::with_fence_extension).
    #[must_use]
    pub fn install(previous: BoxedFenceRenderer) -> BoxedFenceRenderer {
        Box::new(Self::new(previous))
    }
}

impl FenceRenderer for MermaidFence {
    fn render(&self, fence: &Fence<'_>, out: &mut String) {
        match diagram_source(fence) {
            Some(source) => {
                let source = source.replace("\\n", LINE_BREAK);
                write!(out, r#"<div class="mermaid">{}</div>"#, escape_html(&source)).unwrap();
            }
            None => self.previous.render(fence, out),
        }
    }
}

/// Diagram source for a fence, or `None` if the fence is not a diagram.
///
/// Keyword fences use their trimmed content. Graph declaration fences get the
/// declaration restored as the first line.
#[must_use]
pub fn diagram_source(fence: &Fence<'_>) -> Option<String> {
    if DIAGRAM_KEYWORDS.contains(&fence.info) {
        Some(fence.content.trim().to_owned())
    } else if GRAPH_DECLARATION.is_match(fence.info) {
        Some(format!("{}\n{}", fence.info, fence.content.trim()))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fence::DefaultFence;
    use pretty_assertions::assert_eq;

    fn render(info: &str, content: &str) -> String {
        let fence = MermaidFence::new(Box::new(DefaultFence));
        let mut out = String::new();
        fence.render(&Fence::new(info, content), &mut out);
        out
    }

    /// Claims `python` fences, leaves the rest to the wrapped renderer.
    struct PythonFence {
        previous: BoxedFenceRenderer,
    }

    impl FenceRenderer for PythonFence {
        fn render(&self, fence: &Fence<'_>, out: &mut String) {
            if fence.info == "python" {
                write!(out, "<pre class=\"py\">{}</pre>", escape_html(fence.content)).unwrap();
            } else {
                self.previous.render(fence, out);
            }
        }
    }

    fn install_python(previous: BoxedFenceRenderer) -> BoxedFenceRenderer {
        Box::new(PythonFence { previous })
    }

    #[test]
    fn test_graph_declaration_restored_as_first_line() {
        assert_eq!(
            render("graph LR", "A --- B\n"),
            "<div class=\"mermaid\">graph LR\nA --- B</div>"
        );
    }

    #[test]
    fn test_keyword_uses_trimmed_content() {
        assert_eq!(
            render("sequenceDiagram", "\n  Alice->>Bob: Hi\n\n"),
            "<div class=\"mermaid\">Alice-&gt;&gt;Bob: Hi</div>"
        );
    }

    #[test]
    fn test_all_keywords_claimed() {
        for keyword in DIAGRAM_KEYWORDS {
            assert!(
                render(keyword, "x").starts_with("<div class=\"mermaid\">"),
                "{keyword} not claimed"
            );
        }
    }

    #[test]
    fn test_graph_declaration_variants() {
        for info in ["graph", "graph;", "graph TB", "graph BT", "graph RL", "graph TD;"] {
            assert!(diagram_source(&Fence::new(info, "A")).is_some(), "{info}");
        }
    }

    #[test]
    fn test_graph_declaration_exact_match_only() {
        for info in ["graph XY", "graph LR extra", "mygraph LR", "graph  LR", "graphLR", "Graph LR"] {
            assert!(diagram_source(&Fence::new(info, "A")).is_none(), "{info}");
        }
    }

    #[test]
    fn test_keyword_is_not_substring_match() {
        assert!(diagram_source(&Fence::new("mermaid-like", "A")).is_none());
        assert!(diagram_source(&Fence::new("mermaid extra", "A")).is_none());
    }

    #[test]
    fn test_literal_backslash_n_becomes_line_break() {
        assert_eq!(
            render("mermaid", r"graph TD; A[first\nsecond] --> B"),
            "<div class=\"mermaid\">graph TD; A[first&lt;br/&gt;second] --&gt; B</div>"
        );
    }

    #[test]
    fn test_identical_content_renders_identically() {
        assert_eq!(render("gantt", "title A\n"), render("gantt", "title A\n"));
    }

    #[test]
    fn test_non_diagram_delegated_unchanged() {
        let mut expected = String::new();
        DefaultFence.render(&Fence::new("python", "print(1)\n"), &mut expected);

        assert_eq!(render("python", "print(1)\n"), expected);
    }

    #[test]
    fn test_install_order_does_not_matter() {
        let mermaid_first = install_python(MermaidFence::install(Box::new(DefaultFence)));
        let python_first = MermaidFence::install(install_python(Box::new(DefaultFence)));

        for (info, content) in [
            ("python", "print(1)"),
            ("graph LR", "A --- B"),
            ("rust", "fn main() {}"),
        ] {
            let fence = Fence::new(info, content);
            let mut a = String::new();
            let mut b = String::new();
            mermaid_first.render(&fence, &mut a);
            python_first.render(&fence, &mut b);
            assert_eq!(a, b, "{info}");
        }
    }

    #[test]
    fn test_double_install_still_claims_once() {
        let chain = MermaidFence::install(MermaidFence::install(Box::new(DefaultFence)));
        let mut out = String::new();
        chain.render(&Fence::new("mermaid", "A"), &mut out);
        assert_eq!(out, "<div class=\"mermaid\">A</div>");
    }
}
