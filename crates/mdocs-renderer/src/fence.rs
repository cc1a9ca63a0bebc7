//! Fenced code block rendering.
//!
//! A [`MarkdownRenderer`](crate::MarkdownRenderer) owns exactly one
//! [`FenceRenderer`]. Extensions are installed by wrapping the renderer that
//! was registered before them: an extension claims the fences it understands
//! and hands every other fence to the wrapped renderer. Installing several
//! extensions therefore builds a chain that ends in [`DefaultFence`].

use std::fmt::Write;

use crate::state::escape_html;

/// A fenced code block as seen by a [`FenceRenderer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fence<'a> {
    /// Full info string after the opening fence, trimmed.
    pub info: &'a str,
    /// Raw block content, unescaped.
    pub content: &'a str,
}

impl<'a> Fence<'a> {
    /// Create a fence, trimming the info string.
    #[must_use]
    pub fn new(info: &'a str, content: &'a str) -> Self {
        Self {
            info: info.trim(),
            content,
        }
    }

    /// Language of the block: the first word of the info string.
    #[must_use]
    pub fn language(&self) -> Option<&'a str> {
        self.info.split_whitespace().next()
    }
}

/// Renders fenced code blocks to HTML.
pub trait FenceRenderer: Send + Sync {
    /// Append the HTML for `fence` to `out`.
    fn render(&self, fence: &Fence<'_>, out: &mut String);
}

/// Owned, type-erased fence renderer as stored by the markdown renderer.
pub type BoxedFenceRenderer = Box<dyn FenceRenderer>;

/// Built-in fence rendering: `<pre><code class="language-…">`.
///
/// The language class lets client-side syntax highlighting pick the grammar.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultFence;

impl FenceRenderer for DefaultFence {
    fn render(&self, fence: &Fence<'_>, out: &mut String) {
        if let Some(lang) = fence.language() {
            write!(
                out,
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(lang),
                escape_html(fence.content)
            )
            .unwrap();
        } else {
            write!(out, "<pre><code>{}</code></pre>", escape_html(fence.content)).unwrap();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fence_new_trims_info() {
        let fence = Fence::new("  rust  ", "fn main() {}");
        assert_eq!(fence.info, "rust");
    }

    #[test]
    fn test_fence_language_first_word() {
        assert_eq!(Fence::new("graph LR", "").language(), Some("graph"));
        assert_eq!(Fence::new("", "").language(), None);
    }

    #[test]
    fn test_default_fence_with_language() {
        let mut out = String::new();
        DefaultFence.render(&Fence::new("rust", "fn main() {}\n"), &mut out);
        assert_eq!(
            out,
            "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>"
        );
    }

    #[test]
    fn test_default_fence_without_language() {
        let mut out = String::new();
        DefaultFence.render(&Fence::new("", "a < b"), &mut out);
        assert_eq!(out, "<pre><code>a &lt; b</code></pre>");
    }
}
