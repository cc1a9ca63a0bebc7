//! Markdown renderer producing HTML.

use std::fmt::Write;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::fence::{BoxedFenceRenderer, DefaultFence, Fence};
use crate::state::{
    CodeBlockState, FootnoteState, ImageState, MetadataState, TableState, escape_html,
};

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Raw YAML front matter, if the document had any. Never part of `html`.
    pub front_matter: Option<String>,
}

/// Markdown renderer with a chainable fence renderer.
///
/// # Fence Extensions
///
/// Fenced code blocks are handed to a single [`FenceRenderer`](crate::FenceRenderer),
/// initially [`DefaultFence`]. [`with_fence_extension`](Self::with_fence_extension)
/// wraps whatever is registered at that moment, so extensions compose
/// without knowing about each other.
pub struct MarkdownRenderer {
    output: String,
    list_stack: Vec<bool>,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    footnotes: FootnoteState,
    metadata: MetadataState,
    pending_image: Option<(String, String)>,
    fence: BoxedFenceRenderer,
    table_class: Option<String>,
}

impl MarkdownRenderer {
    /// Create a new renderer using [`DefaultFence`] for fenced code.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            list_stack: Vec::new(),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            footnotes: FootnoteState::default(),
            metadata: MetadataState::default(),
            pending_image: None,
            fence: Box::new(DefaultFence),
            table_class: None,
        }
    }

    /// Add a CSS class to every `<table>` element.
    #[must_use]
    pub fn with_table_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        self.table_class = (!class.is_empty()).then_some(class);
        self
    }

    /// Install a fence extension on top of the current fence renderer.
    ///
    /// `install` receives the previously registered renderer and returns its
    /// replacement, which is expected to delegate every fence it does not
    /// claim to the renderer it was given.
    ///
    /// # Example
    ///
    /// ```
    /// use mdocs_renderer::{MarkdownRenderer, MermaidFence};
    ///
    /// let mut renderer = MarkdownRenderer::new().with_fence_extension(MermaidFence::install);
    /// let result = renderer.render_markdown("```mermaid\ngraph LR\n  A --- B\n```");
    /// assert!(result.html.starts_with(r#"<div class="mermaid">"#));
    /// ```
    #[must_use]
    pub fn with_fence_extension<F>(mut self, install: F) -> Self
    where
        F: FnOnce(BoxedFenceRenderer) -> BoxedFenceRenderer,
    {
        let previous = std::mem::replace(&mut self.fence, Box::new(DefaultFence));
        self.fence = install(previous);
        self
    }

    /// Parser options: tables, footnotes, definition lists, front matter and
    /// the usual GitHub extensions.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_DEFINITION_LIST
            | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
    }

    /// Create a configured parser for the given markdown text.
    #[must_use]
    pub fn create_parser<'a>(&self, markdown: &'a str) -> Parser<'a> {
        Parser::new_ext(markdown, self.parser_options())
    }

    /// Render markdown text directly using configured parser options.
    pub fn render_markdown(&mut self, markdown: &str) -> RenderResult {
        self.render(self.create_parser(markdown))
    }

    /// Render markdown events and return the result.
    ///
    /// Each call starts from a clean document: footnote numbering, list and
    /// table state never carry over from a previous render.
    pub fn render<'a, I>(&mut self, events: I) -> RenderResult
    where
        I: Iterator<Item = Event<'a>>,
    {
        self.reset();
        for event in events {
            self.process_event(event);
        }

        RenderResult {
            html: std::mem::take(&mut self.output),
            front_matter: self.metadata.take(),
        }
    }

    fn reset(&mut self) {
        self.output.clear();
        self.list_stack.clear();
        self.code = CodeBlockState::default();
        self.table = TableState::default();
        self.image = ImageState::default();
        self.footnotes = FootnoteState::default();
        self.metadata = MetadataState::default();
        self.pending_image = None;
    }

    /// Push inline markup, unless it belongs to image alt text.
    fn push_inline(&mut self, content: &str) {
        if !self.image.is_active() {
            self.output.push_str(content);
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.raw_html(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.push_inline("<br>"),
            Event::Rule => self.output.push_str("<hr>"),
            Event::TaskListMarker(checked) => self.task_list_marker(checked),
            Event::FootnoteReference(label) => self.footnote_reference(&label),
            Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not enabled
            }
        }
    }

    #[allow(clippy::too_many_lines)]
    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => {
                write!(self.output, "<{level}>").unwrap();
            }
            Tag::BlockQuote(_) => self.output.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) => Some(info.into_string()),
                    CodeBlockKind::Indented => None,
                };
                self.code.start(info);
            }
            Tag::List(start) => {
                self.list_stack.push(start.is_some());
                match start {
                    Some(1) => self.output.push_str("<ol>"),
                    Some(n) => write!(self.output, r#"<ol start="{n}">"#).unwrap(),
                    None => self.output.push_str("<ul>"),
                }
            }
            Tag::Item => self.output.push_str("<li>"),
            Tag::FootnoteDefinition(label) => {
                let number = self.footnotes.number(&label);
                write!(
                    self.output,
                    r#"<div class="footnote-definition" id="fn-{}"><sup class="footnote-definition-label">{number}</sup>"#,
                    escape_html(&label)
                )
                .unwrap();
            }
            Tag::HtmlBlock => {}
            Tag::MetadataBlock(_) => self.metadata.start(),
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                match &self.table_class {
                    Some(class) => {
                        write!(self.output, r#"<table class="{}">"#, escape_html(class)).unwrap();
                    }
                    None => self.output.push_str("<table>"),
                }
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                write!(self.output, "<{tag}{align}>").unwrap();
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<s>"),
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
            Tag::Link {
                dest_url, title, ..
            } => {
                let link_tag = if title.is_empty() {
                    format!(r#"<a href="{}">"#, escape_html(&dest_url))
                } else {
                    format!(
                        r#"<a href="{}" title="{}">"#,
                        escape_html(&dest_url),
                        escape_html(&title)
                    )
                };
                self.push_inline(&link_tag);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text arrives as events; the tag is written in end_tag
                self.image.start();
                self.pending_image = Some((dest_url.into_string(), title.into_string()));
            }
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(level) => {
                write!(self.output, "</{level}>").unwrap();
            }
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>"),
            TagEnd::CodeBlock => self.code_block(),
            TagEnd::List(ordered) => {
                self.list_stack.pop();
                self.output
                    .push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::FootnoteDefinition => self.output.push_str("</div>"),
            TagEnd::HtmlBlock => {}
            TagEnd::MetadataBlock(_) => self.metadata.end(),
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() {
                    "</th>"
                } else {
                    "</td>"
                });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</s>"),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Image => {
                let alt = self.image.end();
                if let Some((src, title)) = self.pending_image.take() {
                    self.image_tag(&src, &alt, &title);
                }
            }
        }
    }

    /// Render a finished code block. Fenced blocks go through the fence chain.
    fn code_block(&mut self) {
        let (info, content) = self.code.end();
        match info {
            Some(info) => self.fence.render(&Fence::new(&info, &content), &mut self.output),
            None => {
                write!(self.output, "<pre><code>{}</code></pre>", escape_html(&content)).unwrap();
            }
        }
    }

    fn image_tag(&mut self, src: &str, alt: &str, title: &str) {
        let title_attr = if title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, escape_html(title))
        };
        write!(
            self.output,
            r#"<img src="{}"{title_attr} alt="{}">"#,
            escape_html(src),
            escape_html(alt)
        )
        .unwrap();
    }

    fn text(&mut self, text: &str) {
        if self.metadata.is_active() {
            self.metadata.push_str(text);
        } else if self.code.is_active() {
            self.code.push_str(text);
        } else if self.image.is_active() {
            self.image.push_str(text);
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.image.is_active() {
            self.image.push_str(code);
        } else {
            write!(self.output, "<code>{}</code>", escape_html(code)).unwrap();
        }
    }

    fn raw_html(&mut self, html: &str) {
        self.output.push_str(html);
    }

    fn soft_break(&mut self) {
        if self.image.is_active() {
            self.image.push_str(" ");
        } else {
            self.output.push('\n');
        }
    }

    fn task_list_marker(&mut self, checked: bool) {
        if checked {
            self.output
                .push_str(r#"<input type="checkbox" checked disabled>"#);
        } else {
            self.output.push_str(r#"<input type="checkbox" disabled>"#);
        }
    }

    fn footnote_reference(&mut self, label: &str) {
        let number = self.footnotes.number(label);
        let reference = format!(
            r##"<sup class="footnote-reference"><a href="#fn-{}">{number}</a></sup>"##,
            escape_html(label)
        );
        self.push_inline(&reference);
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
