//! HTML page layout.
//!
//! Every page carries the navigation sidebar and loads the diagram and
//! highlighting scripts followed by `/static/mdocs.js`, which initialises them.

use std::fmt::Write;

use mdocs_renderer::escape_html;
use mdocs_site::{DocRegistry, DocUrls, NavLeaf, NavNode, NavRoot};

use crate::static_files::SCRIPT_PATH;

/// Client-side scripts and stylesheet referenced by the pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientAssets {
    pub mermaid_url: String,
    pub highlight_js_url: String,
    pub highlight_css_url: String,
}

impl From<&mdocs_config::ClientConfig> for ClientAssets {
    fn from(config: &mdocs_config::ClientConfig) -> Self {
        Self {
            mermaid_url: config.mermaid_url.clone(),
            highlight_js_url: config.highlight_js_url.clone(),
            highlight_css_url: config.highlight_css_url.clone(),
        }
    }
}

impl Default for ClientAssets {
    fn default() -> Self {
        Self::from(&mdocs_config::ClientConfig::default())
    }
}

impl ClientAssets {
    /// Distinct `scheme://host` origins of the external URLs.
    pub fn origins(&self) -> Vec<&str> {
        let mut origins: Vec<&str> = Vec::new();
        for url in [
            &self.mermaid_url,
            &self.highlight_js_url,
            &self.highlight_css_url,
        ] {
            if let Some(origin) = origin(url)
                && !origins.contains(&origin)
            {
                origins.push(origin);
            }
        }
        origins
    }
}

/// `scheme://host[:port]` of an absolute http(s) URL.
fn origin(url: &str) -> Option<&str> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let host_len = rest.find('/').unwrap_or(rest.len());
    Some(&url[..url.len() - rest.len() + host_len])
}

/// Content that goes into the page frame.
pub(crate) struct PageContent<'a> {
    pub(crate) title: &'a str,
    pub(crate) description: Option<&'a str>,
    /// Compound id of the document being shown, if any.
    pub(crate) active: Option<&'a str>,
    pub(crate) body: &'a str,
}

/// Full HTML document with sidebar.
pub(crate) fn page(content: &PageContent<'_>, nav: &NavRoot, client: &ClientAssets) -> String {
    let mut html = String::with_capacity(content.body.len() + 2048);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    writeln!(
        html,
        "<title>{} - {}</title>",
        escape_html(content.title),
        escape_html(&nav.label)
    )
    .unwrap();
    if let Some(description) = content.description {
        writeln!(
            html,
            r#"<meta name="description" content="{}">"#,
            escape_html(description)
        )
        .unwrap();
    }
    writeln!(
        html,
        r#"<link rel="stylesheet" href="{}">"#,
        escape_html(&client.highlight_css_url)
    )
    .unwrap();
    for script in [
        client.mermaid_url.as_str(),
        client.highlight_js_url.as_str(),
        SCRIPT_PATH,
    ] {
        writeln!(html, r#"<script src="{}" defer></script>"#, escape_html(script)).unwrap();
    }
    html.push_str("</head>\n<body>\n");
    html.push_str(&sidebar(nav, content.active));
    writeln!(
        html,
        "<main class=\"mdocs-content\">\n{}\n</main>",
        content.body
    )
    .unwrap();
    html.push_str("</body>\n</html>\n");
    html
}

/// Navigation sidebar; the active document's link is marked.
fn sidebar(nav: &NavRoot, active: Option<&str>) -> String {
    let mut html = String::from("<nav class=\"mdocs-nav\">\n");
    writeln!(
        html,
        r#"<a class="mdocs-nav-root" href="{}">{}</a>"#,
        escape_html(&nav.uri),
        escape_html(&nav.label)
    )
    .unwrap();
    html.push_str("<ul>\n");
    for node in &nav.children {
        match node {
            NavNode::Leaf(leaf) => push_leaf(&mut html, leaf, active),
            NavNode::Folder(folder) => {
                writeln!(
                    html,
                    r#"<li class="mdocs-nav-folder" title="{}"><span>{}</span>"#,
                    escape_html(&folder.description),
                    escape_html(&folder.label)
                )
                .unwrap();
                html.push_str("<ul>\n");
                for leaf in &folder.children {
                    push_leaf(&mut html, leaf, active);
                }
                html.push_str("</ul>\n</li>\n");
            }
        }
    }
    html.push_str("</ul>\n</nav>\n");
    html
}

fn push_leaf(html: &mut String, leaf: &NavLeaf, active: Option<&str>) {
    let class = if active == Some(leaf.id.as_str()) {
        " class=\"active\""
    } else {
        ""
    };
    writeln!(
        html,
        r#"<li><a{class} href="{}" title="{}">{}</a></li>"#,
        escape_html(&leaf.uri()),
        escape_html(&leaf.description),
        escape_html(&leaf.label)
    )
    .unwrap();
}

/// Bullet list of every document linking to its canonical URL.
pub(crate) fn listing(registry: &DocRegistry, urls: &DocUrls) -> String {
    let mut html = String::from("<h1>Documentation</h1>\n<ul class=\"mdocs-listing\">\n");
    for doc in registry.iter() {
        let (folder_id, doc_id) = doc.ids();
        writeln!(
            html,
            r#"<li><a href="{}">{}</a></li>"#,
            escape_html(&urls.document(folder_id, doc_id)),
            escape_html(doc.name())
        )
        .unwrap();
    }
    html.push_str("</ul>");
    html
}
