//! Canonical URLs for the documentation pages.

use std::sync::Arc;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters escaped inside a single URL path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Zero-argument function returning a page's canonical URL.
pub type UriResolver = Arc<dyn Fn() -> String + Send + Sync>;

/// URL factory for documentation routes mounted under a prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocUrls {
    prefix: String,
}

impl Default for DocUrls {
    fn default() -> Self {
        Self::new("/docs")
    }
}

impl DocUrls {
    /// Create a factory for routes mounted at `prefix` (e.g. `/docs`).
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            prefix: prefix.trim_end_matches('/').to_owned(),
        }
    }

    /// URL of the listing page.
    pub fn listing(&self) -> String {
        format!("{}/", self.prefix)
    }

    /// Canonical URL of a document; `folder_id` is empty for root documents.
    pub fn document(&self, folder_id: &str, doc_id: &str) -> String {
        let doc = utf8_percent_encode(doc_id, SEGMENT);
        if folder_id.is_empty() {
            format!("{}/{doc}/", self.prefix)
        } else {
            let folder = utf8_percent_encode(folder_id, SEGMENT);
            format!("{}/{folder}/{doc}/", self.prefix)
        }
    }

    /// Resolver bound to one document.
    ///
    /// The ids are copied into the closure, so resolvers built in a loop each
    /// return their own document's URL.
    pub fn document_resolver(&self, folder_id: &str, doc_id: &str) -> UriResolver {
        let urls = self.clone();
        let folder_id = folder_id.to_owned();
        let doc_id = doc_id.to_owned();
        Arc::new(move || urls.document(&folder_id, &doc_id))
    }
}
