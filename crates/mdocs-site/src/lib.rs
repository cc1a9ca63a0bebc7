//! Document registry, navigation and page rendering for mdocs.
//!
//! The configured documentation is a flat, ordered mapping of display name to
//! markdown path. A display name may contain one `/` to place the document in
//! a folder:
//!
//! ```toml
//! [documentation]
//! "Readme" = "README.md"
//! "Developer/Code Conventions" = "docs/conventions.md"
//! ```
//!
//! This crate turns that mapping into:
//! - a [`DocRegistry`] keyed by compound id (`developer/code_conventions`)
//! - a two-level navigation tree ([`build_navigation`])
//! - rendered pages ([`PageRenderer`])
//! - resolved sibling assets ([`AssetPolicy`])
//!
//! Nothing is cached. Callers rebuild the registry from a
//! [`DocumentationSource`] whenever they need it.
//!
//! # Example
//!
//! ```
//! use mdocs_site::{DocRegistry, DocUrls, build_navigation};
//!
//! let registry = DocRegistry::build([
//!     ("A", "a.md"),
//!     ("Folder/B", "b.md"),
//!     ("Folder/C", "c.md"),
//! ])?;
//! let nav = build_navigation(&registry, &DocUrls::default());
//!
//! assert_eq!(nav.children.len(), 2);
//! assert_eq!(nav.leaves().last().map(|leaf| leaf.uri()), Some("/docs/folder/c/".to_owned()));
//! # Ok::<(), mdocs_site::SiteError>(())
//! ```

mod assets;
mod ident;
mod navigation;
mod page;
mod registry;
mod source;
mod urls;

pub use assets::{AssetError, AssetPolicy, DEFAULT_ALLOWED_EXTENSIONS};
pub use ident::{compound_id, join_compound_id, split_compound_id};
pub use navigation::{
    FOLDER_ICON, LEAF_ICON, NavFolder, NavItem, NavLeaf, NavNode, NavRoot, ROOT_LABEL, ROOT_RANK,
    build_navigation,
};
pub use page::{DEFAULT_TABLE_CLASS, FrontMatter, PageRenderer, RenderError, RenderedPage};
pub use registry::{Doc, DocRegistry, SiteError};
pub use source::{DocumentationSource, StaticSource};
pub use urls::{DocUrls, UriResolver};

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(DocRegistry: Send, Sync);
    static_assertions::assert_impl_all!(NavRoot: Send, Sync);
    static_assertions::assert_impl_all!(PageRenderer: Send, Sync);
    static_assertions::assert_impl_all!(SiteError: Send, Sync);
}
