//! Two-level navigation tree.
//!
//! Root documents become leaves of the root, foldered documents are grouped
//! under one folder node per folder id. Folders appear where their first
//! document appears in the configuration.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::registry::{Doc, DocRegistry};
use crate::urls::{DocUrls, UriResolver};

/// Label of the navigation root.
pub const ROOT_LABEL: &str = "Documentation";
/// Menu rank of the navigation root.
pub const ROOT_RANK: u32 = 100;
/// Icon for the root and folder nodes.
pub const FOLDER_ICON: &str = "book";
/// Icon for document leaves.
pub const LEAF_ICON: &str = "file";

/// Root of the navigation tree.
#[derive(Debug)]
pub struct NavRoot {
    pub label: String,
    pub icon: String,
    pub rank: u32,
    /// URL of the listing page.
    pub uri: String,
    pub children: Vec<NavNode>,
}

/// Direct child of the root.
#[derive(Debug)]
pub enum NavNode {
    Folder(NavFolder),
    Leaf(NavLeaf),
}

/// Folder grouping the documents that share a folder id.
#[derive(Debug)]
pub struct NavFolder {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub description: String,
    pub children: Vec<NavLeaf>,
}

/// Menu entry for a single document.
pub struct NavLeaf {
    /// Compound id of the document.
    pub id: String,
    pub label: String,
    pub icon: String,
    pub description: String,
    uri: UriResolver,
}

impl NavLeaf {
    fn for_doc(doc: &Doc, urls: &DocUrls) -> Self {
        let (folder_id, doc_id) = doc.ids();
        Self {
            id: doc.id().to_owned(),
            label: doc.page_name().to_owned(),
            icon: LEAF_ICON.to_owned(),
            description: format!("Documentation for {}", doc.name()),
            uri: urls.document_resolver(folder_id, doc_id),
        }
    }

    /// Canonical URL of the document.
    pub fn uri(&self) -> String {
        (self.uri)()
    }

    fn to_item(&self) -> NavItem {
        NavItem {
            label: self.label.clone(),
            icon: self.icon.clone(),
            description: self.description.clone(),
            uri: Some(self.uri()),
            children: Vec::new(),
        }
    }
}

impl fmt::Debug for NavLeaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavLeaf")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("uri", &self.uri())
            .finish_non_exhaustive()
    }
}

impl NavFolder {
    fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_owned(),
            label: name.to_owned(),
            icon: FOLDER_ICON.to_owned(),
            description: format!("Documentation Folder {name}"),
            children: Vec::new(),
        }
    }

    fn to_item(&self) -> NavItem {
        NavItem {
            label: self.label.clone(),
            icon: self.icon.clone(),
            description: self.description.clone(),
            uri: None,
            children: self.children.iter().map(NavLeaf::to_item).collect(),
        }
    }
}

impl NavNode {
    /// Display label of the node.
    pub fn label(&self) -> &str {
        match self {
            Self::Folder(folder) => &folder.label,
            Self::Leaf(leaf) => &leaf.label,
        }
    }

    fn to_item(&self) -> NavItem {
        match self {
            Self::Folder(folder) => folder.to_item(),
            Self::Leaf(leaf) => leaf.to_item(),
        }
    }
}

impl NavRoot {
    /// Every leaf in menu order.
    pub fn leaves(&self) -> impl Iterator<Item = &NavLeaf> {
        self.children.iter().flat_map(|node| match node {
            NavNode::Folder(folder) => folder.children.iter().collect::<Vec<_>>(),
            NavNode::Leaf(leaf) => vec![leaf],
        })
    }

    /// Resolve every URI into a serializable tree.
    pub fn to_item(&self) -> NavItem {
        NavItem {
            label: self.label.clone(),
            icon: self.icon.clone(),
            description: String::new(),
            uri: Some(self.uri.clone()),
            children: self.children.iter().map(NavNode::to_item).collect(),
        }
    }
}

/// Navigation node with its URL resolved, as sent to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: String,
    pub icon: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Target URL; `None` for folders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

/// Build the navigation tree for `registry` in configuration order.
pub fn build_navigation(registry: &DocRegistry, urls: &DocUrls) -> NavRoot {
    let mut children = Vec::new();
    let mut folders: HashMap<&str, usize> = HashMap::new();

    for doc in registry.iter() {
        let (folder_id, _) = doc.ids();
        let leaf = NavLeaf::for_doc(doc, urls);

        if folder_id.is_empty() {
            children.push(NavNode::Leaf(leaf));
            continue;
        }

        let index = *folders.entry(folder_id).or_insert_with(|| {
            children.push(NavNode::Folder(NavFolder::new(folder_id, doc.folder_name())));
            children.len() - 1
        });
        if let Some(NavNode::Folder(folder)) = children.get_mut(index) {
            folder.children.push(leaf);
        }
    }

    NavRoot {
        label: ROOT_LABEL.to_owned(),
        icon: FOLDER_ICON.to_owned(),
        rank: ROOT_RANK,
        uri: urls.listing(),
        children,
    }
}
