//! Files served next to a document.
//!
//! An asset is a sibling of the document's markdown file. Only a single
//! path segment is accepted as the file name, and only allow-listed
//! extensions are served.

use std::path::{Path, PathBuf};

use crate::registry::Doc;

/// Extensions served when nothing else is configured.
pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 5] = [".txt", ".png", ".gif", ".jpg", ".jpeg"];

/// Why an asset request was refused.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// File name is not a single plain path segment.
    #[error("Invalid asset name: {0:?}")]
    InvalidName(String),
    /// Extension is not on the allow-list.
    #[error("Asset type not allowed: {file_name}")]
    DisallowedType { file_name: String },
    /// Allowed, but no such file next to the document.
    #[error("Asset not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Allow-list of servable asset extensions (with leading dot).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetPolicy {
    allowed: Vec<String>,
}

impl Default for AssetPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_EXTENSIONS)
    }
}

impl AssetPolicy {
    /// Create a policy from extensions such as `".png"`. Matching is case-sensitive.
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// Configured extensions.
    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    /// Whether `file_name` ends in an allowed extension.
    pub fn allows(&self, file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.allowed
                    .iter()
                    .any(|allowed| allowed.strip_prefix('.') == Some(ext))
            })
    }

    /// Resolve `file_name` next to `doc`.
    ///
    /// Checks run in order: name shape, extension, existence. A disallowed
    /// type is reported even when the file does not exist.
    pub fn resolve(&self, doc: &Doc, file_name: &str) -> Result<PathBuf, AssetError> {
        if !is_single_segment(file_name) {
            return Err(AssetError::InvalidName(file_name.to_owned()));
        }
        if !self.allows(file_name) {
            return Err(AssetError::DisallowedType {
                file_name: file_name.to_owned(),
            });
        }

        let path = doc
            .path()
            .parent()
            .map_or_else(|| PathBuf::from(file_name), |dir| dir.join(file_name));
        if path.is_file() {
            Ok(path)
        } else {
            Err(AssetError::NotFound(path))
        }
    }
}

/// A plain file name: no separators, no parent or current directory, no NUL.
fn is_single_segment(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
        && !name.contains("..")
}
