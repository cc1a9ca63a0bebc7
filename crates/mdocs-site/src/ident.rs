//! Document identifiers derived from display names.
//!
//! A display name such as `"Developer/Code Conventions"` becomes the compound
//! id `"developer/code_conventions"`: lower-cased, spaces replaced by
//! underscores. The part before the first `/` is the folder id, the rest is
//! the doc id.

/// Derive the compound id for a display name.
///
/// Deterministic and free of validation; the registry rejects names with
/// more than one `/`.
#[must_use]
pub fn compound_id(display_name: &str) -> String {
    display_name.to_lowercase().replace(' ', "_")
}

/// Split a compound id into `(folder_id, doc_id)` on the first `/`.
///
/// The folder id is empty for root documents.
#[must_use]
pub fn split_compound_id(id: &str) -> (&str, &str) {
    id.split_once('/').unwrap_or(("", id))
}

/// Join a folder id and doc id back into a compound id.
#[must_use]
pub fn join_compound_id(folder_id: &str, doc_id: &str) -> String {
    if folder_id.is_empty() {
        doc_id.to_owned()
    } else {
        format!("{folder_id}/{doc_id}")
    }
}
