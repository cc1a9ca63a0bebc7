//! HTTP request handlers.
//!
//! Every handler rebuilds the registry from the documentation source, so the
//! pages always reflect the current configuration.

pub(crate) mod assets;
pub(crate) mod documents;
pub(crate) mod listing;
pub(crate) mod navigation;
