//! Error types for the HTTP server.

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mdocs_site::SiteError;
use serde_json::json;

/// Server error type.
///
/// The response body never carries file-system paths; those are logged where
/// the error is raised.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Caller lacks the documentation capability.
    #[error("Forbidden")]
    Forbidden,

    /// No document with this compound id.
    #[error("Unknown document: {0}")]
    UnknownDocument(String),

    /// Document or asset is known but its file is absent.
    #[error("File not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// Asset extension is not allow-listed.
    #[error("Asset type not allowed: {0}")]
    DisallowedAssetType(String),

    /// The documentation configuration is invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Anything else.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SiteError> for ServerError {
    fn from(err: SiteError) -> Self {
        match err {
            SiteError::Configuration { .. } => Self::Configuration(err.to_string()),
            SiteError::Source(_) => Self::Internal(err.to_string()),
        }
    }
}

impl ServerError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UnknownDocument(_) | Self::MissingFile(_) => StatusCode::NOT_FOUND,
            Self::DisallowedAssetType(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Configuration(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Forbidden => json!({"error": "Forbidden"}),
            Self::UnknownDocument(id) => json!({"error": "Document not found", "id": id}),
            Self::MissingFile(_) => json!({"error": "File not found"}),
            Self::DisallowedAssetType(file) => {
                json!({"error": "File type not allowed", "file": file})
            }
            Self::Configuration(message) => json!({"error": message}),
            Self::Internal(_) => json!({"error": "Internal server error"}),
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statuses() {
        assert_eq!(ServerError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ServerError::UnknownDocument("x".to_owned()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServerError::MissingFile(PathBuf::from("x.md")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServerError::DisallowedAssetType("x.conf".to_owned()).status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ServerError::Configuration("bad".to_owned()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_site_configuration_error_maps_to_configuration() {
        let err = ServerError::from(SiteError::Configuration {
            name: "a/b/c".to_owned(),
        });
        assert!(matches!(err, ServerError::Configuration(message) if message.contains("a/b/c")));
    }

    #[test]
    fn test_missing_file_response_hides_path() {
        let response = ServerError::MissingFile(PathBuf::from("/secret/dir/x.md")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
