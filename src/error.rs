use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PwaError {
    /// The host has no manifest for this request
    #[error("Web app manifest unavailable")]
    ManifestUnavailable,

    #[error("Custom service worker '{0}' not found")]
    CustomTemplateNotFound(String),

    /// Broken packaging: the binary lacks one of its embedded templates
    #[error("Built-in service worker template '{0}' is missing")]
    MissingBuiltinTemplate(String),

    #[error("Embedded resource '{0}' is missing")]
    MissingResource(String),

    #[error("Invalid web app manifest: {0}")]
    InvalidManifest(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for PwaError {
    fn into_response(self) -> Response {
        match self {
            PwaError::ManifestUnavailable => StatusCode::NOT_FOUND.into_response(),
            e => {
                tracing::error!(error = %e, "Failed to serve PWA resource");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
                    .into_response()
            }
        }
    }
}
