use axum::{
    extract::{Request, State},
    http::header,
    response::IntoResponse,
};

use crate::error::PwaError;

use super::AppState;

/// Serve the host's web app manifest, 404 when there is none for this request
#[tracing::instrument(skip_all)]
pub async fn asset(
    State(state): State<AppState>,
    req: Request,
) -> Result<impl IntoResponse, PwaError> {
    let (parts, _) = req.into_parts();

    let Some(manifest) = state.manifest.manifest(&parts) else {
        tracing::debug!(path = %parts.uri.path(), "No web app manifest registered");
        return Err(PwaError::ManifestUnavailable);
    };

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/manifest+json; charset=utf-8".to_string(),
            ),
            (
                header::CACHE_CONTROL,
                format!("max-age={}", state.config.pwa.manifest_max_age),
            ),
        ],
        manifest.raw_json.to_owned(),
    ))
}
