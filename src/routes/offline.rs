use axum::{Extension, extract::State, http::header, response::IntoResponse};

use crate::{assets::OFFLINE_PAGE, error::PwaError};

use super::{AppState, Verbatim};

/// Fallback page the service worker shows when the network is unreachable
pub async fn page(State(state): State<AppState>) -> Result<impl IntoResponse, PwaError> {
    let html = state
        .resources
        .get(OFFLINE_PAGE)
        .ok_or_else(|| PwaError::MissingResource(OFFLINE_PAGE.to_owned()))?;

    Ok((
        Extension(Verbatim),
        [(header::CONTENT_TYPE, "text/html")],
        html.into_owned(),
    ))
}
