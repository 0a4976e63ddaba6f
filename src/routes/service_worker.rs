use axum::{extract::State, http::header, response::IntoResponse};

use crate::{error::PwaError, strategy, substitution::SubstitutionContext};

use super::AppState;

/// Serve the configured caching strategy with the PWA options filled in
#[tracing::instrument(skip_all)]
pub async fn asset(State(state): State<AppState>) -> Result<impl IntoResponse, PwaError> {
    let pwa = &state.config.pwa;

    let template = strategy::resolve(
        &pwa.strategy_selector(),
        state.resources.as_ref(),
        state.templates.as_ref(),
    )
    .await?;

    tracing::debug!(strategy = %template.strategy, "Service worker template resolved");

    let js = SubstitutionContext::new(pwa, template.strategy).apply(&template.body);

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/javascript; charset=utf-8".to_string(),
            ),
            (
                header::CACHE_CONTROL,
                format!("max-age={}", pwa.service_worker_max_age),
            ),
        ],
        js,
    ))
}
