use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{registration::CspNonce, routes::AppState};

/// Give every request a fresh [`CspNonce`] unless an upstream layer already did
///
/// Page renderers read the nonce from the request extensions to build their
/// `Content-Security-Policy`; the registration script carries the same value.
pub async fn assign_csp_nonce(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    if state.config.pwa.enable_csp_nonce && req.extensions().get::<CspNonce>().is_none() {
        req.extensions_mut().insert(CspNonce::generate());
    }

    next.run(req).await
}
