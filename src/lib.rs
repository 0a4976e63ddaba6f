pub mod assets;
pub mod cli;
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod provider;
pub mod registration;
pub mod routes;
pub mod strategy;
pub mod substitution;

pub use config::Config;
pub use error::PwaError;
pub use routes::AppState;

use axum::{
    Router,
    middleware::{from_fn_with_state, map_response},
};

/// Mount the PWA endpoints next to `site` and post-process its HTML
///
/// Registration is injected before minification, and the CSP nonce is
/// assigned before either sees the request.
pub fn create_app(state: AppState, site: Router) -> Router {
    let app = routes::router(state.clone()).merge(site).layer(from_fn_with_state(
        state.clone(),
        middleware::register_service_worker_middleware,
    ));

    let app = if state.config.server.minify_html {
        app.layer(map_response(middleware::minify_html_middleware))
    } else {
        app
    };

    app.layer(from_fn_with_state(state, middleware::assign_csp_nonce))
}
