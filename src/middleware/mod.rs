pub mod csp;
pub mod minify;
pub mod register;

pub use csp::assign_csp_nonce;
pub use minify::minify_html_middleware;
pub use register::register_service_worker_middleware;

use axum::{
    http::{StatusCode, header},
    response::Response,
};

use crate::routes::Verbatim;

/// Complete, uncompressed HTML that post-processing may rewrite
pub(crate) fn is_rewritable_html(response: &Response) -> bool {
    if response.status() != StatusCode::OK
        || response.extensions().get::<Verbatim>().is_some()
        || response.headers().contains_key(header::CONTENT_ENCODING)
        || response.headers().contains_key(header::CONTENT_RANGE)
    {
        return false;
    }

    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|content_type| content_type.contains("text/html"))
}
