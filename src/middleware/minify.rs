use axum::{
    body::{Body, to_bytes},
    http::header,
    response::Response,
};
use std::sync::LazyLock;

/// Configuration for HTML minification
static MINIFY_CFG: LazyLock<minify_html::Cfg> = LazyLock::new(|| minify_html::Cfg {
    keep_closing_tags: true,
    keep_html_and_head_opening_tags: true,
    minify_doctype: false,
    minify_css: true,
    minify_js: true,
    ..Default::default()
});

/// Middleware to minify HTML responses
///
/// Runs after the registration script has been injected, so the script is
/// minified along with the page. Verbatim responses are left alone.
pub async fn minify_html_middleware(response: Response) -> Response {
    if !super::is_rewritable_html(&response) {
        return response;
    }

    let (mut parts, body) = response.into_parts();

    match to_bytes(body, usize::MAX).await {
        Ok(bytes) => {
            let minified = minify_html::minify(&bytes, &MINIFY_CFG);
            parts.headers.remove(header::CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(minified))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read HTML body for minification");
            Response::from_parts(parts, Body::empty())
        }
    }
}
