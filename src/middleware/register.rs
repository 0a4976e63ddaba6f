use axum::{
    body::{Body, to_bytes},
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    registration::{self, InjectionDecision, RequestContext},
    routes::AppState,
};

/// Append the service worker registration script to HTML pages
///
/// The decision is taken from the request before the page is rendered; the
/// script lands right before `</body>`. When a manifest is available the
/// `<link rel="manifest">` goes before `</head>`. Pages without those tags,
/// non-HTML, non-200, range and already encoded responses pass through untouched.
///
/// Add this layer before (inside) any other layer rewriting HTML bodies.
pub async fn register_service_worker_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let pwa = &state.config.pwa;

    let decision = registration::decide(
        pwa,
        state.config.server.environment,
        &RequestContext::from_request(&req),
    );

    let (parts, body) = req.into_parts();
    let link_manifest = pwa.register_webmanifest && state.manifest.manifest(&parts).is_some();
    let req = Request::from_parts(parts, body);

    let response = next.run(req).await;

    if (decision == InjectionDecision::Skip && !link_manifest)
        || !super::is_rewritable_html(&response)
    {
        return response;
    }

    let (mut parts, body) = response.into_parts();

    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read HTML body");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let html = match String::from_utf8(bytes.to_vec()) {
        Ok(html) => html,
        Err(e) => return Response::from_parts(parts, Body::from(e.into_bytes())),
    };

    let mut output = None;

    if link_manifest {
        output = registration::insert_before_head_close(&html, &registration::manifest_link(pwa));
    }

    if let InjectionDecision::Inject(snippet) = &decision {
        let current = output.as_deref().unwrap_or(&html);
        if let Some(injected) = registration::insert_before_body_close(current, snippet) {
            tracing::debug!("Service worker registration injected");
            output = Some(injected);
        }
    }

    match output {
        Some(html) => {
            parts.headers.remove(header::CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(html))
        }
        None => Response::from_parts(parts, Body::from(html)),
    }
}
