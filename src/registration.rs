//! Decides whether an outgoing HTML page gets the service worker
//! registration script, and splices markup into HTML documents.

use axum::http::Request;
use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::config::{Environment, PwaConfig};

/// Nonce allowed by the page's Content-Security-Policy for inline scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CspNonce(pub String);

impl CspNonce {
    pub fn generate() -> Self {
        Self(STANDARD.encode(uuid::Uuid::new_v4().as_bytes()))
    }
}

/// What the decision needs to know about the request a page answers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Served over HTTPS, directly or behind a TLS terminating proxy
    pub secure: bool,
    pub nonce: Option<CspNonce>,
}

impl RequestContext {
    pub fn from_request<B>(req: &Request<B>) -> Self {
        let forwarded_https = req
            .headers()
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .is_some_and(|proto| proto.trim().eq_ignore_ascii_case("https"));

        Self {
            secure: req.uri().scheme_str() == Some("https") || forwarded_https,
            nonce: req.extensions().get::<CspNonce>().cloned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectionDecision {
    Skip,
    /// Markup to append at the end of the document body
    Inject(String),
}

pub fn decide(
    config: &PwaConfig,
    environment: Environment,
    ctx: &RequestContext,
) -> InjectionDecision {
    if !config.register_service_worker {
        return InjectionDecision::Skip;
    }

    if !(config.allow_http || ctx.secure || environment.is_development()) {
        return InjectionDecision::Skip;
    }

    let nonce = match (&ctx.nonce, config.enable_csp_nonce) {
        (Some(nonce), true) => Some(nonce),
        _ => None,
    };

    InjectionDecision::Inject(registration_snippet(config, nonce))
}

pub fn registration_snippet(config: &PwaConfig, nonce: Option<&CspNonce>) -> String {
    let nonce = nonce
        .map(|CspNonce(value)| format!(" nonce=\"{value}\""))
        .unwrap_or_default();

    format!(
        "\n\t<script{nonce}>'serviceWorker'in navigator&&navigator.serviceWorker.register('{}', {{ scope: '{}' }})</script>",
        config.service_worker_path(),
        config.scope()
    )
}

pub fn manifest_link(config: &PwaConfig) -> String {
    format!(
        "\n\t<link rel=\"manifest\" href=\"{}\" />",
        config.manifest_path()
    )
}

/// Insert `markup` right before the last `</body>`, `None` when the document has no body end
pub fn insert_before_body_close(html: &str, markup: &str) -> Option<String> {
    insert_before_last(html, "</body>", markup)
}

/// Insert `markup` right before the first `</head>`, `None` when there is none
pub fn insert_before_head_close(html: &str, markup: &str) -> Option<String> {
    let index = html.to_ascii_lowercase().find("</head>")?;

    Some(splice(html, index, markup))
}

fn insert_before_last(html: &str, tag: &str, markup: &str) -> Option<String> {
    // ASCII lowercasing keeps byte offsets stable
    let index = html.to_ascii_lowercase().rfind(tag)?;

    Some(splice(html, index, markup))
}

fn splice(html: &str, index: usize, markup: &str) -> String {
    let mut output = String::with_capacity(html.len() + markup.len());
    output.push_str(&html[..index]);
    output.push_str(markup);
    output.push_str(&html[index..]);
    output
}
