//! Shared helpers for the HTTP integration tests

#![allow(dead_code)]

use axum::{
    Json, Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::{Html, Response},
    routing::get,
};
use pwa_host::{
    AppState, Config,
    config::{Environment, ObservabilityConfig, PwaConfig, ServerConfig},
    provider::{StaticManifest, WebManifest},
};
use serde_json::json;

pub const HOME_PAGE: &str = "<!DOCTYPE html><html><head><title>Home</title></head><body><h1>Home</h1></body></html>";

pub fn config(pwa: PwaConfig, environment: Environment) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            environment,
            web_root: "does-not-exist".into(),
            minify_html: false,
        },
        observability: ObservabilityConfig::default(),
        pwa,
    }
}

pub fn state(pwa: PwaConfig) -> AppState {
    AppState::new(config(pwa, Environment::Production), StaticManifest::default())
}

pub fn state_with_manifest(pwa: PwaConfig, raw_json: &str) -> AppState {
    let manifest = WebManifest::from_json(raw_json).unwrap();
    AppState::new(
        config(pwa, Environment::Production),
        StaticManifest::new(Some(manifest)),
    )
}

/// A host site with a full page, an HTML fragment and a JSON endpoint, plus
/// pages answered gzip encoded, as a byte range and as an error
pub fn site() -> Router {
    Router::new()
        .route("/", get(|| async { Html(HOME_PAGE) }))
        .route("/fragment", get(|| async { Html("<div>partial</div>") }))
        .route(
            "/data.json",
            get(|| async { Json(json!({ "body": "</body>" })) }),
        )
        .route(
            "/encoded",
            get(|| async {
                (
                    [
                        (header::CONTENT_TYPE, "text/html; charset=utf-8"),
                        (header::CONTENT_ENCODING, "gzip"),
                    ],
                    HOME_PAGE.as_bytes().to_vec(),
                )
            }),
        )
        .route(
            "/range",
            get(|| async {
                (
                    StatusCode::PARTIAL_CONTENT,
                    [(header::CONTENT_RANGE, "bytes 0-85/86")],
                    Html(HOME_PAGE),
                )
            }),
        )
        .route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, Html(HOME_PAGE)) }),
        )
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_https_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-forwarded-proto", "https")
        .body(Body::empty())
        .unwrap()
}

pub fn header(response: &Response, name: &str) -> String {
    response
        .headers()
        .get(name)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}

pub async fn body_string(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}
