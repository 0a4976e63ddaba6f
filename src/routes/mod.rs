use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{
    assets::{EmbeddedResources, ResourceStore},
    config::Config,
    provider::{
        CustomTemplateProvider, ManifestProvider, RequestManifest, StaticManifest,
        WebRootTemplateProvider,
    },
};

mod manifest;
mod offline;
mod service_worker;

/// Response extension marking a body that must reach the client untouched
/// by HTML post-processing.
#[derive(Debug, Clone, Copy)]
pub struct Verbatim;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub resources: Arc<dyn ResourceStore>,
    pub templates: Arc<dyn CustomTemplateProvider>,
    pub manifest: Arc<dyn ManifestProvider>,
}

impl AppState {
    /// Embedded templates, custom workers read from the web root and the
    /// given manifest, overridable per request through extensions
    pub fn new(config: Config, manifest: StaticManifest) -> Self {
        let templates = WebRootTemplateProvider::new(config.server.web_root.to_owned());

        Self {
            config: Arc::new(config),
            resources: Arc::new(EmbeddedResources),
            templates: Arc::new(templates),
            manifest: Arc::new(RequestManifest::new(manifest)),
        }
    }

    pub fn with_resources(mut self, resources: impl ResourceStore + 'static) -> Self {
        self.resources = Arc::new(resources);
        self
    }

    pub fn with_templates(mut self, templates: impl CustomTemplateProvider + 'static) -> Self {
        self.templates = Arc::new(templates);
        self
    }

    pub fn with_manifest(mut self, manifest: impl ManifestProvider + 'static) -> Self {
        self.manifest = Arc::new(manifest);
        self
    }
}

/// Service worker, offline page and manifest, mounted below the base route
pub fn router(app_state: AppState) -> Router {
    let pwa = &app_state.config.pwa;
    let service_worker_path = pwa.service_worker_path();
    let offline_path = pwa.offline_path();
    let manifest_path = pwa.manifest_path();

    Router::new()
        .route(&service_worker_path, get(service_worker::asset))
        .route(&offline_path, get(offline::page))
        .route(&manifest_path, get(manifest::asset))
        .with_state(app_state)
}
