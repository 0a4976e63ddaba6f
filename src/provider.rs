//! Collaborators supplying host-specific documents: custom service worker
//! templates and the web app manifest.

use async_trait::async_trait;
use axum::http::request::Parts;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::error::PwaError;

#[async_trait]
pub trait CustomTemplateProvider: Send + Sync {
    /// Raw script text of `file_name`, or [`PwaError::CustomTemplateNotFound`]
    async fn template(&self, file_name: &str) -> Result<String, PwaError>;
}

/// Reads custom service workers from the site's web root.
#[derive(Debug, Clone)]
pub struct WebRootTemplateProvider {
    root: PathBuf,
}

impl WebRootTemplateProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl CustomTemplateProvider for WebRootTemplateProvider {
    async fn template(&self, file_name: &str) -> Result<String, PwaError> {
        let relative = Path::new(file_name.trim_start_matches('/'));

        // keep lookups inside the web root
        if relative
            .components()
            .any(|c| !matches!(c, std::path::Component::Normal(_)))
        {
            return Err(PwaError::CustomTemplateNotFound(file_name.to_owned()));
        }

        match tokio::fs::read_to_string(self.root.join(relative)).await {
            Ok(js) => Ok(js),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(PwaError::CustomTemplateNotFound(file_name.to_owned()))
            }
            Err(e) => Err(PwaError::Io(e)),
        }
    }
}

/// Web app manifest produced outside this crate; served verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebManifest {
    pub raw_json: String,
}

impl WebManifest {
    /// Keep `raw_json` as-is once it is known to be valid JSON
    pub fn from_json(raw_json: impl Into<String>) -> Result<Self, PwaError> {
        let raw_json = raw_json.into();
        serde_json::from_str::<serde_json::Value>(&raw_json)?;

        Ok(Self { raw_json })
    }
}

pub trait ManifestProvider: Send + Sync {
    /// Manifest for the request described by `parts`, if the host has one
    fn manifest(&self, parts: &Parts) -> Option<Arc<WebManifest>>;
}

/// A single manifest shared by every request, or none at all.
#[derive(Debug, Clone, Default)]
pub struct StaticManifest(Option<Arc<WebManifest>>);

impl StaticManifest {
    pub fn new(manifest: Option<WebManifest>) -> Self {
        Self(manifest.map(Arc::new))
    }

    /// Load `<web_root>/<file_name>`; a missing file means the host has no manifest
    pub async fn load(web_root: &Path, file_name: &str) -> Result<Self, PwaError> {
        let path = web_root.join(file_name);

        match tokio::fs::read_to_string(&path).await {
            Ok(raw_json) => {
                tracing::info!(path = %path.display(), "Web app manifest loaded");
                Ok(Self::new(Some(WebManifest::from_json(raw_json)?)))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "No web app manifest found");
                Ok(Self::default())
            }
            Err(e) => Err(PwaError::Io(e)),
        }
    }
}

impl ManifestProvider for StaticManifest {
    fn manifest(&self, _parts: &Parts) -> Option<Arc<WebManifest>> {
        self.0.clone()
    }
}

/// Prefers a manifest an upstream layer put in the request extensions as
/// `Arc<WebManifest>`, falling back to `inner`.
#[derive(Debug, Clone, Default)]
pub struct RequestManifest<P = StaticManifest> {
    inner: P,
}

impl<P> RequestManifest<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: ManifestProvider> ManifestProvider for RequestManifest<P> {
    fn manifest(&self, parts: &Parts) -> Option<Arc<WebManifest>> {
        parts
            .extensions
            .get::<Arc<WebManifest>>()
            .cloned()
            .or_else(|| self.inner.manifest(parts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use temp_dir::TempDir;

    fn parts(manifest: Option<WebManifest>) -> Parts {
        let mut req = Request::builder().uri("/").body(()).unwrap();
        if let Some(manifest) = manifest {
            req.extensions_mut().insert(Arc::new(manifest));
        }
        req.into_parts().0
    }

    #[test]
    fn test_manifest_rejects_invalid_json() {
        assert!(WebManifest::from_json("{\"name\": ").is_err());
        assert!(WebManifest::from_json("{\"name\": \"app\"}").is_ok());
    }

    #[test]
    fn test_request_manifest_prefers_extension() {
        let fallback = WebManifest::from_json("{\"name\":\"fallback\"}").unwrap();
        let scoped = WebManifest::from_json("{\"name\":\"scoped\"}").unwrap();
        let provider = RequestManifest::new(StaticManifest::new(Some(fallback.clone())));

        assert_eq!(
            provider.manifest(&parts(Some(scoped.clone()))).as_deref(),
            Some(&scoped)
        );
        assert_eq!(provider.manifest(&parts(None)).as_deref(), Some(&fallback));
        assert!(
            RequestManifest::<StaticManifest>::default()
                .manifest(&parts(None))
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_static_manifest_load() {
        let dir = TempDir::new().unwrap();
        let missing = StaticManifest::load(dir.path(), "manifest.json").await.unwrap();
        assert!(missing.manifest(&parts(None)).is_none());

        std::fs::write(dir.child("manifest.json"), "{\"name\":\"app\"}").unwrap();
        let found = StaticManifest::load(dir.path(), "manifest.json").await.unwrap();
        assert_eq!(
            found.manifest(&parts(None)).unwrap().raw_json,
            "{\"name\":\"app\"}"
        );
    }

    #[tokio::test]
    async fn test_web_root_template_provider() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.child("sw.js"), "// {version}").unwrap();
        let provider = WebRootTemplateProvider::new(dir.path());

        assert_eq!(provider.template("sw.js").await.unwrap(), "// {version}");
        assert!(matches!(
            provider.template("missing.js").await,
            Err(PwaError::CustomTemplateNotFound(_))
        ));
        assert!(matches!(
            provider.template("../sw.js").await,
            Err(PwaError::CustomTemplateNotFound(_))
        ));
    }
}
