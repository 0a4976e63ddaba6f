use config::{Config as ConfigBuilder, ConfigError, Environment as EnvSource, File};
use serde::Deserialize;
use std::{env, path::PathBuf};

use crate::strategy::{ServiceWorkerStrategy, StrategySelector};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub pwa: PwaConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub environment: Environment,
    /// Directory served as the site root; custom service workers and the
    /// manifest file are read from here
    #[serde(default = "default_web_root")]
    pub web_root: PathBuf,
    #[serde(default = "default_minify_html")]
    pub minify_html: bool,
}

fn default_web_root() -> PathBuf {
    PathBuf::from("wwwroot")
}

fn default_minify_html() -> bool {
    true
}

/// Runtime environment of the host process.
///
/// Development hosts register the service worker even over plain HTTP.
#[derive(
    Debug,
    Deserialize,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    Development,
    Staging,
    #[default]
    Production,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Options controlling the three PWA endpoints and worker registration.
///
/// Route suffixes are always mounted below `base_route`.
#[derive(Debug, Deserialize, Clone)]
pub struct PwaConfig {
    #[serde(default)]
    pub base_route: String,
    #[serde(default = "default_service_worker_route")]
    pub service_worker_route: String,
    #[serde(default = "default_offline_route")]
    pub offline_route: String,
    #[serde(default = "default_manifest_route")]
    pub manifest_route: String,
    #[serde(default)]
    pub strategy: ServiceWorkerStrategy,
    #[serde(default = "default_custom_service_worker_file_name")]
    pub custom_service_worker_file_name: String,
    /// Seconds, sent as `Cache-Control: max-age` on the service worker
    #[serde(default = "default_max_age")]
    pub service_worker_max_age: u64,
    /// Seconds, sent as `Cache-Control: max-age` on the manifest
    #[serde(default = "default_max_age")]
    pub manifest_max_age: u64,
    #[serde(default = "default_cache_id")]
    pub cache_id: String,
    /// Comma separated
    #[serde(default)]
    pub routes_to_pre_cache: String,
    /// Comma separated
    #[serde(default)]
    pub routes_to_ignore: String,
    #[serde(default)]
    pub allow_http: bool,
    #[serde(default)]
    pub enable_csp_nonce: bool,
    #[serde(default = "default_true")]
    pub register_service_worker: bool,
    #[serde(default = "default_true")]
    pub register_webmanifest: bool,
    #[serde(default = "default_manifest_file_name")]
    pub manifest_file_name: String,
}

impl Default for PwaConfig {
    fn default() -> Self {
        Self {
            base_route: String::new(),
            service_worker_route: default_service_worker_route(),
            offline_route: default_offline_route(),
            manifest_route: default_manifest_route(),
            strategy: ServiceWorkerStrategy::default(),
            custom_service_worker_file_name: default_custom_service_worker_file_name(),
            service_worker_max_age: default_max_age(),
            manifest_max_age: default_max_age(),
            cache_id: default_cache_id(),
            routes_to_pre_cache: String::new(),
            routes_to_ignore: String::new(),
            allow_http: false,
            enable_csp_nonce: false,
            register_service_worker: true,
            register_webmanifest: true,
            manifest_file_name: default_manifest_file_name(),
        }
    }
}

fn default_service_worker_route() -> String {
    "/serviceworker".to_string()
}

fn default_offline_route() -> String {
    "/offline.html".to_string()
}

fn default_manifest_route() -> String {
    "/manifest.webmanifest".to_string()
}

fn default_custom_service_worker_file_name() -> String {
    "customserviceworker.js".to_string()
}

// 30 days
fn default_max_age() -> u64 {
    60 * 60 * 24 * 30
}

fn default_cache_id() -> String {
    "v1.0".to_string()
}

fn default_manifest_file_name() -> String {
    "manifest.json".to_string()
}

fn default_true() -> bool {
    true
}

impl PwaConfig {
    pub fn service_worker_path(&self) -> String {
        format!("{}{}", self.base_route, self.service_worker_route)
    }

    pub fn offline_path(&self) -> String {
        format!("{}{}", self.base_route, self.offline_route)
    }

    pub fn manifest_path(&self) -> String {
        format!("{}{}", self.base_route, self.manifest_route)
    }

    /// Scope the worker is registered with in the browser
    pub fn scope(&self) -> String {
        format!("{}/", self.base_route)
    }

    pub fn strategy_selector(&self) -> StrategySelector {
        match self.strategy {
            ServiceWorkerStrategy::CustomStrategy => {
                StrategySelector::Custom(self.custom_service_worker_file_name.to_owned())
            }
            strategy => StrategySelector::Builtin(strategy),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.base_route.is_empty()
            && (!self.base_route.starts_with('/') || self.base_route.ends_with('/'))
        {
            return Err(format!(
                "PWA base_route must be empty or start with '/' without a trailing '/', got '{}'",
                self.base_route
            ));
        }

        let suffixes = [
            ("service_worker_route", &self.service_worker_route),
            ("offline_route", &self.offline_route),
            ("manifest_route", &self.manifest_route),
        ];

        for (name, suffix) in suffixes {
            if !suffix.starts_with('/') || suffix.len() < 2 {
                return Err(format!("PWA {name} must start with '/', got '{suffix}'"));
            }
        }

        if self.service_worker_route == self.offline_route
            || self.service_worker_route == self.manifest_route
            || self.offline_route == self.manifest_route
        {
            return Err("PWA route suffixes must be distinct".to_string());
        }

        if self.cache_id.trim().is_empty() {
            return Err("PWA cache_id must not be empty".to_string());
        }

        if self.strategy == ServiceWorkerStrategy::CustomStrategy
            && self.custom_service_worker_file_name.trim().is_empty()
        {
            return Err(
                "PWA custom_service_worker_file_name is required with the custom strategy"
                    .to_string(),
            );
        }

        Ok(())
    }
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (PWA_HOST__PWA__BASE_ROUTE, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            EnvSource::with_prefix("PWA_HOST")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(environment) = env::var("ENVIRONMENT") {
            builder = builder.set_override("server.environment", environment.to_lowercase())?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }

        self.pwa.validate()
    }
}
