//! Service worker caching strategies and their template lookup.

use serde::{Deserialize, Deserializer};

use crate::{assets::ResourceStore, error::PwaError, provider::CustomTemplateProvider};

/// Caching strategy the generated service worker implements.
///
/// Every variant except [`ServiceWorkerStrategy::CustomStrategy`] maps to an
/// embedded `<name>.js` template.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum ServiceWorkerStrategy {
    /// Cache-first for fingerprinted assets, network-first for everything else
    #[default]
    CacheFirstSafe,
    CacheFirst,
    /// Cache-first only for URLs carrying a `v=` fingerprint
    CacheFingerprinted,
    /// Only serves the offline page when the network is gone
    Minimal,
    NetworkFirst,
    /// Read the worker from a file supplied by the host
    CustomStrategy,
}

impl ServiceWorkerStrategy {
    /// Key of the embedded template, `None` for the custom strategy
    pub fn resource_key(&self) -> Option<String> {
        match self {
            ServiceWorkerStrategy::CustomStrategy => None,
            strategy => Some(format!("{strategy}.js")),
        }
    }
}

impl<'de> Deserialize<'de> for ServiceWorkerStrategy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;

        value.parse().map_err(|_| {
            serde::de::Error::custom(format!("unknown service worker strategy '{value}'"))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategySelector {
    Builtin(ServiceWorkerStrategy),
    /// File name handed to the [`CustomTemplateProvider`]
    Custom(String),
}

impl StrategySelector {
    pub fn strategy(&self) -> ServiceWorkerStrategy {
        match self {
            StrategySelector::Builtin(strategy) => *strategy,
            StrategySelector::Custom(_) => ServiceWorkerStrategy::CustomStrategy,
        }
    }
}

/// Raw, unsubstituted service worker script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplate {
    pub strategy: ServiceWorkerStrategy,
    pub body: String,
}

/// Look up the template for `selector`.
///
/// A custom template that cannot be found is reported as
/// [`PwaError::CustomTemplateNotFound`]; a missing built-in template means the
/// binary was packaged without its assets.
pub async fn resolve(
    selector: &StrategySelector,
    resources: &dyn ResourceStore,
    templates: &dyn CustomTemplateProvider,
) -> Result<ResolvedTemplate, PwaError> {
    let strategy = selector.strategy();

    let body = match selector {
        StrategySelector::Custom(file_name) => templates.template(file_name).await?,
        StrategySelector::Builtin(strategy) => {
            let key = strategy
                .resource_key()
                .ok_or_else(|| PwaError::MissingBuiltinTemplate(strategy.to_string()))?;

            resources
                .get(&key)
                .ok_or(PwaError::MissingBuiltinTemplate(key))?
                .into_owned()
        }
    };

    Ok(ResolvedTemplate { strategy, body })
}
