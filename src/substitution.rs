//! Placeholder replacement for service worker templates.
//!
//! Templates may reference `{version}`, `{routes}`, `{offlineRoute}` and
//! `{ignoreRoutes}`. Route lists are emitted as quoted, comma separated
//! JavaScript string literals so a template can write `[{routes}]`.

use crate::{config::PwaConfig, strategy::ServiceWorkerStrategy};

pub const VERSION: &str = "{version}";
pub const ROUTES: &str = "{routes}";
pub const OFFLINE_ROUTE: &str = "{offlineRoute}";
pub const IGNORE_ROUTES: &str = "{ignoreRoutes}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionContext {
    pub version: String,
    pub routes: String,
    pub offline_route: String,
    pub ignore_routes: String,
}

impl SubstitutionContext {
    pub fn new(config: &PwaConfig, strategy: ServiceWorkerStrategy) -> Self {
        Self {
            version: format!("{}::{strategy}", config.cache_id),
            routes: route_list(&config.routes_to_pre_cache),
            offline_route: config.offline_path(),
            ignore_routes: route_list(&config.routes_to_ignore),
        }
    }

    pub fn apply(&self, template: &str) -> String {
        template
            .replace(VERSION, &self.version)
            .replace(ROUTES, &self.routes)
            .replace(OFFLINE_ROUTE, &self.offline_route)
            .replace(IGNORE_ROUTES, &self.ignore_routes)
    }
}

/// `"a, b ,c"` becomes `'a','b','c'`; empty entries are dropped before trimming,
/// so a whitespace-only entry stays as `''`.
pub fn route_list(raw: &str) -> String {
    raw.split(',')
        .filter(|route| !route.is_empty())
        .map(str::trim)
        .map(|route| format!("'{route}'"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_list_trims_and_quotes() {
        assert_eq!(route_list("a, b ,c"), "'a','b','c'");
    }

    #[test]
    fn test_route_list_drops_empty_entries() {
        assert_eq!(route_list(",/,,/about,,"), "'/','/about'");
        assert_eq!(route_list(""), "");
    }

    #[test]
    fn test_route_list_keeps_whitespace_entries() {
        assert_eq!(route_list("a, ,b"), "'a','','b'");
        assert_eq!(route_list(" , "), "'',''");
    }

    #[test]
    fn test_context_values() {
        let config = PwaConfig {
            base_route: "/app".to_string(),
            cache_id: "v2".to_string(),
            routes_to_pre_cache: "/, /about".to_string(),
            ..Default::default()
        };

        let ctx = SubstitutionContext::new(&config, ServiceWorkerStrategy::NetworkFirst);

        assert_eq!(ctx.version, "v2::NetworkFirst");
        assert_eq!(ctx.routes, "'/','/about'");
        assert_eq!(ctx.offline_route, "/app/offline.html");
        assert_eq!(ctx.ignore_routes, "");
    }

    #[test]
    fn test_apply_replaces_every_occurrence() {
        let config = PwaConfig {
            routes_to_ignore: "/admin".to_string(),
            ..Default::default()
        };
        let ctx = SubstitutionContext::new(&config, ServiceWorkerStrategy::Minimal);

        let output = ctx.apply(
            "const v = '{version}'; const v2 = '{version}';\n\
             const r = [{routes}]; const o = '{offlineRoute}'; const i = [{ignoreRoutes}];",
        );

        assert_eq!(
            output,
            "const v = 'v1.0::Minimal'; const v2 = 'v1.0::Minimal';\n\
             const r = []; const o = '/offline.html'; const i = ['/admin'];"
        );
    }

    #[test]
    fn test_apply_is_idempotent() {
        let ctx = SubstitutionContext::new(&PwaConfig::default(), ServiceWorkerStrategy::default());
        let template = "{version}|{routes}|{offlineRoute}|{ignoreRoutes}";

        assert_eq!(ctx.apply(template), ctx.apply(template));
        assert_eq!(ctx.apply(&ctx.apply(template)), ctx.apply(template));
    }
}
