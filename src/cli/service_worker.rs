use anyhow::Result;

use crate::{
    assets::EmbeddedResources, provider::WebRootTemplateProvider, strategy,
    substitution::SubstitutionContext,
};

/// Print the service worker the server would send for `config`
pub async fn print_service_worker(config: crate::config::Config) -> Result<()> {
    let pwa = &config.pwa;
    let templates = WebRootTemplateProvider::new(config.server.web_root.to_owned());

    let template =
        strategy::resolve(&pwa.strategy_selector(), &EmbeddedResources, &templates).await?;

    println!(
        "{}",
        SubstitutionContext::new(pwa, template.strategy).apply(&template.body)
    );

    Ok(())
}
