//! Print the site configuration.

use std::path::Path;

use anyhow::{Context, Result};
use docsite_config::SiteConfig;

const REDACTED: &str = "<redacted>";

/// Render the configuration as pretty JSON, resolved or as written.
///
/// The resolved form never prints the search API key.
pub fn render(site: &SiteConfig, resolved: bool) -> Result<String> {
    let json = if resolved {
        let mut resolved = site.resolve()?;
        if let Some(key) = resolved.search.as_mut().and_then(|s| s.api_key.as_mut()) {
            *key = REDACTED.to_string();
        }
        serde_json::to_string_pretty(&resolved)?
    } else {
        site.to_json_string()?
    };
    Ok(json)
}

/// Run the show command.
pub fn run(config: &Path, resolved: bool) -> Result<()> {
    let site = SiteConfig::load(config)
        .with_context(|| format!("Failed to load {}", config.display()))?;

    println!("{}", render(&site, resolved)?);

    Ok(())
}
