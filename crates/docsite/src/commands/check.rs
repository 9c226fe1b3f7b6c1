//! Validate the site configuration.

use std::path::Path;

use anyhow::{Context, Result};
use docsite_config::{Severity, SiteConfig};

/// Run the check command.
pub fn run(config: &Path) -> Result<()> {
    let site = SiteConfig::read(config)
        .with_context(|| format!("Failed to read {}", config.display()))?;

    let diagnostics = site.validate();

    for diagnostic in diagnostics.iter() {
        match diagnostic.severity {
            Severity::Error => tracing::error!("{}", diagnostic),
            Severity::Warning => tracing::warn!("{}", diagnostic),
        }
    }

    let errors = diagnostics.errors().count();
    if errors > 0 {
        anyhow::bail!("{} has {} error(s)", config.display(), errors);
    }

    tracing::info!(
        "{} is valid ({} header links, {} scripts, {} stylesheets)",
        config.display(),
        site.header_links.len(),
        site.scripts.len(),
        site.stylesheets.len()
    );

    Ok(())
}
