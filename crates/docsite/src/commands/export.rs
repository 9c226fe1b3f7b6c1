//! Export command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use docsite_config::SiteConfig;
use docsite_render::{ExportConfig, Exporter};

/// Run the export command.
pub fn run(
    config: &Path,
    output: PathBuf,
    minify: bool,
    base_url: Option<String>,
) -> Result<()> {
    tracing::info!("Exporting {}...", config.display());

    let mut site = SiteConfig::read(config)
        .with_context(|| format!("Failed to read {}", config.display()))?;

    if let Some(base_url) = base_url {
        tracing::info!("Overriding baseUrl {} -> {}", site.base_url, base_url);
        site.base_url = base_url;
    }

    let diagnostics = site.validate().into_result().map_err(|diag| {
        anyhow::anyhow!("{}", diag).context(format!("Invalid config {}", config.display()))
    })?;
    diagnostics.log_warnings();

    let result = Exporter::new(ExportConfig {
        output_dir: output,
        minify,
    })
    .export(&site)?;

    tracing::info!(
        "Exported {} files in {}ms",
        result.files.len(),
        result.duration_ms
    );
    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
