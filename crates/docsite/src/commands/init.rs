//! Write the built-in site configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use docsite_config::{Format, SiteConfig};

/// Config file format selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl From<ConfigFormat> for Format {
    fn from(format: ConfigFormat) -> Self {
        match format {
            ConfigFormat::Toml => Format::Toml,
            ConfigFormat::Json => Format::Json,
            ConfigFormat::Yaml => Format::Yaml,
        }
    }
}

/// Where the config is written: `--format` replaces the extension of `config`.
fn target_path(config: &Path, format: Option<ConfigFormat>) -> PathBuf {
    match format {
        Some(format) => config.with_extension(Format::from(format).extension()),
        None => config.to_path_buf(),
    }
}

/// Run the init command. Returns the path written, or `None` when an
/// existing file was left alone.
pub fn run(config: &Path, format: Option<ConfigFormat>, yes: bool) -> Result<Option<PathBuf>> {
    let path = target_path(config, format);

    if path.exists() && !yes {
        tracing::warn!("{} already exists. Use --yes to overwrite.", path.display());
        return Ok(None);
    }

    SiteConfig::opacus()
        .save(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!("Created {}", path.display());
    tracing::info!("Run 'docsite check' to validate it.");

    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn writes_preset_that_loads_back() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("site.toml");

        let written = run(&config, None, false).unwrap().unwrap();

        assert_eq!(written, config);
        assert_eq!(SiteConfig::load(&written).unwrap(), SiteConfig::opacus());
    }

    #[test]
    fn format_changes_extension() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("site.toml");

        let written = run(&config, Some(ConfigFormat::Yaml), false).unwrap().unwrap();

        assert_eq!(written, temp.path().join("site.yaml"));
        assert!(!config.exists());
    }

    #[test]
    fn keeps_existing_file_without_yes() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("site.toml");
        fs::write(&config, "title = \"Mine\"\n").unwrap();

        assert_eq!(run(&config, None, false).unwrap(), None);
        assert_eq!(fs::read_to_string(&config).unwrap(), "title = \"Mine\"\n");

        assert!(run(&config, None, true).unwrap().is_some());
        assert_ne!(fs::read_to_string(&config).unwrap(), "title = \"Mine\"\n");
    }
}
