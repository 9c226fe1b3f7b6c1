//! Reading and writing configuration files.

use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::site::SiteConfig;

/// On-disk configuration format, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
    Yaml,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_extension(ext)
    }

    pub fn from_extension(ext: &str) -> Result<Self, ConfigError> {
        match ext.to_ascii_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl SiteConfig {
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(src)?)
    }

    pub fn from_json_str(src: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(src)?)
    }

    pub fn from_yaml_str(src: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(src)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Parse `src` in the given format, without validating.
    pub fn parse(src: &str, format: Format) -> Result<Self, ConfigError> {
        match format {
            Format::Toml => Self::from_toml_str(src),
            Format::Json => Self::from_json_str(src),
            Format::Yaml => Self::from_yaml_str(src),
        }
    }

    /// Serialize in the given format.
    pub fn render(&self, format: Format) -> Result<String, ConfigError> {
        match format {
            Format::Toml => self.to_toml_string(),
            Format::Json => self.to_json_string(),
            Format::Yaml => self.to_yaml_string(),
        }
    }

    /// Read a configuration file without validating it.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let format = Format::from_path(path)?;
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;

        tracing::debug!("Parsing {} as {:?}", path.display(), format);
        Self::parse(&content, format)
    }

    /// Read and validate a configuration file.
    ///
    /// Warnings are logged; any error fails the load.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::read(path)?;

        let diagnostics = config
            .validate()
            .into_result()
            .map_err(ConfigError::Invalid)?;
        diagnostics.log_warnings();

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the configuration in the format implied by `path`.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let format = Format::from_path(path)?;
        let content = self.render(format)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Write(parent.to_path_buf(), e))?;
        }
        fs::write(path, content).map_err(|e| ConfigError::Write(path.to_path_buf(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::HeaderLink;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const SITE_TOML: &str = r##"
title = "Opacus"
tagline = "Train PyTorch models with Differential Privacy"
url = "https://opacus.ai"
baseUrl = "/opacus/"
cleanUrl = true
organizationName = "pytorch"
projectName = "opacus"
scripts = ["https://buttons.github.io/buttons.js", "${baseUrl}js/mathjax.js"]
stylesheets = ["${baseUrl}css/code_block_buttons.css"]

[colors]
primaryColor = "#203F58"
secondaryColor = "#AFAFFF"

[[headerLinks]]
doc = "introduction"
label = "Introduction"

[[headerLinks]]
href = "${baseUrl}tutorials/"
label = "Tutorials"
"##;

    #[test]
    fn parses_toml_with_defaults() {
        let site = SiteConfig::from_toml_str(SITE_TOML).unwrap();

        assert_eq!(site.title, "Opacus");
        assert_eq!(site.base_url, "/opacus/");
        assert!(site.clean_url);
        assert!(!site.scroll_to_top);
        assert_eq!(site.highlight.theme, "default");
        assert_eq!(site.docs_url, "docs");
        assert_eq!(site.header_links.len(), 2);
        assert_eq!(site.header_links[1], HeaderLink::href("${baseUrl}tutorials/", "Tutorials"));
    }

    #[test]
    fn toml_round_trip_is_lossless() {
        let site = SiteConfig::from_toml_str(SITE_TOML).unwrap();

        let reloaded = SiteConfig::from_toml_str(&site.to_toml_string().unwrap()).unwrap();

        assert_eq!(site, reloaded);
    }

    #[test]
    fn json_and_yaml_round_trips_are_lossless() {
        let site = SiteConfig::from_toml_str(SITE_TOML).unwrap();

        let json = SiteConfig::from_json_str(&site.to_json_string().unwrap()).unwrap();
        let yaml = SiteConfig::from_yaml_str(&site.to_yaml_string().unwrap()).unwrap();

        assert_eq!(site, json);
        assert_eq!(site, yaml);
    }

    #[test]
    fn picks_format_from_extension() {
        assert_eq!(Format::from_path(Path::new("site.toml")).unwrap(), Format::Toml);
        assert_eq!(Format::from_path(Path::new("siteConfig.JSON")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(Path::new("site.yml")).unwrap(), Format::Yaml);
        assert!(matches!(
            Format::from_path(Path::new("siteConfig.js")),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "js"
        ));
    }

    #[test]
    fn save_then_load_reproduces_config() {
        let temp = tempdir().unwrap();
        let site = SiteConfig::from_toml_str(SITE_TOML).unwrap();

        for name in ["site.toml", "nested/site.json", "site.yaml"] {
            let path = temp.path().join(name);
            site.save(&path).unwrap();

            assert_eq!(SiteConfig::load(&path).unwrap(), site, "{name}");
        }
    }

    #[test]
    fn load_rejects_invalid_config() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("site.toml");
        fs::write(&path, "title = \"\"\n").unwrap();

        let err = SiteConfig::load(&path).unwrap_err();

        match err {
            ConfigError::Invalid(diag) => assert!(diag.has_errors()),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn read_reports_missing_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("missing.toml");

        assert!(matches!(SiteConfig::read(&path), Err(ConfigError::Read(p, _)) if p == path));
    }

    #[test]
    fn rejects_mixed_header_link_in_file() {
        let src = format!("{SITE_TOML}\n[[headerLinks]]\ndoc = \"faq\"\nhref = \"/faq\"\nlabel = \"FAQ\"\n");

        let err = SiteConfig::from_toml_str(&src).unwrap_err();

        assert!(err.to_string().contains("mixes `doc` and `href`"));
    }
}
