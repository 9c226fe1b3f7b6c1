//! Export bundle writer.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use docsite_config::{ConfigError, SiteConfig};

use crate::assets::ThemeCss;
use crate::templates::TemplateEngine;

/// Configuration for an export run.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Output directory
    pub output_dir: PathBuf,

    /// Minify the theme stylesheet
    pub minify: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("build"),
            minify: true,
        }
    }
}

/// Result of an export run.
#[derive(Debug)]
pub struct ExportResult {
    /// Files written, relative to the output directory
    pub files: Vec<PathBuf>,

    /// Total export time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to resolve configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to render template: {0}")]
    Template(String),

    #[error("Failed to write `{0}`")]
    Write(PathBuf, #[source] std::io::Error),
}

/// Writes the generator config, page fragments and theme CSS.
pub struct Exporter {
    config: ExportConfig,
    templates: TemplateEngine,
}

impl Exporter {
    /// Create a new exporter.
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            templates: TemplateEngine::new(),
        }
    }

    /// Export `site` into the output directory.
    ///
    /// Writes:
    /// - `siteConfig.json`, placeholders expanded, for the site generator
    /// - `head.html` and `nav.html` fragments
    /// - `index.html`, a preview page stitching the fragments together
    /// - `css/theme.css`
    pub fn export(&self, site: &SiteConfig) -> Result<ExportResult, ExportError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| ExportError::Write(self.config.output_dir.clone(), e))?;

        let mut files = Vec::new();

        let expanded = site.expand()?;
        self.write("siteConfig.json", expanded.to_json_string()?, &mut files)?;

        let resolved = site.resolve()?;
        tracing::debug!(
            "Resolved {} header links, {} scripts, {} stylesheets",
            resolved.header_links.len(),
            resolved.scripts.len(),
            resolved.stylesheets.len()
        );

        for (name, template) in [
            ("head.html", "head.html"),
            ("nav.html", "nav.html"),
            ("index.html", "preview.html"),
        ] {
            let html = self
                .templates
                .render(template, &resolved)
                .map_err(|e: minijinja::Error| ExportError::Template(e.to_string()))?;
            self.write(name, html, &mut files)?;
        }

        self.write("css/theme.css", self.theme_css(site), &mut files)?;

        let duration = start.elapsed();

        Ok(ExportResult {
            files,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    fn theme_css(&self, site: &SiteConfig) -> String {
        let css = ThemeCss::generate(&site.colors);
        if !self.config.minify {
            return css;
        }

        match ThemeCss::minify(&css) {
            Ok(minified) => minified,
            Err(e) => {
                tracing::warn!("Failed to minify theme CSS, writing it unminified: {}", e);
                css
            }
        }
    }

    fn write(
        &self,
        relative: &str,
        content: String,
        files: &mut Vec<PathBuf>,
    ) -> Result<(), ExportError> {
        let path = self.config.output_dir.join(relative);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ExportError::Write(parent.to_path_buf(), e))?;
        }
        if let Err(e) = fs::write(&path, content) {
            return Err(ExportError::Write(path, e));
        }

        tracing::debug!("Wrote {}", path.display());
        files.push(Path::new(relative).to_path_buf());
        Ok(())
    }
}
