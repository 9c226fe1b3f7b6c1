//! The site configuration record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::base_path::BasePath;
use crate::error::ConfigError;
use crate::header::{HeaderLink, ResolvedLink};
use crate::url::UrlContext;

/// Site configuration handed to the generator.
///
/// Keys are camelCase on the wire because that is what the generator
/// reads. Tables (`colors`, `highlight`, `algolia`) and the `headerLinks`
/// array come last so the TOML form stays flat at the top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub title: String,
    pub tagline: String,
    /// Canonical site URL, scheme and host only.
    pub url: String,
    /// Path prefix the site is served under.
    pub base_url: String,
    pub clean_url: bool,

    /// Owner of the source repository.
    pub organization_name: String,
    /// Name of the source repository.
    pub project_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ga_tracking_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_page_nav: Option<OnPageNav>,
    pub scroll_to_top: bool,
    pub docs_side_nav_collapsible: bool,
    pub disable_header_title: bool,
    #[serde(rename = "wrapPagesHTML")]
    pub wrap_pages_html: bool,

    /// Prefix for "edit this page" links; a doc path is appended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,

    /// Languages highlighted with Prism instead of the default highlighter.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub use_prism: Vec<String>,
    #[serde(default = "default_docs_url")]
    pub docs_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_docs_path: Option<String>,

    /// Injected into every page, in order.
    pub scripts: Vec<String>,
    /// Injected into every page, in order.
    pub stylesheets: Vec<String>,

    pub colors: Colors,
    pub highlight: Highlight,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algolia: Option<Algolia>,

    pub header_links: Vec<HeaderLink>,
}

fn default_docs_url() -> String {
    "docs".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            tagline: String::new(),
            url: String::new(),
            base_url: "/".to_string(),
            clean_url: false,
            organization_name: String::new(),
            project_name: String::new(),
            ga_tracking_id: None,
            header_icon: None,
            footer_icon: None,
            favicon: None,
            og_image: None,
            twitter_image: None,
            on_page_nav: None,
            scroll_to_top: false,
            docs_side_nav_collapsible: false,
            disable_header_title: false,
            wrap_pages_html: false,
            edit_url: None,
            copyright: None,
            use_prism: Vec::new(),
            docs_url: default_docs_url(),
            custom_docs_path: None,
            scripts: Vec::new(),
            stylesheets: Vec::new(),
            colors: Colors::default(),
            highlight: Highlight::default(),
            algolia: None,
            header_links: Vec::new(),
        }
    }
}

/// Two-entry theme palette, hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Colors {
    pub primary_color: String,
    pub secondary_color: String,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            primary_color: "#2E8555".to_string(),
            secondary_color: "#205C3B".to_string(),
        }
    }
}

/// Syntax highlighting settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Highlight {
    pub theme: String,
}

impl Default for Highlight {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
        }
    }
}

/// On-page table of contents placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnPageNav {
    /// Rendered in a separate column next to the content.
    Separate,
}

/// Hosted search integration.
///
/// The API key is a search-only key but should still stay out of version
/// control; prefer `apiKeyEnv` over a literal `apiKey`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Algolia {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Environment variable holding the API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    pub index_name: String,
}

impl Algolia {
    /// The API key, taken from the environment first and the literal second.
    pub fn api_key(&self) -> Option<String> {
        let from_env = self
            .api_key_env
            .as_deref()
            .and_then(|name| std::env::var(name).ok())
            .filter(|key| !key.is_empty());

        from_env.or_else(|| self.api_key.clone().filter(|key| !key.is_empty()))
    }

    /// A literal key is stored in the configuration file itself.
    pub fn has_plaintext_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }
}

impl fmt::Debug for Algolia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Algolia")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_key_env", &self.api_key_env)
            .field("index_name", &self.index_name)
            .finish()
    }
}

/// Search settings after the API key has been looked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSearch {
    pub api_key: Option<String>,
    pub index_name: String,
}

/// A configuration with every URL in its final, page-ready form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSite {
    pub title: String,
    pub tagline: String,
    pub site_url: String,
    pub base_url: String,
    pub repo_url: String,
    pub header_links: Vec<ResolvedLink>,
    pub scripts: Vec<String>,
    pub stylesheets: Vec<String>,
    pub header_icon: Option<String>,
    pub footer_icon: Option<String>,
    pub favicon: Option<String>,
    /// Absolute URL, as social cards require.
    pub og_image: Option<String>,
    /// Absolute URL, as social cards require.
    pub twitter_image: Option<String>,
    pub ga_tracking_id: Option<String>,
    pub search: Option<ResolvedSearch>,
    pub colors: Colors,
    pub highlight_theme: String,
    pub edit_url: Option<String>,
    pub copyright: Option<String>,
    pub disable_header_title: bool,
}

impl SiteConfig {
    /// The normalized base path.
    pub fn base_path(&self) -> BasePath {
        BasePath::new(&self.base_url)
    }

    /// Context used to expand and anchor this site's URLs.
    pub fn url_context(&self) -> UrlContext {
        UrlContext {
            base: self.base_path(),
            site_url: self.url.clone(),
            organization_name: self.organization_name.clone(),
            project_name: self.project_name.clone(),
            docs_url: self.docs_url.clone(),
            clean_url: self.clean_url,
        }
    }

    /// Link to the source repository.
    pub fn repo_url(&self) -> String {
        format!(
            "https://github.com/{}/{}",
            self.organization_name, self.project_name
        )
    }

    /// "Edit this page" link for a doc source path, if editing is configured.
    pub fn edit_url_for(&self, doc_path: &str) -> Result<Option<String>, ConfigError> {
        let Some(edit_url) = &self.edit_url else {
            return Ok(None);
        };

        let base = self.url_context().expand(edit_url)?;
        Ok(Some(format!(
            "{}/{}",
            base.trim_end_matches('/'),
            doc_path.trim_start_matches('/')
        )))
    }

    /// A copy with placeholders expanded, in the shape the generator reads.
    ///
    /// Scripts, stylesheets and `href` header links are injected verbatim by
    /// the generator, so they are also anchored on the base path. Image
    /// paths are only expanded: the generator prefixes those itself.
    pub fn expand(&self) -> Result<SiteConfig, ConfigError> {
        let ctx = self.url_context();
        let expand_opt = |value: &Option<String>| -> Result<Option<String>, ConfigError> {
            value.as_deref().map(|v| ctx.expand(v)).transpose()
        };

        let header_links = self
            .header_links
            .iter()
            .map(|link| match link {
                HeaderLink::Href { href, label } => Ok(HeaderLink::Href {
                    href: ctx.resolve(href)?,
                    label: label.clone(),
                }),
                other => Ok(other.clone()),
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let algolia = self.algolia.as_ref().map(|a| Algolia {
            api_key: a.api_key(),
            api_key_env: None,
            index_name: a.index_name.clone(),
        });

        Ok(SiteConfig {
            base_url: ctx.base.to_string(),
            header_icon: expand_opt(&self.header_icon)?,
            footer_icon: expand_opt(&self.footer_icon)?,
            favicon: expand_opt(&self.favicon)?,
            og_image: expand_opt(&self.og_image)?,
            twitter_image: expand_opt(&self.twitter_image)?,
            edit_url: expand_opt(&self.edit_url)?,
            copyright: expand_opt(&self.copyright)?,
            scripts: resolve_all(&ctx, &self.scripts)?,
            stylesheets: resolve_all(&ctx, &self.stylesheets)?,
            algolia,
            header_links,
            ..self.clone()
        })
    }

    /// Resolve every URL for rendering, keeping configured order.
    pub fn resolve(&self) -> Result<ResolvedSite, ConfigError> {
        let ctx = self.url_context();
        let resolve_opt = |value: &Option<String>| -> Result<Option<String>, ConfigError> {
            value.as_deref().map(|v| ctx.resolve(v)).transpose()
        };
        let absolute_opt = |value: &Option<String>| -> Result<Option<String>, ConfigError> {
            value.as_deref().map(|v| ctx.absolute(v)).transpose()
        };

        let header_links = self
            .header_links
            .iter()
            .map(|link| link.resolve(&ctx))
            .collect::<Result<Vec<_>, _>>()?;

        let search = self.algolia.as_ref().map(|a| ResolvedSearch {
            api_key: a.api_key(),
            index_name: a.index_name.clone(),
        });

        Ok(ResolvedSite {
            title: self.title.clone(),
            tagline: self.tagline.clone(),
            site_url: self.url.clone(),
            base_url: ctx.base.to_string(),
            repo_url: self.repo_url(),
            header_links,
            scripts: resolve_all(&ctx, &self.scripts)?,
            stylesheets: resolve_all(&ctx, &self.stylesheets)?,
            header_icon: resolve_opt(&self.header_icon)?,
            footer_icon: resolve_opt(&self.footer_icon)?,
            favicon: resolve_opt(&self.favicon)?,
            og_image: absolute_opt(&self.og_image)?,
            twitter_image: absolute_opt(&self.twitter_image)?,
            ga_tracking_id: self.ga_tracking_id.clone(),
            search,
            colors: self.colors.clone(),
            highlight_theme: self.highlight.theme.clone(),
            edit_url: self.edit_url.as_deref().map(|e| ctx.expand(e)).transpose()?,
            copyright: self.copyright.as_deref().map(|c| ctx.expand(c)).transpose()?,
            disable_header_title: self.disable_header_title,
        })
    }
}

fn resolve_all(ctx: &UrlContext, urls: &[String]) -> Result<Vec<String>, ConfigError> {
    urls.iter().map(|url| ctx.resolve(url)).collect()
}
