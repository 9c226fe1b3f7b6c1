//! Placeholder expansion and base-path anchoring for configured URLs.
//!
//! Configured URLs may reference other settings through `${name}`
//! placeholders:
//!
//! | placeholder | expands to |
//! |---|---|
//! | `${baseUrl}` | the normalized base path |
//! | `${url}` | the canonical site URL |
//! | `${organizationName}` | the repository owner |
//! | `${projectName}` | the repository name |
//!
//! After expansion, site-relative URLs are anchored on the base path so a
//! site served from `/opacus/` never emits a link to `/css/...`.

use std::sync::LazyLock;

use regex::Regex;

use crate::base_path::BasePath;
use crate::error::ConfigError;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
});

static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*:").expect("scheme pattern is valid"));

/// How a configured URL is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    /// Carries a scheme (`https:`, `mailto:`) or is protocol-relative (`//cdn`).
    External,
    /// In-page anchor (`#section`).
    Fragment,
    /// Anything else: resolved against the base path.
    SiteRelative,
}

impl UrlKind {
    pub fn of(url: &str) -> Self {
        if url.starts_with("//") || SCHEME.is_match(url) {
            Self::External
        } else if url.starts_with('#') {
            Self::Fragment
        } else {
            Self::SiteRelative
        }
    }

    pub fn is_external(self) -> bool {
        self == Self::External
    }
}

/// Names of every `${...}` placeholder appearing in `raw`, in order.
pub fn placeholders(raw: &str) -> impl Iterator<Item = &str> {
    PLACEHOLDER
        .captures_iter(raw)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}

/// Everything needed to turn a configured URL into the one emitted on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlContext {
    pub base: BasePath,
    pub site_url: String,
    pub organization_name: String,
    pub project_name: String,
    /// Directory doc pages are served from, relative to the base path.
    pub docs_url: String,
    /// Omit the `.html` extension on doc links.
    pub clean_url: bool,
}

impl UrlContext {
    /// A context for a site at `base` with no other settings filled in.
    pub fn with_base(base: BasePath) -> Self {
        Self {
            base,
            site_url: String::new(),
            organization_name: String::new(),
            project_name: String::new(),
            docs_url: "docs".to_string(),
            clean_url: false,
        }
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        match name {
            "baseUrl" => Some(self.base.as_str()),
            "url" => Some(&self.site_url),
            "organizationName" => Some(&self.organization_name),
            "projectName" => Some(&self.project_name),
            _ => None,
        }
    }

    /// Expand `${...}` placeholders without anchoring the result.
    ///
    /// `${baseUrl}` already ends in `/`, so a `/` directly after it is
    /// swallowed: `${baseUrl}/css` and `${baseUrl}css` expand the same.
    pub fn expand(&self, raw: &str) -> Result<String, ConfigError> {
        let mut out = String::with_capacity(raw.len());
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(raw) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };

            let value = self
                .lookup(name.as_str())
                .ok_or_else(|| ConfigError::UnknownPlaceholder {
                    name: name.as_str().to_string(),
                    value: raw.to_string(),
                })?;

            out.push_str(&raw[last..whole.start()]);
            out.push_str(value);
            last = whole.end();

            if value.ends_with('/') && raw[last..].starts_with('/') {
                last += 1;
            }
        }

        out.push_str(&raw[last..]);
        Ok(out)
    }

    /// Expand placeholders, then anchor site-relative results on the base path.
    pub fn resolve(&self, raw: &str) -> Result<String, ConfigError> {
        let expanded = self.expand(raw)?;

        let resolved = match UrlKind::of(&expanded) {
            UrlKind::External | UrlKind::Fragment => expanded,
            UrlKind::SiteRelative if expanded.is_empty() => self.base.to_string(),
            UrlKind::SiteRelative if self.base.contains(&expanded) => expanded,
            UrlKind::SiteRelative => self.base.join(&expanded),
        };

        Ok(resolved)
    }

    /// URL of an internal documentation page.
    pub fn doc_url(&self, doc: &str) -> String {
        let docs = self.docs_url.trim_matches('/');
        let doc = doc.trim_matches('/');
        let path = if docs.is_empty() {
            doc.to_string()
        } else {
            format!("{docs}/{doc}")
        };

        if self.clean_url {
            self.base.join(&path)
        } else {
            self.base.join(&format!("{path}.html"))
        }
    }

    /// Absolute URL (scheme and host included) for a site-relative path.
    pub fn absolute(&self, raw: &str) -> Result<String, ConfigError> {
        let resolved = self.resolve(raw)?;
        if UrlKind::of(&resolved).is_external() {
            return Ok(resolved);
        }
        Ok(format!("{}{}", self.site_url.trim_end_matches('/'), resolved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(base: &str) -> UrlContext {
        UrlContext {
            base: BasePath::new(base),
            site_url: "https://opacus.ai".to_string(),
            organization_name: "pytorch".to_string(),
            project_name: "opacus".to_string(),
            docs_url: "docs".to_string(),
            clean_url: true,
        }
    }

    #[test]
    fn classifies_urls() {
        assert_eq!(UrlKind::of("https://buttons.github.io/buttons.js"), UrlKind::External);
        assert_eq!(UrlKind::of("//cdn.example.com/a.js"), UrlKind::External);
        assert_eq!(UrlKind::of("mailto:team@example.com"), UrlKind::External);
        assert_eq!(UrlKind::of("#install"), UrlKind::Fragment);
        assert_eq!(UrlKind::of("/opacus/api/"), UrlKind::SiteRelative);
        assert_eq!(UrlKind::of("img/logo.svg"), UrlKind::SiteRelative);
    }

    #[test]
    fn resolves_base_url_placeholder() {
        let ctx = ctx("/opacus/");

        assert_eq!(
            ctx.resolve("${baseUrl}css/code_block_buttons.css").unwrap(),
            "/opacus/css/code_block_buttons.css"
        );
    }

    #[test]
    fn collapses_slash_after_base_url() {
        let ctx = ctx("/opacus/");

        assert_eq!(ctx.expand("${baseUrl}/js/mathjax.js").unwrap(), "/opacus/js/mathjax.js");
    }

    #[test]
    fn anchors_bare_relative_paths() {
        let ctx = ctx("/opacus/");

        assert_eq!(ctx.resolve("js/mathjax.js").unwrap(), "/opacus/js/mathjax.js");
        assert_eq!(ctx.resolve("/js/mathjax.js").unwrap(), "/opacus/js/mathjax.js");
        assert_eq!(ctx.resolve("").unwrap(), "/opacus/");
    }

    #[test]
    fn keeps_paths_already_under_base() {
        let ctx = ctx("/opacus/");

        assert_eq!(ctx.resolve("/opacus/api/").unwrap(), "/opacus/api/");
    }

    #[test]
    fn leaves_external_and_fragment_urls_alone() {
        let ctx = ctx("/opacus/");

        assert_eq!(
            ctx.resolve("https://github.com/${organizationName}/${projectName}").unwrap(),
            "https://github.com/pytorch/opacus"
        );
        assert_eq!(ctx.resolve("#top").unwrap(), "#top");
    }

    #[test]
    fn rejects_unknown_placeholder() {
        let err = ctx("/").resolve("${cdn}/a.js").unwrap_err();

        assert!(matches!(
            err,
            ConfigError::UnknownPlaceholder { ref name, .. } if name == "cdn"
        ));
    }

    #[test]
    fn unterminated_placeholder_is_literal() {
        assert_eq!(ctx("/").expand("${baseUrl").unwrap(), "${baseUrl");
    }

    #[test]
    fn lists_placeholders() {
        let names: Vec<&str> = placeholders("${url}${baseUrl}img/${x}").collect();

        assert_eq!(names, vec!["url", "baseUrl", "x"]);
    }

    #[test]
    fn doc_urls_follow_clean_url() {
        let mut ctx = ctx("/opacus/");
        assert_eq!(ctx.doc_url("introduction"), "/opacus/docs/introduction");

        ctx.clean_url = false;
        assert_eq!(ctx.doc_url("introduction"), "/opacus/docs/introduction.html");

        ctx.docs_url = String::new();
        assert_eq!(ctx.doc_url("faq"), "/opacus/faq.html");
    }

    #[test]
    fn absolute_prefixes_site_url() {
        let ctx = ctx("/opacus/");

        assert_eq!(
            ctx.absolute("img/opacus-social.png").unwrap(),
            "https://opacus.ai/opacus/img/opacus-social.png"
        );
    }
}
