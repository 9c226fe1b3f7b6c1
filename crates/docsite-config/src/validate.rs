//! Configuration validation.
//!
//! Validation never stops at the first problem: every check runs and
//! reports into a [`Diagnostics`] list, so a single `check` run shows the
//! whole picture. Errors make the configuration unusable; warnings are
//! logged and otherwise ignored.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::header::HeaderLink;
use crate::site::SiteConfig;
use crate::url::{self, UrlContext, UrlKind};

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("hex color pattern is valid")
});

static TRACKING_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:UA-\d+-\d+|G-[A-Z0-9]+)$").expect("tracking id pattern is valid")
});

static SITE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^/\s]+/?$").expect("site url pattern is valid")
});

const KNOWN_PLACEHOLDERS: &[&str] = &["baseUrl", "url", "organizationName", "projectName"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Config key path, e.g. `headerLinks[2].href`.
    pub field: String,
    pub message: String,
    pub hint: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            field: field.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{level}: [{}] {}", self.field, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  hint: {hint}")?;
        }
        Ok(())
    }
}

/// Findings collected by [`SiteConfig::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.items
            .push(Diagnostic::new(Severity::Error, field, message));
    }

    pub fn error_with_hint(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.items
            .push(Diagnostic::new(Severity::Error, field, message).with_hint(hint));
    }

    pub fn warn(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.items
            .push(Diagnostic::new(Severity::Warning, field, message));
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| d.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Emit warnings through `tracing`.
    pub fn log_warnings(&self) {
        for warning in self.warnings() {
            tracing::warn!("[{}] {}", warning.field, warning.message);
        }
    }

    /// `Err(self)` when any error was recorded.
    pub fn into_result(self) -> Result<Self, Self> {
        if self.has_errors() {
            Err(self)
        } else {
            Ok(self)
        }
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors: Vec<&Diagnostic> = self.errors().collect();
        writeln!(f, "config validation failed:")?;
        for (i, err) in errors.iter().enumerate() {
            write!(f, "{err}")?;
            if i + 1 < errors.len() {
                writeln!(f)?;
            }
        }
        if errors.len() > 1 {
            write!(f, "\nfound {} errors", errors.len())?;
        }
        Ok(())
    }
}

impl SiteConfig {
    /// Run every check and collect the findings.
    pub fn validate(&self) -> Diagnostics {
        let mut diag = Diagnostics::new();

        self.check_identity(&mut diag);
        self.check_colors(&mut diag);
        self.check_placeholders(&mut diag);
        self.check_header_links(&mut diag);
        self.check_resources(&mut diag);
        self.check_integrations(&mut diag);

        diag
    }

    fn check_identity(&self, diag: &mut Diagnostics) {
        for (field, value) in [
            ("title", &self.title),
            ("url", &self.url),
            ("organizationName", &self.organization_name),
            ("projectName", &self.project_name),
        ] {
            if value.trim().is_empty() {
                diag.error(field, "must not be empty");
            }
        }

        if !self.url.is_empty() && !SITE_URL.is_match(&self.url) {
            diag.error_with_hint(
                "url",
                format!("`{}` is not a bare http(s) origin", self.url),
                "put the path prefix in `baseUrl`, e.g. url = \"https://opacus.ai\"",
            );
        }

        if self.base_url.starts_with("//") {
            diag.error_with_hint(
                "baseUrl",
                format!("`{}` is a protocol-relative URL, not a path", self.base_url),
                format!("use `{}`", self.base_path()),
            );
        } else if !self.base_url.starts_with('/') || !self.base_url.ends_with('/') {
            diag.error_with_hint(
                "baseUrl",
                format!("`{}` must start and end with `/`", self.base_url),
                format!("use `{}`", self.base_path()),
            );
        }

        if self.docs_url.contains("${") {
            diag.error("docsUrl", "placeholders are not allowed here");
        }
    }

    fn check_colors(&self, diag: &mut Diagnostics) {
        for (field, value) in [
            ("colors.primaryColor", &self.colors.primary_color),
            ("colors.secondaryColor", &self.colors.secondary_color),
        ] {
            if !HEX_COLOR.is_match(value) {
                diag.error_with_hint(
                    field,
                    format!("`{value}` is not a hex color"),
                    "use `#rgb` or `#rrggbb`",
                );
            }
        }
    }

    fn check_placeholders(&self, diag: &mut Diagnostics) {
        for (field, value) in self.url_fields() {
            for name in url::placeholders(value) {
                if !KNOWN_PLACEHOLDERS.contains(&name) {
                    diag.error_with_hint(
                        field.clone(),
                        format!("unknown placeholder `${{{name}}}`"),
                        format!("known placeholders: {}", KNOWN_PLACEHOLDERS.join(", ")),
                    );
                }
            }
        }
    }

    fn check_header_links(&self, diag: &mut Diagnostics) {
        let mut search_seen = false;

        for (i, link) in self.header_links.iter().enumerate() {
            let field = format!("headerLinks[{i}]");

            if let Some(label) = link.label() {
                if label.trim().is_empty() {
                    diag.error(format!("{field}.label"), "must not be empty");
                }
            }

            match link {
                HeaderLink::Doc { doc, .. } => {
                    if doc.trim().is_empty() {
                        diag.error(format!("{field}.doc"), "must not be empty");
                    } else if doc.starts_with('/') || doc.contains("${") {
                        diag.error_with_hint(
                            format!("{field}.doc"),
                            format!("`{doc}` is not a doc id"),
                            "doc ids are relative names like `introduction`; use `href` for URLs",
                        );
                    }
                }
                HeaderLink::Href { href, .. } => {
                    if href.trim().is_empty() {
                        diag.error(format!("{field}.href"), "must not be empty");
                    }
                }
                HeaderLink::Search => {
                    if search_seen {
                        diag.error(field.clone(), "only one search entry is allowed");
                    }
                    search_seen = true;
                }
            }
        }

        let has_index = self
            .algolia
            .as_ref()
            .is_some_and(|a| !a.index_name.trim().is_empty());
        if search_seen && !has_index {
            diag.error_with_hint(
                "algolia.indexName",
                "a search entry is configured but no search index is set",
                "add an [algolia] table with `indexName`",
            );
        }
    }

    fn check_resources(&self, diag: &mut Diagnostics) {
        let ctx = self.url_context();

        for (list, urls) in [("scripts", &self.scripts), ("stylesheets", &self.stylesheets)] {
            let mut seen = HashSet::new();

            for (i, raw) in urls.iter().enumerate() {
                let field = format!("{list}[{i}]");

                if !seen.insert(raw.as_str()) {
                    diag.warn(field.clone(), format!("`{raw}` is listed more than once"));
                }

                // Unknown placeholders were already reported.
                let Ok(resolved) = ctx.resolve(raw) else {
                    continue;
                };
                // `resolve` anchors every site-relative URL on the base; this
                // only fires if that stops holding.
                if UrlKind::of(&resolved) == UrlKind::SiteRelative && !ctx.base.contains(&resolved)
                {
                    diag.error(
                        field,
                        format!("`{resolved}` is outside base path `{}`", ctx.base),
                    );
                }
            }
        }

        if let Some(edit_url) = &self.edit_url {
            check_edit_url(&ctx, edit_url, diag);
        }
    }

    fn check_integrations(&self, diag: &mut Diagnostics) {
        if let Some(id) = &self.ga_tracking_id {
            if !TRACKING_ID.is_match(id) {
                diag.warn(
                    "gaTrackingId",
                    format!("`{id}` does not look like a `UA-` or `G-` tracking id"),
                );
            }
        }

        if let Some(algolia) = &self.algolia {
            if algolia.has_plaintext_key() {
                diag.warn(
                    "algolia.apiKey",
                    "API key is stored in plaintext; set `apiKeyEnv` and keep the key out of version control",
                );
            }
            if algolia.api_key().is_none() {
                diag.warn("algolia.apiKey", "no API key available; search will not work");
            }
        }
    }

    /// Every field that may carry URL placeholders, with its key path.
    fn url_fields(&self) -> Vec<(String, &str)> {
        let mut fields: Vec<(String, &str)> = Vec::new();

        for (name, value) in [
            ("headerIcon", &self.header_icon),
            ("footerIcon", &self.footer_icon),
            ("favicon", &self.favicon),
            ("ogImage", &self.og_image),
            ("twitterImage", &self.twitter_image),
            ("editUrl", &self.edit_url),
            ("copyright", &self.copyright),
        ] {
            if let Some(value) = value {
                fields.push((name.to_string(), value.as_str()));
            }
        }

        for (i, script) in self.scripts.iter().enumerate() {
            fields.push((format!("scripts[{i}]"), script.as_str()));
        }
        for (i, sheet) in self.stylesheets.iter().enumerate() {
            fields.push((format!("stylesheets[{i}]"), sheet.as_str()));
        }
        for (i, link) in self.header_links.iter().enumerate() {
            if let HeaderLink::Href { href, .. } = link {
                fields.push((format!("headerLinks[{i}].href"), href.as_str()));
            }
        }

        fields
    }
}

fn check_edit_url(ctx: &UrlContext, edit_url: &str, diag: &mut Diagnostics) {
    let Ok(expanded) = ctx.expand(edit_url) else {
        return;
    };

    if !UrlKind::of(&expanded).is_external() {
        diag.error("editUrl", format!("`{expanded}` must be an absolute URL"));
    } else if !expanded.ends_with('/') {
        diag.error_with_hint(
            "editUrl",
            format!("`{expanded}` must end with `/`"),
            "doc paths are appended directly",
        );
    }
}
