//! Navigation bar entries.
//!
//! # Example
//!
//! ```toml
//! [[headerLinks]]
//! doc = "introduction"
//! label = "Introduction"
//!
//! [[headerLinks]]
//! href = "${baseUrl}api/"
//! label = "API Reference"
//!
//! [[headerLinks]]
//! search = true
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::url::{UrlContext, UrlKind};

/// One entry of the header navigation bar.
///
/// On the wire each variant is identified by which key it carries, and an
/// entry may never carry keys of two variants at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHeaderLink", into = "RawHeaderLink")]
pub enum HeaderLink {
    /// Link to an internal documentation page by its id.
    Doc { doc: String, label: String },
    /// Link to an arbitrary URL, internal or external.
    Href { href: String, label: String },
    /// Position of the search box.
    Search,
}

/// Errors for header link entries that do not match exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeaderLinkError {
    #[error("header link mixes `{0}` and `{1}`; use exactly one of `doc`, `href` or `search`")]
    Mixed(&'static str, &'static str),

    #[error("header link needs one of `doc`, `href` or `search`")]
    MissingVariant,

    #[error("`{0}` header link needs a `label`")]
    MissingLabel(&'static str),

    #[error("search header link does not take a `label`")]
    LabelOnSearch,

    #[error("`search = false` is not allowed; remove the entry instead")]
    SearchDisabled,
}

/// Flat wire form shared by all variants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawHeaderLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    doc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    search: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl TryFrom<RawHeaderLink> for HeaderLink {
    type Error = HeaderLinkError;

    fn try_from(raw: RawHeaderLink) -> Result<Self, Self::Error> {
        match (raw.doc, raw.href, raw.search) {
            (Some(_), Some(_), _) => Err(HeaderLinkError::Mixed("doc", "href")),
            (Some(_), None, Some(_)) => Err(HeaderLinkError::Mixed("doc", "search")),
            (None, Some(_), Some(_)) => Err(HeaderLinkError::Mixed("href", "search")),
            (Some(doc), None, None) => {
                let label = raw.label.ok_or(HeaderLinkError::MissingLabel("doc"))?;
                Ok(Self::Doc { doc, label })
            }
            (None, Some(href), None) => {
                let label = raw.label.ok_or(HeaderLinkError::MissingLabel("href"))?;
                Ok(Self::Href { href, label })
            }
            (None, None, Some(false)) => Err(HeaderLinkError::SearchDisabled),
            (None, None, Some(true)) if raw.label.is_some() => Err(HeaderLinkError::LabelOnSearch),
            (None, None, Some(true)) => Ok(Self::Search),
            (None, None, None) => Err(HeaderLinkError::MissingVariant),
        }
    }
}

impl From<HeaderLink> for RawHeaderLink {
    fn from(link: HeaderLink) -> Self {
        match link {
            HeaderLink::Doc { doc, label } => Self {
                doc: Some(doc),
                label: Some(label),
                ..Default::default()
            },
            HeaderLink::Href { href, label } => Self {
                href: Some(href),
                label: Some(label),
                ..Default::default()
            },
            HeaderLink::Search => Self {
                search: Some(true),
                ..Default::default()
            },
        }
    }
}

/// Which variant a resolved link came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Doc,
    Href,
    Search,
}

/// A header link with its final URL, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLink {
    pub kind: LinkKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Points off-site; rendered with `target="_blank"`.
    pub external: bool,
}

impl HeaderLink {
    pub fn doc(doc: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Doc {
            doc: doc.into(),
            label: label.into(),
        }
    }

    pub fn href(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Href {
            href: href.into(),
            label: label.into(),
        }
    }

    pub fn kind(&self) -> LinkKind {
        match self {
            Self::Doc { .. } => LinkKind::Doc,
            Self::Href { .. } => LinkKind::Href,
            Self::Search => LinkKind::Search,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Doc { label, .. } | Self::Href { label, .. } => Some(label),
            Self::Search => None,
        }
    }

    /// Compute the URL this entry points to.
    pub fn resolve(&self, ctx: &UrlContext) -> Result<ResolvedLink, ConfigError> {
        let resolved = match self {
            Self::Doc { doc, label } => ResolvedLink {
                kind: LinkKind::Doc,
                label: Some(label.clone()),
                href: Some(ctx.doc_url(doc)),
                external: false,
            },
            Self::Href { href, label } => {
                let href = ctx.resolve(href)?;
                ResolvedLink {
                    kind: LinkKind::Href,
                    label: Some(label.clone()),
                    external: UrlKind::of(&href).is_external(),
                    href: Some(href),
                }
            }
            Self::Search => ResolvedLink {
                kind: LinkKind::Search,
                label: None,
                href: None,
                external: false,
            },
        };

        Ok(resolved)
    }
}
