//! Typed site configuration for a documentation website.
//!
//! This crate models the configuration record consumed by the site
//! generator: identity, navigation, theme, third-party integration keys and
//! the script/stylesheet lists injected into every page. It also resolves
//! every site-relative URL against the configured base path.

pub mod base_path;
pub mod error;
pub mod header;
pub mod loader;
pub mod preset;
pub mod site;
pub mod url;
pub mod validate;

pub use base_path::BasePath;
pub use error::ConfigError;
pub use header::{HeaderLink, HeaderLinkError, LinkKind, ResolvedLink};
pub use loader::Format;
pub use site::{Algolia, Colors, Highlight, OnPageNav, ResolvedSearch, ResolvedSite, SiteConfig};
pub use url::{UrlContext, UrlKind};
pub use validate::{Diagnostic, Diagnostics, Severity};
