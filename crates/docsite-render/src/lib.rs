//! Page fragments and export bundle for a docsite configuration.
//!
//! Renders the header navigation and `<head>` injections from a resolved
//! configuration and writes them, with the theme stylesheet and the
//! generator-ready `siteConfig.json`, into an output directory.

pub mod assets;
pub mod exporter;
pub mod templates;

pub use exporter::{ExportConfig, ExportError, ExportResult, Exporter};
pub use templates::TemplateEngine;
