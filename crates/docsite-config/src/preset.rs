//! Built-in configuration for the Opacus documentation site.

use crate::header::HeaderLink;
use crate::site::{Algolia, Colors, Highlight, OnPageNav, SiteConfig};

/// Environment variable the preset reads the search API key from.
pub const ALGOLIA_API_KEY_ENV: &str = "ALGOLIA_API_KEY";

impl SiteConfig {
    /// Configuration of the Opacus website.
    ///
    /// The search API key is not part of the preset; it is read from
    /// [`ALGOLIA_API_KEY_ENV`] when the site is resolved.
    pub fn opacus() -> Self {
        Self {
            title: "Opacus".to_string(),
            tagline: "Train PyTorch models with Differential Privacy".to_string(),
            url: "https://opacus.ai".to_string(),
            base_url: "/".to_string(),
            clean_url: true,
            organization_name: "pytorch".to_string(),
            project_name: "opacus".to_string(),
            ga_tracking_id: None,
            header_icon: Some("img/opacus_favicon.svg".to_string()),
            footer_icon: Some("img/opacus_favicon.svg".to_string()),
            favicon: Some("img/opacus_favicon.png".to_string()),
            og_image: Some("img/opacus_logo.png".to_string()),
            twitter_image: Some("img/opacus_logo.png".to_string()),
            on_page_nav: Some(OnPageNav::Separate),
            scroll_to_top: true,
            docs_side_nav_collapsible: true,
            disable_header_title: true,
            wrap_pages_html: true,
            edit_url: Some(
                "https://github.com/${organizationName}/${projectName}/edit/main/docs/".to_string(),
            ),
            copyright: Some("Copyright \u{a9} Meta Platforms, Inc.".to_string()),
            use_prism: Vec::new(),
            docs_url: "docs".to_string(),
            custom_docs_path: None,
            scripts: strings(&[
                "https://buttons.github.io/buttons.js",
                "https://cdnjs.cloudflare.com/ajax/libs/clipboard.js/2.0.0/clipboard.min.js",
                "${baseUrl}js/code_block_buttons.js",
                "https://cdnjs.cloudflare.com/ajax/libs/mathjax/2.7.5/MathJax.js?config=TeX-AMS-MML_HTMLorMML",
                "${baseUrl}js/mathjax.js",
            ]),
            stylesheets: strings(&["${baseUrl}css/code_block_buttons.css"]),
            colors: Colors {
                primary_color: "#203F58".to_string(),
                secondary_color: "#AFAFFF".to_string(),
            },
            highlight: Highlight {
                theme: "default".to_string(),
            },
            algolia: Some(Algolia {
                api_key: None,
                api_key_env: Some(ALGOLIA_API_KEY_ENV.to_string()),
                index_name: "opacus".to_string(),
            }),
            header_links: vec![
                HeaderLink::doc("introduction", "Introduction"),
                HeaderLink::doc("faq", "FAQ"),
                HeaderLink::href("${baseUrl}tutorials/", "Tutorials"),
                HeaderLink::href("${baseUrl}api/", "API Reference"),
                HeaderLink::href("https://github.com/${organizationName}/${projectName}", "GitHub"),
                HeaderLink::Search,
            ],
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
