//! Template engine for rendering site fragments.

use docsite_config::ResolvedSite;
use minijinja::{context, Environment, Value};

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_filter("attr_value", attr_value);

        env.add_template_owned("head.html".to_string(), HEAD_TEMPLATE.to_string())
            .expect("Failed to add head template");

        env.add_template_owned("nav.html".to_string(), NAV_TEMPLATE.to_string())
            .expect("Failed to add nav template");

        env.add_template_owned("preview.html".to_string(), PREVIEW_TEMPLATE.to_string())
            .expect("Failed to add preview template");

        Self { env }
    }

    /// Render a template against a resolved site.
    pub fn render(&self, template: &str, site: &ResolvedSite) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            site => site,
        })
    }

    /// Header bar with the navigation links in configured order.
    pub fn render_nav(&self, site: &ResolvedSite) -> Result<String, minijinja::Error> {
        self.render("nav.html", site)
    }

    /// Everything injected into `<head>`: stylesheets, scripts, icons, meta.
    pub fn render_head(&self, site: &ResolvedSite) -> Result<String, minijinja::Error> {
        self.render("head.html", site)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape a value for an HTML attribute, leaving `/` intact so URLs stay
/// readable in the output.
fn attr_value(value: String) -> Value {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    Value::from_safe_string(out)
}

const HEAD_TEMPLATE: &str = r##"<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{ site.title }}{% if site.tagline %} · {{ site.tagline }}{% endif %}</title>
<meta property="og:title" content="{{ site.title | attr_value }}">
<meta property="og:url" content="{{ site.siteUrl | attr_value }}{{ site.baseUrl | attr_value }}">
{% if site.tagline %}<meta name="description" content="{{ site.tagline | attr_value }}">
{% endif %}{% if site.ogImage %}<meta property="og:image" content="{{ site.ogImage | attr_value }}">
{% endif %}{% if site.twitterImage %}<meta name="twitter:card" content="summary">
<meta name="twitter:image" content="{{ site.twitterImage | attr_value }}">
{% endif %}{% if site.favicon %}<link rel="shortcut icon" href="{{ site.favicon | attr_value }}">
{% endif %}<link rel="stylesheet" href="{{ site.baseUrl | attr_value }}css/theme.css">
{% for href in site.stylesheets %}<link rel="stylesheet" href="{{ href | attr_value }}">
{% endfor %}{% for src in site.scripts %}<script type="text/javascript" src="{{ src | attr_value }}"></script>
{% endfor %}{% if site.gaTrackingId %}<script async src="https://www.googletagmanager.com/gtag/js?id={{ site.gaTrackingId | attr_value }}"></script>
<script>
  window.dataLayer = window.dataLayer || [];
  function gtag(){dataLayer.push(arguments);}
  gtag('js', new Date());
  gtag('config', '{{ site.gaTrackingId | attr_value }}');
</script>
{% endif %}{% if site.search and site.search.apiKey %}<link rel="stylesheet" href="https://cdn.jsdelivr.net/docsearch.js/1/docsearch.min.css">
<script src="https://cdn.jsdelivr.net/docsearch.js/1/docsearch.min.js"></script>
<script>
  document.addEventListener('DOMContentLoaded', function () {
    docsearch({
      apiKey: '{{ site.search.apiKey | attr_value }}',
      indexName: '{{ site.search.indexName | attr_value }}',
      inputSelector: '#search_input_react'
    });
  });
</script>
{% endif %}"##;

const NAV_TEMPLATE: &str = r##"<div class="fixedHeaderContainer">
  <header>
    <a href="{{ site.baseUrl | attr_value }}">
      {% if site.headerIcon %}<img class="logo" src="{{ site.headerIcon | attr_value }}" alt="{{ site.title | attr_value }}">{% endif %}
      {% if not site.disableHeaderTitle %}<h2 class="headerTitleWithLogo">{{ site.title }}</h2>{% endif %}
    </a>
    <nav class="slidingNav">
      <ul class="nav-site nav-site-internal">
{% for link in site.headerLinks %}{% if link.kind == "search" %}        <li class="navSearchWrapper reactNavSearchWrapper"><input type="text" id="search_input_react" placeholder="Search" title="Search"></li>
{% else %}        <li class="navItem"><a href="{{ link.href | attr_value }}"{% if link.external %} target="_blank" rel="noreferrer noopener"{% endif %}>{{ link.label }}</a></li>
{% endif %}{% endfor %}      </ul>
    </nav>
  </header>
</div>"##;

const PREVIEW_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
{% include "head.html" %}
</head>
<body>
{% include "nav.html" %}
<main class="mainContainer">
  <h1>{{ site.title }}</h1>
  {% if site.tagline %}<p class="tagline">{{ site.tagline }}</p>{% endif %}
  <p><a class="button" href="{{ site.repoUrl | attr_value }}">GitHub</a>
  {% if site.editUrl %}<a class="edit-page-link button" href="{{ site.editUrl | attr_value }}">Edit</a>{% endif %}</p>
</main>
<footer class="nav-footer">
  {% if site.footerIcon %}<img src="{{ site.footerIcon | attr_value }}" alt="{{ site.title | attr_value }}" width="66" height="58">{% endif %}
  {% if site.copyright %}<section class="copyright">{{ site.copyright }}</section>{% endif %}
</footer>
</body>
</html>"##;

#[cfg(test)]
mod tests {
    use super::*;
    use docsite_config::{HeaderLink, SiteConfig};

    fn resolved(base: &str) -> ResolvedSite {
        SiteConfig {
            base_url: base.to_string(),
            ..SiteConfig::opacus()
        }
        .resolve()
        .unwrap()
    }

    #[test]
    fn renders_header_links_in_order() {
        let engine = TemplateEngine::new();

        let html = engine.render_nav(&resolved("/opacus/")).unwrap();

        let positions: Vec<usize> = [
            r#"<a href="/opacus/docs/introduction">Introduction</a>"#,
            r#"<a href="/opacus/docs/faq">FAQ</a>"#,
            r#"<a href="/opacus/tutorials/">Tutorials</a>"#,
            r#"<a href="/opacus/api/">API Reference</a>"#,
            r#"<a href="https://github.com/pytorch/opacus" target="_blank""#,
            r#"id="search_input_react""#,
        ]
        .iter()
        .map(|needle| html.find(needle).unwrap_or_else(|| panic!("missing {needle}\n{html}")))
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]), "out of order: {positions:?}");
    }

    #[test]
    fn hides_title_when_disabled() {
        let engine = TemplateEngine::new();
        let mut site = resolved("/");

        let hidden = engine.render_nav(&site).unwrap();
        site.disable_header_title = false;
        let shown = engine.render_nav(&site).unwrap();

        assert!(!hidden.contains("headerTitleWithLogo"));
        assert!(shown.contains(r#"<h2 class="headerTitleWithLogo">Opacus</h2>"#));
    }

    #[test]
    fn head_injects_resources_under_base() {
        let engine = TemplateEngine::new();

        let html = engine.render_head(&resolved("/opacus/")).unwrap();

        assert!(html.contains(r#"<link rel="stylesheet" href="/opacus/css/code_block_buttons.css">"#));
        assert!(html.contains(r#"<script type="text/javascript" src="/opacus/js/mathjax.js"></script>"#));
        assert!(html.contains(r#"src="https://buttons.github.io/buttons.js""#));
        assert!(html.contains(r#"<link rel="shortcut icon" href="/opacus/img/opacus_favicon.png">"#));
        assert!(html.contains(
            r#"<meta property="og:image" content="https://opacus.ai/opacus/img/opacus_logo.png">"#
        ));
    }

    #[test]
    fn head_escapes_query_strings() {
        let engine = TemplateEngine::new();
        let site = SiteConfig {
            scripts: vec!["https://cdn.example.com/a.js?x=1&y=2".to_string()],
            ..SiteConfig::opacus()
        }
        .resolve()
        .unwrap();

        let html = engine.render_head(&site).unwrap();

        assert!(html.contains(r#"src="https://cdn.example.com/a.js?x=1&amp;y=2""#));
    }

    #[test]
    fn analytics_only_when_configured() {
        let engine = TemplateEngine::new();
        let mut site = resolved("/");

        assert!(!engine.render_head(&site).unwrap().contains("gtag"));

        site.ga_tracking_id = Some("UA-117752657-2".to_string());
        let html = engine.render_head(&site).unwrap();
        assert!(html.contains("gtag('config', 'UA-117752657-2');"));
    }

    #[test]
    fn search_bootstrap_needs_api_key() {
        let engine = TemplateEngine::new();
        let mut site = resolved("/");
        site.search = Some(docsite_config::ResolvedSearch {
            api_key: None,
            index_name: "opacus".to_string(),
        });

        assert!(!engine.render_head(&site).unwrap().contains("docsearch("));

        site.search = Some(docsite_config::ResolvedSearch {
            api_key: Some("key".to_string()),
            index_name: "opacus".to_string(),
        });
        let html = engine.render_head(&site).unwrap();
        assert!(html.contains("indexName: 'opacus'"));
    }

    #[test]
    fn preview_includes_fragments() {
        let engine = TemplateEngine::new();
        let site = SiteConfig {
            header_links: vec![HeaderLink::doc("faq", "FAQ")],
            ..SiteConfig::opacus()
        }
        .resolve()
        .unwrap();

        let html = engine.render("preview.html", &site).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Opacus · Train PyTorch models with Differential Privacy</title>"));
        assert!(html.contains(r#"<a href="/docs/faq">FAQ</a>"#));
        assert!(html.contains(r#"href="https://github.com/pytorch/opacus/edit/main/docs/""#));
    }
}
