//! Theme stylesheet generation.

use docsite_config::Colors;

/// Theme stylesheet built from the configured palette.
pub struct ThemeCss;

impl ThemeCss {
    /// Generate the theme CSS: palette custom properties plus the rules
    /// that apply them to the header, links and search box.
    pub fn generate(colors: &Colors) -> String {
        format!(
            ":root {{\n  --primary-color: {};\n  --secondary-color: {};\n}}\n{}",
            colors.primary_color, colors.secondary_color, THEME_RULES
        )
    }

    /// Minify CSS using lightningcss.
    pub fn minify(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const THEME_RULES: &str = r#"
.fixedHeaderContainer {
  background: var(--primary-color);
  color: #fff;
}

.navItem a {
  color: #fff;
  text-decoration: none;
}

.navItem a:hover,
.navItem.active a {
  color: var(--secondary-color);
}

.navSearchWrapper input {
  border: 1px solid var(--secondary-color);
  border-radius: 0.25rem;
}

.mainContainer a,
.nav-footer a {
  color: var(--primary-color);
}

.button {
  border: 1px solid var(--primary-color);
  color: var(--primary-color);
  padding: 0.5rem 1rem;
}

.button:hover {
  background: var(--primary-color);
  color: #fff;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> Colors {
        Colors {
            primary_color: "#203F58".to_string(),
            secondary_color: "#AFAFFF".to_string(),
        }
    }

    #[test]
    fn generates_palette_variables() {
        let css = ThemeCss::generate(&colors());

        assert!(css.starts_with(":root {\n  --primary-color: #203F58;\n  --secondary-color: #AFAFFF;\n}"));
        assert!(css.contains("var(--secondary-color)"));
    }

    #[test]
    fn minifies_generated_css() {
        let css = ThemeCss::generate(&colors());

        let minified = ThemeCss::minify(&css).unwrap();

        assert!(minified.len() < css.len());
        assert!(minified.contains("--primary-color"));
        assert!(!minified.contains('\n'));
    }
}
