//! The URL path prefix a site is served under.

use std::fmt;

use serde::{Serialize, Serializer};

/// A normalized base path: starts with exactly one `/` and ends with `/`.
///
/// ```
/// use docsite_config::BasePath;
///
/// let base = BasePath::new("opacus");
/// assert_eq!(base.as_str(), "/opacus/");
/// assert_eq!(base.join("css/code_block_buttons.css"), "/opacus/css/code_block_buttons.css");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BasePath(String);

impl BasePath {
    /// Normalize a raw base path. Empty input means the site root.
    ///
    /// Repeated leading slashes collapse to one, so the result is never a
    /// protocol-relative `//host/` URL.
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim().trim_start_matches('/');
        let mut path = String::with_capacity(trimmed.len() + 2);

        path.push('/');
        path.push_str(trimmed);
        if !path.ends_with('/') {
            path.push('/');
        }

        Self(path)
    }

    /// The site root, `/`.
    pub fn root() -> Self {
        Self("/".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Append a resource-relative suffix. A leading `/` on the suffix is
    /// dropped so the join point never doubles up.
    pub fn join(&self, suffix: &str) -> String {
        format!("{}{}", self.0, suffix.trim_start_matches('/'))
    }

    /// Whether `url` already lives under this base path.
    pub fn contains(&self, url: &str) -> bool {
        url.starts_with(&self.0) || url == self.0.trim_end_matches('/')
    }
}

impl Default for BasePath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BasePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for BasePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_missing_slashes() {
        assert_eq!(BasePath::new("opacus").as_str(), "/opacus/");
        assert_eq!(BasePath::new("/opacus").as_str(), "/opacus/");
        assert_eq!(BasePath::new("opacus/").as_str(), "/opacus/");
        assert_eq!(BasePath::new("/opacus/").as_str(), "/opacus/");
    }

    #[test]
    fn empty_is_root() {
        assert!(BasePath::new("").is_root());
        assert!(BasePath::new("  ").is_root());
        assert!(BasePath::new("/").is_root());
    }

    #[test]
    fn collapses_leading_double_slash() {
        let base = BasePath::new("//evil.example/");

        assert_eq!(base.as_str(), "/evil.example/");
        assert_eq!(base.join("css/a.css"), "/evil.example/css/a.css");
        assert_eq!(BasePath::new("///").as_str(), "/");
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&BasePath::new("opacus")).unwrap();

        assert_eq!(json, r#""/opacus/""#);
    }

    #[test]
    fn join_strips_leading_slash() {
        let base = BasePath::new("/opacus/");

        assert_eq!(base.join("css/a.css"), "/opacus/css/a.css");
        assert_eq!(base.join("/css/a.css"), "/opacus/css/a.css");
        assert_eq!(base.join(""), "/opacus/");
    }

    #[test]
    fn contains_paths_under_base() {
        let base = BasePath::new("/opacus/");

        assert!(base.contains("/opacus/api/"));
        assert!(base.contains("/opacus"));
        assert!(!base.contains("/api/"));
        assert!(!base.contains("/opacusx/"));
    }

    #[test]
    fn root_contains_every_absolute_path() {
        let base = BasePath::root();

        assert!(base.contains("/api/"));
        assert!(!base.contains("api/"));
    }
}
