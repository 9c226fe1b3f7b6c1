//! Configuration error types.

use std::path::PathBuf;

use crate::validate::Diagnostics;

/// Errors that can occur while loading, saving or resolving a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read `{0}`")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to write `{0}`")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("Unsupported config format `{0}` (expected toml, json, yaml or yml)")]
    UnsupportedFormat(String),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unknown placeholder `${{{name}}}` in `{value}`")]
    UnknownPlaceholder { name: String, value: String },

    // No #[from]: the diagnostics already render every problem themselves.
    #[error("{0}")]
    Invalid(Diagnostics),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn read_error_names_the_file() {
        let err = ConfigError::Read(
            PathBuf::from("site.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );

        assert_eq!(err.to_string(), "Failed to read `site.toml`");
    }

    #[test]
    fn unknown_placeholder_shows_braces() {
        let err = ConfigError::UnknownPlaceholder {
            name: "cdn".to_string(),
            value: "${cdn}/x.js".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Unknown placeholder `${cdn}` in `${cdn}/x.js`"
        );
    }
}
