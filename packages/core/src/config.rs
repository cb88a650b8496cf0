/// Configuration for content tree access
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hard ceiling for navigation link trees, whatever the caller asks for
const MAX_SUPPORTED_NAVIGATION_DEPTH: usize = 64;

/// Tree conventions shared by every accessor built on a `ContentTree`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Reserved child name holding a page's renderable properties and components
    pub content_root_name: String,

    /// Node type that marks a node as a page
    pub page_node_type: String,

    /// Extension appended to links for page-like nodes
    pub default_extension: String,

    /// Tokens recognised as an extension when decomposing raw paths
    pub known_extensions: Vec<String>,

    /// Ceiling applied to requested navigation tree depths
    pub navigation_depth_limit: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            content_root_name: "jcr:content".to_string(),
            page_node_type: "cq:Page".to_string(),
            default_extension: "html".to_string(),
            known_extensions: [
                "html", "htm", "json", "xml", "txt", "js", "css", "pdf", "jpg", "jpeg", "png",
                "gif", "svg", "webp", "csv", "zip",
            ]
            .iter()
            .map(|ext| ext.to_string())
            .collect(),
            navigation_depth_limit: 8,
        }
    }
}

impl TreeConfig {
    /// Load configuration from a JSON file; missing keys take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Parse configuration from a JSON string and validate it
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: TreeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content_root_name.trim().is_empty() || self.content_root_name.contains('/') {
            return Err(ConfigError::invalid(
                "content_root_name must be a single non-empty path segment",
            ));
        }

        if self.page_node_type.trim().is_empty() {
            return Err(ConfigError::invalid("page_node_type cannot be empty"));
        }

        if self.known_extensions.is_empty() {
            return Err(ConfigError::invalid("known_extensions cannot be empty"));
        }

        for ext in self
            .known_extensions
            .iter()
            .chain(std::iter::once(&self.default_extension))
        {
            if ext.is_empty() || ext.contains('.') || ext.contains('/') {
                return Err(ConfigError::invalid(format!(
                    "extension '{}' must be a non-empty token without '.' or '/'",
                    ext
                )));
            }
        }

        if self.navigation_depth_limit == 0 {
            return Err(ConfigError::invalid(
                "navigation_depth_limit must be greater than 0",
            ));
        }

        if self.navigation_depth_limit > MAX_SUPPORTED_NAVIGATION_DEPTH {
            return Err(ConfigError::invalid(format!(
                "navigation_depth_limit cannot exceed {}",
                MAX_SUPPORTED_NAVIGATION_DEPTH
            )));
        }

        Ok(())
    }

    /// Whether `token` is a recognised extension (case-insensitive)
    pub fn is_known_extension(&self, token: &str) -> bool {
        self.known_extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = TreeConfig::default();
        assert_eq!(config.content_root_name, "jcr:content");
        assert_eq!(config.page_node_type, "cq:Page");
        assert_eq!(config.default_extension, "html");
        assert!(config.is_known_extension("html"));
        assert!(config.is_known_extension("JSON"));
        assert!(!config.is_known_extension("2024"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = TreeConfig::default();

        config.content_root_name = String::new();
        assert!(config.validate().is_err());

        config.content_root_name = "a/b".to_string();
        assert!(config.validate().is_err());

        config.content_root_name = "content".to_string();
        config.known_extensions = vec!["tar.gz".to_string()];
        assert!(config.validate().is_err());

        config.known_extensions = vec![];
        assert!(config.validate().is_err());

        config.known_extensions = vec!["html".to_string()];
        config.navigation_depth_limit = 0;
        assert!(config.validate().is_err());

        config.navigation_depth_limit = 1000;
        assert!(config.validate().is_err());

        config.navigation_depth_limit = 3;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            TreeConfig::from_json_str(r#"{ "content_root_name": "_content" }"#).unwrap();
        assert_eq!(config.content_root_name, "_content");
        assert_eq!(config.default_extension, "html");
        assert_eq!(config.navigation_depth_limit, 8);
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "default_extension": "htm", "navigation_depth_limit": 2 }}"#
        )
        .unwrap();

        let config = TreeConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.default_extension, "htm");
        assert_eq!(config.navigation_depth_limit, 2);
    }

    #[test]
    fn test_from_json_rejects_invalid_values() {
        let err = TreeConfig::from_json_str(r#"{ "navigation_depth_limit": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = TreeConfig::from_json_str("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
