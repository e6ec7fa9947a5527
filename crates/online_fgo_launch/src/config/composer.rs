//! Composer settings, loadable from YAML

use crate::description::{ArgumentNaming, ParameterOverrides};
use crate::profile::ConfigurationProfile;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Package of the fusion node
pub const DEFAULT_PACKAGE: &str = "online_fgo";

/// Profile launched when none is configured
pub const DEFAULT_PROFILE: &str = "deutschland_lc";

/// Settings of a launch composition
///
/// ```yaml
/// package: online_fgo
/// profile: deutschland_lc
/// naming: distinct
/// require_existing_files: false
/// overrides:
///   use_sim_time: true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComposerConfig {
    #[serde(default = "default_package")]
    pub package: String,

    #[serde(default = "default_profile")]
    pub profile: String,

    /// Naming of the layer arguments
    #[serde(default)]
    pub naming: ArgumentNaming,

    /// Fail when a layer file is missing from the profile directory
    #[serde(default)]
    pub require_existing_files: bool,

    /// Inline parameters applied after every profile layer
    #[serde(default)]
    pub overrides: ParameterOverrides,
}

fn default_package() -> String {
    DEFAULT_PACKAGE.to_string()
}

fn default_profile() -> String {
    DEFAULT_PROFILE.to_string()
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            package: default_package(),
            profile: default_profile(),
            naming: ArgumentNaming::default(),
            require_existing_files: false,
            overrides: ParameterOverrides::new(),
        }
    }
}

impl ComposerConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: ComposerConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that package and profile are usable as path components
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("package", &self.package), ("profile", &self.profile)] {
            if value.is_empty() {
                return Err(ConfigError::Validation(format!("'{}' must not be empty", field)));
            }
            if value == "." || value == ".." || value.contains(['/', '\\']) {
                return Err(ConfigError::Validation(format!(
                    "'{}' must be a single directory name, got '{}'",
                    field, value
                )));
            }
        }
        Ok(())
    }

    pub fn profile(&self) -> ConfigurationProfile {
        ConfigurationProfile::new(&self.package, &self.profile)
    }
}

/// Errors that can occur when loading composer settings
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ComposerConfig::default();
        assert_eq!(config.package, "online_fgo");
        assert_eq!(config.profile, "deutschland_lc");
        assert_eq!(config.naming, ArgumentNaming::Distinct);
        assert!(!config.require_existing_files);
        assert!(config.overrides.is_empty());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ComposerConfig::from_yaml("{}").unwrap();
        assert_eq!(config, ComposerConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
package: online_fgo
profile: boreas
naming: legacy
require_existing_files: true
overrides:
  use_sim_time: true
  optimizer:
    smoother_lag: 0.5
"#;
        let config = ComposerConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.profile, "boreas");
        assert_eq!(config.naming, ArgumentNaming::Legacy);
        assert!(config.require_existing_files);
        let keys: Vec<&str> = config.overrides.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["use_sim_time", "optimizer"]);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = ComposerConfig::from_yaml("profil: deutschland_lc\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_profile_must_be_directory_name() {
        for profile in ["", "..", "../etc", "a/b"] {
            let config = ComposerConfig {
                profile: profile.to_string(),
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::Validation(_))),
                "profile '{}' should be rejected",
                profile
            );
        }
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("composer.yaml");
        std::fs::write(&path, "profile: deutschland_lc\nnaming: distinct\n").unwrap();

        let config = ComposerConfig::from_file(&path).unwrap();
        assert_eq!(config.profile(), ConfigurationProfile::new("online_fgo", "deutschland_lc"));
    }

    #[test]
    fn test_from_missing_file() {
        let result = ComposerConfig::from_file("/nonexistent/composer.yaml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
