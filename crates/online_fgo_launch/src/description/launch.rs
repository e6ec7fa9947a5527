//! Assembly of the launch description

use super::argument::{ArgumentDeclaration, ArgumentNaming, ArgumentRegistry};
use super::parameters::{compose_parameter_layers, ParameterOverrides};
use super::process::ProcessDescriptor;
use crate::config::ComposerConfig;
use crate::profile::{ConfigurationProfile, PackageLocator, ProfileResolver, ResolutionError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One entry of a launch description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LaunchAction {
    DeclareArgument(ArgumentDeclaration),
    Node(ProcessDescriptor),
}

/// Ordered actions handed to the launch runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchDescription {
    actions: Vec<LaunchAction>,
}

impl LaunchDescription {
    /// Wrap already ordered actions
    pub fn new(actions: Vec<LaunchAction>) -> Self {
        Self { actions }
    }

    pub fn actions(&self) -> &[LaunchAction] {
        &self.actions
    }

    /// Argument declarations in declaration order
    pub fn arguments(&self) -> impl Iterator<Item = &ArgumentDeclaration> {
        self.actions.iter().filter_map(|action| match action {
            LaunchAction::DeclareArgument(declaration) => Some(declaration),
            LaunchAction::Node(_) => None,
        })
    }

    /// The described process, if any
    pub fn process(&self) -> Option<&ProcessDescriptor> {
        self.actions.iter().find_map(|action| match action {
            LaunchAction::Node(process) => Some(process),
            LaunchAction::DeclareArgument(_) => None,
        })
    }

    /// Argument names declared more than once, in first-seen order
    pub fn duplicate_argument_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for declaration in self.arguments() {
            if !seen.insert(declaration.name.as_str()) && !duplicates.contains(&declaration.name) {
                duplicates.push(declaration.name.clone());
            }
        }
        duplicates
    }

    /// Check argument names against a naming policy.
    ///
    /// Under `Distinct` a repeated name is an error. Under `Legacy` the
    /// repetition is expected and only logged.
    pub fn validate(&self, naming: ArgumentNaming) -> Result<(), LaunchError> {
        for name in self.duplicate_argument_names() {
            match naming {
                ArgumentNaming::Legacy => log::warn!(
                    "Launch argument '{}' is declared more than once, only its last default is effective",
                    name
                ),
                ArgumentNaming::Distinct => return Err(LaunchError::DuplicateArgument(name)),
            }
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String, LaunchError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn to_json(&self) -> Result<String, LaunchError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builds the launch description of the fusion node for one profile.
///
/// Composition is a single pass: resolve the layer files, declare the
/// arguments, compose the parameter layers, describe the node, then order
/// everything into the description. Nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct LaunchComposer<L> {
    resolver: ProfileResolver<L>,
    profile: ConfigurationProfile,
    naming: ArgumentNaming,
    overrides: ParameterOverrides,
}

impl<L: PackageLocator> LaunchComposer<L> {
    pub fn new(locator: L, profile: ConfigurationProfile) -> Self {
        Self {
            resolver: ProfileResolver::new(locator),
            profile,
            naming: ArgumentNaming::default(),
            overrides: ParameterOverrides::new(),
        }
    }

    /// Composer configured from a [`ComposerConfig`]
    pub fn from_config(locator: L, config: &ComposerConfig) -> Self {
        Self {
            resolver: ProfileResolver::new(locator)
                .require_existing_files(config.require_existing_files),
            profile: config.profile(),
            naming: config.naming,
            overrides: config.overrides.clone(),
        }
    }

    pub fn with_naming(mut self, naming: ArgumentNaming) -> Self {
        self.naming = naming;
        self
    }

    /// Inline parameters applied after every profile layer
    pub fn with_overrides(mut self, overrides: ParameterOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn require_existing_files(mut self, required: bool) -> Self {
        self.resolver = self.resolver.require_existing_files(required);
        self
    }

    pub fn profile(&self) -> &ConfigurationProfile {
        &self.profile
    }

    /// Compose the launch description.
    ///
    /// Actions are ordered as: logging level argument, the four layer
    /// arguments, the node.
    pub fn compose(&self) -> Result<LaunchDescription, LaunchError> {
        log::debug!(
            "Composing launch description for {}/{}",
            self.profile.package,
            self.profile.profile
        );

        let resolved = self.resolver.resolve_profile(&self.profile)?;
        let registry = ArgumentRegistry::declare(&resolved, self.naming);
        let parameters = compose_parameter_layers(&resolved, self.overrides.clone());
        let process = ProcessDescriptor::online_fgo(parameters);

        let mut actions: Vec<LaunchAction> = registry
            .into_declarations()
            .into_iter()
            .map(LaunchAction::DeclareArgument)
            .collect();
        actions.push(LaunchAction::Node(process));
        let description = LaunchDescription::new(actions);
        description.validate(self.naming)?;

        Ok(description)
    }
}

/// Launch description for the `deutschland_lc` profile of `online_fgo`
pub fn generate_launch_description<L: PackageLocator>(
    locator: L,
) -> Result<LaunchDescription, LaunchError> {
    LaunchComposer::from_config(locator, &ComposerConfig::default()).compose()
}

/// Errors that can occur while building or using a launch description
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("Failed to resolve profile: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("Duplicate launch argument name: {0}")]
    DuplicateArgument(String),

    #[error("Unknown argument: {0}")]
    UnknownArgument(String),

    #[error("Failed to serialize launch description: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to serialize launch description: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::{ParameterLayer, PARAMETER_LAYER_COUNT};
    use crate::profile::StaticLocator;

    fn locator() -> StaticLocator {
        StaticLocator::new().with_package("online_fgo", "/install/share/online_fgo")
    }

    fn composer() -> LaunchComposer<StaticLocator> {
        LaunchComposer::new(
            locator(),
            ConfigurationProfile::new("online_fgo", "deutschland_lc"),
        )
    }

    #[test]
    fn test_action_order() {
        let description = composer().compose().unwrap();
        let actions = description.actions();
        assert_eq!(actions.len(), 6);
        assert!(actions[..5]
            .iter()
            .all(|a| matches!(a, LaunchAction::DeclareArgument(_))));
        assert!(matches!(actions[5], LaunchAction::Node(_)));

        let names: Vec<&str> = description.arguments().map(|d| d.name.as_str()).collect();
        assert_eq!(names[0], "log_level");
        assert_eq!(names[1], "config_common_path");
        assert_eq!(names[4], "config_sensor_parameters_path");
    }

    #[test]
    fn test_process_embeds_parameter_layers() {
        let description = composer().compose().unwrap();
        let process = description.process().unwrap();
        assert_eq!(process.parameters.len(), PARAMETER_LAYER_COUNT);
        assert_eq!(
            process.parameters[0].as_file().unwrap(),
            std::path::Path::new("/install/share/online_fgo/config/deutschland_lc/common.yaml")
        );
        assert!(matches!(process.parameters[4], ParameterLayer::Inline(ref m) if m.is_empty()));
    }

    #[test]
    fn test_compose_is_idempotent() {
        let composer = composer();
        assert_eq!(composer.compose().unwrap(), composer.compose().unwrap());
    }

    #[test]
    fn test_resolution_failure_aborts() {
        let composer = LaunchComposer::new(
            StaticLocator::new(),
            ConfigurationProfile::new("online_fgo", "deutschland_lc"),
        );
        let err = composer.compose().unwrap_err();
        assert!(matches!(err, LaunchError::Resolution(_)));
    }

    #[test]
    fn test_legacy_naming_tolerates_collision() {
        let description = composer()
            .with_naming(ArgumentNaming::Legacy)
            .compose()
            .unwrap();
        assert_eq!(description.arguments().count(), 5);
        assert_eq!(
            description.duplicate_argument_names(),
            vec!["config_common_path".to_string()]
        );
    }

    #[test]
    fn test_validate_rejects_duplicates_under_distinct() {
        let description = LaunchDescription::new(vec![
            LaunchAction::DeclareArgument(ArgumentDeclaration::new(
                "config_common_path",
                "/share/common.yaml",
                "CommonParameters",
            )),
            LaunchAction::DeclareArgument(ArgumentDeclaration::new(
                "config_common_path",
                "/share/integrator.yaml",
                "IntegratorParameters",
            )),
        ]);

        let err = description.validate(ArgumentNaming::Distinct).unwrap_err();
        assert!(matches!(err, LaunchError::DuplicateArgument(ref name) if name == "config_common_path"));
        assert!(description.validate(ArgumentNaming::Legacy).is_ok());
    }

    #[test]
    fn test_composed_description_validates() {
        let description = composer().compose().unwrap();
        assert!(description.validate(ArgumentNaming::Distinct).is_ok());
    }

    #[test]
    fn test_distinct_naming_has_no_duplicates() {
        let description = composer().compose().unwrap();
        assert!(description.duplicate_argument_names().is_empty());
    }

    #[test]
    fn test_overrides_forwarded() {
        let mut overrides = ParameterOverrides::new();
        overrides.insert("use_sim_time".into(), serde_yaml::Value::Bool(true));
        let description = composer()
            .with_overrides(overrides.clone())
            .compose()
            .unwrap();
        let process = description.process().unwrap();
        assert_eq!(
            process.parameters.last(),
            Some(&ParameterLayer::Inline(overrides))
        );
    }

    #[test]
    fn test_generate_default_description() {
        let description = generate_launch_description(locator()).unwrap();
        let process = description.process().unwrap();
        assert_eq!(process.namespace, "deutschland");
        assert!(process.parameters[3]
            .as_file()
            .unwrap()
            .ends_with("config/deutschland_lc/sensor_parameters.yaml"));
    }

    #[test]
    fn test_yaml_round_trip() {
        let description = composer().compose().unwrap();
        let yaml = description.to_yaml().unwrap();
        assert!(yaml.contains("action: declare_argument"));
        assert!(yaml.contains("action: node"));

        let parsed: LaunchDescription = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, description);
    }
}
