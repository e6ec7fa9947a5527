//! Launch argument declarations

use crate::profile::{LayerId, ResolvedProfile};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Name of the logging verbosity argument
pub const LOG_LEVEL_ARGUMENT: &str = "log_level";

/// Default logging verbosity
pub const DEFAULT_LOG_LEVEL: &str = "debug";

/// Name shared by every layer argument under [`ArgumentNaming::Legacy`]
pub const LEGACY_LAYER_ARGUMENT: &str = "config_common_path";

/// A named launch-time argument with a default value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentDeclaration {
    pub name: String,
    /// File path or literal
    pub default_value: String,
    pub description: String,
}

impl ArgumentDeclaration {
    pub fn new(
        name: impl Into<String>,
        default_value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            default_value: default_value.into(),
            description: description.into(),
        }
    }
}

/// How layer arguments are named.
///
/// `Legacy` reproduces the historical launch file, where every layer
/// argument was declared as `config_common_path`; a registry keeping the
/// last declaration then only exposes the sensor parameters default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentNaming {
    /// One `config_<layer>_path` argument per layer
    #[default]
    Distinct,
    /// Every layer argument named `config_common_path`
    Legacy,
}

impl ArgumentNaming {
    /// Argument name of a layer under this policy
    pub fn layer_argument_name(self, layer: LayerId) -> String {
        match self {
            ArgumentNaming::Distinct => format!("config_{}_path", layer.as_str()),
            ArgumentNaming::Legacy => LEGACY_LAYER_ARGUMENT.to_string(),
        }
    }
}

/// Human-readable label of a layer argument
pub fn layer_description(layer: LayerId) -> &'static str {
    match layer {
        LayerId::Common => "CommonParameters",
        LayerId::Integrator => "IntegratorParameters",
        LayerId::Optimizer => "OptimizerParameters",
        LayerId::SensorParameters => "SensorParameters",
    }
}

/// The argument declarations of one launch description: the logging level
/// plus one declaration per configuration layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentRegistry {
    log_level: ArgumentDeclaration,
    layers: IndexMap<LayerId, ArgumentDeclaration>,
}

impl ArgumentRegistry {
    /// Declare the arguments for a resolved profile
    pub fn declare(resolved: &ResolvedProfile, naming: ArgumentNaming) -> Self {
        let log_level =
            ArgumentDeclaration::new(LOG_LEVEL_ARGUMENT, DEFAULT_LOG_LEVEL, "Logging level");

        let layers = resolved
            .iter()
            .map(|(layer, path)| {
                let declaration = ArgumentDeclaration::new(
                    naming.layer_argument_name(layer),
                    path.to_string_lossy(),
                    layer_description(layer),
                );
                (layer, declaration)
            })
            .collect();

        Self { log_level, layers }
    }

    pub fn log_level(&self) -> &ArgumentDeclaration {
        &self.log_level
    }

    /// Declaration of a layer argument
    pub fn layer(&self, layer: LayerId) -> Option<&ArgumentDeclaration> {
        self.layers.get(&layer)
    }

    /// All declarations: logging level first, then layers in precedence order
    pub fn declarations(&self) -> impl Iterator<Item = &ArgumentDeclaration> {
        std::iter::once(&self.log_level).chain(self.layers.values())
    }

    pub fn into_declarations(self) -> Vec<ArgumentDeclaration> {
        std::iter::once(self.log_level)
            .chain(self.layers.into_values())
            .collect()
    }
}
