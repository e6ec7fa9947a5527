//! Configuration layers of a profile

use serde::{Deserialize, Serialize};
use std::fmt;

/// One configuration file role inside a profile directory.
///
/// Variants are listed in precedence order: a later layer overrides an
/// earlier one when the runtime merges parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerId {
    /// Parameters shared by every sensor setup
    Common,
    /// IMU pre-integration settings
    Integrator,
    /// Graph optimizer settings
    Optimizer,
    /// Sensor-specific parameters
    SensorParameters,
}

impl LayerId {
    /// All layers, in precedence order
    pub const ALL: [LayerId; 4] = [
        LayerId::Common,
        LayerId::Integrator,
        LayerId::Optimizer,
        LayerId::SensorParameters,
    ];

    /// Stable identifier of the layer
    pub fn as_str(self) -> &'static str {
        match self {
            LayerId::Common => "common",
            LayerId::Integrator => "integrator",
            LayerId::Optimizer => "optimizer",
            LayerId::SensorParameters => "sensor_parameters",
        }
    }

    /// File name of the layer within the profile directory
    pub fn file_name(self) -> &'static str {
        match self {
            LayerId::Common => "common.yaml",
            LayerId::Integrator => "integrator.yaml",
            LayerId::Optimizer => "optimizer.yaml",
            LayerId::SensorParameters => "sensor_parameters.yaml",
        }
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_order() {
        let mut sorted = LayerId::ALL;
        sorted.sort();
        assert_eq!(sorted, LayerId::ALL);
        assert_eq!(LayerId::ALL[0], LayerId::Common);
        assert_eq!(LayerId::ALL[3], LayerId::SensorParameters);
    }

    #[test]
    fn test_file_names_follow_identifiers() {
        for layer in LayerId::ALL {
            assert_eq!(layer.file_name(), format!("{}.yaml", layer.as_str()));
        }
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let yaml = serde_yaml::to_string(&LayerId::SensorParameters).unwrap();
        assert_eq!(yaml.trim(), "sensor_parameters");

        let layer: LayerId = serde_yaml::from_str("integrator").unwrap();
        assert_eq!(layer, LayerId::Integrator);
    }
}
