//! Ordered parameter sources of a process

use crate::profile::ResolvedProfile;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Inline parameter overrides, applied after every file layer
pub type ParameterOverrides = IndexMap<String, serde_yaml::Value>;

/// Number of entries in a composed parameter list: four files plus overrides
pub const PARAMETER_LAYER_COUNT: usize = 5;

/// One source of runtime parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterLayer {
    /// Parameter file reference
    File(PathBuf),
    /// Inline key/value mapping
    Inline(ParameterOverrides),
}

impl ParameterLayer {
    pub fn as_file(&self) -> Option<&Path> {
        match self {
            ParameterLayer::File(path) => Some(path),
            ParameterLayer::Inline(_) => None,
        }
    }

    pub fn as_inline(&self) -> Option<&ParameterOverrides> {
        match self {
            ParameterLayer::File(_) => None,
            ParameterLayer::Inline(map) => Some(map),
        }
    }
}

/// Order the profile files and the inline overrides into the parameter list
/// of the process.
///
/// Precedence is common, integrator, optimizer, sensor parameters, then the
/// overrides. The mapping is always present, even when empty. Keys are not
/// inspected; merging is left to the runtime.
pub fn compose_parameter_layers(
    resolved: &ResolvedProfile,
    overrides: ParameterOverrides,
) -> Vec<ParameterLayer> {
    let mut layers: Vec<ParameterLayer> = resolved
        .iter()
        .map(|(_, path)| ParameterLayer::File(path.to_path_buf()))
        .collect();
    layers.push(ParameterLayer::Inline(overrides));

    log::debug!("Composed {} parameter layers", layers.len());
    layers
}
