//! Resolution of profile layers to default file paths

use super::layer::LayerId;
use super::locator::PackageLocator;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory holding all profiles, relative to the package share directory
pub const CONFIG_DIR: &str = "config";

/// A named bundle of configuration layers for one deployment target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationProfile {
    /// Package whose share directory holds the profile
    pub package: String,
    /// Profile directory name below `config/`
    pub profile: String,
}

impl ConfigurationProfile {
    pub fn new(package: impl Into<String>, profile: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            profile: profile.into(),
        }
    }

    /// Path of a layer file relative to the package share directory
    pub fn relative_path(&self, layer: LayerId) -> PathBuf {
        Path::new(CONFIG_DIR).join(&self.profile).join(layer.file_name())
    }
}

/// Default file path of every layer of a profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProfile {
    pub common: PathBuf,
    pub integrator: PathBuf,
    pub optimizer: PathBuf,
    pub sensor_parameters: PathBuf,
}

impl ResolvedProfile {
    /// Path of a single layer
    pub fn path(&self, layer: LayerId) -> &Path {
        match layer {
            LayerId::Common => &self.common,
            LayerId::Integrator => &self.integrator,
            LayerId::Optimizer => &self.optimizer,
            LayerId::SensorParameters => &self.sensor_parameters,
        }
    }

    /// Layer paths in precedence order
    pub fn iter(&self) -> impl Iterator<Item = (LayerId, &Path)> + '_ {
        LayerId::ALL.into_iter().map(move |layer| (layer, self.path(layer)))
    }
}

/// Resolves profile layers through an injected [`PackageLocator`]
#[derive(Debug, Clone)]
pub struct ProfileResolver<L> {
    locator: L,
    require_existing_files: bool,
}

impl<L: PackageLocator> ProfileResolver<L> {
    pub fn new(locator: L) -> Self {
        Self {
            locator,
            require_existing_files: false,
        }
    }

    /// Fail resolution when a layer file is not present on disk
    pub fn require_existing_files(mut self, required: bool) -> Self {
        self.require_existing_files = required;
        self
    }

    /// Absolute default path of one layer file.
    ///
    /// The path is `<share>/config/<profile_name>/<layer file>`. A relative
    /// share directory is taken relative to the current directory. Locator
    /// failures are returned unchanged.
    pub fn resolve(
        &self,
        package_id: &str,
        profile_name: &str,
        layer: LayerId,
    ) -> Result<PathBuf, ResolutionError> {
        let share = self.locator.share_directory(package_id)?;
        let share = std::path::absolute(&share).map_err(|e| ResolutionError::ShareDirectory {
            package: package_id.to_string(),
            path: share.clone(),
            source: e,
        })?;
        let path = share
            .join(CONFIG_DIR)
            .join(profile_name)
            .join(layer.file_name());

        if self.require_existing_files && !path.is_file() {
            return Err(ResolutionError::LayerFileMissing {
                profile: profile_name.to_string(),
                path,
            });
        }

        log::debug!("Resolved {} layer of '{}': {}", layer, profile_name, path.display());
        Ok(path)
    }

    /// Resolve all four layers of a profile
    pub fn resolve_profile(
        &self,
        profile: &ConfigurationProfile,
    ) -> Result<ResolvedProfile, ResolutionError> {
        let resolve = |layer| self.resolve(&profile.package, &profile.profile, layer);
        Ok(ResolvedProfile {
            common: resolve(LayerId::Common)?,
            integrator: resolve(LayerId::Integrator)?,
            optimizer: resolve(LayerId::Optimizer)?,
            sensor_parameters: resolve(LayerId::SensorParameters)?,
        })
    }
}

/// Errors that can occur while locating profile files
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("AMENT_PREFIX_PATH is not set, source a ROS 2 install or pass a share directory")]
    PrefixPathUnset,

    #[error("Package '{package}' not found ({searched} location(s) searched)")]
    PackageNotFound { package: String, searched: usize },

    #[error("Cannot make share directory of '{package}' absolute: {}", .path.display())]
    ShareDirectory {
        package: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Layer file of profile '{profile}' does not exist: {}", .path.display())]
    LayerFileMissing { profile: String, path: PathBuf },
}
