//! Package share directory lookup

use super::resolver::ResolutionError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Environment variable listing the installed ament prefixes
pub const AMENT_PREFIX_PATH: &str = "AMENT_PREFIX_PATH";

/// Marker directory of the ament resource index, relative to a prefix
const PACKAGE_INDEX_DIR: &str = "share/ament_index/resource_index/packages";

/// Locates the installed share directory of a package.
pub trait PackageLocator {
    /// Return the absolute share directory of `package`
    fn share_directory(&self, package: &str) -> Result<PathBuf, ResolutionError>;
}

impl<T: PackageLocator + ?Sized> PackageLocator for &T {
    fn share_directory(&self, package: &str) -> Result<PathBuf, ResolutionError> {
        (**self).share_directory(package)
    }
}

impl<T: PackageLocator + ?Sized> PackageLocator for Box<T> {
    fn share_directory(&self, package: &str) -> Result<PathBuf, ResolutionError> {
        (**self).share_directory(package)
    }
}

/// Looks packages up in the ament resource index of each install prefix.
///
/// A package is installed under a prefix when the prefix contains the marker
/// `share/ament_index/resource_index/packages/<package>`. Prefixes are
/// searched in order and the first match wins, so overlays listed first
/// shadow underlays.
#[derive(Debug, Clone, Default)]
pub struct AmentIndexLocator {
    prefixes: Vec<PathBuf>,
}

impl AmentIndexLocator {
    /// Build a locator from `AMENT_PREFIX_PATH`
    pub fn from_env() -> Result<Self, ResolutionError> {
        let value = std::env::var_os(AMENT_PREFIX_PATH)
            .filter(|v| !v.is_empty())
            .ok_or(ResolutionError::PrefixPathUnset)?;
        Ok(Self::with_prefixes(std::env::split_paths(&value)))
    }

    /// Build a locator over an explicit list of prefixes
    pub fn with_prefixes<I, P>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            prefixes: prefixes
                .into_iter()
                .map(Into::into)
                .filter(|p: &PathBuf| !p.as_os_str().is_empty())
                .collect(),
        }
    }

    /// Install prefixes in search order
    pub fn prefixes(&self) -> &[PathBuf] {
        &self.prefixes
    }

    fn is_installed_in(prefix: &Path, package: &str) -> bool {
        prefix.join(PACKAGE_INDEX_DIR).join(package).exists()
    }
}

impl PackageLocator for AmentIndexLocator {
    fn share_directory(&self, package: &str) -> Result<PathBuf, ResolutionError> {
        if package.is_empty() {
            return Err(ResolutionError::PackageNotFound {
                package: package.to_string(),
                searched: 0,
            });
        }

        for prefix in &self.prefixes {
            if Self::is_installed_in(prefix, package) {
                let share = prefix.join("share").join(package);
                log::debug!("Found package '{}' at {}", package, share.display());
                return Ok(share);
            }
        }

        Err(ResolutionError::PackageNotFound {
            package: package.to_string(),
            searched: self.prefixes.len(),
        })
    }
}

/// Fixed package → share directory table
#[derive(Debug, Clone, Default)]
pub struct StaticLocator {
    packages: HashMap<String, PathBuf>,
}

impl StaticLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the share directory of a package
    pub fn with_package(mut self, package: impl Into<String>, share_dir: impl Into<PathBuf>) -> Self {
        self.packages.insert(package.into(), share_dir.into());
        self
    }
}

impl PackageLocator for StaticLocator {
    fn share_directory(&self, package: &str) -> Result<PathBuf, ResolutionError> {
        self.packages
            .get(package)
            .cloned()
            .ok_or_else(|| ResolutionError::PackageNotFound {
                package: package.to_string(),
                searched: self.packages.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn install_marker(prefix: &Path, package: &str) {
        let index = prefix.join(PACKAGE_INDEX_DIR);
        fs::create_dir_all(&index).unwrap();
        fs::write(index.join(package), "").unwrap();
    }

    #[test]
    fn test_ament_locator_finds_installed_package() {
        let prefix = tempfile::tempdir().unwrap();
        install_marker(prefix.path(), "online_fgo");

        let locator = AmentIndexLocator::with_prefixes([prefix.path()]);
        let share = locator.share_directory("online_fgo").unwrap();
        assert_eq!(share, prefix.path().join("share").join("online_fgo"));
    }

    #[test]
    fn test_ament_locator_first_prefix_wins() {
        let overlay = tempfile::tempdir().unwrap();
        let underlay = tempfile::tempdir().unwrap();
        install_marker(overlay.path(), "online_fgo");
        install_marker(underlay.path(), "online_fgo");

        let locator = AmentIndexLocator::with_prefixes([overlay.path(), underlay.path()]);
        let share = locator.share_directory("online_fgo").unwrap();
        assert!(share.starts_with(overlay.path()));
    }

    #[test]
    fn test_ament_locator_skips_prefixes_without_marker() {
        let empty = tempfile::tempdir().unwrap();
        let installed = tempfile::tempdir().unwrap();
        install_marker(installed.path(), "online_fgo");

        let locator = AmentIndexLocator::with_prefixes([empty.path(), installed.path()]);
        let share = locator.share_directory("online_fgo").unwrap();
        assert!(share.starts_with(installed.path()));
    }

    #[test]
    fn test_ament_locator_missing_package() {
        let prefix = tempfile::tempdir().unwrap();
        install_marker(prefix.path(), "other_package");

        let locator = AmentIndexLocator::with_prefixes([prefix.path()]);
        let err = locator.share_directory("online_fgo").unwrap_err();
        assert!(matches!(
            err,
            ResolutionError::PackageNotFound { ref package, searched: 1 } if package == "online_fgo"
        ));
    }

    #[test]
    fn test_ament_locator_ignores_empty_prefixes() {
        let locator = AmentIndexLocator::with_prefixes(["", "/opt/ros/humble"]);
        assert_eq!(locator.prefixes(), &[PathBuf::from("/opt/ros/humble")]);
    }

    #[test]
    fn test_static_locator() {
        let locator = StaticLocator::new().with_package("online_fgo", "/install/share/online_fgo");
        assert_eq!(
            locator.share_directory("online_fgo").unwrap(),
            PathBuf::from("/install/share/online_fgo")
        );
        assert!(locator.share_directory("missing").is_err());
    }

    #[test]
    fn test_locator_through_reference() {
        let locator = StaticLocator::new().with_package("online_fgo", "/share/online_fgo");
        let by_ref: &dyn PackageLocator = &locator;
        assert!(by_ref.share_directory("online_fgo").is_ok());
    }
}
