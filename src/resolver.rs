use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::debug;

use crate::error::{ReportError, Result};
use crate::manifest::PackageManifest;
use crate::workspace::PackageIndex;

/// License reported for packages whose license could not be determined.
pub const LICENSE_NOT_FOUND: &str = "license_not_found";

/// Source of dependency and license information for named packages.
pub trait PackageSource {
    /// Transitive dependencies of `name`, sorted, excluding `name` itself.
    ///
    /// Dependencies that are declared but not known to the source are
    /// included; callers decide how to treat them.
    fn resolve_dependencies(&self, name: &str) -> Result<Vec<String>>;

    /// Declared license of `name`, or [`LICENSE_NOT_FOUND`].
    fn license_of(&self, name: &str) -> Result<String>;

    /// Manifest of a known package.
    fn package(&self, name: &str) -> Option<&PackageManifest>;
}

/// Package source backed by manifests found on the ROS package path.
#[derive(Debug)]
pub struct RosPack {
    ros_paths: Vec<PathBuf>,
    index: PackageIndex,
}

impl RosPack {
    pub fn new(ros_paths: Vec<PathBuf>) -> Self {
        let index = PackageIndex::crawl(&ros_paths);
        debug!("Indexed {} packages", index.len());
        RosPack { ros_paths, index }
    }

    /// Build from an already populated index.
    pub fn with_index(index: PackageIndex) -> Self {
        RosPack {
            ros_paths: Vec::new(),
            index,
        }
    }

    fn not_found(&self, name: &str) -> ReportError {
        let reason = if self.ros_paths.is_empty() && self.index.is_empty() {
            "no package path configured (set ROS_PACKAGE_PATH)".to_string()
        } else {
            format!("not found in {} indexed packages", self.index.len())
        };
        ReportError::Resolution {
            name: name.to_string(),
            reason,
        }
    }
}

impl PackageSource for RosPack {
    fn resolve_dependencies(&self, name: &str) -> Result<Vec<String>> {
        let root = self.index.get(name).ok_or_else(|| self.not_found(name))?;

        let mut seen: BTreeSet<String> = BTreeSet::new();
        let mut stack: Vec<&str> = root.depends.iter().map(String::as_str).collect();

        while let Some(dep) = stack.pop() {
            if !seen.insert(dep.to_string()) {
                continue;
            }
            if let Some(manifest) = self.index.get(dep) {
                stack.extend(manifest.depends.iter().map(String::as_str));
            }
        }

        // a dependency cycle through the root must not list the root itself
        seen.remove(name);
        Ok(seen.into_iter().collect())
    }

    fn license_of(&self, name: &str) -> Result<String> {
        let manifest = self.index.get(name).ok_or_else(|| self.not_found(name))?;
        Ok(manifest
            .license()
            .unwrap_or_else(|| LICENSE_NOT_FOUND.to_string()))
    }

    fn package(&self, name: &str) -> Option<&PackageManifest> {
        self.index.get(name)
    }
}
