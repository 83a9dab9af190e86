use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::{PackageLicense, PackageLicenseMap};
use crate::error::{ReportError, Result};
use crate::policy::{self, Comparison, ProtectedLicenseSet};
use crate::report::{self, PersistOptions};
use crate::resolver::PackageSource;

/// Collects licenses for package closures, writes reports and compares them.
pub struct LicenseReporter<S> {
    source: S,
    strict: bool,
    options: PersistOptions,
}

impl<S: PackageSource> LicenseReporter<S> {
    pub fn new(source: S) -> Self {
        LicenseReporter {
            source,
            strict: false,
            options: PersistOptions::default(),
        }
    }

    /// Fail when a dependency is declared but not available on the package path.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn persist_options(mut self, options: PersistOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolve the dependency closure of every root package and look up each
    /// package's license. Root packages are always part of the result.
    pub fn collect(&self, pkg_names: &[String]) -> Result<PackageLicenseMap> {
        if pkg_names.is_empty() {
            return Err(ReportError::Resolution {
                name: String::new(),
                reason: "no package names given".to_string(),
            });
        }

        let mut map = PackageLicenseMap::default();

        for root in pkg_names {
            let deps = self.source.resolve_dependencies(root)?;
            debug!("{} depends on {} packages", root, deps.len());

            for name in std::iter::once(root).chain(deps.iter()) {
                if map.contains(name) {
                    continue;
                }
                let package = match self.source.package(name) {
                    Some(manifest) => {
                        PackageLicense::from_manifest(manifest, self.source.license_of(name)?)
                    }
                    None if self.strict => {
                        return Err(ReportError::Resolution {
                            name: name.clone(),
                            reason: format!("dependency of '{}' is not available", root),
                        })
                    }
                    None => {
                        warn!(
                            "Package '{}' (dependency of '{}') is not available in your environment",
                            name, root
                        );
                        PackageLicense::unavailable(name)
                    }
                };
                map.insert(package);
            }
        }

        info!("Collected licenses for {} packages", map.len());
        Ok(map)
    }

    /// Write `map` as a report file named after `prefix` and `pkg_names`.
    pub fn persist(
        &self,
        map: &PackageLicenseMap,
        pkg_names: &[String],
        prefix: &str,
    ) -> Result<PathBuf> {
        report::persist(map, pkg_names, prefix, &self.options)
    }

    /// Compare two report files, see [`policy::compare`].
    pub fn compare(
        &self,
        path_current: &Path,
        path_prev: &Path,
        protected: &ProtectedLicenseSet,
    ) -> Result<bool> {
        policy::compare(path_current, path_prev, protected)
    }

    /// Like [`LicenseReporter::compare`] but returns every new license found.
    pub fn compare_details(
        &self,
        path_current: &Path,
        path_prev: &Path,
        protected: &ProtectedLicenseSet,
    ) -> Result<Comparison> {
        policy::compare_files(path_current, path_prev, protected)
    }
}
