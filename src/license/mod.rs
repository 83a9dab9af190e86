use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::manifest::{ManifestKind, PackageManifest};
use crate::resolver::LICENSE_NOT_FOUND;

pub mod collector;

pub use collector::LicenseReporter;

/// License information for one package of the dependency closure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageLicense {
    pub name: String,
    pub version: Option<String>,
    /// Declared license string, multiple licenses joined by ", ".
    pub license: String,
    /// Individual declared licenses. Empty when none were found.
    pub licenses: Vec<String>,
    pub manifest_source: String,
}

impl PackageLicense {
    pub fn from_manifest(manifest: &PackageManifest, license: String) -> Self {
        let manifest_source = match manifest.kind {
            ManifestKind::Package => "package.xml",
            ManifestKind::Rosbuild => "manifest.xml",
        };
        PackageLicense {
            name: manifest.name.clone(),
            version: manifest.version.clone(),
            license,
            licenses: manifest.licenses.clone(),
            manifest_source: manifest_source.to_string(),
        }
    }

    /// A declared dependency that is not present on the package path.
    pub fn unavailable(name: &str) -> Self {
        PackageLicense {
            name: name.to_string(),
            version: None,
            license: LICENSE_NOT_FOUND.to_string(),
            licenses: Vec::new(),
            manifest_source: "unavailable".to_string(),
        }
    }

    /// Licenses used for grouping in reports.
    pub fn report_licenses(&self) -> Vec<&str> {
        if self.licenses.is_empty() {
            vec![LICENSE_NOT_FOUND]
        } else {
            self.licenses.iter().map(String::as_str).collect()
        }
    }
}

/// Package name to license mapping for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageLicenseMap {
    packages: BTreeMap<String, PackageLicense>,
}

impl PackageLicenseMap {
    pub fn insert(&mut self, package: PackageLicense) {
        self.packages.insert(package.name.clone(), package);
    }

    pub fn get(&self, name: &str) -> Option<&PackageLicense> {
        self.packages.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    pub fn license_of(&self, name: &str) -> Option<&str> {
        self.packages.get(name).map(|p| p.license.as_str())
    }

    pub fn packages(&self) -> impl Iterator<Item = &PackageLicense> {
        self.packages.values()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Number of packages that resolved to a declared license.
    pub fn with_license(&self) -> usize {
        self.packages().filter(|p| !p.licenses.is_empty()).count()
    }
}

impl FromIterator<PackageLicense> for PackageLicenseMap {
    fn from_iter<I: IntoIterator<Item = PackageLicense>>(iter: I) -> Self {
        let mut map = PackageLicenseMap::default();
        for package in iter {
            map.insert(package);
        }
        map
    }
}
