use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::manifest::{PackageManifest, MANIFEST_FILE, PACKAGE_FILE};

/// Environment variable holding the package search path.
pub const ROS_PACKAGE_PATH: &str = "ROS_PACKAGE_PATH";

const CATKIN_IGNORE: &str = "CATKIN_IGNORE";
const ROSPACK_NOSUBDIRS: &str = "rospack_nosubdirs";

/// Read the package search path from `ROS_PACKAGE_PATH`.
pub fn ros_paths_from_env() -> Vec<PathBuf> {
    match env::var_os(ROS_PACKAGE_PATH) {
        Some(value) => env::split_paths(&value)
            .filter(|p| !p.as_os_str().is_empty())
            .collect(),
        None => Vec::new(),
    }
}

/// Index of every package found under a set of search paths.
#[derive(Debug, Default)]
pub struct PackageIndex {
    packages: BTreeMap<String, PackageManifest>,
}

impl PackageIndex {
    /// Crawl the given paths. On duplicate names the earliest search path wins.
    pub fn crawl(paths: &[PathBuf]) -> Self {
        let mut index = PackageIndex::default();
        // reverse order so earlier paths overwrite later ones
        for path in paths.iter().rev() {
            let mut found = BTreeMap::new();
            crawl_dir(path, &mut found);
            debug!("Found {} packages under {}", found.len(), path.display());
            index.packages.extend(found);
        }
        index
    }

    pub fn from_manifests(manifests: impl IntoIterator<Item = PackageManifest>) -> Self {
        PackageIndex {
            packages: manifests
                .into_iter()
                .map(|m| (m.name.clone(), m))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PackageManifest> {
        self.packages.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

fn crawl_dir(dir: &Path, found: &mut BTreeMap<String, PackageManifest>) {
    if dir.join(CATKIN_IGNORE).exists() {
        return;
    }

    let package_xml = dir.join(PACKAGE_FILE);
    if package_xml.is_file() {
        match PackageManifest::parse_package_xml(&package_xml) {
            Ok(manifest) if manifest.is_metapackage => {
                debug!("Skipping metapackage {}", manifest.name);
            }
            Ok(manifest) => {
                found.entry(manifest.name.clone()).or_insert(manifest);
            }
            Err(e) => warn!("Skipping package: {}", e),
        }
        return;
    }

    let manifest_xml = dir.join(MANIFEST_FILE);
    if manifest_xml.is_file() {
        match PackageManifest::parse_manifest_xml(&manifest_xml) {
            Ok(manifest) => {
                found.entry(manifest.name.clone()).or_insert(manifest);
            }
            Err(e) => warn!("Skipping package: {}", e),
        }
        return;
    }

    if dir.join(ROSPACK_NOSUBDIRS).exists() {
        return;
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Cannot read {}: {}", dir.display(), e);
            return;
        }
    };

    let mut subdirs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    subdirs.sort();

    for subdir in subdirs {
        crawl_dir(&subdir, found);
    }
}
