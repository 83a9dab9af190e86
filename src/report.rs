use chrono::Local;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ReportError, Result};
use crate::license::PackageLicenseMap;

/// Default prefix for report files.
pub const DEFAULT_PREFIX_OUTFILE: &str = "/tmp/licenses";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Yaml,
    Json,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Yaml => "yml",
            ReportFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PersistOptions {
    pub format: ReportFormat,
    /// Append a local timestamp to the file name.
    pub timestamp_suffix: bool,
}

/// On-disk report: license identifier to the sorted packages declaring it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LicenseReport {
    licenses: BTreeMap<String, Vec<String>>,
}

impl LicenseReport {
    pub fn from_map(map: &PackageLicenseMap) -> Self {
        let mut licenses: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for package in map.packages() {
            for license in package.report_licenses() {
                licenses
                    .entry(license.to_string())
                    .or_default()
                    .push(package.name.clone());
            }
        }
        for packages in licenses.values_mut() {
            packages.sort();
            packages.dedup();
        }
        LicenseReport { licenses }
    }

    /// Read a report written by [`persist`]. JSON reports are accepted as
    /// well since they are valid YAML.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReportError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
        if content.trim().is_empty() {
            return Err(ReportError::Parse {
                path: path.to_path_buf(),
                details: "report is empty".to_string(),
            });
        }

        serde_yaml::from_str(&content).map_err(|e| ReportError::Parse {
            path: path.to_path_buf(),
            details: e.to_string(),
        })
    }

    pub fn licenses(&self) -> BTreeSet<&str> {
        self.licenses.keys().map(String::as_str).collect()
    }

    pub fn packages_with(&self, license: &str) -> &[String] {
        self.licenses.get(license).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.licenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.licenses.is_empty()
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Yaml => {
                serde_yaml::to_string(self).map_err(|e| ReportError::Serialize(e.to_string()))
            }
            ReportFormat::Json => serde_json::to_string_pretty(self)
                .map(|s| s + "\n")
                .map_err(|e| ReportError::Serialize(e.to_string())),
        }
    }
}

/// Path of the report for `pkg_names`:
/// `{prefix}_{pkg}-{version}[_{pkg}-{version}...][_{timestamp}].{ext}`.
pub fn report_path(
    map: &PackageLicenseMap,
    pkg_names: &[String],
    prefix: &str,
    options: &PersistOptions,
) -> Result<PathBuf> {
    let mut file_name = prefix.to_string();
    for name in pkg_names {
        file_name.push('_');
        file_name.push_str(name);
        if let Some(version) = map.get(name).and_then(|p| p.version.as_deref()) {
            file_name.push('-');
            file_name.push_str(version);
        }
    }
    if options.timestamp_suffix {
        file_name.push('_');
        file_name.push_str(&Local::now().format("%Y%m%dT%H%M%S").to_string());
    }
    file_name.push('.');
    file_name.push_str(options.format.extension());

    let path = PathBuf::from(file_name);
    if path.is_absolute() {
        Ok(path)
    } else {
        let cwd = env::current_dir().map_err(|e| ReportError::io(".", e))?;
        Ok(cwd.join(path))
    }
}

/// Serialize `map` to a new report file, overwriting any file of the same
/// name. Returns the absolute path of the written file.
pub fn persist(
    map: &PackageLicenseMap,
    pkg_names: &[String],
    prefix: &str,
    options: &PersistOptions,
) -> Result<PathBuf> {
    let path = report_path(map, pkg_names, prefix, options)?;
    let content = LicenseReport::from_map(map).render(options.format)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;
    }
    fs::write(&path, content).map_err(|e| ReportError::io(&path, e))?;
    debug!("Result saved at {}", path.display());

    Ok(path)
}
