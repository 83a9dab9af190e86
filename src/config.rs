use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::policy::ProtectedLicenseSet;
use crate::report::ReportFormat;

/// Configuration file looked up in the current directory.
pub const CONFIG_FILE: &str = "ros-license-reporter.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Prefix of the report file, absolute path style
    pub prefix_outfile: Option<String>,

    /// Report serialization (yaml, json)
    pub format: Option<ReportFormat>,

    /// Append a timestamp to report file names
    pub timestamp_suffix: Option<bool>,

    /// Fail when a dependency is not available on the package path
    pub strict_dependencies: Option<bool>,

    /// Package search path, overrides ROS_PACKAGE_PATH
    pub ros_package_path: Option<Vec<PathBuf>>,

    /// Licenses that must not be newly introduced
    pub licenses_alert: Option<ProtectedLicenseSet>,
}

/// Load configuration from `path`, or from [`CONFIG_FILE`] in the current
/// directory. A missing default file yields the default configuration.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load_config_from(path),
        None => {
            let default_path = std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(CONFIG_FILE);
            if !default_path.exists() {
                return Ok(Config::default());
            }
            load_config_from(&default_path)
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}
