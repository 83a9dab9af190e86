use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, error, info, warn};

use super::config::ProtectedLicenseSet;
use crate::error::Result;
use crate::report::LicenseReport;

/// A license present in the current report but not in the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLicense {
    pub license: String,
    pub packages: Vec<String>,
    /// Protected rule the license matched, if any.
    pub matched_rule: Option<String>,
}

/// Outcome of comparing two reports.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Comparison {
    /// Newly introduced licenses, sorted by identifier.
    pub new_licenses: Vec<NewLicense>,
}

impl Comparison {
    pub fn flagged(&self) -> impl Iterator<Item = &NewLicense> {
        self.new_licenses.iter().filter(|l| l.matched_rule.is_some())
    }

    /// True when no newly introduced license is protected.
    pub fn is_clean(&self) -> bool {
        self.flagged().next().is_none()
    }
}

/// Compute the licenses introduced by `current` relative to `previous`.
pub fn compare_reports(
    current: &LicenseReport,
    previous: &LicenseReport,
    protected: &ProtectedLicenseSet,
) -> Comparison {
    let previous_licenses = previous.licenses();
    let mut comparison = Comparison::default();

    for license in current.licenses() {
        if previous_licenses.contains(license) {
            info!("License '{}' was present.", license);
            continue;
        }

        let packages = current.packages_with(license).to_vec();
        let matched_rule = protected.find_match(license);
        match &matched_rule {
            Some(rule) => error!(
                "License '{}' was NOT present in the previous report and is protected ({}); packages: {}",
                license,
                rule,
                packages.join(", ")
            ),
            None => warn!(
                "License '{}' was NOT present in the previous report; packages: {}",
                license,
                packages.join(", ")
            ),
        }

        comparison.new_licenses.push(NewLicense {
            license: license.to_string(),
            packages,
            matched_rule,
        });
    }

    comparison
}

/// Load both report files and compare them.
pub fn compare_files(
    path_current: &Path,
    path_prev: &Path,
    protected: &ProtectedLicenseSet,
) -> Result<Comparison> {
    let current = LicenseReport::load(path_current)?;
    let previous = LicenseReport::load(path_prev)?;
    debug!("current: {:?}\nprevious: {:?}", current, previous);

    Ok(compare_reports(&current, &previous, protected))
}

/// Compare the report at `path_current` against `path_prev`.
///
/// Returns `false` when any license introduced by the current report matches
/// `protected`, `true` otherwise.
pub fn compare(
    path_current: &Path,
    path_prev: &Path,
    protected: &ProtectedLicenseSet,
) -> Result<bool> {
    Ok(compare_files(path_current, path_prev, protected)?.is_clean())
}
