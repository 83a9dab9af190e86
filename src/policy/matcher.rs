use glob::Pattern;
use tracing::warn;

use super::config::ProtectedLicenseSet;

impl ProtectedLicenseSet {
    /// Check whether a license identifier is protected.
    pub fn matches(&self, license: &str) -> bool {
        self.find_match(license).is_some()
    }

    /// Return the rule (exact or pattern) that matched.
    pub fn find_match(&self, license: &str) -> Option<String> {
        if let Some(exact) = self.exact.iter().find(|exact| *exact == license) {
            return Some(format!("exact: {}", exact));
        }

        for pattern_str in &self.patterns {
            match Pattern::new(pattern_str) {
                Ok(pattern) if pattern.matches(license) => {
                    return Some(format!("pattern: {}", pattern_str));
                }
                Ok(_) => {}
                Err(e) => warn!("Ignoring invalid license pattern '{}': {}", pattern_str, e),
            }
        }

        None
    }
}
