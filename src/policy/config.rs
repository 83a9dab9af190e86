use serde::{Deserialize, Serialize};

/// Licenses flagged by default when newly introduced.
const BUILTIN_EXACT: &[&str] = &[
    "AGPL-3.0",
    "GPL",
    "GPL-2.0",
    "GPL-3.0",
    "GPLv2",
    "GPLv3",
    "LGPL",
    "LGPL-2.1",
    "LGPL-3.0",
    "LGPLv2.1",
    "LGPLv3",
    "CC-BY-SA-4.0",
    "SSPL-1.0",
];

const BUILTIN_PATTERNS: &[&str] = &["AGPL*", "GPL-*", "LGPL-*"];

/// License identifiers that must not be newly introduced without review.
///
/// Entries are either exact identifiers or glob patterns (e.g. `"GPL-*"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProtectedLicenseSet {
    /// Exact license identifiers
    #[serde(default)]
    pub exact: Vec<String>,
    /// Glob patterns
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl ProtectedLicenseSet {
    pub fn builtin() -> Self {
        ProtectedLicenseSet {
            exact: BUILTIN_EXACT.iter().map(|s| s.to_string()).collect(),
            patterns: BUILTIN_PATTERNS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Parse a comma-delimited list. Entries containing `*`, `?` or `[` are
    /// treated as glob patterns.
    pub fn from_list(list: &str) -> Self {
        let mut set = ProtectedLicenseSet::default();
        for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            if entry.contains(['*', '?', '[']) {
                set.patterns.push(entry.to_string());
            } else {
                set.exact.push(entry.to_string());
            }
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.patterns.is_empty()
    }
}
