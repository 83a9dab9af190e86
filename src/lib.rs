pub mod config;
pub mod error;
pub mod license;
pub mod logging;
pub mod manifest;
pub mod output;
pub mod policy;
pub mod report;
pub mod resolver;
pub mod workspace;

// Re-export main types for easy access
pub use error::{ReportError, Result};
pub use license::{LicenseReporter, PackageLicense, PackageLicenseMap};
pub use policy::{Comparison, ProtectedLicenseSet};
pub use report::{LicenseReport, PersistOptions, ReportFormat};
pub use resolver::{PackageSource, RosPack, LICENSE_NOT_FOUND};
