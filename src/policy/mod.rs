pub mod config;
pub mod matcher;
pub mod checker;

// Re-export main types
pub use config::ProtectedLicenseSet;
pub use checker::{compare, compare_files, compare_reports, Comparison, NewLicense};
