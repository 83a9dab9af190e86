use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving packages, writing or reading reports.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A package name could not be resolved in the searched package paths.
    #[error("package '{name}' could not be resolved: {reason}")]
    Resolution { name: String, reason: String },

    /// A report file given for comparison does not exist.
    #[error("report file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A report file exists but is not a valid license report.
    #[error("failed to parse report {}: {details}", path.display())]
    Parse { path: PathBuf, details: String },

    /// A package manifest is malformed.
    #[error("invalid manifest {}: {details}", path.display())]
    Manifest { path: PathBuf, details: String },

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Serialize(String),
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
