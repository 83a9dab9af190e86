use clap::Parser;
use std::path::PathBuf;

use ros_license_reporter::ReportFormat;

#[derive(Parser)]
#[command(name = "ros-license-reporter")]
#[command(about = "Report licenses of ROS packages and their dependencies")]
#[command(version)]
pub struct Cli {
    /// Comma-delimited list of root package names
    #[arg(value_delimiter = ',', required = true)]
    pub pkg_names: Vec<String>,

    /// Previous report to compare the new one against
    #[arg(long = "path_licenses_prev")]
    pub path_licenses_prev: Option<PathBuf>,

    /// Prefix of the output file in an absolute path style [default: /tmp/licenses]
    #[arg(long = "prefix_outfile")]
    pub prefix_outfile: Option<String>,

    /// Comma-delimited licenses that must not be newly introduced (glob patterns allowed)
    #[arg(long = "licenses_alert")]
    pub licenses_alert: Option<String>,

    /// Package search path, overrides ROS_PACKAGE_PATH
    #[arg(long = "ros_package_path")]
    pub ros_package_path: Option<String>,

    /// Report format
    #[arg(short, long)]
    pub format: Option<ReportFormat>,

    /// Configuration file [default: ./ros-license-reporter.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fail when a dependency is not available on the package path
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose logging and print a license summary
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Root package names with surrounding whitespace and empty entries removed.
    pub fn package_names(&self) -> Vec<String> {
        self.pkg_names
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect()
    }
}
