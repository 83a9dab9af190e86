use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::path::PathBuf;
use tracing::error;

// Import from our library
use ros_license_reporter::config::load_config;
use ros_license_reporter::output::format_summary;
use ros_license_reporter::report::DEFAULT_PREFIX_OUTFILE;
use ros_license_reporter::workspace::ros_paths_from_env;
use ros_license_reporter::{logging, LicenseReporter, PersistOptions, ProtectedLicenseSet, RosPack};

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let config = load_config(cli.config.as_deref())?;

    // CLI arguments override config values
    let ros_paths: Vec<PathBuf> = match (&cli.ros_package_path, &config.ros_package_path) {
        (Some(list), _) => env::split_paths(list).collect(),
        (None, Some(paths)) => paths.clone(),
        (None, None) => ros_paths_from_env(),
    };
    let prefix = cli
        .prefix_outfile
        .clone()
        .or_else(|| config.prefix_outfile.clone())
        .unwrap_or_else(|| DEFAULT_PREFIX_OUTFILE.to_string());
    let options = PersistOptions {
        format: cli.format.or(config.format).unwrap_or_default(),
        timestamp_suffix: config.timestamp_suffix.unwrap_or(false),
    };
    let strict = cli.strict || config.strict_dependencies.unwrap_or(false);

    let pkg_names = cli.package_names();
    let reporter = LicenseReporter::new(RosPack::new(ros_paths))
        .strict(strict)
        .persist_options(options);

    let map = reporter
        .collect(&pkg_names)
        .context("Failed to collect licenses")?;
    let path_report = reporter
        .persist(&map, &pkg_names, &prefix)
        .context("Failed to write license report")?;
    println!("{}", path_report.display());

    let comparison = match &cli.path_licenses_prev {
        Some(path_prev) => {
            let protected = match &cli.licenses_alert {
                Some(list) => ProtectedLicenseSet::from_list(list),
                None => config
                    .licenses_alert
                    .clone()
                    .unwrap_or_else(ProtectedLicenseSet::builtin),
            };
            let comparison = reporter
                .compare_details(&path_report, path_prev, &protected)
                .with_context(|| {
                    format!(
                        "Failed to compare {} against {}",
                        path_report.display(),
                        path_prev.display()
                    )
                })?;
            Some((path_prev, comparison))
        }
        None => None,
    };

    if !cli.quiet {
        eprint!(
            "{}",
            format_summary(&map, comparison.as_ref().map(|(_, c)| c), cli.verbose)
        );
    }

    if let Some((path_prev, comparison)) = comparison {
        if !comparison.is_clean() {
            let flagged: Vec<&str> = comparison.flagged().map(|l| l.license.as_str()).collect();
            error!(
                "New license(s) from the alert list found: {}. Compared {} against {}",
                flagged.join(", "),
                path_report.display(),
                path_prev.display()
            );
            std::process::exit(1);
        }
    }

    Ok(())
}
