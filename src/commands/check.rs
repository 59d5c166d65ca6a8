use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use license_scan::config::load_config;
use license_scan::license::resolve_licenses;
use license_scan::lockfile::PackageLockParser;
use license_scan::output::{format_policy_failure, format_summary, write_report};
use license_scan::policy::LicensePolicy;
use license_scan::report::assemble;

pub fn handle_check(
    path: Option<PathBuf>,
    output: Option<PathBuf>,
    config_file: Option<PathBuf>,
    exit_zero: bool,
    quiet: bool,
) -> Result<()> {
    let root = super::project_root(path)?;

    // Load .licenserc layers and environment
    let mut config = load_config(&root, config_file.as_deref())?;

    // CLI arguments override config values
    if output.is_some() {
        config.output = output;
    }

    let lockfile = PackageLockParser::parse_project(&root)?;
    info!(packages = lockfile.package_count(), "walking lockfile tree");

    let dependencies = resolve_licenses(&lockfile, &root, &config)?;
    let records = assemble(dependencies);

    // The report is written before the policy decides the exit code
    let report_path = config.output_path(&root);
    write_report(&report_path, &records)?;

    if !quiet {
        println!("{}", format_summary(&records, &report_path));
    }

    let policy = LicensePolicy::from(&config);
    if let Some(failure) = policy.evaluate(&records) {
        eprint!("{}", format_policy_failure(&failure));

        if !exit_zero {
            std::process::exit(1);
        }
    }

    Ok(())
}
