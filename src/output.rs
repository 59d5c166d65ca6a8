use std::fs;
use std::path::Path;

use crate::error::{Result, ScanError};
use crate::policy::{PolicyFailure, ViolationKind};
use crate::report::LicenseRecord;

pub const CSV_HEADER: [&str; 4] = ["id", "version", "dev", "license"];

/// Render the report as CSV. The header is written even when there are no rows.
pub fn render_csv(records: &[LicenseRecord]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ScanError::Csv(err.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn write_report(path: &Path, records: &[LicenseRecord]) -> Result<()> {
    let content = render_csv(records)?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ScanError::ReportWrite {
            path: path.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, content).map_err(|source| ScanError::ReportWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Diagnostic lines for stderr.
pub fn format_policy_failure(failure: &PolicyFailure) -> String {
    let mut output = String::new();

    match failure.kind {
        ViolationKind::Unlicensed => {
            let count = failure.violations.len();
            output.push_str(&format!(
                "Licenses could not be found for {} package{}:\n",
                count,
                if count == 1 { "" } else { "s" }
            ));
            let keys: Vec<String> = failure.violations.iter().map(|v| v.package_key()).collect();
            output.push_str(&keys.join(", "));
            output.push('\n');
        }
        ViolationKind::NotWhitelisted | ViolationKind::Blacklisted => {
            let verb = if failure.kind == ViolationKind::NotWhitelisted {
                "have not been whitelisted"
            } else {
                "have been blacklisted"
            };
            output.push_str(&format!(
                "The licenses for the following package versions {}:\n",
                verb
            ));
            for violation in &failure.violations {
                output.push_str(&format!(
                    "{} => {}\n",
                    violation.package_key(),
                    violation.license.as_deref().unwrap_or("(none)")
                ));
            }
        }
    }

    output
}

pub fn format_summary(records: &[LicenseRecord], report_path: &Path) -> String {
    let dev = records.iter().filter(|r| r.dev).count();
    let unlicensed = records.iter().filter(|r| r.effective_license().is_none()).count();

    format!(
        "📦 License scan: {} packages ({} dev, {} without license) written to {}",
        records.len(),
        dev,
        unlicensed,
        report_path.display()
    )
}
