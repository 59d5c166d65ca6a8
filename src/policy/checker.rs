use super::config::LicensePolicy;
use crate::report::LicenseRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// No license in the manifest and no configured default
    Unlicensed,
    NotWhitelisted,
    Blacklisted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub package_name: String,
    pub package_version: String,
    pub license: Option<String>,
}

impl Violation {
    fn from_record(record: &LicenseRecord) -> Self {
        Self {
            package_name: record.id.clone(),
            package_version: record.version.clone(),
            license: record.license.clone(),
        }
    }

    pub fn package_key(&self) -> String {
        format!("{}@{}", self.package_name, self.package_version)
    }
}

/// Every offender of the first rule that failed.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyFailure {
    pub kind: ViolationKind,
    pub violations: Vec<Violation>,
}

impl LicensePolicy {
    /// Check the report rows: missing licenses first, then the whitelist, or
    /// the blacklist when no whitelist is configured.
    pub fn evaluate(&self, records: &[LicenseRecord]) -> Option<PolicyFailure> {
        let unlicensed = collect_failure(records, ViolationKind::Unlicensed, |record| {
            record.effective_license().is_none()
        });
        if unlicensed.is_some() {
            return unlicensed;
        }

        if let Some(whitelist) = &self.whitelist {
            collect_failure(records, ViolationKind::NotWhitelisted, |record| {
                !record.effective_license().is_some_and(|license| whitelist.contains(license))
            })
        } else if let Some(blacklist) = &self.blacklist {
            collect_failure(records, ViolationKind::Blacklisted, |record| {
                record.effective_license().is_some_and(|license| blacklist.contains(license))
            })
        } else {
            None
        }
    }
}

fn collect_failure<F>(records: &[LicenseRecord], kind: ViolationKind, fails: F) -> Option<PolicyFailure>
where
    F: Fn(&LicenseRecord) -> bool,
{
    let violations: Vec<Violation> = records
        .iter()
        .filter(|record| fails(*record))
        .map(Violation::from_record)
        .collect();

    if violations.is_empty() {
        None
    } else {
        Some(PolicyFailure { kind, violations })
    }
}
