use indexmap::IndexMap;
use serde::Serialize;
use std::cmp::Ordering;

use crate::license::ResolvedDependency;

/// Written by tools that stringify a missing license.
const UNDEFINED_LICENSE: &str = "undefined";

/// One row of the license report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseRecord {
    pub id: String,
    pub version: String,
    pub dev: bool,
    pub license: Option<String>,
}

impl LicenseRecord {
    /// The license, unless it is absent, blank or the literal `undefined`.
    pub fn effective_license(&self) -> Option<&str> {
        self.license
            .as_deref()
            .filter(|license| !license.trim().is_empty() && *license != UNDEFINED_LICENSE)
    }

    fn absorb(&mut self, other: ResolvedDependency) {
        // dev only if every copy is dev
        self.dev &= other.dev;
        self.license = match (self.license.take(), other.license) {
            (Some(ours), Some(theirs)) => Some(ours.min(theirs)),
            (ours, theirs) => ours.or(theirs),
        };
    }
}

impl From<ResolvedDependency> for LicenseRecord {
    fn from(dependency: ResolvedDependency) -> Self {
        Self {
            id: dependency.id,
            version: dependency.version,
            dev: dependency.dev,
            license: dependency.license,
        }
    }
}

/// Collapse resolved occurrences into one row per `id@version`, ordered by
/// id and then by semantic version.
///
/// The result does not depend on the order of `dependencies`.
pub fn assemble(dependencies: Vec<ResolvedDependency>) -> Vec<LicenseRecord> {
    let mut unique: IndexMap<(String, String), LicenseRecord> = IndexMap::new();

    for dependency in dependencies {
        let key = (dependency.id.clone(), dependency.version.clone());
        match unique.get_mut(&key) {
            Some(record) => record.absorb(dependency),
            None => {
                unique.insert(key, LicenseRecord::from(dependency));
            }
        }
    }

    let mut records: Vec<LicenseRecord> = unique.into_values().collect();
    records.sort_by(compare_records);
    records
}

fn compare_records(a: &LicenseRecord, b: &LicenseRecord) -> Ordering {
    a.id.cmp(&b.id).then_with(|| compare_versions(&a.version, &b.version))
}

/// Semver precedence; versions that are not semver (git refs, tarball URLs)
/// sort after those that are, and lexically among themselves.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (semver::Version::parse(a), semver::Version::parse(b)) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
