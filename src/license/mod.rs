use rayon::prelude::*;
use std::path::Path;
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::lockfile::Lockfile;

pub mod resolver;
pub mod traverse;

pub use resolver::{manifest_path, LicenseResolver};
pub use traverse::{Occurrence, Occurrences};

/// An occurrence together with the license found for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDependency {
    pub id: String,
    pub version: String,
    pub dev: bool,
    pub ancestors: Vec<String>,
    pub license: Option<String>,
}

impl ResolvedDependency {
    pub fn from_occurrence(occurrence: Occurrence, license: Option<String>) -> Self {
        Self {
            id: occurrence.id,
            version: occurrence.version,
            dev: occurrence.dev,
            ancestors: occurrence.ancestors,
            license,
        }
    }
}

/// Resolve the license of every package in the lockfile tree.
///
/// Occurrences are pulled lazily from the tree walk and resolved on the rayon
/// pool, so the returned list is complete but in no particular order. The first
/// manifest that cannot be read or parsed aborts the whole batch.
pub fn resolve_licenses(lockfile: &Lockfile, root: &Path, config: &Config) -> Result<Vec<ResolvedDependency>> {
    let resolver = LicenseResolver::new(root, config.defaults.as_ref());

    let resolved: Vec<ResolvedDependency> = lockfile
        .occurrences()
        .par_bridge()
        .map(|occurrence| -> Result<ResolvedDependency> {
            let license = resolver.resolve(&occurrence)?;
            Ok(ResolvedDependency::from_occurrence(occurrence, license))
        })
        .collect::<Result<_>>()?;

    info!(
        resolved = resolved.len(),
        root = %root.display(),
        "resolved installed manifests"
    );

    Ok(resolved)
}
