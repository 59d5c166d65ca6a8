use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{Result, ScanError};
use crate::license::traverse::Occurrences;

pub const LOCKFILE_NAME: &str = "package-lock.json";

const NODE_MODULES_PREFIX: &str = "node_modules/";
const NESTED_SEPARATOR: &str = "/node_modules/";

/// A node of the installed dependency tree.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PackageEntry {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub dev: bool,
    /// Packages installed below this one because they conflict with a hoisted copy.
    #[serde(default)]
    pub dependencies: IndexMap<String, PackageEntry>,
}

impl PackageEntry {
    pub fn new(version: impl Into<String>, dev: bool) -> Self {
        Self {
            version: version.into(),
            dev,
            dependencies: IndexMap::new(),
        }
    }

    #[cfg(test)]
    pub fn with_dependency(mut self, id: impl Into<String>, entry: PackageEntry) -> Self {
        self.dependencies.insert(id.into(), entry);
        self
    }
}

/// Parsed `package-lock.json`, normalized to the nested v1 shape.
#[derive(Debug, Clone, Default)]
pub struct Lockfile {
    pub name: Option<String>,
    pub version: Option<String>,
    pub lockfile_version: Option<u32>,
    pub dependencies: IndexMap<String, PackageEntry>,
}

impl Lockfile {
    /// Depth-first walk over every installed package. Each call starts a fresh walk.
    pub fn occurrences(&self) -> Occurrences<'_> {
        Occurrences::new(&self.dependencies)
    }

    /// Total number of entries in the tree, duplicates included.
    pub fn package_count(&self) -> usize {
        fn count(map: &IndexMap<String, PackageEntry>) -> usize {
            map.values().map(|entry| 1 + count(&entry.dependencies)).sum()
        }
        count(&self.dependencies)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLockfile {
    name: Option<String>,
    version: Option<String>,
    lockfile_version: Option<u32>,
    dependencies: Option<IndexMap<String, PackageEntry>>,
    packages: Option<IndexMap<String, InstalledPackage>>,
}

/// Entry of the flat `packages` map written by npm 7 and later.
#[derive(Debug, Deserialize)]
struct InstalledPackage {
    version: Option<String>,
    #[serde(default)]
    dev: bool,
    #[serde(default)]
    link: bool,
}

pub struct PackageLockParser;

impl PackageLockParser {
    /// Read `package-lock.json` from the project root.
    pub fn parse_project<P: AsRef<Path>>(root: P) -> Result<Lockfile> {
        Self::parse_package_lock(root.as_ref().join(LOCKFILE_NAME))
    }

    pub fn parse_package_lock<P: AsRef<Path>>(path: P) -> Result<Lockfile> {
        let path_ref = path.as_ref();

        let content = std::fs::read_to_string(path_ref).map_err(|source| ScanError::LockfileRead {
            path: path_ref.to_path_buf(),
            source,
        })?;

        let lockfile = Self::parse_str(&content).map_err(|source| ScanError::LockfileParse {
            path: path_ref.to_path_buf(),
            source,
        })?;

        debug!(
            path = %path_ref.display(),
            lockfile_version = ?lockfile.lockfile_version,
            top_level = lockfile.dependencies.len(),
            "parsed lockfile"
        );

        Ok(lockfile)
    }

    pub fn parse_str(content: &str) -> std::result::Result<Lockfile, serde_json::Error> {
        let raw: RawLockfile = serde_json::from_str(content)?;

        let dependencies = match (raw.dependencies, raw.packages) {
            (Some(dependencies), _) => dependencies,
            (None, Some(packages)) => Self::tree_from_packages(packages),
            (None, None) => IndexMap::new(),
        };

        Ok(Lockfile {
            name: raw.name,
            version: raw.version,
            lockfile_version: raw.lockfile_version,
            dependencies,
        })
    }

    /// Fold the path-keyed `packages` map back into a nested tree.
    fn tree_from_packages(packages: IndexMap<String, InstalledPackage>) -> IndexMap<String, PackageEntry> {
        let mut root: IndexMap<String, PackageEntry> = IndexMap::new();

        'packages: for (path, package) in packages {
            // "" is the project itself; other prefixes are workspace folders
            let Some(rest) = path.strip_prefix(NODE_MODULES_PREFIX) else {
                continue;
            };
            if package.link {
                debug!(path = %path, "skipping linked package");
                continue;
            }

            let segments: Vec<&str> = rest.split(NESTED_SEPARATOR).collect();
            let Some((id, parents)) = segments.split_last() else {
                continue;
            };

            let mut level = &mut root;
            for parent in parents {
                level = match level.get_mut(*parent) {
                    Some(entry) => &mut entry.dependencies,
                    None => {
                        warn!(path = %path, parent = %parent, "parent package missing from lockfile, skipping");
                        continue 'packages;
                    }
                };
            }

            level.insert(
                (*id).to_string(),
                PackageEntry::new(package.version.unwrap_or_default(), package.dev),
            );
        }

        root
    }
}
