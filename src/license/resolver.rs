use indexmap::IndexMap;
use serde::de::IgnoredAny;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::traverse::Occurrence;
use crate::error::{Result, ScanError};

pub const NODE_MODULES: &str = "node_modules";
pub const MANIFEST_NAME: &str = "package.json";

/// `license` / `licenses` value as written in a manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum LicenseField {
    Name(String),
    Typed {
        #[serde(rename = "type")]
        kind: String,
    },
    Other(#[allow(dead_code)] IgnoredAny),
}

impl LicenseField {
    fn name(&self) -> Option<&str> {
        match self {
            LicenseField::Name(name) | LicenseField::Typed { kind: name } if !name.is_empty() => {
                Some(name.as_str())
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum LicenseList {
    List(Vec<LicenseField>),
    Other(#[allow(dead_code)] IgnoredAny),
}

/// The fields of `package.json` that matter for licensing.
#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    license: Option<LicenseField>,
    #[serde(default)]
    licenses: Option<LicenseList>,
}

impl Manifest {
    fn declared_license(&self) -> Option<String> {
        if let Some(name) = self.license.as_ref().and_then(LicenseField::name) {
            return Some(name.to_string());
        }

        if let Some(LicenseList::List(entries)) = &self.licenses {
            let names: Vec<&str> = entries.iter().filter_map(LicenseField::name).collect();
            if !names.is_empty() {
                return Some(names.join(","));
            }
        }

        None
    }
}

/// Where the installed copy of an occurrence keeps its `package.json`.
///
/// Each ancestor contributes its own `node_modules` level, which is how npm
/// places a version that conflicts with the hoisted one.
pub fn manifest_path(root: &Path, occurrence: &Occurrence) -> PathBuf {
    let mut path = root.join(NODE_MODULES);
    for ancestor in &occurrence.ancestors {
        path.extend(ancestor.split('/'));
        path.push(NODE_MODULES);
    }
    path.extend(occurrence.id.split('/'));
    path.push(MANIFEST_NAME);
    path
}

/// Reads installed manifests below a project root.
#[derive(Debug, Clone)]
pub struct LicenseResolver<'a> {
    root: &'a Path,
    defaults: Option<&'a IndexMap<String, String>>,
}

impl<'a> LicenseResolver<'a> {
    pub fn new(root: &'a Path, defaults: Option<&'a IndexMap<String, String>>) -> Self {
        Self { root, defaults }
    }

    /// License of one occurrence, or `None` when neither the manifest nor the
    /// configured defaults name one.
    pub fn resolve(&self, occurrence: &Occurrence) -> Result<Option<String>> {
        let path = manifest_path(self.root, occurrence);

        let content = fs::read_to_string(&path).map_err(|source| ScanError::ManifestRead {
            path: path.clone(),
            source,
        })?;

        let manifest: Manifest = serde_json::from_str(&content)
            .map_err(|source| ScanError::ManifestParse { path: path.clone(), source })?;

        let license = manifest
            .declared_license()
            .or_else(|| self.default_license(occurrence));

        debug!(
            package = %occurrence.key(),
            manifest = %path.display(),
            license = ?license,
            "resolved license"
        );

        Ok(license)
    }

    fn default_license(&self, occurrence: &Occurrence) -> Option<String> {
        self.defaults?.get(&occurrence.key()).cloned()
    }
}
