use indexmap::IndexSet;
use crate::config::Config;

/// Accept/reject sets applied to resolved licenses.
///
/// License strings are compared whole, so a dual-licensed "MIT,ISC" entry
/// has to be listed as such.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LicensePolicy {
    pub whitelist: Option<IndexSet<String>>,
    pub blacklist: Option<IndexSet<String>>,
}

impl LicensePolicy {
    #[cfg(test)]
    pub fn whitelist<I, S>(licenses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            whitelist: Some(licenses.into_iter().map(Into::into).collect()),
            blacklist: None,
        }
    }

    #[cfg(test)]
    pub fn blacklist<I, S>(licenses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            whitelist: None,
            blacklist: Some(licenses.into_iter().map(Into::into).collect()),
        }
    }
}

impl From<&Config> for LicensePolicy {
    fn from(config: &Config) -> Self {
        Self {
            whitelist: config.whitelist.as_ref().map(|list| list.iter().cloned().collect()),
            blacklist: config.blacklist.as_ref().map(|list| list.iter().cloned().collect()),
        }
    }
}
