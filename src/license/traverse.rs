use indexmap::map::Iter;
use indexmap::IndexMap;

use crate::lockfile::PackageEntry;

/// One appearance of a package in the lockfile tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub id: String,
    pub version: String,
    pub dev: bool,
    /// Identifiers of the enclosing entries, outermost first.
    pub ancestors: Vec<String>,
}

impl Occurrence {
    pub fn key(&self) -> String {
        format!("{}@{}", self.id, self.version)
    }
}

struct Frame<'a> {
    ancestors: Vec<String>,
    entries: Iter<'a, String, PackageEntry>,
}

/// Lazy depth-first pre-order walk over a dependency map.
///
/// A parent is always yielded before anything nested below it; siblings keep
/// the lockfile's key order.
pub struct Occurrences<'a> {
    stack: Vec<Frame<'a>>,
}

impl<'a> Occurrences<'a> {
    pub fn new(dependencies: &'a IndexMap<String, PackageEntry>) -> Self {
        Self {
            stack: vec![Frame {
                ancestors: Vec::new(),
                entries: dependencies.iter(),
            }],
        }
    }
}

impl<'a> Iterator for Occurrences<'a> {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let Some((id, entry)) = frame.entries.next() else {
                self.stack.pop();
                continue;
            };

            let occurrence = Occurrence {
                id: id.clone(),
                version: entry.version.clone(),
                dev: entry.dev,
                ancestors: frame.ancestors.clone(),
            };

            if !entry.dependencies.is_empty() {
                let mut ancestors = frame.ancestors.clone();
                ancestors.push(id.clone());
                self.stack.push(Frame {
                    ancestors,
                    entries: entry.dependencies.iter(),
                });
            }

            return Some(occurrence);
        }
    }
}
