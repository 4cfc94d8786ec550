//! Repository discovery and local branch reading.
//!
//! [`discover`] locates the repository by walking up from a directory;
//! [`Repository::branches`] enumerates every local branch (loose files under
//! `refs/heads/` plus `packed-refs`) and resolves each to a commit id.

mod discover;
mod error;
mod loose;
mod packed;

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use topo_hash::CommitId;

pub use discover::discover;
pub use error::RefError;
pub use packed::{PackedRef, PackedRefs};

use loose::LooseRef;

/// Maximum depth when following `ref:` indirections.
const MAX_SYMREF_DEPTH: usize = 5;

/// A discovered repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    work_tree: PathBuf,
    git_dir: PathBuf,
}

impl Repository {
    pub(crate) fn new(work_tree: PathBuf, git_dir: PathBuf) -> Self {
        Self { work_tree, git_dir }
    }

    /// The directory containing `.git`.
    pub fn work_tree(&self) -> &Path {
        &self.work_tree
    }

    /// The `.git` directory.
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// Read every local branch and the commit it points to.
    ///
    /// Loose refs take precedence over packed entries of the same name.
    pub fn branches(&self) -> Result<Branches, RefError> {
        let packed = PackedRefs::load(&self.git_dir)?;
        if !packed.is_empty() {
            tracing::trace!(git_dir = %self.git_dir.display(), "loaded packed-refs");
        }
        let mut branches = Branches::new();

        for (name, path) in loose::enumerate_loose_branches(&self.git_dir)? {
            let id = match loose::read_loose_ref(&name, &path)? {
                LooseRef::Direct(id) => id,
                LooseRef::Symbolic(target) => self.resolve_symbolic(&packed, &target)?,
            };
            tracing::trace!(branch = %name, commit = %id, "loose branch");
            branches.insert(name, id);
        }

        for (name, id) in packed.branches() {
            match branches.get(name) {
                Some(loose) => {
                    tracing::trace!(branch = %name, loose = %loose, packed = %id, "packed branch shadowed");
                }
                None => {
                    tracing::trace!(branch = %name, commit = %id, "packed branch");
                    branches.insert(name.to_string(), id.clone());
                }
            }
        }

        tracing::debug!(count = branches.len(), "read local branches");
        Ok(branches)
    }

    /// Follow a chain of `ref:` indirections to a commit id.
    fn resolve_symbolic(&self, packed: &PackedRefs, target: &str) -> Result<CommitId, RefError> {
        let mut name = target.to_string();
        for _ in 0..MAX_SYMREF_DEPTH {
            let path = self.git_dir.join(&name);
            if path.is_file() {
                match loose::read_loose_ref(&name, &path)? {
                    LooseRef::Direct(id) => return Ok(id),
                    LooseRef::Symbolic(next) => {
                        name = next;
                        continue;
                    }
                }
            }
            return packed
                .find(&name)
                .map(|pr| pr.id.clone())
                .ok_or(RefError::NotFound(name));
        }
        Err(RefError::SymrefLoop(target.to_string()))
    }
}

/// Local branches keyed by short name (`main`, `feature/x`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Branches {
    map: BTreeMap<String, CommitId>,
}

impl Branches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a branch.
    pub fn insert(&mut self, name: impl Into<String>, head: CommitId) -> Option<CommitId> {
        self.map.insert(name.into(), head)
    }

    /// The head of `name`, if it exists.
    pub fn get(&self, name: &str) -> Option<&CommitId> {
        self.map.get(name)
    }

    /// Branches in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, CommitId> {
        self.map.iter()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl FromIterator<(String, CommitId)> for Branches {
    fn from_iter<I: IntoIterator<Item = (String, CommitId)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Branches {
    type Item = (&'a String, &'a CommitId);
    type IntoIter = btree_map::Iter<'a, String, CommitId>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}
