use std::path::Path;

use crate::{RefError, Repository};

/// Discover a repository by walking up from `start`.
///
/// Each directory from `start` up to the filesystem root is checked for a
/// `.git` subdirectory; the first match wins. `.git` files (worktree
/// redirects) and bare repositories are not recognized.
pub fn discover(start: &Path) -> Result<Repository, RefError> {
    let start = std::fs::canonicalize(start)
        .map_err(|_| RefError::NotARepository(start.to_path_buf()))?;

    let mut current: &Path = &start;
    loop {
        let dot_git = current.join(".git");
        if dot_git.is_dir() {
            tracing::debug!(work_tree = %current.display(), "found repository");
            return Ok(Repository::new(current.to_path_buf(), dot_git));
        }

        match current.parent() {
            Some(parent) if parent != current => current = parent,
            _ => return Err(RefError::NotARepository(start.clone())),
        }
    }
}
