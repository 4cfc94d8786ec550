use std::fs;
use std::path::{Path, PathBuf};

use bstr::ByteSlice;
use topo_hash::CommitId;

use crate::error::RefError;

/// Contents of a single loose ref file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LooseRef {
    /// A file holding one hash.
    Direct(CommitId),
    /// A file holding `ref: <target-ref>`.
    Symbolic(String),
}

/// Read a loose ref file.
///
/// The file is opened, read and closed here. Surrounding whitespace is
/// trimmed before the content is interpreted.
pub(crate) fn read_loose_ref(name: &str, path: &Path) -> Result<LooseRef, RefError> {
    let contents = fs::read(path).map_err(|e| RefError::UnreadableReference {
        path: path.to_path_buf(),
        source: e,
    })?;
    let trimmed = contents.trim();

    if let Some(target) = trimmed.strip_prefix(b"ref: ") {
        let target = target.trim().to_str_lossy().into_owned();
        return Ok(LooseRef::Symbolic(target));
    }

    let hex = trimmed.to_str_lossy();
    CommitId::from_hex(&hex)
        .map(LooseRef::Direct)
        .map_err(|source| RefError::InvalidTarget {
            name: name.to_string(),
            source,
        })
}

/// List every loose ref under `<git_dir>/refs/heads/`.
///
/// Returns `(branch name, file path)` pairs sorted by name. Branch names are
/// relative to `refs/heads/` and always use `/` as the separator.
pub(crate) fn enumerate_loose_branches(git_dir: &Path) -> Result<Vec<(String, PathBuf)>, RefError> {
    let heads = git_dir.join("refs").join("heads");
    let mut result = Vec::new();
    if heads.is_dir() {
        collect_recursive(&heads, "", &mut result)?;
    }
    result.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(result)
}

fn collect_recursive(
    dir: &Path,
    prefix: &str,
    result: &mut Vec<(String, PathBuf)>,
) -> Result<(), RefError> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(RefError::UnreadableReference {
                path: dir.to_path_buf(),
                source: e,
            })
        }
    };

    for entry in entries {
        let entry = entry.map_err(|e| RefError::UnreadableReference {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            tracing::warn!(path = %path.display(), "skipping non-UTF-8 ref name");
            continue;
        };
        let name = format!("{prefix}{file_name}");

        if path.is_dir() {
            collect_recursive(&path, &format!("{name}/"), result)?;
        } else if path.is_file() {
            if name.ends_with(".lock") {
                continue;
            }
            result.push((name, path));
        }
    }

    Ok(())
}
