use std::fs;
use std::path::Path;

use bstr::ByteSlice;
use topo_hash::CommitId;

use crate::error::RefError;

/// A single entry in the packed-refs file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedRef {
    /// Full ref name, e.g. `refs/heads/main`.
    pub name: String,
    pub id: CommitId,
}

/// Parsed packed-refs file.
///
/// Format:
/// ```text
/// # pack-refs with: peeled fully-peeled sorted
/// <hex-oid> <refname>
/// ^<hex-oid>   (peeled value of annotated tag above)
/// ```
/// Peeled lines only matter for tags and are skipped.
#[derive(Debug, Clone, Default)]
pub struct PackedRefs {
    refs: Vec<PackedRef>,
}

impl PackedRefs {
    /// Parse the contents of a packed-refs file.
    pub fn parse(data: &[u8]) -> Result<Self, RefError> {
        let mut refs = Vec::new();

        for (lineno, line) in data.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(b"#") || line.starts_with(b"^") {
                continue;
            }

            let space_pos = line.find_byte(b' ').ok_or_else(|| {
                RefError::PackedRefs(format!("line {}: missing ref name", lineno + 1))
            })?;

            let hex = line[..space_pos].to_str().map_err(|_| {
                RefError::PackedRefs(format!("line {}: invalid UTF-8 in hash", lineno + 1))
            })?;
            let name = line[space_pos + 1..].trim().to_str().map_err(|_| {
                RefError::PackedRefs(format!("line {}: invalid UTF-8 in ref name", lineno + 1))
            })?;
            let id = CommitId::from_hex(hex).map_err(|source| RefError::InvalidTarget {
                name: name.to_string(),
                source,
            })?;

            refs.push(PackedRef {
                name: name.to_string(),
                id,
            });
        }

        Ok(Self { refs })
    }

    /// Load packed-refs from disk. Returns empty if the file doesn't exist.
    pub fn load(git_dir: &Path) -> Result<Self, RefError> {
        let path = git_dir.join("packed-refs");
        if !path.exists() {
            return Ok(Self::default());
        }

        let data = fs::read(&path).map_err(|e| RefError::UnreadableReference {
            path: path.clone(),
            source: e,
        })?;
        Self::parse(&data)
    }

    /// Look up a ref by its full name.
    pub fn find(&self, name: &str) -> Option<&PackedRef> {
        self.refs.iter().find(|pr| pr.name == name)
    }

    /// Local branches as `(short name, id)` pairs.
    pub fn branches(&self) -> impl Iterator<Item = (&str, &CommitId)> {
        self.refs.iter().filter_map(|pr| {
            pr.name
                .strip_prefix("refs/heads/")
                .map(|short| (short, &pr.id))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }
}
