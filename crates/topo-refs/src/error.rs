use std::path::PathBuf;

/// Error types for repository discovery and reference reading.
#[derive(Debug, thiserror::Error)]
pub enum RefError {
    #[error("not a git repository (or any of the parent directories): {}", .0.display())]
    NotARepository(PathBuf),

    #[error("unable to read reference {}: {source}", path.display())]
    UnreadableReference {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ref not found: {0}")]
    NotFound(String),

    #[error("symbolic ref loop detected: {0}")]
    SymrefLoop(String),

    #[error("packed-refs error: {0}")]
    PackedRefs(String),

    #[error("invalid reference {name}: {source}")]
    InvalidTarget {
        name: String,
        #[source]
        source: topo_hash::HashError,
    },
}
