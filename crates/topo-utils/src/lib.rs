//! Foundation utilities shared by the topo-order crates.

pub mod error;
pub mod subprocess;

// Re-export core types at crate root for convenience
pub use bstr::{BStr, BString, ByteSlice};
pub use error::UtilError;

pub type Result<T> = std::result::Result<T, UtilError>;
