//! Commit identity for topo-order.
//!
//! This crate provides the `CommitId` key type used by every other crate,
//! plus the hex validation applied to hashes read from disk or from the
//! commit-inspection command.

mod error;
pub mod hex;
mod id;

pub use error::HashError;
pub use id::CommitId;
