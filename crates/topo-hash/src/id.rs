use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::hex::validate_hex;
use crate::HashError;

/// Identifier of a commit.
///
/// The value is treated as opaque: ordering and equality are plain string
/// comparisons. Ids read from a repository go through [`CommitId::from_hex`],
/// which validates and lowercases them; [`CommitId::new`] only requires a
/// non-empty token without whitespace so in-memory histories can use short
/// readable names.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitId(String);

impl CommitId {
    /// Create an id from any non-empty, whitespace-free token.
    pub fn new(id: impl Into<String>) -> Result<Self, HashError> {
        let id = id.into();
        if id.is_empty() {
            return Err(HashError::Empty);
        }
        if id.chars().any(char::is_whitespace) {
            return Err(HashError::Whitespace(id));
        }
        Ok(Self(id))
    }

    /// Create an id from a hex hash, normalizing it to lowercase.
    pub fn from_hex(hex: &str) -> Result<Self, HashError> {
        validate_hex(hex)?;
        Ok(Self(hex.to_ascii_lowercase()))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first eight characters (or fewer for short ids).
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitId({})", self.short())
    }
}

impl FromStr for CommitId {
    type Err = HashError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl AsRef<str> for CommitId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CommitId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
