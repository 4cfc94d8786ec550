/// Errors produced when constructing a `CommitId`.
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("empty commit id")]
    Empty,

    #[error("commit id contains whitespace: '{0}'")]
    Whitespace(String),

    #[error("invalid hex character at position {position}: '{character}'")]
    InvalidHex { position: usize, character: char },

    #[error("invalid hex length: expected {min} to {max} characters, got {actual}")]
    InvalidHexLength {
        min: usize,
        max: usize,
        actual: usize,
    },
}
