use crate::HashError;

/// Shortest abbreviated hash accepted from disk.
pub const MIN_HEX_LEN: usize = 4;
/// Length of a full SHA-256 hash, the longest git uses.
pub const MAX_HEX_LEN: usize = 64;

/// Check that `hex` is a plausible git hash: 4..=64 ASCII hex digits.
pub fn validate_hex(hex: &str) -> Result<(), HashError> {
    if let Some((position, character)) = hex
        .char_indices()
        .find(|(_, c)| !c.is_ascii_hexdigit())
    {
        return Err(HashError::InvalidHex {
            position,
            character,
        });
    }
    if !(MIN_HEX_LEN..=MAX_HEX_LEN).contains(&hex.len()) {
        return Err(HashError::InvalidHexLength {
            min: MIN_HEX_LEN,
            max: MAX_HEX_LEN,
            actual: hex.len(),
        });
    }
    Ok(())
}

/// Returns true if `hex` passes [`validate_hex`].
pub fn is_valid_hex(hex: &str) -> bool {
    validate_hex(hex).is_ok()
}
