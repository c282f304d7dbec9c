// Hex decoding for KAT fields, with an optional exact-length check.

use crate::kat_error::{KatError, Result};

/// Decode a hex field of any length (msg, ctx, pk before the parameter set is known).
pub fn decode_field(field: &'static str, data: &str) -> Result<Vec<u8>> {
    hex::decode(data).map_err(|source| KatError::Decode { field, source })
}

/// Decode a hex field and require exactly `expected` bytes.
pub fn decode_and_check(field: &'static str, data: &str, expected: usize) -> Result<Vec<u8>> {
    let decoded = decode_field(field, data)?;
    if decoded.len() != expected {
        return Err(KatError::LengthMismatch {
            field,
            expected,
            actual: decoded.len(),
        });
    }
    Ok(decoded)
}

/// Fixed-size variant of [`decode_and_check`] for seeds and randomness.
pub fn decode_array<const N: usize>(field: &'static str, data: &str) -> Result<[u8; N]> {
    let decoded = decode_and_check(field, data, N)?;
    let mut out = [0u8; N];
    out.copy_from_slice(&decoded);
    Ok(out)
}
