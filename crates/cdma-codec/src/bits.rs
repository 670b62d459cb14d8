//! Conversion between message bytes and per-bit signs.

use cdma_types::{CdmaError, CdmaResult, BITS_PER_CHAR};

/// Expand `message` into `8 × len` bit signs, most significant bit first.
///
/// A set bit becomes `+1`, a clear bit `-1`.
pub fn to_signs(message: &[u8]) -> CdmaResult<Vec<i8>> {
    let mut signs = Vec::new();
    signs
        .try_reserve_exact(message.len().saturating_mul(BITS_PER_CHAR))
        .map_err(CdmaError::alloc("station bit signs"))?;
    for &byte in message {
        for shift in (0..BITS_PER_CHAR).rev() {
            signs.push(if (byte >> shift) & 1 == 1 { 1 } else { -1 });
        }
    }
    Ok(signs)
}

/// Assemble one character from its eight correlation sums, MSB first.
///
/// A bit is set when its sum is strictly positive.
pub fn pack(sums: &[i64; BITS_PER_CHAR]) -> u8 {
    sums.iter()
        .fold(0u8, |byte, &sum| (byte << 1) | u8::from(sum > 0))
}
