//! Span validation shared by every codec path.
//!
//! All checks are made on the whole field before any byte is read or
//! written, with overflow-safe offset arithmetic.

use std::ops::Range;

use crate::errors::CodecError;

/// Widest aligned field, in bytes.
pub const MAX_BYTE_COUNT: usize = 8;
/// Widest bit field, in bits.
pub const MAX_BIT_COUNT: u8 = 64;

/// Rejects aligned widths outside `1..=8`.
pub fn check_byte_count(byte_count: usize) -> Result<(), CodecError> {
    if byte_count == 0 || byte_count > MAX_BYTE_COUNT {
        return Err(CodecError::InvalidByteCount(byte_count));
    }

    Ok(())
}

/// Rejects bit widths outside `1..=64`.
pub fn check_bit_count(bit_count: u8) -> Result<(), CodecError> {
    if bit_count == 0 || bit_count > MAX_BIT_COUNT {
        return Err(CodecError::InvalidBitCount(bit_count));
    }

    Ok(())
}

/// Rejects bit offsets outside `0..=7`.
pub fn check_bit_offset(bit_offset: u8) -> Result<(), CodecError> {
    if bit_offset > 7 {
        return Err(CodecError::InvalidBitOffset(bit_offset));
    }

    Ok(())
}

/// Absolute bit index of `byte_offset * 8 + bit_offset`, or `None` on overflow.
pub fn absolute_bit(byte_offset: usize, bit_offset: u8) -> Option<usize> {
    byte_offset
        .checked_mul(8)
        .and_then(|bits| bits.checked_add(bit_offset as usize))
}

/// Validates an aligned field and returns the byte range it occupies.
pub fn byte_span(
    buffer_len: usize,
    byte_offset: usize,
    byte_count: usize,
) -> Result<Range<usize>, CodecError> {
    check_byte_count(byte_count)?;

    match byte_offset.checked_add(byte_count) {
        Some(end) if end <= buffer_len => Ok(byte_offset..end),
        end => Err(CodecError::OutOfBounds {
            end_bit: end.and_then(|end| end.checked_mul(8)).unwrap_or(usize::MAX),
            buffer_bits: buffer_len.saturating_mul(8),
        }),
    }
}

/// Validates a bit field starting at absolute bit `start_bit` and returns the
/// absolute bit range it occupies.
pub fn bit_span(
    buffer_len: usize,
    start_bit: usize,
    bit_count: u8,
) -> Result<Range<usize>, CodecError> {
    check_bit_count(bit_count)?;

    let buffer_bits = buffer_len.saturating_mul(8);
    match start_bit.checked_add(bit_count as usize) {
        Some(end) if end <= buffer_bits => Ok(start_bit..end),
        end => Err(CodecError::OutOfBounds {
            end_bit: end.unwrap_or(usize::MAX),
            buffer_bits,
        }),
    }
}
