//! Entry points with the legacy calling contract.
//!
//! These take an explicit buffer size, as generated code for C-style targets
//! expects, and never report failure to the caller:
//!
//! - an aligned field that does not fit is not written, and decodes as `0`;
//! - a bit field is checked bit by bit, so the in-range head of an
//!   overrunning field is written and the rest is skipped (or read as `0`);
//! - widths above 8 bytes or 64 bits behave like an out-of-range field.
//!
//! `buffer_size` is clamped to the slice length. Rejected calls are reported
//! through `tracing` at debug level.

use tracing::debug;

use crate::{aligned, bits, endian::Endianness};

/// Writes `byte_count` bytes of `value` at `byte_offset`, or nothing at all
/// if `byte_offset + byte_count > buffer_size` or `byte_count > 8`.
pub fn encode_aligned_bytes(
    buffer: &mut [u8],
    buffer_size: usize,
    byte_offset: usize,
    value: u64,
    byte_count: usize,
    endianness: Endianness,
) {
    let len = buffer_size.min(buffer.len());

    if let Err(err) =
        aligned::encode_aligned_bytes(&mut buffer[..len], byte_offset, value, byte_count, endianness)
    {
        debug!(%err, byte_offset, byte_count, buffer_size, "aligned encode skipped");
    }
}

/// Reads `byte_count` bytes at `byte_offset`. Returns `0` when the field
/// does not fit or `byte_count > 8`.
pub fn decode_aligned_bytes(
    buffer: &[u8],
    buffer_size: usize,
    byte_offset: usize,
    byte_count: usize,
    endianness: Endianness,
) -> u64 {
    let len = buffer_size.min(buffer.len());

    aligned::decode_aligned_bytes(&buffer[..len], byte_offset, byte_count, endianness)
        .unwrap_or_else(|err| {
            debug!(%err, byte_offset, byte_count, buffer_size, "aligned decode returned zero");
            0
        })
}

/// Writes the low `bit_count` bits of `value` at absolute bit
/// `byte_offset * 8 + bit_offset`. Bits whose byte lies at or past
/// `buffer_length` are skipped.
pub fn encode_bits(
    buffer: &mut [u8],
    buffer_length: usize,
    byte_offset: usize,
    bit_offset: u8,
    value: u64,
    bit_count: u8,
    endianness: Endianness,
) {
    let len = buffer_length.min(buffer.len());
    let Some(byte_offset) = byte_offset.checked_add((bit_offset / 8) as usize) else {
        debug!(byte_offset, bit_offset, "bit encode starts past addressable range");
        return;
    };

    match bits::encode_bits_partial(
        &mut buffer[..len],
        byte_offset,
        bit_offset % 8,
        value,
        bit_count,
        endianness,
    ) {
        Ok(coverage) if !coverage.is_complete() => {
            debug!(
                byte_offset,
                bit_offset,
                bit_count,
                written = coverage.in_bounds,
                "bit encode truncated at end of buffer"
            );
        }
        Ok(_) => {}
        Err(err) => debug!(%err, byte_offset, bit_offset, bit_count, "bit encode skipped"),
    }
}

/// Reads `bit_count` bits at absolute bit `byte_offset * 8 + bit_offset`.
/// Bits whose byte lies at or past `buffer_length` read as `0`.
pub fn decode_bits(
    buffer: &[u8],
    buffer_length: usize,
    byte_offset: usize,
    bit_offset: u8,
    bit_count: u8,
    endianness: Endianness,
) -> u64 {
    let len = buffer_length.min(buffer.len());
    let Some(byte_offset) = byte_offset.checked_add((bit_offset / 8) as usize) else {
        return 0;
    };

    match bits::decode_bits_partial(&buffer[..len], byte_offset, bit_offset % 8, bit_count, endianness) {
        Ok((value, _)) => value,
        Err(err) => {
            debug!(%err, byte_offset, bit_offset, bit_count, "bit decode returned zero");
            0
        }
    }
}
