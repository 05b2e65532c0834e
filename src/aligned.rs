//! Aligned byte codec: values occupying whole, consecutive bytes.

use crate::{bounds, endian::Endianness, errors::CodecError};

/// Writes the low `byte_count` bytes of `value` into `buffer` starting at
/// `byte_offset`.
///
/// Bytes of `value` above `byte_count` are dropped. The span is checked as a
/// whole first: on error nothing is written.
pub fn encode_aligned_bytes(
    buffer: &mut [u8],
    byte_offset: usize,
    value: u64,
    byte_count: usize,
    endianness: Endianness,
) -> Result<(), CodecError> {
    let span = bounds::byte_span(buffer.len(), byte_offset, byte_count)?;

    for (i, byte) in buffer[span].iter_mut().enumerate() {
        let value_index = endianness.value_index(i, byte_count);
        *byte = (value >> (value_index * 8)) as u8;
    }

    Ok(())
}

/// Reads `byte_count` bytes from `buffer` starting at `byte_offset` and
/// reassembles them into a value. Bytes beyond `byte_count` are zero.
pub fn decode_aligned_bytes(
    buffer: &[u8],
    byte_offset: usize,
    byte_count: usize,
    endianness: Endianness,
) -> Result<u64, CodecError> {
    let span = bounds::byte_span(buffer.len(), byte_offset, byte_count)?;

    let mut value = 0u64;
    for (i, &byte) in buffer[span].iter().enumerate() {
        let value_index = endianness.value_index(i, byte_count);
        value |= (byte as u64) << (value_index * 8);
    }

    Ok(value)
}
