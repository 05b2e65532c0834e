//! Bit codec: values occupying an arbitrary run of bits.
//!
//! Bits are addressed by absolute position `byte_offset * 8 + bit_offset`.
//! Position `p` lives in byte `p / 8` at bit `p % 8`, where bit 0 is the
//! least-significant bit of the byte.
//!
//! [encode_bits] and [decode_bits] check the whole span up front, like the
//! aligned codec. [encode_bits_partial] and [decode_bits_partial] instead
//! check each bit on its own: the part of a field that overruns the buffer
//! is skipped on write and reads as zero, and the returned [Coverage] says
//! how much of the field was actually in range.

use crate::{
    bounds::{self, absolute_bit},
    endian::Endianness,
    errors::CodecError,
};

/// How many bits of a field fell inside the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coverage {
    /// Width of the field in bits.
    pub requested: u8,
    /// Number of leading bits of the field that were inside the buffer.
    pub in_bounds: u8,
}

impl Coverage {
    /// True when every bit of the field was inside the buffer.
    pub fn is_complete(&self) -> bool {
        self.in_bounds == self.requested
    }
}

/// Writes the low `bit_count` bits of `value` starting at bit `bit_offset`
/// of byte `byte_offset`.
///
/// Only the bits of the span are modified; every other bit of the touched
/// bytes keeps its value. On error nothing is written.
pub fn encode_bits(
    buffer: &mut [u8],
    byte_offset: usize,
    bit_offset: u8,
    value: u64,
    bit_count: u8,
    endianness: Endianness,
) -> Result<(), CodecError> {
    let span = checked_span(buffer.len(), byte_offset, bit_offset, bit_count)?;

    for (i, pos) in span.enumerate() {
        let j = endianness.value_index(i, bit_count as usize);
        write_bit_at(buffer, pos, (value >> j) & 1 == 1);
    }

    Ok(())
}

/// Reads `bit_count` bits starting at bit `bit_offset` of byte `byte_offset`.
pub fn decode_bits(
    buffer: &[u8],
    byte_offset: usize,
    bit_offset: u8,
    bit_count: u8,
    endianness: Endianness,
) -> Result<u64, CodecError> {
    let span = checked_span(buffer.len(), byte_offset, bit_offset, bit_count)?;

    let mut value = 0u64;
    for (i, pos) in span.enumerate() {
        let j = endianness.value_index(i, bit_count as usize);
        value |= (read_bit_at(buffer, pos) as u64) << j;
    }

    Ok(value)
}

/// Like [encode_bits], but bits past the end of the buffer are skipped
/// instead of failing the call. Bits before that point are still written.
///
/// Width and bit offset are still validated.
pub fn encode_bits_partial(
    buffer: &mut [u8],
    byte_offset: usize,
    bit_offset: u8,
    value: u64,
    bit_count: u8,
    endianness: Endianness,
) -> Result<Coverage, CodecError> {
    let (start, coverage) = partial_span(buffer.len(), byte_offset, bit_offset, bit_count)?;

    for i in 0..coverage.in_bounds as usize {
        let j = endianness.value_index(i, bit_count as usize);
        write_bit_at(buffer, start + i, (value >> j) & 1 == 1);
    }

    Ok(coverage)
}

/// Like [decode_bits], but bits past the end of the buffer read as zero.
pub fn decode_bits_partial(
    buffer: &[u8],
    byte_offset: usize,
    bit_offset: u8,
    bit_count: u8,
    endianness: Endianness,
) -> Result<(u64, Coverage), CodecError> {
    let (start, coverage) = partial_span(buffer.len(), byte_offset, bit_offset, bit_count)?;

    let mut value = 0u64;
    for i in 0..coverage.in_bounds as usize {
        let j = endianness.value_index(i, bit_count as usize);
        value |= (read_bit_at(buffer, start + i) as u64) << j;
    }

    Ok((value, coverage))
}

/// Mask covering the low `bit_count` bits. Counts of 64 or more give all ones.
pub fn mask(bit_count: u8) -> u64 {
    if bit_count >= 64 {
        u64::MAX
    } else {
        (1u64 << bit_count) - 1
    }
}

/// Reverses the low `n` bits of `x` (LSB becomes MSB of the result).
///
/// Decoding the same span as [Endianness::BigEndian] and as
/// [Endianness::LittleEndian] gives results that are `n`-bit reversals of
/// each other.
pub fn reverse_bits_n(mut x: u64, n: usize) -> u64 {
    let mut r = 0u64;
    for _ in 0..n {
        r = (r << 1) | (x & 1);
        x >>= 1;
    }

    r
}

fn checked_span(
    buffer_len: usize,
    byte_offset: usize,
    bit_offset: u8,
    bit_count: u8,
) -> Result<std::ops::Range<usize>, CodecError> {
    bounds::check_bit_offset(bit_offset)?;
    bounds::check_bit_count(bit_count)?;

    let start = absolute_bit(byte_offset, bit_offset).ok_or(CodecError::OutOfBounds {
        end_bit: usize::MAX,
        buffer_bits: buffer_len.saturating_mul(8),
    })?;

    bounds::bit_span(buffer_len, start, bit_count)
}

fn partial_span(
    buffer_len: usize,
    byte_offset: usize,
    bit_offset: u8,
    bit_count: u8,
) -> Result<(usize, Coverage), CodecError> {
    bounds::check_bit_offset(bit_offset)?;
    bounds::check_bit_count(bit_count)?;

    let buffer_bits = buffer_len.saturating_mul(8);
    let (start, in_bounds) = match absolute_bit(byte_offset, bit_offset) {
        Some(start) => (start, buffer_bits.saturating_sub(start).min(bit_count as usize)),
        None => (0, 0),
    };

    Ok((
        start,
        Coverage {
            requested: bit_count,
            in_bounds: in_bounds as u8,
        },
    ))
}

#[inline]
fn read_bit_at(buffer: &[u8], pos: usize) -> u8 {
    (buffer[pos / 8] >> (pos % 8)) & 1
}

#[inline]
fn write_bit_at(buffer: &mut [u8], pos: usize, bit: bool) {
    let mask = 1u8 << (pos % 8);
    if bit {
        buffer[pos / 8] |= mask;
    } else {
        buffer[pos / 8] &= !mask;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Endianness::{BigEndian, LittleEndian};

    #[test]
    fn test_encode_single_byte_little_endian() {
        let mut buffer = [0u8; 1];
        encode_bits(&mut buffer, 0, 0, 0b1011, 4, LittleEndian).unwrap();
        assert_eq!(buffer, [0b0000_1011]);
    }

    #[test]
    fn test_encode_single_byte_big_endian() {
        let mut buffer = [0u8; 1];
        encode_bits(&mut buffer, 0, 0, 0b1011, 4, BigEndian).unwrap();
        assert_eq!(buffer, [0b0000_1101]);
    }

    #[test]
    fn test_encode_with_bit_offset() {
        let mut buffer = [0u8; 1];
        encode_bits(&mut buffer, 0, 3, 0b101, 3, LittleEndian).unwrap();
        assert_eq!(buffer, [0b0010_1000]);
    }

    #[test]
    fn test_encode_spanning_bytes() {
        let mut buffer = [0u8; 3];
        encode_bits(&mut buffer, 0, 4, 0xABC, 12, LittleEndian).unwrap();
        assert_eq!(buffer, [0xC0, 0xAB, 0x00]);
    }

    #[test]
    fn test_encode_byte_aligned_matches_aligned_codec() {
        let mut bits = [0u8; 4];
        encode_bits(&mut bits, 1, 0, 0xABCD, 16, LittleEndian).unwrap();
        assert_eq!(bits, [0x00, 0xCD, 0xAB, 0x00]);
    }

    #[test]
    fn test_encode_preserves_unrelated_bits() {
        let mut buffer = [0b1111_1111, 0b1111_1111];
        encode_bits(&mut buffer, 0, 6, 0, 4, LittleEndian).unwrap();
        assert_eq!(buffer, [0b0011_1111, 0b1111_1100]);

        let mut buffer = [0b1000_0001];
        encode_bits(&mut buffer, 0, 2, 0b1111, 4, BigEndian).unwrap();
        assert_eq!(buffer, [0b1011_1101]);
    }

    #[test]
    fn test_encode_truncates_value() {
        let mut buffer = [0u8; 1];
        encode_bits(&mut buffer, 0, 0, 0xFF, 3, LittleEndian).unwrap();
        assert_eq!(buffer, [0b0000_0111]);
    }

    #[test]
    fn test_encode_full_width() {
        let mut buffer = [0u8; 9];
        encode_bits(&mut buffer, 0, 4, u64::MAX, 64, BigEndian).unwrap();
        assert_eq!(
            buffer,
            [0xF0, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x0F]
        );
        assert_eq!(decode_bits(&buffer, 0, 4, 64, BigEndian), Ok(u64::MAX));
    }

    #[test]
    fn test_encode_out_of_bounds_is_noop() {
        let mut buffer = [0u8; 2];
        assert_eq!(
            encode_bits(&mut buffer, 1, 4, 0xFF, 8, LittleEndian),
            Err(CodecError::OutOfBounds {
                end_bit: 20,
                buffer_bits: 16
            })
        );
        assert_eq!(buffer, [0, 0]);
    }

    #[test]
    fn test_invalid_arguments() {
        let mut buffer = [0u8; 16];
        assert_eq!(
            encode_bits(&mut buffer, 0, 0, 1, 65, LittleEndian),
            Err(CodecError::InvalidBitCount(65))
        );
        assert_eq!(
            encode_bits(&mut buffer, 0, 0, 1, 0, LittleEndian),
            Err(CodecError::InvalidBitCount(0))
        );
        assert_eq!(
            decode_bits(&buffer, 0, 8, 4, LittleEndian),
            Err(CodecError::InvalidBitOffset(8))
        );
        assert_eq!(
            decode_bits(&buffer, usize::MAX, 0, 4, LittleEndian),
            Err(CodecError::OutOfBounds {
                end_bit: usize::MAX,
                buffer_bits: 128
            })
        );
    }

    #[test]
    fn test_decode_spanning_bytes() {
        let buffer = [0xC0, 0xAB, 0x00];
        assert_eq!(decode_bits(&buffer, 0, 4, 12, LittleEndian), Ok(0xABC));
    }

    #[test]
    fn test_decode_big_endian_is_bit_reversal() {
        let buffer = [0b1100_1010, 0b0101_0011];
        let little = decode_bits(&buffer, 0, 3, 11, LittleEndian).unwrap();
        let big = decode_bits(&buffer, 0, 3, 11, BigEndian).unwrap();
        assert_eq!(big, reverse_bits_n(little, 11));
    }

    #[test]
    fn test_decode_aligned_two_bytes() {
        let buffer = [0x00, 0x34, 0x12, 0x00, 0x00];
        assert_eq!(decode_bits(&buffer, 1, 0, 16, LittleEndian), Ok(0x1234));
    }

    #[test]
    fn test_encode_partial_writes_in_range_bits() {
        let mut buffer = [0u8; 2];
        let coverage = encode_bits_partial(&mut buffer, 1, 4, 0xFF, 8, LittleEndian).unwrap();
        assert_eq!(
            coverage,
            Coverage {
                requested: 8,
                in_bounds: 4
            }
        );
        assert!(!coverage.is_complete());
        assert_eq!(buffer, [0x00, 0xF0]);
    }

    #[test]
    fn test_encode_partial_big_endian_writes_high_bits_first() {
        let mut buffer = [0u8; 1];
        let coverage = encode_bits_partial(&mut buffer, 0, 6, 0b1001, 4, BigEndian).unwrap();
        assert_eq!(coverage.in_bounds, 2);
        assert_eq!(buffer, [0b0100_0000]);
    }

    #[test]
    fn test_encode_partial_fully_outside() {
        let mut buffer = [0xAAu8; 2];
        let coverage = encode_bits_partial(&mut buffer, 5, 0, 0xFF, 8, LittleEndian).unwrap();
        assert_eq!(coverage.in_bounds, 0);
        assert_eq!(buffer, [0xAA, 0xAA]);
    }

    #[test]
    fn test_encode_partial_complete() {
        let mut buffer = [0u8; 2];
        let coverage = encode_bits_partial(&mut buffer, 0, 4, 0xABC, 12, LittleEndian).unwrap();
        assert!(coverage.is_complete());
        assert_eq!(buffer, [0xC0, 0xAB]);
    }

    #[test]
    fn test_decode_partial_reads_zero_past_end() {
        let buffer = [0x00, 0xF0];
        let (value, coverage) = decode_bits_partial(&buffer, 1, 4, 8, LittleEndian).unwrap();
        assert_eq!(value, 0x0F);
        assert_eq!(coverage.in_bounds, 4);

        let (value, _) = decode_bits_partial(&buffer, 1, 4, 8, BigEndian).unwrap();
        assert_eq!(value, 0xF0);
    }

    #[test]
    fn test_partial_rejects_invalid_width() {
        let mut buffer = [0u8; 2];
        assert_eq!(
            encode_bits_partial(&mut buffer, 0, 0, 0, 70, LittleEndian),
            Err(CodecError::InvalidBitCount(70))
        );
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask(0), 0);
        assert_eq!(mask(1), 1);
        assert_eq!(mask(12), 0xFFF);
        assert_eq!(mask(64), u64::MAX);
    }

    #[test]
    fn test_reverse_bits_n() {
        assert_eq!(reverse_bits_n(0b10101010, 8), 0b01010101);
        assert_eq!(reverse_bits_n(0b1, 3), 0b100);
    }
}
