//! Field descriptors: where a value lives in a buffer and how it is ordered.
//!
//! A [Field] is a plain value a code generator can build once per schema
//! field and reuse for every buffer it reads or writes.

use std::ops::Range;

use crate::{aligned, bits, bounds, endian::Endianness, errors::CodecError};

/// Position and width of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Whole bytes starting at a byte boundary.
    Aligned {
        /// Offset of the first byte.
        byte_offset: usize,
        /// Width in bytes, `1..=8`.
        byte_count: usize,
    },
    /// An arbitrary run of bits.
    Bits {
        /// Offset of the byte holding the first bit.
        byte_offset: usize,
        /// Bit within that byte, `0..=7`, where 0 is the least-significant bit.
        bit_offset: u8,
        /// Width in bits, `1..=64`.
        bit_count: u8,
    },
}

/// A single field of a binary layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Where the field lives.
    pub layout: Layout,
    /// Byte order for aligned fields, bit order for bit fields.
    pub endianness: Endianness,
}

impl Field {
    /// Aligned field of `byte_count` bytes at `byte_offset`.
    pub fn aligned(byte_offset: usize, byte_count: usize, endianness: Endianness) -> Self {
        Field {
            layout: Layout::Aligned {
                byte_offset,
                byte_count,
            },
            endianness,
        }
    }

    /// Bit field of `bit_count` bits starting at bit `bit_offset` of byte `byte_offset`.
    pub fn bits(byte_offset: usize, bit_offset: u8, bit_count: u8, endianness: Endianness) -> Self {
        Field {
            layout: Layout::Bits {
                byte_offset,
                bit_offset,
                bit_count,
            },
            endianness,
        }
    }

    /// Checks the width and offset limits, independently of any buffer.
    pub fn validate(&self) -> Result<(), CodecError> {
        match self.layout {
            Layout::Aligned { byte_count, .. } => bounds::check_byte_count(byte_count),
            Layout::Bits {
                bit_offset,
                bit_count,
                ..
            } => {
                bounds::check_bit_offset(bit_offset)?;
                bounds::check_bit_count(bit_count)
            }
        }
    }

    /// Width of the field in bits.
    pub fn width_bits(&self) -> usize {
        match self.layout {
            Layout::Aligned { byte_count, .. } => byte_count.saturating_mul(8),
            Layout::Bits { bit_count, .. } => bit_count as usize,
        }
    }

    /// Absolute bit range covered by the field. Fails on an invalid width or
    /// bit offset, and on offset overflow.
    pub fn bit_span(&self) -> Result<Range<usize>, CodecError> {
        self.validate()?;

        let start = match self.layout {
            Layout::Aligned { byte_offset, .. } => bounds::absolute_bit(byte_offset, 0),
            Layout::Bits {
                byte_offset,
                bit_offset,
                ..
            } => bounds::absolute_bit(byte_offset, bit_offset),
        };

        start
            .and_then(|start| Some(start..start.checked_add(self.width_bits())?))
            .ok_or(CodecError::OutOfBounds {
                end_bit: usize::MAX,
                buffer_bits: 0,
            })
    }

    /// Absolute bit index one past the last bit of the field.
    pub fn end_bit(&self) -> Result<usize, CodecError> {
        Ok(self.bit_span()?.end)
    }

    /// Smallest buffer length, in bytes, that holds the whole field.
    pub fn required_len(&self) -> Result<usize, CodecError> {
        Ok(self.end_bit()?.div_ceil(8))
    }

    /// Decodes the field from `data`.
    pub fn read(&self, data: &[u8]) -> Result<u64, CodecError> {
        match self.layout {
            Layout::Aligned {
                byte_offset,
                byte_count,
            } => aligned::decode_aligned_bytes(data, byte_offset, byte_count, self.endianness),
            Layout::Bits {
                byte_offset,
                bit_offset,
                bit_count,
            } => bits::decode_bits(data, byte_offset, bit_offset, bit_count, self.endianness),
        }
    }

    /// Encodes `value` into `data`. Bits of `value` above the field width are dropped.
    pub fn write(&self, data: &mut [u8], value: u64) -> Result<(), CodecError> {
        match self.layout {
            Layout::Aligned {
                byte_offset,
                byte_count,
            } => aligned::encode_aligned_bytes(data, byte_offset, value, byte_count, self.endianness),
            Layout::Bits {
                byte_offset,
                bit_offset,
                bit_count,
            } => bits::encode_bits(data, byte_offset, bit_offset, value, bit_count, self.endianness),
        }
    }

    /// True when the two fields share at least one bit. Invalid fields share none.
    pub fn overlaps(&self, other: &Field) -> bool {
        match (self.bit_span(), other.bit_span()) {
            (Ok(a), Ok(b)) => a.start < b.end && b.start < a.end,
            _ => false,
        }
    }
}

/// Smallest buffer length, in bytes, that holds every field in `fields`.
pub fn required_len(fields: &[Field]) -> Result<usize, CodecError> {
    fields
        .iter()
        .try_fold(0, |len, field| Ok(len.max(field.required_len()?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use Endianness::{BigEndian, LittleEndian};

    #[test]
    fn test_read_write_fields() {
        let id = Field::bits(0, 0, 2, LittleEndian);
        let value = Field::bits(0, 2, 11, LittleEndian);
        let crc = Field::bits(1, 5, 3, LittleEndian);
        let counter = Field::aligned(2, 2, BigEndian);

        let mut data = [0u8; 4];
        id.write(&mut data, 3).unwrap();
        value.write(&mut data, 1500).unwrap();
        crc.write(&mut data, 5).unwrap();
        counter.write(&mut data, 0xBEEF).unwrap();

        assert_eq!(id.read(&data), Ok(3));
        assert_eq!(value.read(&data), Ok(1500));
        assert_eq!(crc.read(&data), Ok(5));
        assert_eq!(counter.read(&data), Ok(0xBEEF));
        assert_eq!(&data[2..], &[0xBE, 0xEF]);
    }

    #[test]
    fn test_write_out_of_bounds() {
        let field = Field::aligned(3, 2, LittleEndian);
        let mut data = [0u8; 4];
        assert_eq!(
            field.write(&mut data, 0xFFFF),
            Err(CodecError::OutOfBounds {
                end_bit: 40,
                buffer_bits: 32
            })
        );
        assert_eq!(data, [0u8; 4]);
    }

    #[test]
    fn test_validate() {
        assert_eq!(Field::aligned(0, 8, LittleEndian).validate(), Ok(()));
        assert_eq!(
            Field::aligned(0, 9, LittleEndian).validate(),
            Err(CodecError::InvalidByteCount(9))
        );
        assert_eq!(
            Field::bits(0, 8, 1, LittleEndian).validate(),
            Err(CodecError::InvalidBitOffset(8))
        );
        assert_eq!(
            Field::bits(0, 0, 0, LittleEndian).validate(),
            Err(CodecError::InvalidBitCount(0))
        );
    }

    #[test]
    fn test_span_and_required_len() {
        let field = Field::bits(2, 3, 10, LittleEndian);
        assert_eq!(field.bit_span(), Ok(19..29));
        assert_eq!(field.end_bit(), Ok(29));
        assert_eq!(field.required_len(), Ok(4));

        let field = Field::aligned(1, 2, BigEndian);
        assert_eq!(field.bit_span(), Ok(8..24));
        assert_eq!(field.required_len(), Ok(3));
    }

    #[test]
    fn test_required_len_of_fields() {
        let fields = [
            Field::aligned(0, 4, LittleEndian),
            Field::bits(4, 6, 5, BigEndian),
            Field::bits(1, 0, 1, LittleEndian),
        ];
        assert_eq!(required_len(&fields), Ok(6));
        assert_eq!(required_len(&[]), Ok(0));
    }

    #[test]
    fn test_span_of_invalid_width() {
        let wide = Field::aligned(0, usize::MAX / 4, LittleEndian);
        assert_eq!(
            wide.required_len(),
            Err(CodecError::InvalidByteCount(usize::MAX / 4))
        );
        assert_eq!(wide.width_bits(), usize::MAX);
        assert!(!wide.overlaps(&Field::bits(0, 0, 4, LittleEndian)));
        assert_eq!(
            required_len(&[Field::bits(0, 0, 4, LittleEndian), wide]),
            Err(CodecError::InvalidByteCount(usize::MAX / 4))
        );
        assert_eq!(
            Field::bits(0, 9, 4, BigEndian).bit_span(),
            Err(CodecError::InvalidBitOffset(9))
        );
    }

    #[test]
    fn test_overlaps() {
        let a = Field::bits(0, 0, 4, LittleEndian);
        let b = Field::bits(0, 4, 4, LittleEndian);
        let c = Field::aligned(0, 1, LittleEndian);

        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(b.overlaps(&c));
    }
}
