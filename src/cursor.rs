//! Sequential readers and writers over a buffer.
//!
//! A cursor tracks an absolute bit position and decodes or encodes
//! consecutive fields from there. Every operation is atomic: on error the
//! buffer and the position are left unchanged.

use tracing::trace;

use crate::{aligned, bits, endian::Endianness, errors::CodecError};

/// Reads consecutive fields from a byte slice.
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, bit_pos: 0 }
    }

    /// Current absolute bit position.
    pub fn position(&self) -> usize {
        self.bit_pos
    }

    /// Bits left between the position and the end of the data.
    pub fn remaining_bits(&self) -> usize {
        (self.data.len() * 8).saturating_sub(self.bit_pos)
    }

    /// Reads `n` bits at the current position and advances past them.
    pub fn read_bits(&mut self, n: u8, endianness: Endianness) -> Result<u64, CodecError> {
        let value = self.read_bits_at(self.bit_pos, n, endianness)?;
        self.bit_pos += n as usize;

        Ok(value)
    }

    /// Reads `n` bits at an absolute bit position without moving the cursor.
    pub fn read_bits_at(
        &self,
        bit_pos: usize,
        n: u8,
        endianness: Endianness,
    ) -> Result<u64, CodecError> {
        bits::decode_bits(self.data, bit_pos / 8, (bit_pos % 8) as u8, n, endianness)
    }

    /// Reads `n` whole bytes. The cursor must sit on a byte boundary.
    pub fn read_bytes(&mut self, n: usize, endianness: Endianness) -> Result<u64, CodecError> {
        if self.bit_pos % 8 != 0 {
            trace!(bit_pos = self.bit_pos, "unaligned byte read");
            return Err(CodecError::Misaligned {
                bit_pos: self.bit_pos,
            });
        }

        let value = aligned::decode_aligned_bytes(self.data, self.bit_pos / 8, n, endianness)?;
        self.bit_pos += n * 8;

        Ok(value)
    }

    pub fn skip_bits(&mut self, n: usize) {
        self.bit_pos = self.bit_pos.saturating_add(n);
    }

    /// Advances to the next multiple of `bits`. Zero is a no-op.
    pub fn align_to(&mut self, bits: usize) {
        self.bit_pos = align_up(self.bit_pos, bits);
    }
}

/// Writes consecutive fields into a mutable byte slice.
pub struct BitWriter<'a> {
    data: &'a mut [u8],
    bit_pos: usize,
}

impl<'a> BitWriter<'a> {
    pub fn new(data: &'a mut [u8]) -> Self {
        Self { data, bit_pos: 0 }
    }

    /// Current absolute bit position.
    pub fn position(&self) -> usize {
        self.bit_pos
    }

    /// Bits left between the position and the end of the buffer.
    pub fn remaining_bits(&self) -> usize {
        (self.data.len() * 8).saturating_sub(self.bit_pos)
    }

    /// Writes the low `n` bits of `value` at the current position and
    /// advances past them.
    pub fn write_bits(
        &mut self,
        value: u64,
        n: u8,
        endianness: Endianness,
    ) -> Result<(), CodecError> {
        self.write_bits_at(self.bit_pos, value, n, endianness)?;
        self.bit_pos += n as usize;

        Ok(())
    }

    /// Writes the low `n` bits of `value` at an absolute bit position without
    /// moving the cursor.
    pub fn write_bits_at(
        &mut self,
        bit_pos: usize,
        value: u64,
        n: u8,
        endianness: Endianness,
    ) -> Result<(), CodecError> {
        bits::encode_bits(
            self.data,
            bit_pos / 8,
            (bit_pos % 8) as u8,
            value,
            n,
            endianness,
        )
    }

    /// Writes the low `n` bytes of `value`. The cursor must sit on a byte boundary.
    pub fn write_bytes(
        &mut self,
        value: u64,
        n: usize,
        endianness: Endianness,
    ) -> Result<(), CodecError> {
        if self.bit_pos % 8 != 0 {
            trace!(bit_pos = self.bit_pos, "unaligned byte write");
            return Err(CodecError::Misaligned {
                bit_pos: self.bit_pos,
            });
        }

        aligned::encode_aligned_bytes(self.data, self.bit_pos / 8, value, n, endianness)?;
        self.bit_pos += n * 8;

        Ok(())
    }

    /// Moves past `n` bits, leaving their contents untouched.
    pub fn skip_bits(&mut self, n: usize) {
        self.bit_pos = self.bit_pos.saturating_add(n);
    }

    /// Advances to the next multiple of `bits`. Zero is a no-op.
    pub fn align_to(&mut self, bits: usize) {
        self.bit_pos = align_up(self.bit_pos, bits);
    }

    /// Releases the underlying buffer.
    pub fn into_inner(self) -> &'a mut [u8] {
        self.data
    }
}

fn align_up(bit_pos: usize, bits: usize) -> usize {
    if bits == 0 {
        return bit_pos;
    }

    match bit_pos % bits {
        0 => bit_pos,
        rem => bit_pos.saturating_add(bits - rem),
    }
}
