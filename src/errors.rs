//! Error types for field encoding and decoding.

use thiserror::Error;

/// Errors produced when a field cannot be read from or written to a buffer.
///
/// Every fallible operation checks its whole span before touching the buffer,
/// so an error always means the buffer was left unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// The field span ends past the end of the buffer.
    #[error("field ends at bit {end_bit} but buffer holds {buffer_bits} bits")]
    OutOfBounds {
        /// Absolute bit index one past the last bit of the field.
        /// Saturates at `usize::MAX` when the offset arithmetic overflows.
        end_bit: usize,
        /// Buffer length in bits.
        buffer_bits: usize,
    },
    /// Aligned width is zero or more than 8 bytes.
    #[error("invalid byte count: {0} (expected 1..=8)")]
    InvalidByteCount(usize),
    /// Bit width is zero or more than 64 bits.
    #[error("invalid bit count: {0} (expected 1..=64)")]
    InvalidBitCount(u8),
    /// Bit offset within the first byte is greater than 7.
    #[error("invalid bit offset: {0} (expected 0..=7)")]
    InvalidBitOffset(u8),
    /// A byte-granular cursor operation was issued off a byte boundary.
    #[error("cursor at bit {bit_pos} is not byte aligned")]
    Misaligned {
        /// Cursor position in bits.
        bit_pos: usize,
    },
}
