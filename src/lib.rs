//! # bitcodec
//!
//! Packs and unpacks fixed-width unsigned integers (up to 64 bits) into a flat,
//! caller-owned byte buffer, at byte-aligned or arbitrary bit positions, with
//! little- or big-endian ordering.
//!
//! Two codecs share one ordering rule ([Endianness]):
//!
//! - the [aligned] codec reads and writes whole bytes at a byte offset;
//! - the [bits] codec reads and writes any run of 1 to 64 bits at an absolute
//!   bit position `byte_offset * 8 + bit_offset`.
//!
//! Both check the whole field against the buffer before touching it and
//! return a [CodecError] instead of writing part of a field. The [compat]
//! module keeps the legacy contract (explicit buffer size, silent no-op or
//! zero on failure, bit-by-bit bounds on the bit path) for generated code that
//! relies on it.
//!
//! ## Example
//!
//! ```
//! use bitcodec::{Endianness, decode_aligned_bytes, encode_aligned_bytes, decode_bits, encode_bits};
//!
//! let mut buffer = [0u8; 4];
//! encode_aligned_bytes(&mut buffer, 1, 0xABCD, 2, Endianness::LittleEndian).unwrap();
//! assert_eq!(buffer, [0x00, 0xCD, 0xAB, 0x00]);
//! assert_eq!(decode_aligned_bytes(&buffer, 1, 2, Endianness::LittleEndian), Ok(0xABCD));
//!
//! encode_bits(&mut buffer, 3, 2, 0b101, 3, Endianness::BigEndian).unwrap();
//! assert_eq!(decode_bits(&buffer, 3, 2, 3, Endianness::BigEndian), Ok(0b101));
//!
//! // Failures leave the buffer untouched; `unwrap_or_default` yields the legacy zero.
//! assert!(encode_aligned_bytes(&mut buffer, 3, 0xFFFF, 2, Endianness::BigEndian).is_err());
//! assert_eq!(decode_aligned_bytes(&buffer, 3, 2, Endianness::BigEndian).unwrap_or_default(), 0);
//! ```

pub mod aligned;
pub mod bits;
pub mod bounds;
pub mod compat;
pub mod cursor;
pub mod endian;
pub mod errors;
pub mod field;
#[cfg(feature = "serde")]
pub mod serde;

pub use aligned::{decode_aligned_bytes, encode_aligned_bytes};
pub use bits::{Coverage, decode_bits, decode_bits_partial, encode_bits, encode_bits_partial};
pub use cursor::{BitReader, BitWriter};
pub use endian::Endianness;
pub use errors::CodecError;
pub use field::{Field, Layout};
