//! Serde-deserializable field descriptions.
//!
//! These types describe *where* a field lives, in a shape suitable for JSON
//! (for example a layout file produced by a schema compiler), and convert into
//! validated [Field]s.
//!
//! ```json
//! {
//!   "name": "flags",
//!   "layout": { "type": "Bits", "byte_offset": 2, "bit_offset": 3, "bit_count": 5 },
//!   "endianness": "BigEndian"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    endian::Endianness,
    errors::CodecError,
    field::{Field, Layout},
};

/// Byte or bit order of a field.
#[derive(Debug, Deserialize, Serialize, Default, Clone, Copy, PartialEq, Eq)]
pub enum EndiannessDef {
    #[default]
    /// Least-significant byte or bit first.
    LittleEndian,
    /// Most-significant byte or bit first.
    BigEndian,
}

impl From<EndiannessDef> for Endianness {
    fn from(value: EndiannessDef) -> Self {
        match value {
            EndiannessDef::LittleEndian => Endianness::LittleEndian,
            EndiannessDef::BigEndian => Endianness::BigEndian,
        }
    }
}

impl From<Endianness> for EndiannessDef {
    fn from(value: Endianness) -> Self {
        match value {
            Endianness::LittleEndian => EndiannessDef::LittleEndian,
            Endianness::BigEndian => EndiannessDef::BigEndian,
        }
    }
}

/// Position and width of a field.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum LayoutDef {
    /// Whole bytes at a byte offset.
    Aligned {
        /// Offset of the first byte.
        byte_offset: usize,
        /// Width in bytes.
        byte_count: usize,
    },
    /// An arbitrary run of bits.
    Bits {
        /// Offset of the byte holding the first bit.
        byte_offset: usize,
        /// Bit within that byte; defaults to 0.
        #[serde(default)]
        bit_offset: u8,
        /// Width in bits.
        bit_count: u8,
    },
}

/// A named field description.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Name of the field in the originating schema.
    pub name: String,
    /// Where the field lives.
    pub layout: LayoutDef,
    /// Byte or bit order; defaults to little-endian.
    #[serde(default)]
    pub endianness: EndiannessDef,
}

impl From<LayoutDef> for Layout {
    fn from(value: LayoutDef) -> Self {
        match value {
            LayoutDef::Aligned {
                byte_offset,
                byte_count,
            } => Layout::Aligned {
                byte_offset,
                byte_count,
            },
            LayoutDef::Bits {
                byte_offset,
                bit_offset,
                bit_count,
            } => Layout::Bits {
                byte_offset,
                bit_offset,
                bit_count,
            },
        }
    }
}

impl TryFrom<FieldDef> for Field {
    type Error = CodecError;

    fn try_from(value: FieldDef) -> Result<Self, Self::Error> {
        let field = Field {
            layout: value.layout.into(),
            endianness: value.endianness.into(),
        };
        field.validate()?;

        Ok(field)
    }
}
