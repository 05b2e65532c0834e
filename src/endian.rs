//! Byte and bit ordering shared by the aligned and bit codecs.

/// Which end of a value is placed at the lowest buffer address.
///
/// The same rule applies at byte granularity ([crate::aligned]) and at bit
/// granularity ([crate::bits]): the first byte or bit written, at the lowest
/// address or absolute bit position, is the least-significant one under
/// [Endianness::LittleEndian] and the most-significant one under
/// [Endianness::BigEndian].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endianness {
    /// Least-significant byte or bit first.
    LittleEndian,
    /// Most-significant byte or bit first.
    BigEndian,
}

impl Default for Endianness {
    fn default() -> Self {
        Endianness::LittleEndian
    }
}

impl Endianness {
    /// Maps the `i`-th unit laid out in the buffer to the index of the unit of
    /// the value it carries, for a field `count` units wide.
    #[inline]
    pub fn value_index(self, i: usize, count: usize) -> usize {
        match self {
            Endianness::LittleEndian => i,
            Endianness::BigEndian => count - 1 - i,
        }
    }

    /// The opposite ordering.
    pub fn reversed(self) -> Self {
        match self {
            Endianness::LittleEndian => Endianness::BigEndian,
            Endianness::BigEndian => Endianness::LittleEndian,
        }
    }
}
