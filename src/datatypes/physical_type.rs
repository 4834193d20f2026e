#[cfg(feature = "serde_types")]
use serde_derive::{Deserialize, Serialize};

/// The set of physical types: unique in-memory representations of the elements of a list.
/// A physical type has a one-to-many relationship with [`super::PrimitiveType`]
/// (e.g. ints, months, dates, minutes, seconds and times are all stored as `i32`) and
/// a one-to-one mapping with each storage variant of [`crate::array::ListValues`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_types", derive(Serialize, Deserialize))]
pub enum PhysicalType {
    /// `bool`, one byte on the wire.
    Boolean,
    /// [`uuid::Uuid`], sixteen bytes on the wire.
    Guid,
    /// `u8`
    UInt8,
    /// `i16`
    Int16,
    /// `i32`
    Int32,
    /// `i64`
    Int64,
    /// `f32`
    Float32,
    /// `f64`
    Float64,
    /// `u8` interpreted as a character.
    Char,
    /// A NUL-terminated string of bytes.
    Symbol,
}

impl PhysicalType {
    /// The number of bytes one element occupies on the wire, `None` for symbols.
    pub fn width(&self) -> Option<usize> {
        use PhysicalType::*;
        match self {
            Boolean | UInt8 | Char => Some(1),
            Int16 => Some(2),
            Int32 | Float32 => Some(4),
            Int64 | Float64 => Some(8),
            Guid => Some(16),
            Symbol => None,
        }
    }
}
