use uuid::Uuid;

use crate::scalar::{Atom, Symbol};

use super::PrimitiveType;

/// Bit pattern of the real null `0Ne`, a negative quiet NaN.
pub const REAL_NULL_BITS: u32 = 0xffc0_0000;
/// Bit pattern of the float and datetime nulls `0n` and `0Nz`, a negative quiet NaN.
pub const FLOAT_NULL_BITS: u64 = 0xfff8_0000_0000_0000;

/// The reserved bit pattern that denotes a missing value of a primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NullSentinel {
    /// `false`; booleans have no distinct null
    False,
    /// the all-zero GUID
    NilGuid,
    Byte(u8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    /// any NaN is null; this is the canonical pattern
    Float32(u32),
    /// any NaN is null; this is the canonical pattern
    Float64(u64),
    /// a single space, the null of chars and strings
    Space,
    /// the empty symbol
    EmptySymbol,
}

/// Returns the canonical null of `primitive`.
pub fn qnull(primitive: PrimitiveType) -> Atom {
    use PrimitiveType as P;
    match (primitive, primitive.info().null) {
        (P::Boolean, _) => Atom::Boolean(false),
        (P::Guid, _) => Atom::Guid(Uuid::nil()),
        (P::Byte, NullSentinel::Byte(v)) => Atom::Byte(v),
        (P::Short, NullSentinel::Int16(v)) => Atom::Short(v),
        (P::Int, NullSentinel::Int32(v)) => Atom::Int(v),
        (P::Long, NullSentinel::Int64(v)) => Atom::Long(v),
        (P::Real, NullSentinel::Float32(bits)) => Atom::Real(f32::from_bits(bits)),
        (P::Float, NullSentinel::Float64(bits)) => Atom::Float(f64::from_bits(bits)),
        (P::Char, _) => Atom::Char(b' '),
        (P::Symbol, _) => Atom::Symbol(Symbol::default()),
        (P::Timestamp, NullSentinel::Int64(v)) => Atom::Timestamp(v),
        (P::Month, NullSentinel::Int32(v)) => Atom::Month(v),
        (P::Date, NullSentinel::Int32(v)) => Atom::Date(v),
        (P::Datetime, NullSentinel::Float64(bits)) => Atom::Datetime(f64::from_bits(bits)),
        (P::Timespan, NullSentinel::Int64(v)) => Atom::Timespan(v),
        (P::Minute, NullSentinel::Int32(v)) => Atom::Minute(v),
        (P::Second, NullSentinel::Int32(v)) => Atom::Second(v),
        (P::Time, NullSentinel::Int32(v)) => Atom::Time(v),
        _ => unreachable!("the type table is consistent"),
    }
}

/// Whether `atom` is the null of `primitive`.
///
/// This is the only correct null test: floats compare by NaN, chars by a single space and
/// symbols by emptiness, and an atom of another type is never null.
pub fn is_null(atom: &Atom, primitive: PrimitiveType) -> bool {
    if atom.primitive() != primitive {
        return false;
    }
    atom.is_null()
}

impl NullSentinel {
    #[inline]
    pub(crate) fn matches_i16(&self, value: i16) -> bool {
        matches!(self, NullSentinel::Int16(null) if *null == value)
    }

    #[inline]
    pub(crate) fn matches_i32(&self, value: i32) -> bool {
        matches!(self, NullSentinel::Int32(null) if *null == value)
    }

    #[inline]
    pub(crate) fn matches_i64(&self, value: i64) -> bool {
        matches!(self, NullSentinel::Int64(null) if *null == value)
    }
}
