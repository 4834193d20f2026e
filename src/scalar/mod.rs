//! Declares [`Atom`], a single value of a primitive q type, and [`Temporal`], the
//! calendar form of temporal atoms.
use uuid::Uuid;

use crate::datatypes::{NullSentinel, PrimitiveType, TypeCode};

mod symbol;
pub use symbol::*;
mod temporal;
pub use temporal::*;

/// A single value of a primitive q type in its wire representation.
///
/// Temporal atoms hold their raw offsets from the q epoch (see
/// [`crate::temporal_conversions`] for the calendar form). Floating point atoms compare
/// by bit pattern, so that nulls (NaN) are equal to themselves.
#[derive(Debug, Clone)]
pub enum Atom {
    Boolean(bool),
    Guid(Uuid),
    Byte(u8),
    Short(i16),
    Int(i32),
    Long(i64),
    Real(f32),
    Float(f64),
    Char(u8),
    Symbol(Symbol),
    /// nanoseconds since 2000-01-01T00:00:00
    Timestamp(i64),
    /// months since 2000-01
    Month(i32),
    /// days since 2000-01-01
    Date(i32),
    /// fractional days since 2000-01-01
    Datetime(f64),
    /// nanoseconds
    Timespan(i64),
    Minute(i32),
    Second(i32),
    /// milliseconds
    Time(i32),
}

impl Atom {
    /// The primitive type of this atom.
    pub fn primitive(&self) -> PrimitiveType {
        use PrimitiveType as P;
        match self {
            Atom::Boolean(_) => P::Boolean,
            Atom::Guid(_) => P::Guid,
            Atom::Byte(_) => P::Byte,
            Atom::Short(_) => P::Short,
            Atom::Int(_) => P::Int,
            Atom::Long(_) => P::Long,
            Atom::Real(_) => P::Real,
            Atom::Float(_) => P::Float,
            Atom::Char(_) => P::Char,
            Atom::Symbol(_) => P::Symbol,
            Atom::Timestamp(_) => P::Timestamp,
            Atom::Month(_) => P::Month,
            Atom::Date(_) => P::Date,
            Atom::Datetime(_) => P::Datetime,
            Atom::Timespan(_) => P::Timespan,
            Atom::Minute(_) => P::Minute,
            Atom::Second(_) => P::Second,
            Atom::Time(_) => P::Time,
        }
    }

    #[inline]
    pub fn type_code(&self) -> TypeCode {
        TypeCode::Atom(self.primitive())
    }

    /// Whether this atom is the null of its own type.
    pub fn is_null(&self) -> bool {
        let null = &self.primitive().info().null;
        match self {
            Atom::Boolean(v) => !*v,
            Atom::Guid(v) => v.is_nil(),
            Atom::Byte(v) => matches!(null, NullSentinel::Byte(n) if n == v),
            Atom::Char(v) => *v == b' ',
            Atom::Symbol(v) => v.is_empty(),
            Atom::Short(v) => null.matches_i16(*v),
            Atom::Int(v) | Atom::Month(v) | Atom::Date(v) => null.matches_i32(*v),
            Atom::Minute(v) | Atom::Second(v) | Atom::Time(v) => null.matches_i32(*v),
            Atom::Long(v) | Atom::Timestamp(v) | Atom::Timespan(v) => null.matches_i64(*v),
            Atom::Real(v) => v.is_nan(),
            Atom::Float(v) | Atom::Datetime(v) => v.is_nan(),
        }
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        use Atom::*;
        match (self, other) {
            (Boolean(l), Boolean(r)) => l == r,
            (Guid(l), Guid(r)) => l == r,
            (Byte(l), Byte(r)) | (Char(l), Char(r)) => l == r,
            (Short(l), Short(r)) => l == r,
            (Int(l), Int(r)) | (Month(l), Month(r)) | (Date(l), Date(r)) => l == r,
            (Minute(l), Minute(r)) | (Second(l), Second(r)) | (Time(l), Time(r)) => l == r,
            (Long(l), Long(r)) | (Timestamp(l), Timestamp(r)) | (Timespan(l), Timespan(r)) => {
                l == r
            }
            (Real(l), Real(r)) => l.to_bits() == r.to_bits(),
            (Float(l), Float(r)) | (Datetime(l), Datetime(r)) => l.to_bits() == r.to_bits(),
            (Symbol(l), Symbol(r)) => l == r,
            _ => false,
        }
    }
}

macro_rules! atom_from {
    ($type:ty, $variant:ident) => {
        impl From<$type> for Atom {
            #[inline]
            fn from(value: $type) -> Self {
                Atom::$variant(value)
            }
        }
    };
}

atom_from!(bool, Boolean);
atom_from!(Uuid, Guid);
atom_from!(u8, Byte);
atom_from!(i16, Short);
atom_from!(i32, Int);
atom_from!(i64, Long);
atom_from!(f32, Real);
atom_from!(f64, Float);
atom_from!(Symbol, Symbol);
