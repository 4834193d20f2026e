//! The q type system: type codes, primitive types, attributes and the static type table.
//!
//! Every value on the wire starts with a signed byte, its type code. Primitive types have an
//! _atom_ code (negative) and a _list_ code (positive) of the same magnitude; the remaining codes
//! describe the general list, composites, functions and errors. See [`TypeCode`].
mod null;
mod physical_type;

#[cfg(feature = "serde_types")]
use serde_derive::{Deserialize, Serialize};

pub use null::*;
pub use physical_type::*;

/// The primitive types of q. The discriminant is the magnitude of the type code:
/// the atom code is `-(p as i8)` and the list code is `p as i8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde_types", derive(Serialize, Deserialize))]
#[repr(i8)]
pub enum PrimitiveType {
    Boolean = 1,
    Guid = 2,
    Byte = 4,
    Short = 5,
    Int = 6,
    Long = 7,
    /// 32-bit floating point
    Real = 8,
    /// 64-bit floating point
    Float = 9,
    Char = 10,
    Symbol = 11,
    /// Nanoseconds since 2000-01-01T00:00:00
    Timestamp = 12,
    /// Months since 2000-01
    Month = 13,
    /// Days since 2000-01-01
    Date = 14,
    /// Fractional days since 2000-01-01 stored as a 64-bit float
    Datetime = 15,
    /// Nanoseconds
    Timespan = 16,
    /// Minutes
    Minute = 17,
    /// Seconds
    Second = 18,
    /// Milliseconds
    Time = 19,
}

impl PrimitiveType {
    /// All primitive types, ordered by code.
    pub const ALL: [PrimitiveType; 18] = [
        PrimitiveType::Boolean,
        PrimitiveType::Guid,
        PrimitiveType::Byte,
        PrimitiveType::Short,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Real,
        PrimitiveType::Float,
        PrimitiveType::Char,
        PrimitiveType::Symbol,
        PrimitiveType::Timestamp,
        PrimitiveType::Month,
        PrimitiveType::Date,
        PrimitiveType::Datetime,
        PrimitiveType::Timespan,
        PrimitiveType::Minute,
        PrimitiveType::Second,
        PrimitiveType::Time,
    ];

    /// Returns the primitive whose code magnitude is `code`, if any.
    pub fn from_magnitude(code: u8) -> Option<Self> {
        use PrimitiveType::*;
        Some(match code {
            1 => Boolean,
            2 => Guid,
            4 => Byte,
            5 => Short,
            6 => Int,
            7 => Long,
            8 => Real,
            9 => Float,
            10 => Char,
            11 => Symbol,
            12 => Timestamp,
            13 => Month,
            14 => Date,
            15 => Datetime,
            16 => Timespan,
            17 => Minute,
            18 => Second,
            19 => Time,
            _ => return None,
        })
    }

    /// The (negative) type code of an atom of this type.
    #[inline]
    pub fn atom_code(&self) -> i8 {
        -(*self as i8)
    }

    /// The (positive) type code of a list of this type.
    #[inline]
    pub fn list_code(&self) -> i8 {
        *self as i8
    }

    /// The entry of this type in [`TYPE_TABLE`].
    #[inline]
    pub fn info(&self) -> &'static TypeInfo {
        // the table is ordered like `ALL`; code 3 is unused
        let index = match *self as u8 {
            code @ 1..=2 => code - 1,
            code => code - 2,
        };
        &TYPE_TABLE[index as usize]
    }

    /// The physical representation of this type.
    #[inline]
    pub fn to_physical_type(&self) -> PhysicalType {
        self.info().physical
    }

    /// The number of bytes one value occupies on the wire, `None` for symbols.
    #[inline]
    pub fn width(&self) -> Option<usize> {
        self.to_physical_type().width()
    }

    /// Whether values of this type are offsets from the q epoch or durations.
    pub fn is_temporal(&self) -> bool {
        use PrimitiveType::*;
        matches!(
            self,
            Timestamp | Month | Date | Datetime | Timespan | Minute | Second | Time
        )
    }
}

impl std::fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.info().name)
    }
}

/// The adverbs (iterators) of q, type codes 106 to 111.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_types", derive(Serialize, Deserialize))]
pub enum Adverb {
    /// `'`
    Each = 106,
    /// `/`
    Over = 107,
    /// `\`
    Scan = 108,
    /// `':`
    EachPrior = 109,
    /// `/:`
    EachRight = 110,
    /// `\:`
    EachLeft = 111,
}

/// A type code of the q wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_types", derive(Serialize, Deserialize))]
pub enum TypeCode {
    /// A single value, codes -1 to -19
    Atom(PrimitiveType),
    /// A homogeneous list, codes 1 to 19
    List(PrimitiveType),
    /// A heterogeneous list, code 0
    GeneralList,
    /// 98
    Table,
    /// 99, also used by keyed tables
    Dictionary,
    /// 127, a dictionary with the sorted attribute
    SortedDictionary,
    /// 100
    Lambda,
    /// 101; with operand `0` this is the generic null `::`
    UnaryPrimitive,
    /// 102
    BinaryPrimitive,
    /// 103
    TernaryOperator,
    /// 104
    Projection,
    /// 105
    Composition,
    /// 106 to 111
    Adverb(Adverb),
    /// -128
    Error,
}

impl TypeCode {
    /// Returns the [`TypeCode`] of the tag `code`, or `None` if `code` is not part of the protocol.
    pub fn from_i8(code: i8) -> Option<Self> {
        use TypeCode::*;
        Some(match code {
            0 => GeneralList,
            98 => Table,
            99 => Dictionary,
            127 => SortedDictionary,
            100 => Lambda,
            101 => UnaryPrimitive,
            102 => BinaryPrimitive,
            103 => TernaryOperator,
            104 => Projection,
            105 => Composition,
            106 => Adverb(self::Adverb::Each),
            107 => Adverb(self::Adverb::Over),
            108 => Adverb(self::Adverb::Scan),
            109 => Adverb(self::Adverb::EachPrior),
            110 => Adverb(self::Adverb::EachRight),
            111 => Adverb(self::Adverb::EachLeft),
            -128 => Error,
            1..=19 => List(PrimitiveType::from_magnitude(code as u8)?),
            -19..=-1 => Atom(PrimitiveType::from_magnitude(code.unsigned_abs())?),
            _ => return None,
        })
    }

    /// The tag written on the wire.
    pub fn to_i8(&self) -> i8 {
        use TypeCode::*;
        match self {
            Atom(p) => p.atom_code(),
            List(p) => p.list_code(),
            GeneralList => 0,
            Table => 98,
            Dictionary => 99,
            SortedDictionary => 127,
            Lambda => 100,
            UnaryPrimitive => 101,
            BinaryPrimitive => 102,
            TernaryOperator => 103,
            Projection => 104,
            Composition => 105,
            Adverb(a) => *a as i8,
            Error => -128,
        }
    }

    #[inline]
    pub fn is_atom(&self) -> bool {
        matches!(self, TypeCode::Atom(_))
    }

    /// Whether this is a list code, including the general list.
    #[inline]
    pub fn is_list(&self) -> bool {
        matches!(self, TypeCode::List(_) | TypeCode::GeneralList)
    }

    /// Whether this is a dictionary or table code.
    #[inline]
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            TypeCode::Table | TypeCode::Dictionary | TypeCode::SortedDictionary
        )
    }

    /// Whether this is a code of an executable value (lambda, primitive, projection, ...).
    #[inline]
    pub fn is_function(&self) -> bool {
        let code = self.to_i8();
        (100..=111).contains(&code)
    }

    /// The primitive of an atom or list code.
    #[inline]
    pub fn primitive(&self) -> Option<PrimitiveType> {
        match self {
            TypeCode::Atom(p) | TypeCode::List(p) => Some(*p),
            _ => None,
        }
    }
}

impl std::fmt::Display for TypeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}h", self.to_i8())
    }
}

/// The attribute of a list or table, written as one byte before its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_types", derive(Serialize, Deserialize))]
pub enum Attribute {
    None = 0,
    /// `s#`
    Sorted = 1,
    /// `u#`
    Unique = 2,
    /// `p#`
    Parted = 3,
    /// `g#`
    Grouped = 5,
}

impl Attribute {
    pub fn from_u8(byte: u8) -> Option<Self> {
        Some(match byte {
            0 => Attribute::None,
            1 => Attribute::Sorted,
            2 => Attribute::Unique,
            3 => Attribute::Parted,
            5 => Attribute::Grouped,
            _ => return None,
        })
    }
}

impl Default for Attribute {
    fn default() -> Self {
        Attribute::None
    }
}

/// Static description of a [`PrimitiveType`].
#[derive(Debug, PartialEq)]
pub struct TypeInfo {
    pub primitive: PrimitiveType,
    pub physical: PhysicalType,
    /// The null sentinel of the type
    pub null: NullSentinel,
    /// The character q uses for this type, e.g. `j` for long
    pub char: char,
    pub name: &'static str,
    /// How q prints the null of this type
    pub null_literal: &'static str,
}

macro_rules! info {
    ($primitive:ident, $physical:ident, $null:expr, $char:expr, $name:expr, $literal:expr) => {
        TypeInfo {
            primitive: PrimitiveType::$primitive,
            physical: PhysicalType::$physical,
            null: $null,
            char: $char,
            name: $name,
            null_literal: $literal,
        }
    };
}

/// The process-wide, read-only table of primitive types, ordered like [`PrimitiveType::ALL`].
pub static TYPE_TABLE: [TypeInfo; 18] = [
    info!(Boolean, Boolean, NullSentinel::False, 'b', "boolean", "0b"),
    info!(Guid, Guid, NullSentinel::NilGuid, 'g', "guid", "0Ng"),
    info!(Byte, UInt8, NullSentinel::Byte(0), 'x', "byte", "0x00"),
    info!(Short, Int16, NullSentinel::Int16(i16::MIN), 'h', "short", "0Nh"),
    info!(Int, Int32, NullSentinel::Int32(i32::MIN), 'i', "int", "0Ni"),
    info!(Long, Int64, NullSentinel::Int64(i64::MIN), 'j', "long", "0Nj"),
    info!(Real, Float32, NullSentinel::Float32(REAL_NULL_BITS), 'e', "real", "0Ne"),
    info!(Float, Float64, NullSentinel::Float64(FLOAT_NULL_BITS), 'f', "float", "0n"),
    info!(Char, Char, NullSentinel::Space, 'c', "char", "\" \""),
    info!(Symbol, Symbol, NullSentinel::EmptySymbol, 's', "symbol", "`"),
    info!(Timestamp, Int64, NullSentinel::Int64(i64::MIN), 'p', "timestamp", "0Np"),
    info!(Month, Int32, NullSentinel::Int32(i32::MIN), 'm', "month", "0Nm"),
    info!(Date, Int32, NullSentinel::Int32(i32::MIN), 'd', "date", "0Nd"),
    info!(Datetime, Float64, NullSentinel::Float64(FLOAT_NULL_BITS), 'z', "datetime", "0Nz"),
    info!(Timespan, Int64, NullSentinel::Int64(i64::MIN), 'n', "timespan", "0Nn"),
    info!(Minute, Int32, NullSentinel::Int32(i32::MIN), 'u', "minute", "0Nu"),
    info!(Second, Int32, NullSentinel::Int32(i32::MIN), 'v', "second", "0Nv"),
    info!(Time, Int32, NullSentinel::Int32(i32::MIN), 't', "time", "0Nt"),
];

/// Returns the [`TypeInfo`] of an atom or list type code.
pub fn type_info(code: i8) -> Option<&'static TypeInfo> {
    match TypeCode::from_i8(code)? {
        TypeCode::Atom(p) | TypeCode::List(p) => Some(p.info()),
        _ => None,
    }
}
