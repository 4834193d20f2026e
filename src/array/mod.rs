//! Contains the collections of q: [`List`], [`Dictionary`], [`Table`], [`KeyedTable`] and
//! the opaque executable values ([`Lambda`], [`Function`], [`Projection`]).
//!
//! A [`List`] stores its elements in a physical representation (e.g. `Vec<i32>` for
//! ints, months, dates, minutes, seconds and times) and carries its declared [`TypeCode`]
//! and [`Attribute`] as metadata, so that the type written on the wire is never re-derived
//! from its elements.
use uuid::Uuid;

use crate::datatypes::{Attribute, PhysicalType, PrimitiveType, TypeCode};
use crate::error::{QError, Result};
use crate::scalar::{Atom, Symbol, Temporal};
use crate::value::Value;

mod dictionary;
pub use dictionary::*;
mod function;
pub use function::*;
mod infer;
pub use infer::*;
mod keyed_table;
pub use keyed_table::*;
mod table;
pub use table::*;

/// The storage of a [`List`]. Each variant but the last two maps one-to-one to a
/// [`PhysicalType`].
#[derive(Debug, Clone)]
pub enum ListValues {
    Boolean(Vec<bool>),
    Guid(Vec<Uuid>),
    UInt8(Vec<u8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Char(Vec<u8>),
    Symbol(Vec<Symbol>),
    /// temporal elements in calendar form
    Temporal(Vec<Temporal>),
    /// elements of a general list
    General(Vec<Value>),
}

impl ListValues {
    /// Returns an empty storage of `physical`.
    pub fn with_capacity(physical: PhysicalType, capacity: usize) -> Self {
        match physical {
            PhysicalType::Boolean => ListValues::Boolean(Vec::with_capacity(capacity)),
            PhysicalType::Guid => ListValues::Guid(Vec::with_capacity(capacity)),
            PhysicalType::UInt8 => ListValues::UInt8(Vec::with_capacity(capacity)),
            PhysicalType::Int16 => ListValues::Int16(Vec::with_capacity(capacity)),
            PhysicalType::Int32 => ListValues::Int32(Vec::with_capacity(capacity)),
            PhysicalType::Int64 => ListValues::Int64(Vec::with_capacity(capacity)),
            PhysicalType::Float32 => ListValues::Float32(Vec::with_capacity(capacity)),
            PhysicalType::Float64 => ListValues::Float64(Vec::with_capacity(capacity)),
            PhysicalType::Char => ListValues::Char(Vec::with_capacity(capacity)),
            PhysicalType::Symbol => ListValues::Symbol(Vec::with_capacity(capacity)),
        }
    }

    /// The physical type of this storage, `None` for temporal and general storage.
    pub fn physical_type(&self) -> Option<PhysicalType> {
        use ListValues::*;
        Some(match self {
            Boolean(_) => PhysicalType::Boolean,
            Guid(_) => PhysicalType::Guid,
            UInt8(_) => PhysicalType::UInt8,
            Int16(_) => PhysicalType::Int16,
            Int32(_) => PhysicalType::Int32,
            Int64(_) => PhysicalType::Int64,
            Float32(_) => PhysicalType::Float32,
            Float64(_) => PhysicalType::Float64,
            Char(_) => PhysicalType::Char,
            Symbol(_) => PhysicalType::Symbol,
            Temporal(_) | General(_) => return None,
        })
    }

    pub fn len(&self) -> usize {
        use ListValues::*;
        match self {
            Boolean(v) => v.len(),
            Guid(v) => v.len(),
            UInt8(v) | Char(v) => v.len(),
            Int16(v) => v.len(),
            Int32(v) => v.len(),
            Int64(v) => v.len(),
            Float32(v) => v.len(),
            Float64(v) => v.len(),
            Symbol(v) => v.len(),
            Temporal(v) => v.len(),
            General(v) => v.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends the raw value of `atom` to this storage.
    /// # Errors
    /// Iff the physical type of `atom` differs from this storage.
    pub fn push(&mut self, atom: Atom) -> Result<()> {
        match (self, atom) {
            (ListValues::Boolean(v), Atom::Boolean(x)) => v.push(x),
            (ListValues::Guid(v), Atom::Guid(x)) => v.push(x),
            (ListValues::UInt8(v), Atom::Byte(x)) => v.push(x),
            (ListValues::Char(v), Atom::Char(x)) => v.push(x),
            (ListValues::Int16(v), Atom::Short(x)) => v.push(x),
            (ListValues::Int32(v), Atom::Int(x))
            | (ListValues::Int32(v), Atom::Month(x))
            | (ListValues::Int32(v), Atom::Date(x))
            | (ListValues::Int32(v), Atom::Minute(x))
            | (ListValues::Int32(v), Atom::Second(x))
            | (ListValues::Int32(v), Atom::Time(x)) => v.push(x),
            (ListValues::Int64(v), Atom::Long(x))
            | (ListValues::Int64(v), Atom::Timestamp(x))
            | (ListValues::Int64(v), Atom::Timespan(x)) => v.push(x),
            (ListValues::Float32(v), Atom::Real(x)) => v.push(x),
            (ListValues::Float64(v), Atom::Float(x))
            | (ListValues::Float64(v), Atom::Datetime(x)) => v.push(x),
            (ListValues::Symbol(v), Atom::Symbol(x)) => v.push(x),
            (values, atom) => {
                return Err(QError::InvalidArgument(format!(
                    "an atom of type {} can't be stored in {:?} storage",
                    atom.primitive(),
                    values.physical_type()
                )))
            }
        }
        Ok(())
    }
}

impl PartialEq for ListValues {
    fn eq(&self, other: &Self) -> bool {
        use ListValues::*;
        match (self, other) {
            (Boolean(l), Boolean(r)) => l == r,
            (Guid(l), Guid(r)) => l == r,
            (UInt8(l), UInt8(r)) | (Char(l), Char(r)) => l == r,
            (Int16(l), Int16(r)) => l == r,
            (Int32(l), Int32(r)) => l == r,
            (Int64(l), Int64(r)) => l == r,
            (Float32(l), Float32(r)) => {
                l.len() == r.len() && l.iter().zip(r).all(|(l, r)| l.to_bits() == r.to_bits())
            }
            (Float64(l), Float64(r)) => {
                l.len() == r.len() && l.iter().zip(r).all(|(l, r)| l.to_bits() == r.to_bits())
            }
            (Symbol(l), Symbol(r)) => l == r,
            (Temporal(l), Temporal(r)) => l == r,
            (General(l), General(r)) => l == r,
            _ => false,
        }
    }
}

/// An ordered sequence of values homogeneous under one [`TypeCode`] (a list code or the
/// general list code), with an [`Attribute`].
///
/// Lists are immutable: they are built once, either by the reader or with [`List::try_new`]
/// and the `From` implementations, and only expose accessors afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    code: TypeCode,
    attribute: Attribute,
    values: ListValues,
}

impl List {
    /// The canonical method to create a [`List`].
    /// # Errors
    /// This function errors iff:
    /// * `code` is neither a list code nor the general list code
    /// * the storage of `values` does not represent `code`
    /// * `values` holds temporals of another type than `code`
    pub fn try_new(code: TypeCode, values: ListValues) -> Result<Self> {
        let is_valid = match (code, &values) {
            (TypeCode::GeneralList, ListValues::General(_)) => true,
            (TypeCode::List(p), ListValues::Temporal(values)) => {
                p.is_temporal() && values.iter().all(|x| x.primitive() == p)
            }
            (TypeCode::List(p), values) => values.physical_type() == Some(p.to_physical_type()),
            _ => false,
        };
        if !is_valid {
            return Err(QError::InvalidArgument(format!(
                "List of type {} can't be stored as {:?}",
                code,
                values.physical_type()
            )));
        }
        Ok(Self {
            code,
            attribute: Attribute::None,
            values,
        })
    }

    /// Creates a general list (type `0`).
    pub fn general(values: Vec<Value>) -> Self {
        Self {
            code: TypeCode::GeneralList,
            attribute: Attribute::None,
            values: ListValues::General(values),
        }
    }

    /// Creates a char list (a q string) from the bytes of `value`.
    pub fn string<S: AsRef<[u8]>>(value: S) -> Self {
        Self {
            code: TypeCode::List(PrimitiveType::Char),
            attribute: Attribute::None,
            values: ListValues::Char(value.as_ref().to_vec()),
        }
    }

    /// Creates a symbol list.
    pub fn symbols<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        Self {
            code: TypeCode::List(PrimitiveType::Symbol),
            attribute: Attribute::None,
            values: ListValues::Symbol(values.into_iter().map(|x| x.into()).collect()),
        }
    }

    /// Creates a list of type `primitive` from atoms of that type.
    /// # Errors
    /// Iff any of the atoms is not of type `primitive`.
    pub fn from_atoms(primitive: PrimitiveType, atoms: Vec<Atom>) -> Result<Self> {
        let mut values = ListValues::with_capacity(primitive.to_physical_type(), atoms.len());
        for atom in atoms {
            if atom.primitive() != primitive {
                return Err(QError::InvalidArgument(format!(
                    "An atom of type {} can't be part of a list of type {}",
                    atom.primitive(),
                    primitive
                )));
            }
            values.push(atom)?;
        }
        Self::try_new(TypeCode::List(primitive), values)
    }

    /// Returns this list with its type changed to `primitive`, e.g. a list of `i32` to dates.
    /// # Errors
    /// Iff the storage of this list does not represent `primitive`.
    pub fn to(self, primitive: PrimitiveType) -> Result<Self> {
        let attribute = self.attribute;
        Self::try_new(TypeCode::List(primitive), self.values).map(|x| x.with_attribute(attribute))
    }

    /// Returns this list with the attribute `attribute`.
    #[inline]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attribute = attribute;
        self
    }

    #[inline]
    pub fn type_code(&self) -> TypeCode {
        self.code
    }

    /// The primitive type of the elements, `None` for the general list.
    #[inline]
    pub fn primitive(&self) -> Option<PrimitiveType> {
        self.code.primitive()
    }

    #[inline]
    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    #[inline]
    pub fn values(&self) -> &ListValues {
        &self.values
    }

    pub fn into_values(self) -> ListValues {
        self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the element at `index` as an [`Atom`], `None` if out of bounds or if the
    /// element is not an atom (general lists, calendar temporals).
    pub fn atom(&self, index: usize) -> Option<Atom> {
        let primitive = self.primitive()?;
        match &self.values {
            ListValues::Boolean(v) => v.get(index).map(|x| Atom::Boolean(*x)),
            ListValues::Guid(v) => v.get(index).map(|x| Atom::Guid(*x)),
            ListValues::UInt8(v) => v.get(index).map(|x| Atom::Byte(*x)),
            ListValues::Char(v) => v.get(index).map(|x| Atom::Char(*x)),
            ListValues::Int16(v) => v.get(index).map(|x| Atom::Short(*x)),
            ListValues::Int32(v) => v.get(index).map(|x| i32_atom(primitive, *x)),
            ListValues::Int64(v) => v.get(index).map(|x| i64_atom(primitive, *x)),
            ListValues::Float32(v) => v.get(index).map(|x| Atom::Real(*x)),
            ListValues::Float64(v) => v.get(index).map(|x| match primitive {
                PrimitiveType::Datetime => Atom::Datetime(*x),
                _ => Atom::Float(*x),
            }),
            ListValues::Symbol(v) => v.get(index).cloned().map(Atom::Symbol),
            ListValues::Temporal(_) | ListValues::General(_) => None,
        }
    }

    /// Returns the element at `index` as a [`Value`], `None` if out of bounds.
    pub fn value(&self, index: usize) -> Option<Value> {
        match &self.values {
            ListValues::Temporal(v) => v.get(index).map(|x| Value::Temporal(*x)),
            ListValues::General(v) => v.get(index).cloned(),
            _ => self.atom(index).map(Value::Atom),
        }
    }

    /// Iterator over the elements of this list as [`Value`]s.
    pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
        (0..self.len()).filter_map(move |i| self.value(i))
    }

    /// Whether the element at `index` is the null of the list's type. Elements of a
    /// general list are null only when they are the generic null `::`.
    pub fn is_null(&self, index: usize) -> bool {
        match &self.values {
            ListValues::Temporal(v) => v.get(index).map(|x| x.is_null()).unwrap_or(false),
            ListValues::General(v) => matches!(v.get(index), Some(Value::Nil)),
            _ => self.atom(index).map(|x| x.is_null()).unwrap_or(false),
        }
    }
}

#[inline]
fn i32_atom(primitive: PrimitiveType, value: i32) -> Atom {
    match primitive {
        PrimitiveType::Month => Atom::Month(value),
        PrimitiveType::Date => Atom::Date(value),
        PrimitiveType::Minute => Atom::Minute(value),
        PrimitiveType::Second => Atom::Second(value),
        PrimitiveType::Time => Atom::Time(value),
        _ => Atom::Int(value),
    }
}

#[inline]
fn i64_atom(primitive: PrimitiveType, value: i64) -> Atom {
    match primitive {
        PrimitiveType::Timestamp => Atom::Timestamp(value),
        PrimitiveType::Timespan => Atom::Timespan(value),
        _ => Atom::Long(value),
    }
}

macro_rules! list_from {
    ($type:ty, $variant:ident, $primitive:ident) => {
        impl From<Vec<$type>> for List {
            #[inline]
            fn from(values: Vec<$type>) -> Self {
                Self {
                    code: TypeCode::List(PrimitiveType::$primitive),
                    attribute: Attribute::None,
                    values: ListValues::$variant(values),
                }
            }
        }
    };
}

list_from!(bool, Boolean, Boolean);
list_from!(Uuid, Guid, Guid);
list_from!(u8, UInt8, Byte);
list_from!(i16, Int16, Short);
list_from!(i32, Int32, Int);
list_from!(i64, Int64, Long);
list_from!(f32, Float32, Real);
list_from!(f64, Float64, Float);
list_from!(Symbol, Symbol, Symbol);

impl From<Vec<Value>> for List {
    #[inline]
    fn from(values: Vec<Value>) -> Self {
        Self::general(values)
    }
}
