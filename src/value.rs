//! Declares [`Value`], the owned recursive tree of everything a message can carry.
use uuid::Uuid;

use crate::array::{Dictionary, Function, KeyedTable, Lambda, List, Projection, Table};
use crate::datatypes::{PrimitiveType, TypeCode};
use crate::scalar::{Atom, Symbol, Temporal};

/// A q value. Each composite exclusively owns its children.
///
/// The reader produces every variant except [`Value::Text`] and [`Value::Sequence`], which
/// are loosely-typed inputs for the writer: their wire type is decided when they are written
/// (see [`crate::io::ipc::write::WriteOptions`] and [`crate::array::infer`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The generic null `::`
    Nil,
    Atom(Atom),
    /// A temporal atom in calendar form
    Temporal(Temporal),
    List(List),
    Dictionary(Dictionary),
    Table(Table),
    KeyedTable(KeyedTable),
    Lambda(Lambda),
    Function(Function),
    Projection(Projection),
    /// A string written either as a char atom or as a char list
    Text(String),
    /// A sequence whose list type is inferred when written
    Sequence(Vec<Value>),
}

impl Value {
    /// The type code of this value, `None` for the loosely-typed variants.
    pub fn type_code(&self) -> Option<TypeCode> {
        Some(match self {
            Value::Nil => TypeCode::UnaryPrimitive,
            Value::Atom(x) => x.type_code(),
            Value::Temporal(x) => x.type_code(),
            Value::List(x) => x.type_code(),
            Value::Dictionary(x) => x.type_code(),
            Value::Table(x) => x.type_code(),
            Value::KeyedTable(x) => x.type_code(),
            Value::Lambda(_) => TypeCode::Lambda,
            Value::Function(x) => x.type_code(),
            Value::Projection(x) => x.type_code(),
            Value::Text(_) | Value::Sequence(_) => return None,
        })
    }

    /// The number of elements of list-like values (rows for tables), `None` otherwise.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::List(x) => Some(x.len()),
            Value::Dictionary(x) => Some(x.len()),
            Value::Table(x) => Some(x.len()),
            Value::KeyedTable(x) => Some(x.len()),
            Value::Text(x) => Some(x.len()),
            Value::Sequence(x) => Some(x.len()),
            _ => None,
        }
    }

    /// A symbol atom.
    pub fn symbol<S: Into<Symbol>>(value: S) -> Self {
        Value::Atom(Atom::Symbol(value.into()))
    }

    /// A char atom.
    pub fn char(value: u8) -> Self {
        Value::Atom(Atom::Char(value))
    }

    /// The null of `primitive`.
    pub fn null(primitive: PrimitiveType) -> Self {
        Value::Atom(crate::datatypes::qnull(primitive))
    }

    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Value::Atom(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Value::Dictionary(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_keyed_table(&self) -> Option<&KeyedTable> {
        match self {
            Value::KeyedTable(x) => Some(x),
            _ => None,
        }
    }
}

macro_rules! value_from {
    ($type:ty, $variant:ident) => {
        impl From<$type> for Value {
            #[inline]
            fn from(value: $type) -> Self {
                Value::$variant(value)
            }
        }
    };
}

value_from!(Atom, Atom);
value_from!(Temporal, Temporal);
value_from!(List, List);
value_from!(Dictionary, Dictionary);
value_from!(Table, Table);
value_from!(KeyedTable, KeyedTable);
value_from!(Lambda, Lambda);
value_from!(Function, Function);
value_from!(Projection, Projection);
value_from!(String, Text);
value_from!(Vec<Value>, Sequence);

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

macro_rules! value_from_atom {
    ($type:ty) => {
        impl From<$type> for Value {
            #[inline]
            fn from(value: $type) -> Self {
                Value::Atom(value.into())
            }
        }
    };
}

value_from_atom!(bool);
value_from_atom!(Uuid);
value_from_atom!(u8);
value_from_atom!(i16);
value_from_atom!(i32);
value_from_atom!(i64);
value_from_atom!(f32);
value_from_atom!(f64);
value_from_atom!(Symbol);
