//! Best-effort inference of the wire type of loosely-typed sequences.
//!
//! Inference is only used for [`Value::Sequence`]; values with a declared type are always
//! written as declared. No widening is performed: a sequence becomes a typed list only when
//! all its elements are atoms (or calendar temporals) of exactly the same type.
use crate::datatypes::{PrimitiveType, TypeCode};
use crate::error::Result;
use crate::value::Value;

use super::{List, ListValues};

fn element_type(value: &Value) -> Option<(PrimitiveType, bool)> {
    match value {
        Value::Atom(atom) => Some((atom.primitive(), false)),
        Value::Temporal(temporal) => Some((temporal.primitive(), true)),
        _ => None,
    }
}

/// Returns the narrowest [`TypeCode`] that represents all of `values`: the list of their
/// common primitive type, or the general list when `values` is empty or heterogeneous.
pub fn infer_type(values: &[Value]) -> TypeCode {
    let first = match values.first().and_then(element_type) {
        Some(first) => first,
        None => return TypeCode::GeneralList,
    };
    if values.iter().all(|x| element_type(x) == Some(first)) {
        TypeCode::List(first.0)
    } else {
        TypeCode::GeneralList
    }
}

/// Builds a [`List`] out of `values`, typed as [`infer_type`] returns.
pub fn infer(values: Vec<Value>) -> Result<List> {
    let primitive = match infer_type(&values) {
        TypeCode::List(primitive) => primitive,
        _ => return Ok(List::general(values)),
    };
    if let Some(Value::Temporal(_)) = values.first() {
        let temporals = values
            .into_iter()
            .filter_map(|x| match x {
                Value::Temporal(x) => Some(x),
                _ => None,
            })
            .collect();
        return List::try_new(TypeCode::List(primitive), ListValues::Temporal(temporals));
    }
    let atoms = values
        .into_iter()
        .filter_map(|x| match x {
            Value::Atom(x) => Some(x),
            _ => None,
        })
        .collect();
    List::from_atoms(primitive, atoms)
}
