use crate::datatypes::TypeCode;
use crate::error::{QError, Result};
use crate::value::Value;

/// A map from keys to values, stored as two list-like values of equal length.
///
/// Order is significant and duplicate keys are allowed. A sorted dictionary (`s#`) is
/// written with its own type code, `127`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dictionary {
    keys: Box<Value>,
    values: Box<Value>,
    sorted: bool,
}

impl Dictionary {
    /// Creates a new [`Dictionary`].
    /// # Errors
    /// This function errors iff:
    /// * `keys` or `values` is not list-like (an atom or a function)
    /// * both `keys` and `values` are tables (use [`super::KeyedTable`])
    /// * the lengths of `keys` and `values` differ (`LengthMismatch`)
    pub fn try_new(keys: Value, values: Value) -> Result<Self> {
        if matches!((&keys, &values), (Value::Table(_), Value::Table(_))) {
            return Err(QError::InvalidArgument(
                "A dictionary from a table to a table is a keyed table".to_string(),
            ));
        }
        Self::try_new_impl(keys, values, false)
    }

    /// Creates a new sorted [`Dictionary`]. Unlike [`Dictionary::try_new`], keys and values
    /// may both be tables.
    /// # Errors
    /// Iff `keys` or `values` is not list-like or their lengths differ.
    pub fn try_new_sorted(keys: Value, values: Value) -> Result<Self> {
        Self::try_new_impl(keys, values, true)
    }

    fn try_new_impl(keys: Value, values: Value, sorted: bool) -> Result<Self> {
        let keys_len = list_len(&keys, "keys")?;
        let values_len = list_len(&values, "values")?;
        if keys_len != values_len {
            return Err(QError::LengthMismatch {
                keys: keys_len,
                values: values_len,
            });
        }
        Ok(Self {
            keys: Box::new(keys),
            values: Box::new(values),
            sorted,
        })
    }

    #[inline]
    pub fn keys(&self) -> &Value {
        &self.keys
    }

    #[inline]
    pub fn values(&self) -> &Value {
        &self.values
    }

    #[inline]
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.keys.len().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn type_code(&self) -> TypeCode {
        if self.sorted {
            TypeCode::SortedDictionary
        } else {
            TypeCode::Dictionary
        }
    }

    /// Returns the keys and the values.
    pub fn into_parts(self) -> (Value, Value) {
        (*self.keys, *self.values)
    }
}

fn list_len(value: &Value, name: &str) -> Result<usize> {
    match value {
        Value::Atom(_) | Value::Temporal(_) | Value::Text(_) => None,
        other => other.len(),
    }
    .ok_or_else(|| {
        QError::InvalidArgument(format!(
            "The {} of a dictionary must be a list, a dictionary or a table",
            name
        ))
    })
}
