use crate::datatypes::TypeCode;
use crate::error::{QError, Result};
use crate::value::Value;

use super::Table;

/// A table of key columns paired row by row with a table of value columns.
/// On the wire it is a dictionary (`99`) from the key table to the value table.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedTable {
    keys: Table,
    values: Table,
}

impl KeyedTable {
    /// Creates a new [`KeyedTable`].
    /// # Errors
    /// Iff the row counts of `keys` and `values` differ (`RowCountMismatch`).
    pub fn try_new(keys: Table, values: Table) -> Result<Self> {
        if keys.len() != values.len() {
            return Err(QError::RowCountMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }
        Ok(Self { keys, values })
    }

    /// Creates a new [`KeyedTable`] out of two values.
    /// # Errors
    /// Iff either side is not a table or the row counts differ.
    pub fn try_from_values(keys: Value, values: Value) -> Result<Self> {
        match (keys, values) {
            (Value::Table(keys), Value::Table(values)) => Self::try_new(keys, values),
            (keys, values) => Err(QError::InvalidArgument(format!(
                "A keyed table requires two tables, got {:?} and {:?}",
                keys.type_code(),
                values.type_code()
            ))),
        }
    }

    #[inline]
    pub fn keys(&self) -> &Table {
        &self.keys
    }

    #[inline]
    pub fn values(&self) -> &Table {
        &self.values
    }

    /// The number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn type_code(&self) -> TypeCode {
        TypeCode::Dictionary
    }

    pub fn into_parts(self) -> (Table, Table) {
        (self.keys, self.values)
    }
}
