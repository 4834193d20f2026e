use crate::datatypes::{Attribute, TypeCode};
use crate::error::{QError, Result};
use crate::scalar::Symbol;

use super::List;

/// A column-major table: symbol column names and columns of equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    attribute: Attribute,
    names: Vec<Symbol>,
    columns: Vec<List>,
}

impl Table {
    /// Creates a new [`Table`].
    /// # Errors
    /// This function errors iff:
    /// * the number of names differs from the number of columns (`LengthMismatch`)
    /// * the columns do not share one row count (`ColumnLengthMismatch`)
    pub fn try_new(names: Vec<Symbol>, columns: Vec<List>) -> Result<Self> {
        if names.len() != columns.len() {
            return Err(QError::LengthMismatch {
                keys: names.len(),
                values: columns.len(),
            });
        }
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some((name, column)) = names
                .iter()
                .zip(columns.iter())
                .find(|(_, column)| column.len() != expected)
            {
                return Err(QError::ColumnLengthMismatch {
                    column: name.to_string_lossy().into_owned(),
                    expected,
                    actual: column.len(),
                });
            }
        }
        Ok(Self {
            attribute: Attribute::None,
            names,
            columns,
        })
    }

    /// Returns this table with the attribute `attribute`.
    #[inline]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attribute = attribute;
        self
    }

    #[inline]
    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    #[inline]
    pub fn names(&self) -> &[Symbol] {
        &self.names
    }

    #[inline]
    pub fn columns(&self) -> &[List] {
        &self.columns
    }

    /// The column named `name`, if any.
    pub fn column(&self, name: &str) -> Option<&List> {
        self.names
            .iter()
            .position(|x| x == name)
            .map(|i| &self.columns[i])
    }

    /// The number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.columns.first().map(|x| x.len()).unwrap_or(0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn type_code(&self) -> TypeCode {
        TypeCode::Table
    }

    pub fn into_parts(self) -> (Vec<Symbol>, Vec<List>) {
        (self.names, self.columns)
    }
}
