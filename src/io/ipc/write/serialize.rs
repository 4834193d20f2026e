use crate::array::{infer, infer_type, FunctionBody, List, ListValues, Table};
use crate::datatypes::{Attribute, PrimitiveType, TypeCode};
use crate::error::{QError, Result};
use crate::scalar::{Atom, Symbol, Temporal};
use crate::temporal_conversions;
use crate::types::NativeType;
use crate::value::Value;

use super::WriteOptions;

/// Serializes values into message bodies. Every value is visited twice: once to compute
/// its exact encoded length ([`Serializer::encoded_len`]) and once to emit it
/// ([`Serializer::write`]); both passes must agree.
pub(super) struct Serializer<'a> {
    options: &'a WriteOptions,
}

fn check_count(count: usize) -> Result<()> {
    if count > i32::MAX as usize {
        return Err(QError::UnsupportedValue(format!(
            "{} elements do not fit in a message",
            count
        )));
    }
    Ok(())
}

fn check_symbol(symbol: &[u8]) -> Result<()> {
    if symbol.contains(&0) {
        return Err(QError::UnsupportedValue(format!(
            "the symbol {:?} contains the terminator NUL",
            String::from_utf8_lossy(symbol)
        )));
    }
    Ok(())
}

#[inline]
fn symbol_len(symbol: &Symbol) -> Result<usize> {
    check_symbol(symbol.as_bytes())?;
    Ok(symbol.len() + 1)
}

fn width(primitive: PrimitiveType) -> usize {
    primitive.width().unwrap_or(0)
}

fn to_raw(temporal: &Temporal) -> Result<Atom> {
    temporal_conversions::to_raw(temporal).map_err(|e| QError::UnsupportedValue(e.to_string()))
}

fn symbols_len(symbols: &[Symbol]) -> Result<usize> {
    symbols
        .iter()
        .try_fold(0, |acc, x| -> Result<usize> { Ok(acc + symbol_len(x)?) })
}

impl<'a> Serializer<'a> {
    pub fn new(options: &'a WriteOptions) -> Self {
        Self { options }
    }

    #[inline]
    fn text_is_atom(&self, text: &str) -> bool {
        text.len() == 1 && !self.options.single_char_strings
    }

    /// The number of bytes `value` occupies on the wire.
    /// # Errors
    /// Iff `value` has no wire representation.
    pub fn encoded_len(&self, value: &Value) -> Result<usize> {
        Ok(match value {
            Value::Nil => 2,
            Value::Atom(atom) => 1 + self.atom_len(atom)?,
            Value::Temporal(temporal) => 1 + width(temporal.primitive()),
            Value::List(list) => self.list_len(list)?,
            Value::Dictionary(dictionary) => {
                1 + self.encoded_len(dictionary.keys())? + self.encoded_len(dictionary.values())?
            }
            Value::Table(table) => self.table_len(table)?,
            Value::KeyedTable(table) => {
                1 + self.table_len(table.keys())? + self.table_len(table.values())?
            }
            Value::Lambda(lambda) => {
                if lambda.body().is_empty() {
                    return Err(QError::UnsupportedValue(
                        "a lambda without source text".to_string(),
                    ));
                }
                check_count(lambda.body().len())?;
                1 + symbol_len(lambda.context())? + 6 + lambda.body().len()
            }
            Value::Function(function) => match function.body() {
                None => {
                    return Err(QError::UnsupportedValue(format!(
                        "a function of type {} without its captured body",
                        function.type_code()
                    )))
                }
                Some(FunctionBody::Primitive(_)) => 2,
                Some(FunctionBody::Composition(parts)) => 1 + self.values_len(parts)?,
                Some(FunctionBody::Adverb(operand)) => 1 + self.encoded_len(operand)?,
            },
            Value::Projection(projection) => 1 + self.values_len(projection.values())?,
            Value::Text(text) => {
                if self.text_is_atom(text) {
                    2
                } else {
                    check_count(text.len())?;
                    6 + text.len()
                }
            }
            Value::Sequence(values) => {
                check_count(values.len())?;
                match infer_type(values) {
                    TypeCode::List(primitive) => {
                        let elements = values.iter().try_fold(0, |acc, x| -> Result<usize> {
                            Ok(acc
                                + match x {
                                    Value::Atom(atom) => self.atom_len(atom)?,
                                    _ => width(primitive),
                                })
                        })?;
                        6 + elements
                    }
                    _ => 2 + self.values_len(values)?,
                }
            }
        })
    }

    /// The length of a count followed by tagged values.
    fn values_len(&self, values: &[Value]) -> Result<usize> {
        check_count(values.len())?;
        values
            .iter()
            .try_fold(4, |acc, x| -> Result<usize> { Ok(acc + self.encoded_len(x)?) })
    }

    fn atom_len(&self, atom: &Atom) -> Result<usize> {
        match atom {
            Atom::Symbol(symbol) => symbol_len(symbol),
            _ => Ok(width(atom.primitive())),
        }
    }

    fn list_len(&self, list: &List) -> Result<usize> {
        check_count(list.len())?;
        let elements = match list.values() {
            ListValues::Symbol(values) => symbols_len(values)?,
            ListValues::General(values) => values
                .iter()
                .try_fold(0, |acc, x| -> Result<usize> { Ok(acc + self.encoded_len(x)?) })?,
            _ => list.len() * list.primitive().map(width).unwrap_or(0),
        };
        Ok(6 + elements)
    }

    fn table_len(&self, table: &Table) -> Result<usize> {
        check_count(table.num_columns())?;
        let columns = table
            .columns()
            .iter()
            .try_fold(0, |acc, x| -> Result<usize> { Ok(acc + self.list_len(x)?) })?;
        // type, attribute, dictionary type, symbol list, general list
        Ok(3 + 6 + symbols_len(table.names())? + 6 + columns)
    }

    /// Appends the encoding of `value` to `buffer`.
    /// # Errors
    /// Iff `value` has no wire representation.
    pub fn write(&self, value: &Value, buffer: &mut Vec<u8>) -> Result<()> {
        match value {
            Value::Nil => buffer.extend_from_slice(&[TypeCode::UnaryPrimitive.to_i8() as u8, 0]),
            Value::Atom(atom) => self.write_atom(atom, buffer),
            Value::Temporal(temporal) => self.write_atom(&to_raw(temporal)?, buffer),
            Value::List(list) => self.write_list(list, buffer)?,
            Value::Dictionary(dictionary) => {
                buffer.push(dictionary.type_code().to_i8() as u8);
                self.write(dictionary.keys(), buffer)?;
                self.write(dictionary.values(), buffer)?;
            }
            Value::Table(table) => self.write_table(table, buffer)?,
            Value::KeyedTable(table) => {
                buffer.push(table.type_code().to_i8() as u8);
                self.write_table(table.keys(), buffer)?;
                self.write_table(table.values(), buffer)?;
            }
            Value::Lambda(lambda) => {
                buffer.push(TypeCode::Lambda.to_i8() as u8);
                self.write_symbol(lambda.context(), buffer);
                self.write_list(&List::string(lambda.body()), buffer)?;
            }
            Value::Function(function) => {
                buffer.push(function.type_code().to_i8() as u8);
                match function.body() {
                    Some(FunctionBody::Primitive(index)) => buffer.push(*index),
                    Some(FunctionBody::Composition(parts)) => self.write_values(parts, buffer)?,
                    Some(FunctionBody::Adverb(operand)) => self.write(operand, buffer)?,
                    None => {
                        return Err(QError::UnsupportedValue(format!(
                            "a function of type {} without its captured body",
                            function.type_code()
                        )))
                    }
                }
            }
            Value::Projection(projection) => {
                buffer.push(TypeCode::Projection.to_i8() as u8);
                self.write_values(projection.values(), buffer)?;
            }
            Value::Text(text) => {
                if self.text_is_atom(text) {
                    self.write_atom(&Atom::Char(text.as_bytes()[0]), buffer)
                } else {
                    self.write_list(&List::string(text), buffer)?
                }
            }
            Value::Sequence(values) => match infer_type(values) {
                TypeCode::List(_) => self.write_list(&infer(values.clone())?, buffer)?,
                _ => {
                    self.write_list_header(
                        TypeCode::GeneralList,
                        Attribute::None,
                        values.len(),
                        buffer,
                    );
                    for value in values {
                        self.write(value, buffer)?;
                    }
                }
            },
        };
        Ok(())
    }

    fn write_values(&self, values: &[Value], buffer: &mut Vec<u8>) -> Result<()> {
        (values.len() as i32).encode(buffer, self.options.endianness);
        values.iter().try_for_each(|x| self.write(x, buffer))
    }

    #[inline]
    fn write_symbol(&self, symbol: &Symbol, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(symbol.as_bytes());
        buffer.push(0);
    }

    fn write_atom(&self, atom: &Atom, buffer: &mut Vec<u8>) {
        let endianness = self.options.endianness;
        buffer.push(atom.type_code().to_i8() as u8);
        match atom {
            Atom::Boolean(v) => buffer.push(*v as u8),
            Atom::Guid(v) => buffer.extend_from_slice(v.as_bytes()),
            Atom::Byte(v) | Atom::Char(v) => buffer.push(*v),
            Atom::Short(v) => v.encode(buffer, endianness),
            Atom::Int(v)
            | Atom::Month(v)
            | Atom::Date(v)
            | Atom::Minute(v)
            | Atom::Second(v)
            | Atom::Time(v) => v.encode(buffer, endianness),
            Atom::Long(v) | Atom::Timestamp(v) | Atom::Timespan(v) => v.encode(buffer, endianness),
            Atom::Real(v) => v.encode(buffer, endianness),
            Atom::Float(v) | Atom::Datetime(v) => v.encode(buffer, endianness),
            Atom::Symbol(v) => self.write_symbol(v, buffer),
        }
    }

    fn write_list_header(
        &self,
        code: TypeCode,
        attribute: Attribute,
        length: usize,
        buffer: &mut Vec<u8>,
    ) {
        buffer.push(code.to_i8() as u8);
        buffer.push(attribute as u8);
        (length as i32).encode(buffer, self.options.endianness);
    }

    fn write_list(&self, list: &List, buffer: &mut Vec<u8>) -> Result<()> {
        if let ListValues::Temporal(_) = list.values() {
            let list = temporal_conversions::list_to_raw(list)
                .map_err(|e| QError::UnsupportedValue(e.to_string()))?;
            return self.write_list(&list, buffer);
        }

        let endianness = self.options.endianness;
        self.write_list_header(list.type_code(), list.attribute(), list.len(), buffer);
        match list.values() {
            ListValues::Boolean(values) => buffer.extend(values.iter().map(|x| *x as u8)),
            ListValues::Guid(values) => values
                .iter()
                .for_each(|x| buffer.extend_from_slice(x.as_bytes())),
            ListValues::UInt8(values) | ListValues::Char(values) => {
                buffer.extend_from_slice(values)
            }
            ListValues::Int16(values) => values.iter().for_each(|x| x.encode(buffer, endianness)),
            ListValues::Int32(values) => values.iter().for_each(|x| x.encode(buffer, endianness)),
            ListValues::Int64(values) => values.iter().for_each(|x| x.encode(buffer, endianness)),
            ListValues::Float32(values) => {
                values.iter().for_each(|x| x.encode(buffer, endianness))
            }
            ListValues::Float64(values) => {
                values.iter().for_each(|x| x.encode(buffer, endianness))
            }
            ListValues::Symbol(values) => values.iter().for_each(|x| self.write_symbol(x, buffer)),
            ListValues::General(values) => {
                for value in values {
                    self.write(value, buffer)?;
                }
            }
            ListValues::Temporal(_) => unreachable!(),
        }
        Ok(())
    }

    fn write_table(&self, table: &Table, buffer: &mut Vec<u8>) -> Result<()> {
        buffer.push(TypeCode::Table.to_i8() as u8);
        buffer.push(table.attribute() as u8);
        buffer.push(TypeCode::Dictionary.to_i8() as u8);

        self.write_list_header(
            TypeCode::List(PrimitiveType::Symbol),
            Attribute::None,
            table.names().len(),
            buffer,
        );
        table
            .names()
            .iter()
            .for_each(|x| self.write_symbol(x, buffer));

        self.write_list_header(
            TypeCode::GeneralList,
            Attribute::None,
            table.num_columns(),
            buffer,
        );
        table
            .columns()
            .iter()
            .try_for_each(|x| self.write_list(x, buffer))
    }
}
