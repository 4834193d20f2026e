use std::convert::TryFrom;

use uuid::Uuid;

use crate::array::{
    Dictionary, Function, FunctionBody, KeyedTable, Lambda, List, ListValues, Projection, Table,
};
use crate::datatypes::{Adverb, Attribute, PhysicalType, PrimitiveType, TypeCode};
use crate::endianess::Endianness;
use crate::error::{QError, Result};
use crate::scalar::{Atom, Symbol};
use crate::temporal_conversions;
use crate::types::NativeType;
use crate::value::Value;

use super::super::Header;
use super::TemporalMode;

/// Composite values nest at most this deep.
pub const MAX_DEPTH: usize = 512;

/// A composite whose children are still being read.
enum Frame {
    /// `count` tagged values: a general list, a projection or a composition
    Sequence {
        code: TypeCode,
        attribute: Attribute,
        count: usize,
        values: Vec<Value>,
    },
    Dictionary {
        code: TypeCode,
        keys: Option<Value>,
    },
    /// `offset` is where the part being read (names, then columns) starts
    Table {
        attribute: Attribute,
        names: Option<Vec<Symbol>>,
        offset: usize,
    },
    Lambda {
        context: Symbol,
        offset: usize,
    },
    Adverb(Adverb),
}

enum Node {
    Value(Value),
    Open(Frame),
}

/// A cursor over a (decompressed) message body that decodes [`Value`]s.
pub(super) struct Deserializer<'a> {
    buffer: &'a [u8],
    offset: usize,
    header: Header,
    endianness: Endianness,
    temporals: TemporalMode,
}

impl<'a> Deserializer<'a> {
    pub fn new(buffer: &'a [u8], header: Header, temporals: TemporalMode) -> Self {
        Self {
            buffer,
            offset: 0,
            header,
            endianness: header.endianness,
            temporals,
        }
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.offset
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn take(&mut self, length: usize) -> Result<&'a [u8]> {
        if length > self.remaining() {
            return Err(QError::eof(self.offset, length, self.remaining()));
        }
        let bytes = &self.buffer[self.offset..self.offset + length];
        self.offset += length;
        Ok(bytes)
    }

    #[inline]
    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    #[inline]
    fn read_native<T: NativeType>(&mut self) -> Result<T> {
        let bytes = self.take(std::mem::size_of::<T>())?;
        Ok(T::decode(bytes, self.endianness))
    }

    fn read_guid(&mut self) -> Result<Uuid> {
        let bytes = self.take(16)?;
        match <[u8; 16]>::try_from(bytes) {
            Ok(bytes) => Ok(Uuid::from_bytes(bytes)),
            Err(_) => unreachable!(),
        }
    }

    /// Reads a NUL-terminated string, consuming the terminator.
    fn read_symbol(&mut self) -> Result<Symbol> {
        let rest = &self.buffer[self.offset..];
        match rest.iter().position(|x| *x == 0) {
            Some(length) => {
                let bytes = self.take(length + 1)?;
                Ok(Symbol::new(&bytes[..length]))
            }
            None => Err(QError::eof(self.offset, rest.len() + 1, rest.len())),
        }
    }

    fn read_attribute(&mut self) -> Result<Attribute> {
        let offset = self.offset;
        let byte = self.read_u8()?;
        Attribute::from_u8(byte).ok_or_else(|| {
            QError::InvalidData(format!("unknown attribute {} at offset {}", byte, offset))
        })
    }

    /// Reads a count of elements that occupy at least `min_width` bytes each, failing
    /// before any allocation if the body is too short to hold them.
    fn read_count(&mut self, min_width: usize) -> Result<usize> {
        let offset = self.offset;
        let count = self.read_native::<i32>()?;
        if count < 0 {
            return Err(QError::InvalidData(format!(
                "negative count {} at offset {}",
                count, offset
            )));
        }
        let count = count as usize;
        let needed = count.saturating_mul(min_width);
        if needed > self.remaining() {
            return Err(QError::eof(self.offset, needed, self.remaining()));
        }
        Ok(count)
    }

    /// Reads one tagged value.
    ///
    /// Composite values are decoded with an explicit stack of open [`Frame`]s rather
    /// than by recursion, so that the nesting limit holds whatever the stack size.
    pub fn read_value(&mut self) -> Result<Value> {
        let mut stack: Vec<Frame> = vec![];
        loop {
            let mut value = match self.read_node()? {
                Node::Value(value) => value,
                Node::Open(frame) => {
                    if stack.len() >= MAX_DEPTH {
                        return Err(QError::InvalidData(format!(
                            "values nested deeper than {} at offset {}",
                            MAX_DEPTH, self.offset
                        )));
                    }
                    stack.push(frame);
                    continue;
                }
            };
            // hand the value to its parents, closing every frame it completes
            loop {
                let frame = match stack.last_mut() {
                    Some(frame) => frame,
                    None => return Ok(value),
                };
                match self.push_child(frame, value)? {
                    Some(parent) => {
                        stack.pop();
                        value = parent;
                    }
                    None => break,
                }
            }
        }
    }

    /// Reads a type tag and either a complete value or the head of a composite.
    fn read_node(&mut self) -> Result<Node> {
        let offset = self.offset;
        let tag = self.read_u8()? as i8;
        let code = TypeCode::from_i8(tag).ok_or(QError::UnknownType { code: tag, offset })?;
        Ok(match code {
            TypeCode::Atom(primitive) => Node::Value(self.read_atom(primitive)?),
            TypeCode::List(primitive) => {
                let attribute = self.read_attribute()?;
                let count = self.read_count(primitive.width().unwrap_or(1))?;
                let values = self.read_list_values(primitive, count)?;
                let list = List::try_new(code, values)?.with_attribute(attribute);
                Node::Value(Value::List(self.convert_list(list)?))
            }
            TypeCode::GeneralList => {
                let attribute = self.read_attribute()?;
                self.open_sequence(code, attribute)?
            }
            TypeCode::Projection | TypeCode::Composition => {
                self.open_sequence(code, Attribute::None)?
            }
            TypeCode::Dictionary | TypeCode::SortedDictionary => {
                Node::Open(Frame::Dictionary { code, keys: None })
            }
            TypeCode::Table => {
                let attribute = self.read_attribute()?;
                let offset = self.offset;
                let tag = self.read_u8()? as i8;
                if tag != TypeCode::Dictionary.to_i8() {
                    return Err(QError::InvalidData(format!(
                        "a table must hold a dictionary, found type {} at offset {}",
                        tag, offset
                    )));
                }
                Node::Open(Frame::Table {
                    attribute,
                    names: None,
                    offset: self.offset,
                })
            }
            TypeCode::Lambda => {
                let context = self.read_symbol()?;
                Node::Open(Frame::Lambda {
                    context,
                    offset: self.offset,
                })
            }
            TypeCode::UnaryPrimitive | TypeCode::BinaryPrimitive | TypeCode::TernaryOperator => {
                let index = self.read_u8()?;
                if code == TypeCode::UnaryPrimitive && index == 0 {
                    return Ok(Node::Value(Value::Nil));
                }
                let function = Function::try_new(code, Some(FunctionBody::Primitive(index)))?;
                Node::Value(Value::Function(function))
            }
            TypeCode::Adverb(adverb) => Node::Open(Frame::Adverb(adverb)),
            TypeCode::Error => {
                let message = self.read_symbol()?;
                return Err(QError::Remote {
                    message: message.to_string_lossy().into_owned(),
                    header: self.header,
                });
            }
        })
    }

    /// Reads the count of a general list, projection or composition.
    fn open_sequence(&mut self, code: TypeCode, attribute: Attribute) -> Result<Node> {
        let count = self.read_count(1)?;
        if count == 0 {
            return finish_sequence(code, attribute, vec![]).map(Node::Value);
        }
        Ok(Node::Open(Frame::Sequence {
            code,
            attribute,
            count,
            values: Vec::with_capacity(count),
        }))
    }

    /// Adds `child` to `frame`, returning the composite once all its children are read.
    fn push_child(&self, frame: &mut Frame, child: Value) -> Result<Option<Value>> {
        match frame {
            Frame::Sequence {
                code,
                attribute,
                count,
                values,
            } => {
                values.push(child);
                if values.len() < *count {
                    return Ok(None);
                }
                finish_sequence(*code, *attribute, std::mem::take(values)).map(Some)
            }
            Frame::Dictionary { code, keys } => match keys.take() {
                None => {
                    *keys = Some(child);
                    Ok(None)
                }
                Some(keys) => dictionary(*code, keys, child).map(Some),
            },
            Frame::Table {
                attribute,
                names,
                offset,
            } => match names.take() {
                None => {
                    *names = Some(table_names(child, *offset)?);
                    *offset = self.offset;
                    Ok(None)
                }
                Some(names) => {
                    let columns = table_columns(child, *offset)?;
                    let table = Table::try_new(names, columns)?.with_attribute(*attribute);
                    Ok(Some(Value::Table(table)))
                }
            },
            Frame::Lambda { context, offset } => match child {
                Value::List(list) => match list.into_values() {
                    ListValues::Char(body) => Ok(Some(Value::Lambda(Lambda::new(
                        std::mem::take(context),
                        body,
                    )))),
                    _ => Err(lambda_error(*offset)),
                },
                _ => Err(lambda_error(*offset)),
            },
            Frame::Adverb(adverb) => Ok(Some(Value::Function(Function::adverb(*adverb, child)))),
        }
    }

    fn read_atom(&mut self, primitive: PrimitiveType) -> Result<Value> {
        let atom = match primitive {
            PrimitiveType::Boolean => Atom::Boolean(self.read_u8()? != 0),
            PrimitiveType::Guid => Atom::Guid(self.read_guid()?),
            PrimitiveType::Byte => Atom::Byte(self.read_u8()?),
            PrimitiveType::Char => Atom::Char(self.read_u8()?),
            PrimitiveType::Short => Atom::Short(self.read_native()?),
            PrimitiveType::Int => Atom::Int(self.read_native()?),
            PrimitiveType::Long => Atom::Long(self.read_native()?),
            PrimitiveType::Real => Atom::Real(self.read_native()?),
            PrimitiveType::Float => Atom::Float(self.read_native()?),
            PrimitiveType::Symbol => Atom::Symbol(self.read_symbol()?),
            PrimitiveType::Timestamp => Atom::Timestamp(self.read_native()?),
            PrimitiveType::Month => Atom::Month(self.read_native()?),
            PrimitiveType::Date => Atom::Date(self.read_native()?),
            PrimitiveType::Datetime => Atom::Datetime(self.read_native()?),
            PrimitiveType::Timespan => Atom::Timespan(self.read_native()?),
            PrimitiveType::Minute => Atom::Minute(self.read_native()?),
            PrimitiveType::Second => Atom::Second(self.read_native()?),
            PrimitiveType::Time => Atom::Time(self.read_native()?),
        };
        match self.temporals {
            TemporalMode::Calendar if primitive.is_temporal() => {
                temporal_conversions::from_raw(&atom).map(Value::Temporal)
            }
            _ => Ok(Value::Atom(atom)),
        }
    }

    fn read_list_values(&mut self, primitive: PrimitiveType, count: usize) -> Result<ListValues> {
        let physical = primitive.to_physical_type();
        if physical == PhysicalType::Symbol {
            let mut values = Vec::with_capacity(count);
            for _ in 0..count {
                values.push(self.read_symbol()?);
            }
            return Ok(ListValues::Symbol(values));
        }
        let width = physical.width().unwrap_or(1);
        let bytes = self.take(count * width)?;
        let endianness = self.endianness;
        Ok(match physical {
            PhysicalType::Boolean => ListValues::Boolean(bytes.iter().map(|x| *x != 0).collect()),
            PhysicalType::UInt8 => ListValues::UInt8(bytes.to_vec()),
            PhysicalType::Char => ListValues::Char(bytes.to_vec()),
            PhysicalType::Guid => ListValues::Guid(
                bytes
                    .chunks_exact(16)
                    .map(|chunk| match <[u8; 16]>::try_from(chunk) {
                        Ok(chunk) => Uuid::from_bytes(chunk),
                        Err(_) => unreachable!(),
                    })
                    .collect(),
            ),
            PhysicalType::Int16 => ListValues::Int16(decode_all(bytes, endianness)),
            PhysicalType::Int32 => ListValues::Int32(decode_all(bytes, endianness)),
            PhysicalType::Int64 => ListValues::Int64(decode_all(bytes, endianness)),
            PhysicalType::Float32 => ListValues::Float32(decode_all(bytes, endianness)),
            PhysicalType::Float64 => ListValues::Float64(decode_all(bytes, endianness)),
            PhysicalType::Symbol => unreachable!(),
        })
    }

    fn convert_list(&self, list: List) -> Result<List> {
        match (self.temporals, list.primitive()) {
            (TemporalMode::Calendar, Some(p)) if p.is_temporal() => {
                temporal_conversions::list_from_raw(&list)
            }
            _ => Ok(list),
        }
    }
}

fn decode_all<T: NativeType>(bytes: &[u8], endianness: Endianness) -> Vec<T> {
    bytes
        .chunks_exact(std::mem::size_of::<T>())
        .map(|chunk| T::decode(chunk, endianness))
        .collect()
}

fn finish_sequence(code: TypeCode, attribute: Attribute, values: Vec<Value>) -> Result<Value> {
    match code {
        TypeCode::Projection => Ok(Value::Projection(Projection::new(values))),
        TypeCode::Composition => {
            Function::try_new(code, Some(FunctionBody::Composition(values))).map(Value::Function)
        }
        _ => Ok(Value::List(List::general(values).with_attribute(attribute))),
    }
}

/// Two tables under a plain dictionary are a keyed table.
fn dictionary(code: TypeCode, keys: Value, values: Value) -> Result<Value> {
    match (code, keys, values) {
        (TypeCode::Dictionary, Value::Table(keys), Value::Table(values)) => {
            Ok(Value::KeyedTable(KeyedTable::try_new(keys, values)?))
        }
        (TypeCode::Dictionary, keys, values) => {
            Ok(Value::Dictionary(Dictionary::try_new(keys, values)?))
        }
        (_, keys, values) => Ok(Value::Dictionary(Dictionary::try_new_sorted(keys, values)?)),
    }
}

fn table_names(value: Value, offset: usize) -> Result<Vec<Symbol>> {
    match value {
        Value::List(list) => match list.into_values() {
            ListValues::Symbol(names) => Ok(names),
            _ => Err(table_error("names", offset)),
        },
        _ => Err(table_error("names", offset)),
    }
}

fn table_columns(value: Value, offset: usize) -> Result<Vec<List>> {
    match value {
        Value::List(list) => match list.into_values() {
            ListValues::General(columns) => columns
                .into_iter()
                .map(|column| match column {
                    Value::List(column) => Ok(column),
                    _ => Err(table_error("columns", offset)),
                })
                .collect(),
            _ => Err(table_error("columns", offset)),
        },
        _ => Err(table_error("columns", offset)),
    }
}

fn lambda_error(offset: usize) -> QError {
    QError::InvalidData(format!(
        "the body of a lambda must be a char list, at offset {}",
        offset
    ))
}

fn table_error(part: &str, offset: usize) -> QError {
    let expected = if part == "names" {
        "a symbol list"
    } else {
        "a general list of lists"
    };
    QError::InvalidData(format!(
        "the {} of a table must be {}, at offset {}",
        part, expected, offset
    ))
}
