//! Reader and writer of the q/kdb+ IPC wire format.
//!
//! The crate is organized like the format itself:
//! * [`datatypes`] declares the type codes, attributes and the static table of primitive
//!   types with their null sentinels
//! * [`scalar`] declares atoms, symbols and the calendar form of temporals
//! * [`array`] declares lists, dictionaries, tables, keyed tables and executable values
//! * [`value`] declares [`value::Value`], the owned tree of everything a message carries
//! * [`io::ipc`] reads and writes messages, optionally compressed
//!
//! ```
//! use qipc::array::{List, Table};
//! use qipc::io::ipc::{read, write, MessageData, MessageType};
//! use qipc::value::Value;
//!
//! let table = Table::try_new(
//!     vec!["sym".into(), "price".into()],
//!     vec![List::symbols(vec!["a", "b"]), List::from(vec![1.5f64, 2.5])],
//! )
//! .unwrap();
//! let value = Value::Table(table);
//!
//! let bytes = write::serialize(&value, MessageType::Response, &Default::default()).unwrap();
//! let message = read::read_message(&mut bytes.as_slice(), &Default::default()).unwrap();
//! assert_eq!(message.data, MessageData::Value(value));
//! ```
//!
//! This crate does not open connections: it reads from any [`std::io::Read`] and writes
//! to any [`std::io::Write`].
#![allow(clippy::len_without_is_empty)]

pub mod array;
pub mod datatypes;
pub mod endianess;
pub mod error;
pub mod io;
pub mod scalar;
pub mod temporal_conversions;
pub mod types;
pub mod value;
