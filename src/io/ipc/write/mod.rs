//! APIs to write q IPC messages.
//!
//! Values are written as declared: the type code attached to a [`crate::array::List`] is
//! written as is. Only the loosely-typed [`crate::value::Value::Text`] and
//! [`crate::value::Value::Sequence`] have their wire type decided here.
mod common;
mod serialize;
mod stream;
mod writer;

pub use common::{Compression, WriteOptions, DEFAULT_COMPRESSION_THRESHOLD};
pub use stream::StreamWriter;
pub use writer::{serialize, serialize_error, write_error, write_message};
