//! APIs to read from and write to the q IPC format.
//!
//! Every message is an 8-byte [`Header`] followed by a body holding exactly one
//! [`Value`]. The body may be compressed, which needs the `io_ipc_compression` feature.
//!
//! ```
//! use qipc::io::ipc::{read, write, MessageData, MessageType};
//! use qipc::array::List;
//! use qipc::value::Value;
//!
//! let value = Value::List(List::from(vec![1i64, 2, 3]));
//! let bytes = write::serialize(&value, MessageType::Sync, &Default::default()).unwrap();
//!
//! let message = read::read_message(&mut bytes.as_slice(), &Default::default()).unwrap();
//! assert_eq!(message.header.message_type, MessageType::Sync);
//! assert_eq!(message.data, MessageData::Value(value));
//! ```
#[cfg(feature = "serde_types")]
use serde_derive::{Deserialize, Serialize};

use crate::endianess::Endianness;
use crate::error::{QError, Result};
use crate::types::NativeType;
use crate::value::Value;

#[cfg(feature = "io_ipc_compression")]
pub mod compression;
pub mod read;
pub mod write;

/// The length of every message header.
pub const HEADER_LENGTH: usize = 8;

/// The kind of a message, the second byte of its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_types", derive(Serialize, Deserialize))]
pub enum MessageType {
    /// Fire-and-forget
    Async = 0,
    /// A request that expects a response
    Sync = 1,
    /// The reply to a sync request
    Response = 2,
}

impl MessageType {
    pub fn from_u8(byte: u8) -> Option<Self> {
        Some(match byte {
            0 => MessageType::Async,
            1 => MessageType::Sync,
            2 => MessageType::Response,
            _ => return None,
        })
    }
}

/// The 8-byte header of every message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_types", derive(Serialize, Deserialize))]
pub struct Header {
    pub endianness: Endianness,
    pub message_type: MessageType,
    /// Whether the body is compressed
    pub compressed: bool,
    /// The total length of the message, header included
    pub size: usize,
}

impl Header {
    /// Parses a [`Header`] from the first 8 bytes of `bytes`.
    /// # Errors
    /// Iff `bytes` is shorter than 8 bytes, a flag is not supported or the declared
    /// length is shorter than the header itself.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LENGTH {
            return Err(QError::MalformedHeader(format!(
                "a header has {} bytes but only {} are available",
                HEADER_LENGTH,
                bytes.len()
            )));
        }
        let endianness = match bytes[0] {
            0 => Endianness::Big,
            1 => Endianness::Little,
            other => {
                return Err(QError::MalformedHeader(format!(
                    "unsupported endianness flag {}",
                    other
                )))
            }
        };
        let message_type = MessageType::from_u8(bytes[1]).ok_or_else(|| {
            QError::MalformedHeader(format!("unsupported message type {}", bytes[1]))
        })?;
        let compressed = match bytes[2] {
            0 => false,
            1 => true,
            other => {
                return Err(QError::MalformedHeader(format!(
                    "unsupported compression flag {}",
                    other
                )))
            }
        };
        let size = i32::decode(&bytes[4..8], endianness);
        if size < HEADER_LENGTH as i32 {
            return Err(QError::MalformedHeader(format!(
                "declared message length {} is shorter than the header",
                size
            )));
        }
        Ok(Self {
            endianness,
            message_type,
            compressed,
            size: size as usize,
        })
    }

    /// The header as written on the wire.
    pub fn to_bytes(&self) -> [u8; HEADER_LENGTH] {
        let mut bytes = [0; HEADER_LENGTH];
        bytes[0] = self.endianness.flag();
        bytes[1] = self.message_type as u8;
        bytes[2] = self.compressed as u8;
        let size = self.size as i32;
        let size = match self.endianness {
            Endianness::Little => size.to_le_bytes(),
            Endianness::Big => size.to_be_bytes(),
        };
        bytes[4..].copy_from_slice(&size);
        bytes
    }

    /// The length of the body as declared by this header.
    #[inline]
    pub fn body_len(&self) -> usize {
        self.size - HEADER_LENGTH
    }
}

/// The body of a message: either a decoded value or, when read in raw mode, the
/// (decompressed) body bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageData {
    Value(Value),
    Raw(Vec<u8>),
}

/// A message read from a byte source.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub header: Header,
    pub data: MessageData,
}
