use std::io::Write;

use crate::error::{QError, Result};
use crate::value::Value;

#[cfg(feature = "io_ipc_compression")]
use super::super::compression::compress_body;
use crate::endianess::Endianness;
use super::super::{Header, MessageType, HEADER_LENGTH};
use super::serialize::Serializer;
use super::{Compression, WriteOptions};

/// Serializes `value` into a complete message (header and body).
/// # Errors
/// Iff `value` (or any value nested in it) has no wire representation.
pub fn serialize(value: &Value, message_type: MessageType, options: &WriteOptions) -> Result<Vec<u8>> {
    check_compression(options)?;
    let serializer = Serializer::new(options);
    let body_len = serializer.encoded_len(value)?;
    let size = HEADER_LENGTH + body_len;
    check_size(size)?;

    let mut buffer = Vec::with_capacity(size);
    buffer.extend_from_slice(&[0; HEADER_LENGTH]);
    serializer.write(value, &mut buffer)?;
    debug_assert_eq!(buffer.len(), size);

    Ok(finish(buffer, message_type, options))
}

/// Serializes a q error carrying `message` into a complete response message.
/// # Errors
/// Iff `message` contains a NUL byte.
pub fn serialize_error(message: &str, options: &WriteOptions) -> Result<Vec<u8>> {
    check_compression(options)?;
    if message.as_bytes().contains(&0) {
        return Err(QError::UnsupportedValue(
            "an error message containing NUL".to_string(),
        ));
    }
    let size = HEADER_LENGTH + 1 + message.len() + 1;
    check_size(size)?;

    let mut buffer = Vec::with_capacity(size);
    buffer.extend_from_slice(&[0; HEADER_LENGTH]);
    buffer.push(crate::datatypes::TypeCode::Error.to_i8() as u8);
    buffer.extend_from_slice(message.as_bytes());
    buffer.push(0);

    Ok(finish(buffer, MessageType::Response, options))
}

/// Writes `value` as a message to `writer`, returning the number of bytes written.
pub fn write_message<W: Write>(
    writer: &mut W,
    value: &Value,
    message_type: MessageType,
    options: &WriteOptions,
) -> Result<usize> {
    let bytes = serialize(value, message_type, options)?;
    writer.write_all(&bytes)?;
    Ok(bytes.len())
}

/// Writes a q error carrying `message` to `writer`, returning the number of bytes written.
pub fn write_error<W: Write>(writer: &mut W, message: &str, options: &WriteOptions) -> Result<usize> {
    let bytes = serialize_error(message, options)?;
    writer.write_all(&bytes)?;
    Ok(bytes.len())
}

fn check_size(size: usize) -> Result<()> {
    if size > i32::MAX as usize {
        return Err(QError::UnsupportedValue(format!(
            "a message of {} bytes is longer than the maximum message length",
            size
        )));
    }
    Ok(())
}

#[cfg(feature = "io_ipc_compression")]
fn check_compression(_options: &WriteOptions) -> Result<()> {
    Ok(())
}

#[cfg(not(feature = "io_ipc_compression"))]
fn check_compression(options: &WriteOptions) -> Result<()> {
    match options.compression {
        Compression::Never => Ok(()),
        Compression::Threshold(_) => Err(QError::InvalidArgument(
            "The crate was compiled without IPC compression. Use `io_ipc_compression` to write compressed messages.".to_string(),
        )),
    }
}

#[cfg(feature = "io_ipc_compression")]
#[inline]
fn compress(body: &[u8], endianness: Endianness, limit: usize) -> Option<Vec<u8>> {
    compress_body(body, endianness, Some(limit))
}

#[cfg(not(feature = "io_ipc_compression"))]
#[inline]
fn compress(_body: &[u8], _endianness: Endianness, _limit: usize) -> Option<Vec<u8>> {
    None
}

/// Writes the header into `buffer`, a message with a placeholder header, compressing the
/// message when the options require it and compression pays off.
fn finish(mut buffer: Vec<u8>, message_type: MessageType, options: &WriteOptions) -> Vec<u8> {
    let size = buffer.len();
    let mut header = Header {
        endianness: options.endianness,
        message_type,
        compressed: false,
        size,
    };

    if let Compression::Threshold(threshold) = options.compression {
        if size > threshold {
            let half = size / 2;
            match compress(&buffer[HEADER_LENGTH..], options.endianness, half) {
                Some(compressed) if HEADER_LENGTH + compressed.len() < half => {
                    log::debug!(
                        "compressed a message of {} bytes into {} bytes",
                        size,
                        HEADER_LENGTH + compressed.len()
                    );
                    header.compressed = true;
                    header.size = HEADER_LENGTH + compressed.len();
                    let mut message = Vec::with_capacity(header.size);
                    message.extend_from_slice(&header.to_bytes());
                    message.extend_from_slice(&compressed);
                    return message;
                }
                _ => log::debug!(
                    "a message of {} bytes was not compressed: the result would exceed half its size",
                    size
                ),
            }
        }
    }

    buffer[..HEADER_LENGTH].copy_from_slice(&header.to_bytes());
    log::debug!("serialized {:?}", header);
    buffer
}
