use std::io::Read;

use crate::error::{QError, Result};

#[cfg(feature = "io_ipc_compression")]
use super::super::compression::decompress_body;
use super::super::{Header, Message, MessageData, HEADER_LENGTH};
use super::deserialize::Deserializer;
use super::ReadOptions;

/// Reads a [`Header`] from `reader`.
/// # Errors
/// Iff `reader` ends before 8 bytes are read or the header is malformed.
pub fn read_header<R: Read>(reader: &mut R) -> Result<Header> {
    match read_header_bytes(reader)? {
        (bytes, HEADER_LENGTH) => Header::try_from_bytes(&bytes),
        (_, read) => Err(QError::MalformedHeader(format!(
            "the source ended after {} of {} header bytes",
            read, HEADER_LENGTH
        ))),
    }
}

/// Reads up to 8 bytes, returning them and how many were read.
pub(super) fn read_header_bytes<R: Read>(reader: &mut R) -> Result<([u8; HEADER_LENGTH], usize)> {
    let mut bytes = [0u8; HEADER_LENGTH];
    let mut read = 0;
    while read < HEADER_LENGTH {
        match reader.read(&mut bytes[read..]) {
            Ok(0) => break,
            Ok(n) => read += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok((bytes, read))
}

/// Reads the body declared by `header` from `reader` into `buffer`, replacing its contents.
pub(super) fn read_body<R: Read>(
    reader: &mut R,
    header: &Header,
    buffer: &mut Vec<u8>,
) -> Result<()> {
    let length = header.body_len();
    buffer.clear();
    reader.by_ref().take(length as u64).read_to_end(buffer)?;
    if buffer.len() < length {
        return Err(QError::eof(buffer.len(), length - buffer.len(), 0));
    }
    Ok(())
}

#[cfg(feature = "io_ipc_compression")]
fn decompress(header: &Header, body: &[u8]) -> Result<Vec<u8>> {
    decompress_body(body, header.endianness)
}

#[cfg(not(feature = "io_ipc_compression"))]
fn decompress(_header: &Header, _body: &[u8]) -> Result<Vec<u8>> {
    Err(QError::InvalidData(
        "The crate was compiled without IPC compression. Use `io_ipc_compression` to read compressed messages.".to_string(),
    ))
}

/// Decodes `body`, the body of a message with header `header`.
///
/// The body is decompressed when the header declares so; in raw mode, the decompressed
/// bytes are returned as is.
/// # Errors
/// Iff the body is corrupt, truncated or carries a q error ([`QError::Remote`]).
pub fn read_data(header: &Header, body: &[u8], options: &ReadOptions) -> Result<MessageData> {
    let decompressed;
    let body = if header.compressed {
        decompressed = decompress(header, body)?;
        log::debug!(
            "decompressed {} bytes into {} bytes",
            body.len(),
            decompressed.len()
        );
        decompressed.as_slice()
    } else {
        body
    };

    if options.raw {
        return Ok(MessageData::Raw(body.to_vec()));
    }

    let mut deserializer = Deserializer::new(body, *header, options.temporals);
    let value = deserializer.read_value()?;
    if deserializer.remaining() > 0 {
        log::warn!(
            "ignored {} bytes after the value ending at offset {}",
            deserializer.remaining(),
            deserializer.offset()
        );
    }
    Ok(MessageData::Value(value))
}

/// Reads one [`Message`] from `reader`.
/// # Errors
/// Iff the header is malformed, the source ends before the declared length, the body is
/// invalid, or the message carries a q error ([`QError::Remote`]).
pub fn read_message<R: Read>(reader: &mut R, options: &ReadOptions) -> Result<Message> {
    let header = read_header(reader)?;
    log::debug!("read header {:?}", header);
    let mut body = vec![];
    read_body(reader, &header, &mut body)?;
    let data = read_data(&header, &body, options)?;
    Ok(Message { header, data })
}
