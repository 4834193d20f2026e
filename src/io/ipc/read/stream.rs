use std::io::Read;

use crate::error::{QError, Result};

use super::super::{Header, Message, HEADER_LENGTH};
use super::reader::{read_body, read_header_bytes};
use super::{read_data, ReadOptions};

/// Reader of consecutive messages from a byte source, e.g. the responses of a connection.
///
/// The iterator ends when the source is exhausted at a message boundary; a source ending
/// inside a message is an error. The buffer holding message bodies is reused.
pub struct StreamReader<R: Read> {
    reader: R,
    options: ReadOptions,
    buffer: Vec<u8>,
    finished: bool,
}

impl<R: Read> StreamReader<R> {
    /// Creates a new [`StreamReader`]
    pub fn new(reader: R, options: ReadOptions) -> Self {
        Self {
            reader,
            options,
            buffer: vec![],
            finished: false,
        }
    }

    /// Whether the end of the stream was reached
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Consumes itself, returning the inner reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn maybe_next(&mut self) -> Result<Option<Message>> {
        if self.finished {
            return Ok(None);
        }
        let header = match read_header_bytes(&mut self.reader)? {
            (_, 0) => {
                self.finished = true;
                return Ok(None);
            }
            (bytes, HEADER_LENGTH) => Header::try_from_bytes(&bytes)?,
            (_, read) => {
                self.finished = true;
                return Err(QError::MalformedHeader(format!(
                    "the stream ended after {} of {} header bytes",
                    read, HEADER_LENGTH
                )));
            }
        };
        log::debug!("read header {:?}", header);

        read_body(&mut self.reader, &header, &mut self.buffer)?;
        let data = read_data(&header, &self.buffer, &self.options)?;
        Ok(Some(Message { header, data }))
    }
}

impl<R: Read> Iterator for StreamReader<R> {
    type Item = Result<Message>;

    fn next(&mut self) -> Option<Self::Item> {
        self.maybe_next().transpose()
    }
}
