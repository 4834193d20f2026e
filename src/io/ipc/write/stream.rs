use std::io::Write;

use crate::error::Result;
use crate::value::Value;

use super::super::MessageType;
use super::{write_error, write_message, WriteOptions};

/// Writer of consecutive messages to a byte sink.
pub struct StreamWriter<W: Write> {
    /// The object to write to
    writer: W,
    /// IPC write options
    options: WriteOptions,
}

impl<W: Write> StreamWriter<W> {
    /// Creates a new [`StreamWriter`]
    pub fn new(writer: W, options: WriteOptions) -> Self {
        Self { writer, options }
    }

    /// Writes `value` as a message of type `message_type`
    pub fn write(&mut self, value: &Value, message_type: MessageType) -> Result<()> {
        write_message(&mut self.writer, value, message_type, &self.options)?;
        Ok(())
    }

    /// Writes a q error response carrying `message`
    pub fn write_error(&mut self, message: &str) -> Result<()> {
        write_error(&mut self.writer, message, &self.options)?;
        Ok(())
    }

    /// Flushes the inner writer
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    /// Consumes itself, returning the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
