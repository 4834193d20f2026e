//! Defines [`QError`] for representing failures while reading or writing q IPC messages.
use std::fmt::{Debug, Display, Formatter};

use std::error::Error;

use crate::io::ipc::Header;

/// Every operation of this crate that can fail returns this error type.
#[derive(Debug)]
pub enum QError {
    /// The 8-byte message header is missing, truncated or carries an unsupported flag.
    MalformedHeader(String),
    /// The body ended before a value was complete.
    UnexpectedEndOfInput {
        /// Offset in the body at which more bytes were needed
        offset: usize,
        /// Number of bytes that were needed
        needed: usize,
        /// Number of bytes that were left
        remaining: usize,
    },
    /// A type tag that has no wire representation.
    UnknownType {
        /// The offending tag
        code: i8,
        /// Offset of the tag in the body
        offset: usize,
    },
    /// A compressed body whose back-references are invalid.
    CorruptCompressedBody {
        /// Offset in the compressed stream
        offset: usize,
        reason: String,
    },
    /// Dictionary keys and values (or table names and columns) of different lengths.
    LengthMismatch { keys: usize, values: usize },
    /// A table column whose length differs from the first column.
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
    /// A keyed table whose key and value tables have different row counts.
    RowCountMismatch { keys: usize, values: usize },
    /// A value that has no wire representation.
    UnsupportedValue(String),
    /// The message decoded successfully and carries a q error (`'type`, `'length`, ...).
    Remote {
        message: String,
        /// The header of the message that carried the error
        header: Header,
    },
    /// The payload is structurally invalid (negative counts, bad attributes, ...).
    InvalidData(String),
    InvalidArgument(String),
    /// A temporal value outside of the range representable by either side.
    OutOfRange(String),
    Io(std::io::Error),
}

impl QError {
    /// Whether this error is a q error returned by the remote process, as opposed to a
    /// failure of this codec.
    pub fn is_remote(&self) -> bool {
        matches!(self, QError::Remote { .. })
    }

    pub(crate) fn eof(offset: usize, needed: usize, remaining: usize) -> Self {
        QError::UnexpectedEndOfInput {
            offset,
            needed,
            remaining,
        }
    }

    pub(crate) fn corrupt(offset: usize, reason: &str) -> Self {
        QError::CorruptCompressedBody {
            offset,
            reason: reason.to_string(),
        }
    }
}

impl From<::std::io::Error> for QError {
    fn from(error: std::io::Error) -> Self {
        QError::Io(error)
    }
}

impl Display for QError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            QError::MalformedHeader(desc) => write!(f, "Malformed header: {}", desc),
            QError::UnexpectedEndOfInput {
                offset,
                needed,
                remaining,
            } => write!(
                f,
                "Unexpected end of input at offset {}: {} bytes needed, {} remaining",
                offset, needed, remaining
            ),
            QError::UnknownType { code, offset } => {
                write!(f, "Unknown type {} at offset {}", code, offset)
            }
            QError::CorruptCompressedBody { offset, reason } => {
                write!(f, "Corrupt compressed body at offset {}: {}", offset, reason)
            }
            QError::LengthMismatch { keys, values } => write!(
                f,
                "Length mismatch: {} keys but {} values",
                keys, values
            ),
            QError::ColumnLengthMismatch {
                column,
                expected,
                actual,
            } => write!(
                f,
                "Column \"{}\" has {} rows but the table has {}",
                column, actual, expected
            ),
            QError::RowCountMismatch { keys, values } => write!(
                f,
                "Keyed table mismatch: {} key rows but {} value rows",
                keys, values
            ),
            QError::UnsupportedValue(desc) => write!(f, "Unsupported value: {}", desc),
            QError::Remote { message, .. } => write!(f, "'{}", message),
            QError::InvalidData(desc) => write!(f, "Invalid data: {}", desc),
            QError::InvalidArgument(desc) => write!(f, "Invalid argument error: {}", desc),
            QError::OutOfRange(desc) => write!(f, "Out of range: {}", desc),
            QError::Io(desc) => write!(f, "Io error: {}", desc),
        }
    }
}

impl Error for QError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            QError::Io(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, QError>;
