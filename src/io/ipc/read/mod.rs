//! APIs to read q IPC messages.
//!
//! [`read_message`] reads a single message from any [`std::io::Read`], while
//! [`StreamReader`] iterates over consecutive messages until the source is exhausted.
mod deserialize;
mod reader;
mod stream;

pub use deserialize::MAX_DEPTH;
pub use reader::{read_data, read_header, read_message};
pub use stream::StreamReader;

/// How temporal atoms and lists are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemporalMode {
    /// As raw offsets from the q epoch, e.g. [`crate::scalar::Atom::Date`]
    Raw,
    /// As calendar values, [`crate::scalar::Temporal`]
    Calendar,
}

impl Default for TemporalMode {
    fn default() -> Self {
        TemporalMode::Raw
    }
}

/// Options declaring the behaviour of reading messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ReadOptions {
    /// Whether to return the (decompressed) body bytes instead of decoding them
    pub raw: bool,
    pub temporals: TemporalMode,
}
