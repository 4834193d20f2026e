use crate::endianess::Endianness;

/// Messages longer than this are compressed by q processes, see [`Compression::Threshold`].
pub const DEFAULT_COMPRESSION_THRESHOLD: usize = 2000;

/// Whether messages are compressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compression {
    /// Never compress
    Never,
    /// Compress messages longer than this many bytes (header included). The compressed
    /// form is only sent when it is shorter than half of the uncompressed message.
    ///
    /// Note: to use compression the crate must be compiled with feature `io_ipc_compression`.
    Threshold(usize),
}

impl Default for Compression {
    fn default() -> Self {
        Compression::Never
    }
}

/// Options declaring the behaviour of writing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WriteOptions {
    /// Whether one-character [`crate::value::Value::Text`] is written as a char list
    /// (`enlist "a"`) instead of a char atom (`"a"`).
    pub single_char_strings: bool,
    pub compression: Compression,
    /// The byte order of the messages. Little endian by default.
    pub endianness: Endianness,
}
