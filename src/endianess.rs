//! Byte order of a q IPC message.
#[cfg(feature = "serde_types")]
use serde_derive::{Deserialize, Serialize};

/// The byte order declared by the first byte of every message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_types", derive(Serialize, Deserialize))]
pub enum Endianness {
    Big,
    Little,
}

impl Endianness {
    /// The byte order of the machine running this code.
    #[inline]
    pub fn native() -> Self {
        if is_native_little_endian() {
            Endianness::Little
        } else {
            Endianness::Big
        }
    }

    #[inline]
    pub fn is_little(&self) -> bool {
        matches!(self, Endianness::Little)
    }

    /// The value of the header flag byte.
    #[inline]
    pub fn flag(&self) -> u8 {
        match self {
            Endianness::Big => 0,
            Endianness::Little => 1,
        }
    }
}

impl Default for Endianness {
    /// q processes on every supported platform write little endian.
    fn default() -> Self {
        Endianness::Little
    }
}

#[inline]
pub fn is_native_little_endian() -> bool {
    cfg!(target_endian = "little")
}
