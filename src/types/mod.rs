//! Traits and implementations of the fixed-width physical types of the q wire format.
//!
//! The most important trait is [`NativeType`], implemented by every Rust type that a q
//! primitive is stored as (e.g. `i32` for ints, months, dates, minutes, seconds and times).
use std::convert::TryFrom;

use crate::endianess::Endianness;

mod private {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for i16 {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Sealed trait implemented by all fixed-width types that can be
/// serialized and deserialized by this crate.
pub trait NativeType:
    private::Sealed
    + Send
    + Sync
    + Sized
    + Copy
    + std::fmt::Debug
    + std::fmt::Display
    + PartialEq
    + Default
    + 'static
{
    /// Type denoting its representation as bytes.
    /// This must be `[u8; N]` where `N = size_of::<T>`.
    type Bytes: AsRef<[u8]>
        + std::ops::Index<usize, Output = u8>
        + std::ops::IndexMut<usize, Output = u8>
        + for<'a> TryFrom<&'a [u8]>
        + std::fmt::Debug;

    /// To bytes in little endian
    fn to_le_bytes(&self) -> Self::Bytes;

    /// To bytes in big endian
    fn to_be_bytes(&self) -> Self::Bytes;

    /// From bytes in little endian
    fn from_le_bytes(bytes: Self::Bytes) -> Self;

    /// From bytes in big endian
    fn from_be_bytes(bytes: Self::Bytes) -> Self;

    /// Decodes `Self` from exactly `size_of::<Self>()` bytes.
    /// # Panics
    /// Iff `bytes.len() != size_of::<Self>()`.
    #[inline]
    fn decode(bytes: &[u8], endianness: Endianness) -> Self {
        let bytes = match Self::Bytes::try_from(bytes) {
            Ok(bytes) => bytes,
            Err(_) => unreachable!(),
        };
        match endianness {
            Endianness::Little => Self::from_le_bytes(bytes),
            Endianness::Big => Self::from_be_bytes(bytes),
        }
    }

    /// Appends the bytes of `self` to `buffer`.
    #[inline]
    fn encode(&self, buffer: &mut Vec<u8>, endianness: Endianness) {
        match endianness {
            Endianness::Little => buffer.extend_from_slice(self.to_le_bytes().as_ref()),
            Endianness::Big => buffer.extend_from_slice(self.to_be_bytes().as_ref()),
        }
    }
}

macro_rules! native {
    ($type:ty) => {
        impl NativeType for $type {
            type Bytes = [u8; std::mem::size_of::<Self>()];
            #[inline]
            fn to_le_bytes(&self) -> Self::Bytes {
                Self::to_le_bytes(*self)
            }

            #[inline]
            fn to_be_bytes(&self) -> Self::Bytes {
                Self::to_be_bytes(*self)
            }

            #[inline]
            fn from_le_bytes(bytes: Self::Bytes) -> Self {
                Self::from_le_bytes(bytes)
            }

            #[inline]
            fn from_be_bytes(bytes: Self::Bytes) -> Self {
                Self::from_be_bytes(bytes)
            }
        }
    };
}

native!(u8);
native!(i16);
native!(i32);
native!(i64);
native!(f32);
native!(f64);
