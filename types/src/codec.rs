//! Serialization of configurable values into their data-section representation.
//!
//! The target VM is word addressed: every data-section entry occupies a whole number of 8-byte
//! words, integers are stored big-endian within their words, and entries shorter than a word
//! boundary are zero-padded up to it. Narrow integers (`u8` through `u32`) are widened to a full
//! word before encoding.

use alloc::vec::Vec;
use core::{
    fmt::{self, Display, Formatter},
    ops::Deref,
};

use serde::{Deserialize, Serialize};

/// The number of bytes in a VM word.
pub const WORD_SIZE: usize = 8;

/// Returns `len` rounded up to the next word boundary.
pub const fn padded_len(len: usize) -> usize {
    (len + WORD_SIZE - 1) & !(WORD_SIZE - 1)
}

/// Serialization and deserialization errors.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Error {
    /// Early end of stream while deserializing.
    EarlyEndOfStream,
    /// Data of a well-formed length did not decode to a value of the requested type.
    Formatting,
    /// Leftover bytes remained after deserializing the full value.
    LeftOverBytes,
}

impl Display for Error {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match self {
            Error::EarlyEndOfStream => {
                formatter.write_str("deserialization error: early end of stream")
            }
            Error::Formatting => formatter.write_str("deserialization error: formatting"),
            Error::LeftOverBytes => formatter.write_str("deserialization error: leftover bytes"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// A type which can be serialized to a `Vec<u8>` in data-section representation.
pub trait ToBytes {
    /// Serializes `&self` into a new buffer.
    fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut result = Vec::with_capacity(self.serialized_length());
        self.write_bytes(&mut result)?;
        Ok(result)
    }

    /// Returns the length of the buffer `to_bytes` would produce, without serializing.
    fn serialized_length(&self) -> usize;

    /// Writes `&self` onto the end of `writer`.
    fn write_bytes(&self, writer: &mut Vec<u8>) -> Result<(), Error>;
}

/// A type which can be deserialized from a `&[u8]` in data-section representation.
pub trait FromBytes: Sized {
    /// Deserializes the slice into `Self`, returning the unconsumed remainder.
    fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), Error>;
}

/// Deserializes `bytes` into an instance of `T`, failing if any input is left over.
pub fn deserialize_from_slice<T: FromBytes>(bytes: &[u8]) -> Result<T, Error> {
    let (t, remainder) = T::from_bytes(bytes)?;
    if remainder.is_empty() {
        Ok(t)
    } else {
        Err(Error::LeftOverBytes)
    }
}

/// Splits `bytes` at `index`, failing with [`Error::EarlyEndOfStream`] instead of panicking when
/// the slice is too short.
pub fn safe_split_at(bytes: &[u8], index: usize) -> Result<(&[u8], &[u8]), Error> {
    if index > bytes.len() {
        Err(Error::EarlyEndOfStream)
    } else {
        Ok(bytes.split_at(index))
    }
}

/// Reads a `len`-byte entry plus its zero padding up to the next word boundary, returning the
/// entry and the unconsumed remainder. Non-zero padding is a formatting error.
pub fn read_padded(bytes: &[u8], len: usize) -> Result<(&[u8], &[u8]), Error> {
    let (entry, remainder) = safe_split_at(bytes, padded_len(len))?;
    let (value, padding) = entry.split_at(len);
    if padding.iter().any(|byte| *byte != 0) {
        return Err(Error::Formatting);
    }
    Ok((value, remainder))
}

/// Appends `bytes` to `writer` followed by zero padding up to the next word boundary.
pub fn write_padded(bytes: &[u8], writer: &mut Vec<u8>) {
    writer.extend_from_slice(bytes);
    for _ in bytes.len()..padded_len(bytes.len()) {
        writer.push(0);
    }
}

pub(crate) fn read_word(bytes: &[u8]) -> Result<(u64, &[u8]), Error> {
    let (word, remainder) = safe_split_at(bytes, WORD_SIZE)?;
    let mut array = [0u8; WORD_SIZE];
    array.copy_from_slice(word);
    Ok((u64::from_be_bytes(array), remainder))
}

impl ToBytes for bool {
    fn serialized_length(&self) -> usize {
        WORD_SIZE
    }

    fn write_bytes(&self, writer: &mut Vec<u8>) -> Result<(), Error> {
        writer.extend_from_slice(&u64::from(*self).to_be_bytes());
        Ok(())
    }
}

impl FromBytes for bool {
    fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), Error> {
        let (word, remainder) = read_word(bytes)?;
        match word {
            0 => Ok((false, remainder)),
            1 => Ok((true, remainder)),
            _ => Err(Error::Formatting),
        }
    }
}

macro_rules! impl_to_from_bytes_for_word_int {
    ($($type:ty)+) => {
        $(
            impl ToBytes for $type {
                fn serialized_length(&self) -> usize {
                    WORD_SIZE
                }

                fn write_bytes(&self, writer: &mut Vec<u8>) -> Result<(), Error> {
                    writer.extend_from_slice(&u64::from(*self).to_be_bytes());
                    Ok(())
                }
            }

            impl FromBytes for $type {
                fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), Error> {
                    let (word, remainder) = read_word(bytes)?;
                    let value = <$type>::try_from(word).map_err(|_| Error::Formatting)?;
                    Ok((value, remainder))
                }
            }
        )+
    };
}

impl_to_from_bytes_for_word_int!(u8 u16 u32 u64);

macro_rules! impl_to_from_bytes_for_tuple {
    ($($type:ident $var:ident),+) => {
        impl<$($type: ToBytes),+> ToBytes for ($($type,)+) {
            fn serialized_length(&self) -> usize {
                let ($($var,)+) = self;
                0 $(+ $var.serialized_length())+
            }

            fn write_bytes(&self, writer: &mut Vec<u8>) -> Result<(), Error> {
                let ($($var,)+) = self;
                $($var.write_bytes(writer)?;)+
                Ok(())
            }
        }

        impl<$($type: FromBytes),+> FromBytes for ($($type,)+) {
            fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), Error> {
                let remainder = bytes;
                $(let ($var, remainder) = $type::from_bytes(remainder)?;)+
                Ok((($($var,)+), remainder))
            }
        }
    };
}

impl_to_from_bytes_for_tuple!(T1 t1);
impl_to_from_bytes_for_tuple!(T1 t1, T2 t2);
impl_to_from_bytes_for_tuple!(T1 t1, T2 t2, T3 t3);
impl_to_from_bytes_for_tuple!(T1 t1, T2 t2, T3 t3, T4 t4);
impl_to_from_bytes_for_tuple!(T1 t1, T2 t2, T3 t3, T4 t4, T5 t5);
impl_to_from_bytes_for_tuple!(T1 t1, T2 t2, T3 t3, T4 t4, T5 t5, T6 t6);
impl_to_from_bytes_for_tuple!(T1 t1, T2 t2, T3 t3, T4 t4, T5 t5, T6 t6, T7 t7);
impl_to_from_bytes_for_tuple!(T1 t1, T2 t2, T3 t3, T4 t4, T5 t5, T6 t6, T7 t7, T8 t8);
impl_to_from_bytes_for_tuple!(T1 t1, T2 t2, T3 t3, T4 t4, T5 t5, T6 t6, T7 t7, T8 t8, T9 t9);
impl_to_from_bytes_for_tuple!(
    T1 t1, T2 t2, T3 t3, T4 t4, T5 t5, T6 t6, T7 t7, T8 t8, T9 t9, T10 t10
);

/// A newtype wrapper for the raw bytes backing a resolved value.
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Default, Hash)]
pub struct Bytes(Vec<u8>);

impl Bytes {
    /// Constructs a new, empty `Bytes`.
    pub fn new() -> Bytes {
        Bytes::default()
    }

    /// Returns a reference to the inner container.
    #[inline]
    pub fn inner_bytes(&self) -> &Vec<u8> {
        &self.0
    }

    /// Extracts a slice containing the entire vector.
    pub fn as_slice(&self) -> &[u8] {
        self
    }

    /// Returns the number of bytes held.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no bytes are held.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Deref for Bytes {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.0.deref()
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(vec: Vec<u8>) -> Self {
        Self(vec)
    }
}

impl From<&[u8]> for Bytes {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<Bytes> for Vec<u8> {
    fn from(bytes: Bytes) -> Self {
        bytes.0
    }
}

/// Asserts that `t` can be serialized and deserialized back to an equal value, and that the
/// reported `serialized_length` matches the produced buffer.
pub fn test_codec_roundtrip<T>(t: &T)
where
    T: ToBytes + FromBytes + PartialEq + core::fmt::Debug,
{
    let serialized = t.to_bytes().expect("should serialize");
    assert_eq!(serialized.len(), t.serialized_length());
    let deserialized: T = deserialize_from_slice(&serialized).expect("should deserialize");
    assert_eq!(t, &deserialized);
}
