//! Home of [`StrArray`], the fixed-length string type of `str[N]` configurables.

use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};
use core::fmt::{self, Display, Formatter};

use serde::{de::Error as SerdeError, Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    codec::{self, FromBytes, ToBytes},
    ConfigType, TypeMismatch, Typed,
};

/// A fixed-length ASCII string of exactly `N` characters, the value of a `str[N]` configurable.
///
/// Construction goes through the fallible conversions from `&str` or `String`, which reject
/// input of the wrong length or containing non-ASCII characters. This mirrors the source
/// language, where a string literal has to be passed through a conversion built-in before it can
/// initialize a `str[N]` constant.
#[derive(Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct StrArray<const N: usize>(String);

impl<const N: usize> StrArray<N> {
    /// Returns the string slice held.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the declared character count, `N`.
    pub const fn len() -> usize {
        N
    }
}

impl<const N: usize> TryFrom<&str> for StrArray<N> {
    type Error = TypeMismatch;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.len() != N || !value.is_ascii() {
            return Err(TypeMismatch::new(
                format!("str[{}]", N),
                format!("{:?}", value),
            ));
        }
        Ok(StrArray(value.to_string()))
    }
}

impl<const N: usize> TryFrom<String> for StrArray<N> {
    type Error = TypeMismatch;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StrArray::try_from(value.as_str())
    }
}

impl<const N: usize> Display for StrArray<N> {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl<const N: usize> Typed for StrArray<N> {
    fn config_type() -> ConfigType {
        ConfigType::StrArray(N as u64)
    }
}

impl<const N: usize> ToBytes for StrArray<N> {
    fn serialized_length(&self) -> usize {
        codec::padded_len(N)
    }

    fn write_bytes(&self, writer: &mut Vec<u8>) -> Result<(), codec::Error> {
        codec::write_padded(self.0.as_bytes(), writer);
        Ok(())
    }
}

impl<const N: usize> FromBytes for StrArray<N> {
    fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), codec::Error> {
        let (value, remainder) = codec::read_padded(bytes, N)?;
        if !value.is_ascii() {
            return Err(codec::Error::Formatting);
        }
        let string = core::str::from_utf8(value).map_err(|_| codec::Error::Formatting)?;
        Ok((StrArray(string.to_string()), remainder))
    }
}

impl<const N: usize> Serialize for StrArray<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, const N: usize> Deserialize<'de> for StrArray<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let string = String::deserialize(deserializer)?;
        StrArray::try_from(string).map_err(D::Error::custom)
    }
}
