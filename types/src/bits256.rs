//! Home of [`Bits256`], the 256-bit byte array type of `b256` configurables.

use alloc::{string::String, vec::Vec};
use core::fmt::{self, Debug, Display, Formatter};

use serde::{de::Error as SerdeError, Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    codec::{self, FromBytes, ToBytes},
    ConfigType, TypeMismatch, Typed,
};

/// The number of bytes in a [`Bits256`].
pub const BITS256_LENGTH: usize = 32;

/// A fixed-size 256-bit byte array, the value of a `b256` configurable.
#[derive(Copy, Clone, Default, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Bits256(pub [u8; BITS256_LENGTH]);

impl Bits256 {
    /// Constructs a new `Bits256` with all bytes zeroed.
    pub const fn zeroed() -> Self {
        Bits256([0; BITS256_LENGTH])
    }

    /// Returns the underlying byte array.
    pub fn value(&self) -> [u8; BITS256_LENGTH] {
        self.0
    }

    /// Returns the bytes as a slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Parses a `Bits256` from a lower-case hex string of exactly 64 characters.
    pub fn from_hex(input: &str) -> Result<Self, TypeMismatch> {
        let bytes = base16::decode(input)
            .map_err(|_| TypeMismatch::new(String::from("b256"), String::from(input)))?;
        Bits256::try_from(bytes.as_slice())
    }
}

impl From<[u8; BITS256_LENGTH]> for Bits256 {
    fn from(array: [u8; BITS256_LENGTH]) -> Self {
        Bits256(array)
    }
}

impl TryFrom<&[u8]> for Bits256 {
    type Error = TypeMismatch;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; BITS256_LENGTH]>::try_from(bytes).map(Bits256).map_err(|_| {
            TypeMismatch::new(
                String::from("b256"),
                alloc::format!("byte array of length {}", bytes.len()),
            )
        })
    }
}

impl Display for Bits256 {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "0x{}", base16::encode_lower(&self.0))
    }
}

impl Debug for Bits256 {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "Bits256({})", self)
    }
}

impl Typed for Bits256 {
    fn config_type() -> ConfigType {
        ConfigType::B256
    }
}

impl ToBytes for Bits256 {
    fn serialized_length(&self) -> usize {
        BITS256_LENGTH
    }

    fn write_bytes(&self, writer: &mut Vec<u8>) -> Result<(), codec::Error> {
        writer.extend_from_slice(&self.0);
        Ok(())
    }
}

impl FromBytes for Bits256 {
    fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), codec::Error> {
        let (array, remainder) = codec::safe_split_at(bytes, BITS256_LENGTH)?;
        let mut value = [0u8; BITS256_LENGTH];
        value.copy_from_slice(array);
        Ok((Bits256(value), remainder))
    }
}

impl Serialize for Bits256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            base16::encode_lower(&self.0).serialize(serializer)
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Bits256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let hex = String::deserialize(deserializer)?;
            Bits256::from_hex(&hex).map_err(D::Error::custom)
        } else {
            <[u8; BITS256_LENGTH]>::deserialize(deserializer).map(Bits256)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_roundtrip() {
        codec::test_codec_roundtrip(&Bits256([1; BITS256_LENGTH]));
        codec::test_codec_roundtrip(&Bits256::zeroed());
    }

    #[test]
    fn should_display_as_hex() {
        let bits = Bits256([0xab; BITS256_LENGTH]);
        assert_eq!(bits.to_string(), alloc::format!("0x{}", "ab".repeat(32)));
    }

    #[test]
    fn hex_parsing_should_enforce_length() {
        let hex = "01".repeat(32);
        assert_eq!(Bits256::from_hex(&hex).unwrap(), Bits256([1; BITS256_LENGTH]));
        assert!(Bits256::from_hex("0101").is_err());
        assert!(Bits256::from_hex("not hex").is_err());
    }

    #[test]
    fn json_roundtrip() {
        let bits = Bits256([7; BITS256_LENGTH]);
        let json = serde_json::to_string(&bits).unwrap();
        let decoded: Bits256 = serde_json::from_str(&json).unwrap();
        assert_eq!(bits, decoded);
    }
}
