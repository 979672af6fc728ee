//! Home of the 256-bit unsigned integer used by `u256` configurables.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

use serde::{
    de::{Error as SerdeError, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{
    codec::{self, FromBytes, ToBytes},
    ConfigType, Typed,
};

/// The number of bytes in the data-section representation of a [`U256`].
pub const U256_SERIALIZED_LENGTH: usize = 32;

uint::construct_uint! {
    /// 256-bit unsigned integer.
    pub struct U256(4);
}

impl Typed for U256 {
    fn config_type() -> ConfigType {
        ConfigType::U256
    }
}

impl ToBytes for U256 {
    fn serialized_length(&self) -> usize {
        U256_SERIALIZED_LENGTH
    }

    fn write_bytes(&self, writer: &mut Vec<u8>) -> Result<(), codec::Error> {
        let mut bytes = [0u8; U256_SERIALIZED_LENGTH];
        self.to_big_endian(&mut bytes);
        writer.extend_from_slice(&bytes);
        Ok(())
    }
}

impl FromBytes for U256 {
    fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), codec::Error> {
        let (big_endian, remainder) = codec::safe_split_at(bytes, U256_SERIALIZED_LENGTH)?;
        Ok((U256::from_big_endian(big_endian), remainder))
    }
}

impl Serialize for U256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            return serializer.serialize_str(&self.to_string());
        }
        let mut bytes = [0u8; U256_SERIALIZED_LENGTH];
        self.to_big_endian(&mut bytes);
        serializer.serialize_bytes(&bytes)
    }
}

impl<'de> Deserialize<'de> for U256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let decimal = String::deserialize(deserializer)?;
            return U256::from_dec_str(&decimal).map_err(D::Error::custom);
        }
        deserializer.deserialize_bytes(U256BytesVisitor)
    }
}

struct U256BytesVisitor;

impl Visitor<'_> for U256BytesVisitor {
    type Value = U256;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "at most {} big-endian bytes", U256_SERIALIZED_LENGTH)
    }

    fn visit_bytes<E: SerdeError>(self, bytes: &[u8]) -> Result<Self::Value, E> {
        if bytes.len() > U256_SERIALIZED_LENGTH {
            return Err(E::invalid_length(bytes.len(), &self));
        }
        Ok(U256::from_big_endian(bytes))
    }

    fn visit_byte_buf<E: SerdeError>(self, bytes: Vec<u8>) -> Result<Self::Value, E> {
        self.visit_bytes(&bytes)
    }
}
