//! Home of [`ConfigValue`], a resolved configurable constant.

use alloc::{string::String, vec::Vec};
use core::fmt::{self, Display, Formatter};

use serde::{de::Error as SerdeError, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::{
    codec::{self, Bytes, FromBytes, ToBytes},
    ConfigType, Typed,
};

mod jsonrepr;

/// Error while converting a [`ConfigValue`] into a given type.
#[derive(PartialEq, Eq, Clone, Debug, Serialize, Deserialize)]
pub struct ConfigTypeMismatch {
    /// The [`ConfigType`] into which the `ConfigValue` was being converted.
    pub expected: ConfigType,
    /// The actual underlying [`ConfigType`] of this `ConfigValue`, i.e. the type from which it
    /// was constructed.
    pub found: ConfigType,
}

impl Display for ConfigTypeMismatch {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(
            formatter,
            "expected {} but found {}",
            self.expected, self.found
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigTypeMismatch {}

/// Error relating to [`ConfigValue`] operations.
#[derive(PartialEq, Eq, Clone, Debug, Serialize, Deserialize)]
pub enum ValueError {
    /// An error while serializing or deserializing the underlying data.
    Serialization(codec::Error),
    /// A type mismatch while trying to convert a [`ConfigValue`] into a given type.
    Type(ConfigTypeMismatch),
}

impl From<codec::Error> for ValueError {
    fn from(error: codec::Error) -> Self {
        ValueError::Serialization(error)
    }
}

impl From<ConfigTypeMismatch> for ValueError {
    fn from(error: ConfigTypeMismatch) -> Self {
        ValueError::Type(error)
    }
}

impl Display for ValueError {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match self {
            ValueError::Serialization(error) => write!(formatter, "value error: {}", error),
            ValueError::Type(error) => write!(formatter, "type mismatch: {}", error),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ValueError {}

/// A resolved configurable constant.
///
/// It holds the underlying data as a type-erased `Vec<u8>` in data-section representation, and
/// also holds the [`ConfigType`] of the underlying data as a separate member.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Debug)]
pub struct ConfigValue {
    ty: ConfigType,
    bytes: Bytes,
}

impl ConfigValue {
    /// Constructs a `ConfigValue` from `t`.
    pub fn from_t<T: Typed + ToBytes>(t: T) -> Result<ConfigValue, ValueError> {
        let bytes = t.to_bytes()?;

        Ok(ConfigValue {
            ty: T::config_type(),
            bytes: bytes.into(),
        })
    }

    /// Consumes and converts `self` back into its underlying type.
    pub fn into_t<T: Typed + FromBytes>(self) -> Result<T, ValueError> {
        let expected = T::config_type();

        if self.ty == expected {
            Ok(codec::deserialize_from_slice(&self.bytes)?)
        } else {
            Err(ValueError::Type(ConfigTypeMismatch {
                expected,
                found: self.ty,
            }))
        }
    }

    /// Converts `self` into its underlying type without consuming it.
    pub fn to_t<T: Typed + FromBytes>(&self) -> Result<T, ValueError> {
        self.clone().into_t()
    }

    /// Constructs a `ConfigValue` from already-encoded parts.
    ///
    /// The caller is responsible for `bytes` actually being the data-section representation of
    /// a value of type `ty`.
    pub fn from_parts(ty: ConfigType, bytes: Vec<u8>) -> Self {
        Self {
            ty,
            bytes: bytes.into(),
        }
    }

    /// Consumes `self`, returning its parts.
    pub fn destructure(self) -> (ConfigType, Bytes) {
        (self.ty, self.bytes)
    }

    /// The [`ConfigType`] of the underlying data.
    pub fn ty(&self) -> &ConfigType {
        &self.ty
    }

    /// Returns a reference to the data-section representation of the underlying value.
    pub fn inner_bytes(&self) -> &Vec<u8> {
        self.bytes.inner_bytes()
    }

    /// Returns the number of bytes the value occupies in the data section.
    pub fn serialized_length(&self) -> usize {
        self.bytes.len()
    }
}

/// The human-readable form of a [`ConfigValue`].
///
/// The `parsed` field, representing the original value, is a convenience only available when a
/// `ConfigValue` is encoded to JSON, and can always be set to null if preferred.
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigValueJson {
    ty: ConfigType,
    bytes: String,
    parsed: Option<Value>,
}

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            ConfigValueJson {
                ty: self.ty.clone(),
                bytes: base16::encode_lower(&self.bytes),
                parsed: jsonrepr::value_to_json(self),
            }
            .serialize(serializer)
        } else {
            (&self.ty, self.bytes.inner_bytes()).serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for ConfigValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (ty, bytes) = if deserializer.is_human_readable() {
            let json = ConfigValueJson::deserialize(deserializer)?;
            (
                json.ty,
                base16::decode(&json.bytes).map_err(D::Error::custom)?,
            )
        } else {
            <(ConfigType, Vec<u8>)>::deserialize(deserializer)?
        };
        Ok(ConfigValue {
            ty,
            bytes: bytes.into(),
        })
    }
}
