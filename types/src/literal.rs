//! Literal initializers and their resolution against declared types.

use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};
use core::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{bits256::BITS256_LENGTH, codec, ConfigType, ConfigValue, TypeMismatch, U256};

/// The literal initializer of a configurable declaration, as handed over by the host toolchain's
/// parser.
///
/// Integer literals carry no width annotation of their own; whether `8` is a `u8` or a `u64` is
/// decided by the declared type the literal is resolved against.
#[derive(PartialEq, Eq, Clone, Debug, Serialize, Deserialize)]
pub enum Literal {
    /// A `true` or `false` literal.
    Bool(bool),
    /// An unsigned integer literal of any magnitude up to 256 bits.
    Int(U256),
    /// A byte-array literal.
    Bytes(Vec<u8>),
    /// A string literal.
    Str(String),
    /// A tuple of nested literals.
    Tuple(Vec<Literal>),
}

impl Literal {
    /// Resolves the literal against a declared type, producing the [`ConfigValue`] holding its
    /// data-section representation.
    ///
    /// Resolution is pure and deterministic. It fails with [`TypeMismatch`] whenever the literal
    /// does not conform to `ty`: an integer too wide for the declared width, a byte array or
    /// string of the wrong length, a non-ASCII string, a tuple of the wrong arity, or a literal
    /// of a different kind altogether.
    pub fn resolve(&self, ty: &ConfigType) -> Result<ConfigValue, TypeMismatch> {
        let mut bytes = Vec::with_capacity(ty.serialized_length());
        self.write_into(ty, &mut bytes)?;
        Ok(ConfigValue::from_parts(ty.clone(), bytes))
    }

    fn write_into(&self, ty: &ConfigType, writer: &mut Vec<u8>) -> Result<(), TypeMismatch> {
        match (self, ty) {
            (Literal::Bool(value), ConfigType::Bool) => {
                writer.extend_from_slice(&u64::from(*value).to_be_bytes());
                Ok(())
            }
            (Literal::Int(value), ConfigType::U8) => {
                write_word(*value, u64::from(u8::MAX), ty, self, writer)
            }
            (Literal::Int(value), ConfigType::U16) => {
                write_word(*value, u64::from(u16::MAX), ty, self, writer)
            }
            (Literal::Int(value), ConfigType::U32) => {
                write_word(*value, u64::from(u32::MAX), ty, self, writer)
            }
            (Literal::Int(value), ConfigType::U64) => {
                write_word(*value, u64::MAX, ty, self, writer)
            }
            (Literal::Int(value), ConfigType::U256) => {
                let mut big_endian = [0u8; 32];
                value.to_big_endian(&mut big_endian);
                writer.extend_from_slice(&big_endian);
                Ok(())
            }
            (Literal::Bytes(bytes), ConfigType::B256) => {
                if bytes.len() != BITS256_LENGTH {
                    return Err(mismatch(ty, self));
                }
                writer.extend_from_slice(bytes);
                Ok(())
            }
            (Literal::Str(string), ConfigType::StrArray(count)) => {
                if string.len() as u64 != *count || !string.is_ascii() {
                    return Err(mismatch(ty, self));
                }
                codec::write_padded(string.as_bytes(), writer);
                Ok(())
            }
            (Literal::Tuple(fields), ConfigType::Tuple(elements)) => {
                if fields.len() != elements.len() {
                    return Err(mismatch(ty, self));
                }
                for (field, element_ty) in fields.iter().zip(elements) {
                    field.write_into(element_ty, writer)?;
                }
                Ok(())
            }
            (literal, ty) => Err(mismatch(ty, literal)),
        }
    }
}

fn write_word(
    value: U256,
    max: u64,
    ty: &ConfigType,
    literal: &Literal,
    writer: &mut Vec<u8>,
) -> Result<(), TypeMismatch> {
    if value > U256::from(max) {
        return Err(mismatch(ty, literal));
    }
    writer.extend_from_slice(&value.low_u64().to_be_bytes());
    Ok(())
}

fn mismatch(ty: &ConfigType, literal: &Literal) -> TypeMismatch {
    TypeMismatch::new(ty.to_string(), literal.to_string())
}

impl Display for Literal {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match self {
            Literal::Bool(value) => write!(formatter, "{}", value),
            Literal::Int(value) => write!(formatter, "{}", value),
            Literal::Bytes(bytes) => write!(formatter, "0x{}", base16::encode_lower(bytes)),
            Literal::Str(string) => write!(formatter, "{:?}", string),
            Literal::Tuple(fields) => {
                formatter.write_str("(")?;
                for (index, field) in fields.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    Display::fmt(field, formatter)?;
                }
                formatter.write_str(")")
            }
        }
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<u64> for Literal {
    fn from(value: u64) -> Self {
        Literal::Int(U256::from(value))
    }
}

impl From<U256> for Literal {
    fn from(value: U256) -> Self {
        Literal::Int(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Str(String::from(value))
    }
}

impl From<[u8; BITS256_LENGTH]> for Literal {
    fn from(value: [u8; BITS256_LENGTH]) -> Self {
        Literal::Bytes(value.to_vec())
    }
}
