use alloc::{string::ToString, vec::Vec};

use serde_json::{json, Value};

use crate::{
    codec::{self, FromBytes},
    Bits256, ConfigType, ConfigValue, U256,
};

/// Returns a best-effort JSON rendering of the value, or `None` if the raw bytes of `value`
/// cannot be parsed as its held type.
pub(super) fn value_to_json(value: &ConfigValue) -> Option<Value> {
    let (json, remainder) = to_json(value.ty(), value.inner_bytes()).ok()?;
    if remainder.is_empty() {
        Some(json)
    } else {
        None
    }
}

fn to_json<'a>(ty: &ConfigType, bytes: &'a [u8]) -> Result<(Value, &'a [u8]), codec::Error> {
    match ty {
        ConfigType::Bool => {
            let (value, remainder) = bool::from_bytes(bytes)?;
            Ok((json!(value), remainder))
        }
        ConfigType::U8 => {
            let (value, remainder) = u8::from_bytes(bytes)?;
            Ok((json!(value), remainder))
        }
        ConfigType::U16 => {
            let (value, remainder) = u16::from_bytes(bytes)?;
            Ok((json!(value), remainder))
        }
        ConfigType::U32 => {
            let (value, remainder) = u32::from_bytes(bytes)?;
            Ok((json!(value), remainder))
        }
        ConfigType::U64 => {
            let (value, remainder) = u64::from_bytes(bytes)?;
            Ok((json!(value), remainder))
        }
        ConfigType::U256 => {
            let (value, remainder) = U256::from_bytes(bytes)?;
            Ok((json!(value.to_string()), remainder))
        }
        ConfigType::B256 => {
            let (value, remainder) = Bits256::from_bytes(bytes)?;
            Ok((json!(base16::encode_lower(value.as_bytes())), remainder))
        }
        ConfigType::StrArray(count) => {
            let (value, remainder) = codec::read_padded(bytes, *count as usize)?;
            let string = core::str::from_utf8(value).map_err(|_| codec::Error::Formatting)?;
            if !string.is_ascii() {
                return Err(codec::Error::Formatting);
            }
            Ok((json!(string), remainder))
        }
        ConfigType::Tuple(elements) => {
            let mut fields = Vec::with_capacity(elements.len());
            let mut remainder = bytes;
            for element_ty in elements {
                let (field, rest) = to_json(element_ty, remainder)?;
                fields.push(field);
                remainder = rest;
            }
            Ok((Value::Array(fields), remainder))
        }
    }
}
