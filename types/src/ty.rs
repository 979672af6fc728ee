//! Type descriptors for configurable constants.

use alloc::vec::Vec;
use core::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::codec::{padded_len, WORD_SIZE};

/// The type of a configurable constant, as written in its declaration's type annotation.
///
/// All declarable types have a size fully determined by the type itself, which is what allows
/// the host toolchain to substitute values in a compiled binary without moving its neighbours.
#[derive(PartialEq, Eq, Clone, Debug, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConfigType {
    /// `bool` primitive.
    Bool,
    /// `u8` primitive, an 8-bit unsigned integer.
    U8,
    /// `u16` primitive, a 16-bit unsigned integer.
    U16,
    /// `u32` primitive, a 32-bit unsigned integer.
    U32,
    /// `u64` primitive, a 64-bit unsigned integer.
    U64,
    /// `u256` primitive, a 256-bit unsigned integer.
    U256,
    /// `b256` primitive, a 256-bit (32-byte) byte array.
    B256,
    /// `str[N]`, a string of exactly `N` ASCII characters.
    StrArray(u64),
    /// A heterogeneous tuple of other types.
    Tuple(Vec<ConfigType>),
}

impl ConfigType {
    /// Returns the number of bytes a value of this type occupies in the data section.
    ///
    /// Every entry is padded to a word boundary, so the length depends only on the type, never
    /// on the particular value.
    pub fn serialized_length(&self) -> usize {
        match self {
            ConfigType::Bool
            | ConfigType::U8
            | ConfigType::U16
            | ConfigType::U32
            | ConfigType::U64 => WORD_SIZE,
            ConfigType::U256 | ConfigType::B256 => 32,
            ConfigType::StrArray(count) => padded_len(*count as usize),
            ConfigType::Tuple(elements) => elements
                .iter()
                .map(ConfigType::serialized_length)
                .sum(),
        }
    }
}

impl Display for ConfigType {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match self {
            ConfigType::Bool => formatter.write_str("bool"),
            ConfigType::U8 => formatter.write_str("u8"),
            ConfigType::U16 => formatter.write_str("u16"),
            ConfigType::U32 => formatter.write_str("u32"),
            ConfigType::U64 => formatter.write_str("u64"),
            ConfigType::U256 => formatter.write_str("u256"),
            ConfigType::B256 => formatter.write_str("b256"),
            ConfigType::StrArray(count) => write!(formatter, "str[{}]", count),
            ConfigType::Tuple(elements) => {
                formatter.write_str("(")?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    Display::fmt(element, formatter)?;
                }
                formatter.write_str(")")
            }
        }
    }
}

/// A Rust type which has a corresponding [`ConfigType`].
pub trait Typed {
    /// The `ConfigType` of `Self`.
    fn config_type() -> ConfigType;
}

impl Typed for bool {
    fn config_type() -> ConfigType {
        ConfigType::Bool
    }
}

impl Typed for u8 {
    fn config_type() -> ConfigType {
        ConfigType::U8
    }
}

impl Typed for u16 {
    fn config_type() -> ConfigType {
        ConfigType::U16
    }
}

impl Typed for u32 {
    fn config_type() -> ConfigType {
        ConfigType::U32
    }
}

impl Typed for u64 {
    fn config_type() -> ConfigType {
        ConfigType::U64
    }
}

macro_rules! impl_typed_for_tuple {
    ($($type:ident),+) => {
        impl<$($type: Typed),+> Typed for ($($type,)+) {
            fn config_type() -> ConfigType {
                ConfigType::Tuple(alloc::vec![$($type::config_type()),+])
            }
        }
    };
}

impl_typed_for_tuple!(T1);
impl_typed_for_tuple!(T1, T2);
impl_typed_for_tuple!(T1, T2, T3);
impl_typed_for_tuple!(T1, T2, T3, T4);
impl_typed_for_tuple!(T1, T2, T3, T4, T5);
impl_typed_for_tuple!(T1, T2, T3, T4, T5, T6);
impl_typed_for_tuple!(T1, T2, T3, T4, T5, T6, T7);
impl_typed_for_tuple!(T1, T2, T3, T4, T5, T6, T7, T8);
impl_typed_for_tuple!(T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_typed_for_tuple!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
