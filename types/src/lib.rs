//! Types used to model the configurable constants of compiled contract programs.
//!
//! A *configurable* is a named constant, fixed at build time, that the host toolchain may
//! substitute without recompiling program logic. This crate covers the value model: declared
//! types, literal resolution, packaging the resolved block into the entry function's output
//! tuple, and the word-aligned data-section layout the values occupy inside a program binary.
//!
//! # `no_std`
//!
//! By default, the library has full `std` functionality; disable the crate's `std` feature for
//! a `no_std` (with `alloc`) build.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod bits256;
mod block;
pub mod codec;
mod entry;
mod literal;
pub mod section;
pub mod str_array;
mod ty;
mod uint;
mod value;

use alloc::string::String;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use crate::uint::U256;
pub use bits256::{Bits256, BITS256_LENGTH};
pub use block::{ConfigBinding, ConfigBlock, ConfigDecl, ResolveError};
pub use entry::EntryFunction;
pub use literal::Literal;
pub use section::DataSection;
pub use str_array::StrArray;
pub use ty::{ConfigType, Typed};
pub use value::{ConfigTypeMismatch, ConfigValue, ValueError};

/// An error struct representing a mismatch between a declared type and the value offered for it.
#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize, Error)]
#[error("type mismatch: expected {expected} but found {found}")]
pub struct TypeMismatch {
    /// The name of the expected type.
    pub expected: String,
    /// A rendering of the value (or type) actually found.
    pub found: String,
}

impl TypeMismatch {
    /// Creates a new `TypeMismatch`.
    pub fn new(expected: String, found: String) -> TypeMismatch {
        TypeMismatch { expected, found }
    }
}
