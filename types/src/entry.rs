//! Home of [`EntryFunction`], the designated function whose return value is the program's
//! observable output.

use serde::{Deserialize, Serialize};

use crate::{ConfigBlock, ConfigType, ConfigTypeMismatch, ConfigValue};

/// The entry function of a program whose body returns the configurable constants as one tuple.
///
/// The entry function takes no input and has no side effects: invoking it packages every binding
/// of an already-resolved [`ConfigBlock`], in declaration order, into a tuple conforming to the
/// declared return type. It always terminates, and cannot fail once the declared signature and
/// the block agree.
#[derive(PartialEq, Eq, Clone, Debug, Serialize, Deserialize)]
pub struct EntryFunction {
    returns: ConfigType,
}

impl EntryFunction {
    /// Constructs an `EntryFunction` from an explicitly declared return tuple type, as parsed
    /// from the function signature by the host toolchain.
    pub fn new(returns: ConfigType) -> Self {
        EntryFunction { returns }
    }

    /// Constructs an `EntryFunction` whose return type mirrors the given block: one tuple
    /// element per binding, in declaration order.
    pub fn for_block(block: &ConfigBlock) -> Self {
        let elements = block
            .bindings()
            .iter()
            .map(|binding| binding.value().ty().clone())
            .collect();
        EntryFunction {
            returns: ConfigType::Tuple(elements),
        }
    }

    /// The declared return type.
    pub fn returns(&self) -> &ConfigType {
        &self.returns
    }

    /// Invokes the entry function against a resolved block, producing the output tuple.
    ///
    /// Fails only if the block's shape disagrees with the declared return type, which means the
    /// declarations and the signature were inconsistent to begin with.
    pub fn invoke(&self, block: &ConfigBlock) -> Result<ConfigValue, ConfigTypeMismatch> {
        let tuple = block.output_tuple();
        if tuple.ty() == &self.returns {
            Ok(tuple)
        } else {
            Err(ConfigTypeMismatch {
                expected: self.returns.clone(),
                found: tuple.ty().clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::{config_block, ConfigBlock};

    #[test]
    fn invoke_should_return_bindings_in_declaration_order() {
        let block = config_block! {
            "U8" => 8u8,
            "BOOL" => true,
        };
        let entry = EntryFunction::new(ConfigType::Tuple(vec![ConfigType::U8, ConfigType::Bool]));
        let tuple = entry.invoke(&block).unwrap();
        assert_eq!(tuple.into_t::<(u8, bool)>().unwrap(), (8u8, true));
    }

    #[test]
    fn for_block_should_derive_matching_signature() {
        let block = config_block! {
            "U8" => 8u8,
            "U16" => 16u16,
        };
        let entry = EntryFunction::for_block(&block);
        assert_eq!(
            entry.returns(),
            &ConfigType::Tuple(vec![ConfigType::U8, ConfigType::U16])
        );
        assert!(entry.invoke(&block).is_ok());
    }

    #[test]
    fn invoke_should_reject_mismatched_signature() {
        let block = config_block! {
            "U8" => 8u8,
        };
        let entry = EntryFunction::new(ConfigType::Tuple(vec![ConfigType::Bool]));
        let error = entry.invoke(&block).unwrap_err();
        assert_eq!(error.expected, ConfigType::Tuple(vec![ConfigType::Bool]));
        assert_eq!(error.found, ConfigType::Tuple(vec![ConfigType::U8]));
    }

    #[test]
    fn empty_block_should_invoke_against_empty_tuple_signature() {
        let entry = EntryFunction::new(ConfigType::Tuple(vec![]));
        assert!(entry.invoke(&ConfigBlock::new()).is_ok());
    }
}
