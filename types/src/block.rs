//! Home of [`ConfigBlock`], the resolved form of a program's `configurable { ... }` block.

use alloc::{string::String, vec::Vec};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    codec::ToBytes, ConfigType, ConfigValue, Literal, TypeMismatch, Typed, ValueError,
};

/// Error raised while resolving a configurable block from its declarations.
///
/// Resolution happens once, before anything can run; every variant is fatal and there is no
/// recovery path.
#[derive(PartialEq, Eq, Clone, Debug, Serialize, Deserialize, Error)]
pub enum ResolveError {
    /// A literal initializer does not conform to its declared type.
    #[error(transparent)]
    Type(#[from] TypeMismatch),
    /// The same name is declared more than once within the block.
    #[error("configurable `{0}` is declared more than once")]
    DuplicateBinding(String),
    /// No binding of the given name exists.
    #[error("no configurable named `{0}`")]
    MissingBinding(String),
}

/// A declaration from a `configurable { ... }` block: a name, a type annotation and a literal
/// initializer, as parsed by the host toolchain.
#[derive(PartialEq, Eq, Clone, Debug, Serialize, Deserialize)]
pub struct ConfigDecl {
    /// The declared name, unique within its block.
    pub name: String,
    /// The declared type.
    pub ty: ConfigType,
    /// The literal initializer.
    pub init: Literal,
}

impl ConfigDecl {
    /// Constructs a new `ConfigDecl`.
    pub fn new<N: Into<String>, L: Into<Literal>>(name: N, ty: ConfigType, init: L) -> Self {
        ConfigDecl {
            name: name.into(),
            ty,
            init: init.into(),
        }
    }
}

/// A named configurable binding.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Serialize, Deserialize, Debug)]
pub struct ConfigBinding(String, ConfigValue);

impl ConfigBinding {
    /// ctor
    pub fn new(name: String, value: ConfigValue) -> Self {
        ConfigBinding(name, value)
    }

    /// returns `name`
    pub fn name(&self) -> &str {
        &self.0
    }

    /// returns `value`
    pub fn value(&self) -> &ConfigValue {
        &self.1
    }
}

impl From<(String, ConfigValue)> for ConfigBinding {
    fn from((name, value): (String, ConfigValue)) -> ConfigBinding {
        ConfigBinding(name, value)
    }
}

/// The resolved configurable constants of a program, in declaration order.
///
/// Declaration order is significant only for the field order of the output tuple; bindings are
/// independent of one another. Once resolved the block is never mutated by the program itself,
/// only substituted wholesale by the host toolchain.
#[derive(
    PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Serialize, Deserialize, Debug, Default,
)]
pub struct ConfigBlock(Vec<ConfigBinding>);

impl ConfigBlock {
    /// Creates an empty `ConfigBlock`.
    pub fn new() -> ConfigBlock {
        ConfigBlock::default()
    }

    /// A wrapper that lets you easily and safely create a block.
    ///
    /// This method is useful when you have to construct a [`ConfigBlock`] with multiple entries,
    /// but error handling at the call site would require a match statement for each
    /// [`ConfigBlock::insert`] call. With this method you can use the `?` operator inside the
    /// closure and then handle a single result.
    pub fn try_new<F>(func: F) -> Result<ConfigBlock, ValueError>
    where
        F: FnOnce(&mut ConfigBlock) -> Result<(), ValueError>,
    {
        let mut block = ConfigBlock::new();
        func(&mut block)?;
        Ok(block)
    }

    /// Resolves a sequence of declarations into a block, in declaration order.
    ///
    /// Fails on the first literal that does not conform to its declared type, and on duplicate
    /// names. No partial block is ever observable.
    pub fn resolve(decls: &[ConfigDecl]) -> Result<ConfigBlock, ResolveError> {
        let mut block = ConfigBlock::new();
        for decl in decls {
            if block.get(&decl.name).is_some() {
                return Err(ResolveError::DuplicateBinding(decl.name.clone()));
            }
            let value = decl.init.resolve(&decl.ty)?;
            block.0.push(ConfigBinding(decl.name.clone(), value));
        }
        Ok(block)
    }

    /// Gets a binding's value by its name.
    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.0.iter().find_map(|ConfigBinding(bound_name, value)| {
            if bound_name == name {
                Some(value)
            } else {
                None
            }
        })
    }

    /// Gets the number of bindings held.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the block holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Inserts a new binding, encoding `value` into its data-section representation.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Result<(), ValueError>
    where
        K: Into<String>,
        V: Typed + ToBytes,
    {
        let value = ConfigValue::from_t(value)?;
        self.0.push(ConfigBinding(key.into(), value));
        Ok(())
    }

    /// Inserts a new binding holding an already-resolved value.
    pub fn insert_value<K>(&mut self, key: K, value: ConfigValue)
    where
        K: Into<String>,
    {
        self.0.push(ConfigBinding(key.into(), value));
    }

    /// Returns the bindings held, in declaration order.
    pub fn bindings(&self) -> &[ConfigBinding] {
        &self.0
    }

    /// Returns the values held, in declaration order.
    pub fn to_values(&self) -> Vec<&ConfigValue> {
        self.0.iter().map(|ConfigBinding(_name, value)| value).collect()
    }

    /// Packages every binding's value, in declaration order, into a single tuple value.
    ///
    /// The returned tuple's arity equals the binding count and its per-position element types
    /// mirror the per-binding declared types exactly. An empty block yields the empty tuple.
    pub fn output_tuple(&self) -> ConfigValue {
        let mut elements = Vec::with_capacity(self.0.len());
        let mut bytes = Vec::new();
        for ConfigBinding(_name, value) in &self.0 {
            elements.push(value.ty().clone());
            bytes.extend_from_slice(value.inner_bytes());
        }
        ConfigValue::from_parts(ConfigType::Tuple(elements), bytes)
    }
}

impl From<Vec<ConfigBinding>> for ConfigBlock {
    fn from(bindings: Vec<ConfigBinding>) -> Self {
        ConfigBlock(bindings)
    }
}

/// Macro that makes it easier to construct a [`ConfigBlock`] from Rust values.
///
/// NOTE: This macro does not propagate possible errors that could occur while encoding a
/// [`crate::ConfigValue`]. For such cases creating a `ConfigBlock` manually is recommended.
///
/// # Example usage
/// ```
/// use configurable_types::{config_block, ConfigBlock};
/// let _block = config_block! {
///   "U8" => 8u8,
///   "BOOL" => true
/// };
/// ```
#[macro_export]
macro_rules! config_block {
    () => ($crate::ConfigBlock::new());
    ( $($key:expr => $value:expr,)+ ) => ($crate::config_block!($($key => $value),+));
    ( $($key:expr => $value:expr),* ) => {
        {
            let mut block = $crate::ConfigBlock::new();
            $(
                block.insert($key, $value).unwrap();
            )*
            block
        }
    };
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec};

    use super::*;
    use crate::ConfigType;

    fn spec_decls() -> Vec<ConfigDecl> {
        vec![
            ConfigDecl::new("BOOL", ConfigType::Bool, true),
            ConfigDecl::new("U8", ConfigType::U8, 8u64),
            ConfigDecl::new("STR_4", ConfigType::StrArray(4), "fuel"),
        ]
    }

    #[test]
    fn resolve_should_keep_declaration_order() {
        let block = ConfigBlock::resolve(&spec_decls()).unwrap();
        assert_eq!(block.len(), 3);
        let names: Vec<&str> = block.bindings().iter().map(ConfigBinding::name).collect();
        assert_eq!(names, ["BOOL", "U8", "STR_4"]);
    }

    #[test]
    fn resolve_should_reject_duplicate_names() {
        let mut decls = spec_decls();
        decls.push(ConfigDecl::new("U8", ConfigType::U8, 9u64));
        let error = ConfigBlock::resolve(&decls).unwrap_err();
        assert_eq!(error, ResolveError::DuplicateBinding("U8".to_string()));
    }

    #[test]
    fn resolve_should_fail_on_first_bad_literal() {
        let decls = vec![
            ConfigDecl::new("GOOD", ConfigType::U8, 8u64),
            ConfigDecl::new("BAD", ConfigType::U8, 256u64),
        ];
        let error = ConfigBlock::resolve(&decls).unwrap_err();
        assert_eq!(
            error,
            ResolveError::Type(TypeMismatch::new("u8".to_string(), "256".to_string()))
        );
    }

    #[test]
    fn get_should_find_bindings_by_name() {
        let block = ConfigBlock::resolve(&spec_decls()).unwrap();
        assert_eq!(block.get("U8").unwrap().to_t::<u8>().unwrap(), 8);
        assert!(block.get("MISSING").is_none());
    }

    #[test]
    fn macro_should_match_manual_construction() {
        let manual = {
            let mut block = ConfigBlock::new();
            block.insert("BOOL", true).unwrap();
            block.insert("U8", 8u8).unwrap();
            block
        };
        let from_macro = config_block! {
            "BOOL" => true,
            "U8" => 8u8,
        };
        assert_eq!(manual, from_macro);
    }

    #[test]
    fn empty_macro() {
        assert_eq!(config_block! {}, ConfigBlock::new());
    }

    #[test]
    fn should_create_block_with_try_new() {
        let result = ConfigBlock::try_new(|block| {
            block.insert("FOO", 123u32)?;
            block.insert("BAR", 456u32)?;
            Ok(())
        });

        let expected = config_block! {
            "FOO" => 123u32,
            "BAR" => 456u32,
        };
        assert!(matches!(result, Ok(block) if expected == block));
    }

    #[test]
    fn output_tuple_should_mirror_block_shape() {
        let block = ConfigBlock::resolve(&spec_decls()).unwrap();
        let tuple = block.output_tuple();
        assert_eq!(
            tuple.ty(),
            &ConfigType::Tuple(vec![
                ConfigType::Bool,
                ConfigType::U8,
                ConfigType::StrArray(4),
            ])
        );
    }

    #[test]
    fn empty_block_should_output_empty_tuple() {
        let tuple = ConfigBlock::new().output_tuple();
        assert_eq!(tuple.ty(), &ConfigType::Tuple(vec![]));
        assert!(tuple.inner_bytes().is_empty());
    }

    #[test]
    fn bincode_roundtrip() {
        let block = ConfigBlock::resolve(&spec_decls()).unwrap();
        let serialized = bincode::serialize(&block).unwrap();
        let decoded: ConfigBlock = bincode::deserialize(&serialized).unwrap();
        assert_eq!(block, decoded);
    }
}
