//! End-to-end scenario: a script whose `configurable` block declares one constant of every
//! supported type and whose entry function returns them all as a single tuple.

use configurable_types::{
    section::DataSection, Bits256, ConfigBlock, ConfigDecl, ConfigType, EntryFunction, Literal,
    ResolveError, StrArray, TypeMismatch, U256,
};
use pretty_assertions::assert_eq;

fn declarations() -> Vec<ConfigDecl> {
    vec![
        ConfigDecl::new("BOOL", ConfigType::Bool, true),
        ConfigDecl::new("U8", ConfigType::U8, 8u64),
        ConfigDecl::new("U16", ConfigType::U16, 16u64),
        ConfigDecl::new("U32", ConfigType::U32, 32u64),
        ConfigDecl::new("U64", ConfigType::U64, 63u64),
        ConfigDecl::new("U256", ConfigType::U256, U256::from(8u64)),
        ConfigDecl::new("B256", ConfigType::B256, [1u8; 32]),
        ConfigDecl::new("STR_4", ConfigType::StrArray(4), "fuel"),
        ConfigDecl::new(
            "TUPLE",
            ConfigType::Tuple(vec![ConfigType::U8, ConfigType::Bool]),
            Literal::Tuple(vec![Literal::from(8u64), Literal::from(true)]),
        ),
    ]
}

type OutputTuple = (
    bool,
    u8,
    u16,
    u32,
    u64,
    U256,
    Bits256,
    StrArray<4>,
    (u8, bool),
);

#[test]
fn entry_function_should_return_all_configurables_as_tuple() {
    let block = ConfigBlock::resolve(&declarations()).unwrap();
    assert_eq!(block.len(), 9);

    let entry = EntryFunction::for_block(&block);
    let output = entry.invoke(&block).unwrap();

    let expected: OutputTuple = (
        true,
        8,
        16,
        32,
        63,
        U256::from(8u64),
        Bits256([1; 32]),
        "fuel".try_into().unwrap(),
        (8, true),
    );
    assert_eq!(output.into_t::<OutputTuple>().unwrap(), expected);
}

#[test]
fn output_tuple_types_should_follow_declaration_order() {
    let block = ConfigBlock::resolve(&declarations()).unwrap();
    let output = block.output_tuple();

    let declared: Vec<ConfigType> = declarations().into_iter().map(|decl| decl.ty).collect();
    match output.ty() {
        ConfigType::Tuple(elements) => assert_eq!(elements, &declared),
        other => panic!("expected tuple type, got {}", other),
    }
}

#[test]
fn explicit_signature_should_accept_the_block() {
    let declared: Vec<ConfigType> = declarations().into_iter().map(|decl| decl.ty).collect();
    let entry = EntryFunction::new(ConfigType::Tuple(declared));
    let block = ConfigBlock::resolve(&declarations()).unwrap();
    assert!(entry.invoke(&block).is_ok());
}

#[test]
fn overflowing_u8_declaration_should_fail_resolution() {
    let mut decls = declarations();
    decls[1] = ConfigDecl::new("U8", ConfigType::U8, 256u64);
    let error = ConfigBlock::resolve(&decls).unwrap_err();
    assert_eq!(
        error,
        ResolveError::Type(TypeMismatch::new("u8".to_string(), "256".to_string()))
    );
}

#[test]
fn substituting_a_configurable_should_only_change_its_entry() {
    let block = ConfigBlock::resolve(&declarations()).unwrap();
    let mut section = DataSection::build(&block);

    let original = section.to_bytes();
    let str_offset = section.offset_of("STR_4").unwrap();

    section.set("STR_4", &Literal::from("flue")).unwrap();
    let substituted = section.to_bytes();

    assert_eq!(original.len(), substituted.len());
    assert_eq!(&substituted[str_offset..str_offset + 4], b"flue");
    // Everything outside the substituted entry is byte-identical.
    assert_eq!(original[..str_offset], substituted[..str_offset]);
    assert_eq!(original[str_offset + 8..], substituted[str_offset + 8..]);
}
