//! Data-section layout of resolved configurables inside a compiled program binary.
//!
//! A compiled program carries its configurables at the tail of the binary, in a data section
//! whose start offset is recorded in the binary header. Because every declarable type has a
//! fixed, type-determined width, the host toolchain can substitute a configurable's value in
//! place without disturbing the offsets of its neighbours.

use alloc::{string::String, vec::Vec};

use serde::{Deserialize, Serialize};

use crate::{codec, ConfigBlock, ConfigValue, Literal, ResolveError};

/// The byte range of the binary header holding the data-section offset, as a big-endian `u64`.
pub const DATA_OFFSET_RANGE: core::ops::Range<usize> = 8..16;

/// Reads the data-section offset out of a program binary's header.
///
/// Fails with [`codec::Error::EarlyEndOfStream`] if the binary is too short to hold a header,
/// and with [`codec::Error::Formatting`] if the recorded offset points past the end of the
/// binary.
pub fn extract_data_offset(binary: &[u8]) -> Result<usize, codec::Error> {
    let header = binary
        .get(DATA_OFFSET_RANGE)
        .ok_or(codec::Error::EarlyEndOfStream)?;
    let mut word = [0u8; codec::WORD_SIZE];
    word.copy_from_slice(header);
    let offset = u64::from_be_bytes(word) as usize;
    if offset > binary.len() {
        return Err(codec::Error::Formatting);
    }
    Ok(offset)
}

/// Splits a program binary into its code part and its data section.
pub fn split_data_section(binary: &[u8]) -> Result<(&[u8], &[u8]), codec::Error> {
    let offset = extract_data_offset(binary)?;
    Ok(binary.split_at(offset))
}

/// One laid-out entry of a [`DataSection`].
#[derive(PartialEq, Eq, Clone, Debug, Serialize, Deserialize)]
pub struct SectionEntry {
    name: String,
    offset: usize,
    value: ConfigValue,
}

impl SectionEntry {
    /// The binding's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The entry's offset in bytes from the start of the data section.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The resolved value held at this entry.
    pub fn value(&self) -> &ConfigValue {
        &self.value
    }
}

/// The data section of a program, laying out a [`ConfigBlock`]'s values back to back in
/// declaration order.
///
/// Entries are word aligned by construction, since every value's data-section representation is
/// already padded to a word boundary.
#[derive(PartialEq, Eq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct DataSection {
    entries: Vec<SectionEntry>,
}

impl DataSection {
    /// Lays out the given block.
    pub fn build(block: &ConfigBlock) -> DataSection {
        let mut entries = Vec::with_capacity(block.len());
        let mut offset = 0;
        for binding in block.bindings() {
            let value = binding.value().clone();
            let length = value.serialized_length();
            entries.push(SectionEntry {
                name: String::from(binding.name()),
                offset,
                value,
            });
            offset += length;
        }
        DataSection { entries }
    }

    /// The laid-out entries, in declaration order.
    pub fn entries(&self) -> &[SectionEntry] {
        &self.entries
    }

    /// Returns the offset of the named entry from the start of the data section.
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.offset)
    }

    /// Returns the named entry's value.
    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.value)
    }

    /// The total number of bytes the section occupies.
    pub fn serialized_length(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| entry.value.serialized_length())
            .sum()
    }

    /// Substitutes the named entry's value with a newly resolved literal.
    ///
    /// The literal is resolved against the entry's declared type, so a non-conforming literal
    /// fails exactly as it would have at block resolution. Offsets of all entries are unchanged:
    /// the declared type fixes the encoded width.
    pub fn set(&mut self, name: &str, literal: &Literal) -> Result<(), ResolveError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.name == name)
            .ok_or_else(|| ResolveError::MissingBinding(String::from(name)))?;
        entry.value = literal.resolve(entry.value.ty())?;
        Ok(())
    }

    /// Serializes the whole section, entries back to back in declaration order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.serialized_length());
        for entry in &self.entries {
            bytes.extend_from_slice(entry.value.inner_bytes());
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use alloc::{vec, vec::Vec};

    use super::*;
    use crate::{config_block, Bits256, ConfigType, StrArray, U256};

    fn sample_block() -> ConfigBlock {
        config_block! {
            "U8" => 8u8,
            "U256" => U256::from(8u64),
            "STR_4" => StrArray::<4>::try_from("fuel").unwrap(),
            "TUPLE" => (8u8, true),
        }
    }

    #[test]
    fn offsets_should_accumulate_type_widths() {
        let section = DataSection::build(&sample_block());
        assert_eq!(section.offset_of("U8"), Some(0));
        assert_eq!(section.offset_of("U256"), Some(8));
        assert_eq!(section.offset_of("STR_4"), Some(40));
        assert_eq!(section.offset_of("TUPLE"), Some(48));
        assert_eq!(section.offset_of("MISSING"), None);
        assert_eq!(section.serialized_length(), 64);
    }

    #[test]
    fn to_bytes_should_concatenate_entries_in_order() {
        let section = DataSection::build(&sample_block());
        let bytes = section.to_bytes();
        assert_eq!(bytes.len(), section.serialized_length());
        assert_eq!(&bytes[..8], &8u64.to_be_bytes());
        assert_eq!(&bytes[40..44], b"fuel");
    }

    #[test]
    fn set_should_substitute_in_place() {
        let mut section = DataSection::build(&sample_block());
        section.set("U8", &Literal::from(42u64)).unwrap();
        assert_eq!(section.get("U8").unwrap().to_t::<u8>().unwrap(), 42);
        // Neighbouring entries and the layout are untouched.
        assert_eq!(section.offset_of("U256"), Some(8));
        assert_eq!(section.serialized_length(), 64);
    }

    #[test]
    fn set_should_enforce_declared_type() {
        let mut section = DataSection::build(&sample_block());
        let error = section.set("U8", &Literal::from(256u64)).unwrap_err();
        assert!(matches!(error, ResolveError::Type(_)));
        let error = section.set("MISSING", &Literal::from(1u64)).unwrap_err();
        assert!(matches!(error, ResolveError::MissingBinding(_)));
    }

    #[test]
    fn extract_data_offset_should_read_header_word() {
        let mut binary = vec![0u8; 24];
        binary[8..16].copy_from_slice(&16u64.to_be_bytes());
        assert_eq!(extract_data_offset(&binary), Ok(16));

        let (code, data) = split_data_section(&binary).unwrap();
        assert_eq!(code.len(), 16);
        assert_eq!(data.len(), 8);
    }

    #[test]
    fn extract_data_offset_should_reject_short_or_malformed_binaries() {
        assert_eq!(
            extract_data_offset(&[0u8; 12]),
            Err(codec::Error::EarlyEndOfStream)
        );

        let mut binary = vec![0u8; 24];
        binary[8..16].copy_from_slice(&25u64.to_be_bytes());
        assert_eq!(extract_data_offset(&binary), Err(codec::Error::Formatting));
    }

    #[test]
    fn rebuilt_section_should_match_substituted_block() {
        let block = sample_block();
        let mut section = DataSection::build(&block);
        section
            .set("STR_4", &Literal::from("flue"))
            .unwrap();

        let expected: Vec<u8> = {
            let substituted = config_block! {
                "U8" => 8u8,
                "U256" => U256::from(8u64),
                "STR_4" => StrArray::<4>::try_from("flue").unwrap(),
                "TUPLE" => (8u8, true),
            };
            DataSection::build(&substituted).to_bytes()
        };
        assert_eq!(section.to_bytes(), expected);
    }

    #[test]
    fn b256_entry_should_occupy_four_words() {
        let block = config_block! {
            "B256" => Bits256([1; 32]),
            "BOOL" => true,
        };
        let section = DataSection::build(&block);
        assert_eq!(section.offset_of("BOOL"), Some(32));
        assert_eq!(
            section.get("B256").unwrap().ty(),
            &ConfigType::B256
        );
    }
}
