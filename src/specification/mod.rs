//! Versioned class-file specification tables.
//!
//! A [`JavaSpecification`] describes, for a group of class-file versions, the binary layout of
//! every constant pool tag and the mnemonic of every opcode. The tables are plain data: the
//! built-in ones are assembled from [`builtin`], and alternative tables can be loaded from JSON.

use std::{collections::BTreeMap, io::Read};

use serde::{Deserialize, Serialize};

use crate::jvm::constant_pool::ConstantType;

pub mod builtin;
pub mod versions;

pub use versions::{UNKNOWN_VERSION, VersionTable};

/// The binary width of an info field in a constant pool entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldWidth {
    /// A `u1`.
    Byte,
    /// A `u2`.
    Short,
    /// A `u4`.
    Int,
    /// A 4-byte IEEE 754 float.
    Float,
    /// An 8-byte integer.
    Long,
    /// An 8-byte IEEE 754 double.
    Double,
    /// A `u2` length followed by that many bytes of modified UTF-8.
    Utf8,
}

/// A single info field declared by a [`ConstantLayout`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoFragment {
    /// The role of the field, e.g. `name_index`.
    pub description: String,
    /// The width of the field.
    pub width: FieldWidth,
}

/// The layout of the entries with a given tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantLayout {
    /// The tag byte.
    pub tag: u8,
    /// The kind of entries with this tag.
    #[serde(rename = "type")]
    pub constant_type: ConstantType,
    /// The info fields, in class-file order.
    pub fragments: Vec<InfoFragment>,
}

/// How the operands following an opcode are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperandLayout {
    /// A fixed number of operand bytes.
    Fixed(u8),
    /// `tableswitch`: padding, default, low, high and `high - low + 1` jump offsets.
    TableSwitch,
    /// `lookupswitch`: padding, default, `npairs` and that many match/offset pairs.
    LookupSwitch,
    /// `wide`: a widened opcode followed by a 2-byte index and, for `iinc`, a 2-byte constant.
    Wide,
}

/// An opcode and its mnemonic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mnemonic {
    /// The opcode.
    pub opcode: u8,
    /// The instruction name, e.g. `invokevirtual`.
    pub name: String,
    /// The operands following the opcode.
    pub operands: OperandLayout,
}

/// The specification tables for a group of class-file versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JavaSpecification {
    /// The compiled-version strings (e.g. `1.8`) this specification applies to.
    pub versions: Vec<String>,
    /// The constant pool layouts.
    pub constants: Vec<ConstantLayout>,
    /// The opcode table.
    pub mnemonics: Vec<Mnemonic>,
    #[serde(skip)]
    index: SpecificationIndex,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct SpecificationIndex {
    constants: BTreeMap<u8, usize>,
    mnemonics: BTreeMap<u8, usize>,
}

impl JavaSpecification {
    /// Creates a specification from its tables.
    #[must_use]
    pub fn new(
        versions: Vec<String>,
        constants: Vec<ConstantLayout>,
        mnemonics: Vec<Mnemonic>,
    ) -> Self {
        let mut spec = Self {
            versions,
            constants,
            mnemonics,
            index: SpecificationIndex::default(),
        };
        spec.build_index();
        spec
    }

    fn build_index(&mut self) {
        self.index.constants = self
            .constants
            .iter()
            .enumerate()
            .map(|(pos, layout)| (layout.tag, pos))
            .collect();
        self.index.mnemonics = self
            .mnemonics
            .iter()
            .enumerate()
            .map(|(pos, mnemonic)| (mnemonic.opcode, pos))
            .collect();
    }

    /// Gets the layout of the constants with the given tag.
    #[must_use]
    pub fn constant_layout(&self, tag: u8) -> Option<&ConstantLayout> {
        self.index
            .constants
            .get(&tag)
            .map(|&pos| &self.constants[pos])
    }

    /// Gets the mnemonic of the given opcode.
    #[must_use]
    pub fn mnemonic(&self, opcode: u8) -> Option<&Mnemonic> {
        self.index
            .mnemonics
            .get(&opcode)
            .map(|&pos| &self.mnemonics[pos])
    }

    /// Returns `true` if this specification applies to the given compiled version.
    #[must_use]
    pub fn applies_to(&self, version: &str) -> bool {
        self.versions.iter().any(|it| it == version)
    }
}

/// An error raised while loading specification tables.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The JSON document could not be read or does not match the expected shape.
    #[error("Malformed specification document: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The document contains no specification.
    #[error("The specification document is empty")]
    Empty,
}

/// All known specifications, ordered from the oldest to the newest class-file format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Specifications {
    entries: Vec<JavaSpecification>,
}

impl Specifications {
    /// Creates a registry from a list of specifications ordered from the oldest to the newest.
    /// # Errors
    /// - [`Error::Empty`] if `entries` is empty.
    pub fn new(entries: Vec<JavaSpecification>) -> Result<Self, Error> {
        if entries.is_empty() {
            return Err(Error::Empty);
        }
        Ok(Self { entries })
    }

    /// Loads the specifications from a JSON array of [`JavaSpecification`].
    /// # Errors
    /// See [`Error`].
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let mut entries: Vec<JavaSpecification> = serde_json::from_reader(reader)?;
        entries.iter_mut().for_each(JavaSpecification::build_index);
        Self::new(entries)
    }

    /// Gets the specification for a compiled-version string.
    /// Versions without a dedicated table use the newest one.
    #[must_use]
    pub fn for_version(&self, version: &str) -> &JavaSpecification {
        self.entries
            .iter()
            .find(|spec| spec.applies_to(version))
            .unwrap_or_else(|| self.newest())
    }

    fn newest(&self) -> &JavaSpecification {
        // `new` rejects empty registries.
        &self.entries[self.entries.len() - 1]
    }
}

impl Default for Specifications {
    fn default() -> Self {
        Self {
            entries: builtin::specifications(),
        }
    }
}
