//! Types in the JVM as they appear in descriptors and signatures.
pub mod signatures;

pub use signatures::collect_referenced_classes;

use crate::macros::see_jvm_spec;

/// A primitive type in Java.
#[doc = see_jvm_spec!(4, 3, 2)]
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum PrimitiveType {
    /// The `boolean` type.
    Boolean,
    /// The `char` type.
    Char,
    /// The `float` type.
    Float,
    /// The `double` type.
    Double,
    /// The `byte` type.
    Byte,
    /// The `short` type.
    Short,
    /// The `int` type.
    Int,
    /// The `long` type.
    Long,
}

impl TryFrom<char> for PrimitiveType {
    type Error = char;

    fn try_from(descriptor: char) -> Result<Self, Self::Error> {
        match descriptor {
            'Z' => Ok(Self::Boolean),
            'C' => Ok(Self::Char),
            'F' => Ok(Self::Float),
            'D' => Ok(Self::Double),
            'B' => Ok(Self::Byte),
            'S' => Ok(Self::Short),
            'I' => Ok(Self::Int),
            'J' => Ok(Self::Long),
            unexpected => Err(unexpected),
        }
    }
}

impl PrimitiveType {
    /// Gets the descriptor character of the type.
    #[must_use]
    pub const fn descriptor(self) -> char {
        match self {
            Self::Boolean => 'Z',
            Self::Char => 'C',
            Self::Float => 'F',
            Self::Double => 'D',
            Self::Byte => 'B',
            Self::Short => 'S',
            Self::Int => 'I',
            Self::Long => 'J',
        }
    }
}
