//! Module for the APIs for the field in JVM.
use super::{access_flags::FieldAccessFlags, attribute::Attribute};

/// A field declared in a class.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// The access flags of the field.
    pub access_flags: FieldAccessFlags,
    /// The name of the field.
    pub name: String,
    /// The field descriptor, e.g. `Ljava/util/List;`.
    pub descriptor: String,
    /// The attributes of the field.
    pub attributes: Vec<Attribute>,
}

impl Field {
    /// Gets the generic signature of the field.
    #[must_use]
    pub fn signature(&self) -> Option<&str> {
        self.attributes.iter().find_map(|attr| match attr {
            Attribute::Signature(signature) => Some(signature.as_str()),
            _ => None,
        })
    }

    /// Gets the constant pool index of the initial value of a `static final` field.
    #[must_use]
    pub fn constant_value_index(&self) -> Option<u16> {
        self.attributes.iter().find_map(|attr| match attr {
            Attribute::ConstantValue { value_index } => Some(*value_index),
            _ => None,
        })
    }
}
