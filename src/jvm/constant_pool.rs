//! Constant pool in a JVM class file.

use serde::{Deserialize, Serialize, Serializer};

use crate::macros::see_jvm_spec;

/// The kind of a constant pool entry.
#[doc = see_jvm_spec!(4, 4)]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[non_exhaustive]
pub enum ConstantType {
    /// `CONSTANT_Class`
    Class,
    /// `CONSTANT_Fieldref`
    FieldRef,
    /// `CONSTANT_Methodref`
    MethodRef,
    /// `CONSTANT_InterfaceMethodref`
    InterfaceMethodRef,
    /// `CONSTANT_String`
    String,
    /// `CONSTANT_Integer`
    Integer,
    /// `CONSTANT_Float`
    Float,
    /// `CONSTANT_Long`
    Long,
    /// `CONSTANT_Double`
    Double,
    /// `CONSTANT_NameAndType`
    NameAndType,
    /// `CONSTANT_Utf8`
    Utf8,
    /// `CONSTANT_MethodHandle`
    MethodHandle,
    /// `CONSTANT_MethodType`
    MethodType,
    /// `CONSTANT_Dynamic`
    Dynamic,
    /// `CONSTANT_InvokeDynamic`
    InvokeDynamic,
    /// `CONSTANT_Module`
    Module,
    /// `CONSTANT_Package`
    Package,
}

impl ConstantType {
    /// Returns `true` if entries of this type occupy two slots in the constant pool.
    #[must_use]
    pub const fn is_wide(self) -> bool {
        matches!(self, Self::Long | Self::Double)
    }
}

/// The value of a single info field of a [`Constant`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InfoValue {
    /// A `u1`, `u2` or `u4` value.
    Int(i32),
    /// A 32-bit IEEE 754 value.
    Float(f32),
    /// A 64-bit integer value.
    Long(i64),
    /// A 64-bit IEEE 754 value.
    Double(f64),
    /// A decoded modified UTF-8 string.
    String(String),
}

/// A typed info field of a [`Constant`], labelled with its role (e.g. `name_index`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstantInfo {
    /// The semantic role of the value, as declared by the constant layout.
    pub description: String,
    /// The value.
    pub value: InfoValue,
}

/// An entry in the [`ConstantPool`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constant {
    /// The raw tag byte.
    pub tag: u8,
    /// The index of the entry in the constant pool.
    pub pool_index: u16,
    /// The kind of the entry.
    #[serde(rename = "type")]
    pub constant_type: ConstantType,
    /// The info fields in the order they appear in the class file.
    pub info: Vec<ConstantInfo>,
}

impl Constant {
    /// Gets the value of the info field with the given description.
    #[must_use]
    pub fn info(&self, description: &str) -> Option<&InfoValue> {
        self.info
            .iter()
            .find(|it| it.description == description)
            .map(|it| &it.value)
    }

    /// Gets the integer value of the info field with the given description.
    #[must_use]
    pub fn int_info(&self, description: &str) -> Option<i32> {
        match self.info(description)? {
            InfoValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Gets the first string value held by this constant, if any.
    #[must_use]
    pub fn string_value(&self) -> Option<&str> {
        self.info.iter().find_map(|it| match &it.value {
            InfoValue::String(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Gets an info field interpreted as a constant pool index.
    pub(crate) fn index_info(&self, description: &str) -> Option<u16> {
        self.int_info(description)
            .and_then(|it| u16::try_from(it).ok())
    }
}

/// An error indicating that a constant pool index does not point to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Cannot find entry #{0} in the constant pool")]
pub struct BadConstantPoolIndex(pub u16);

#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Entry(Constant),
    Padding,
}

/// A JVM constant pool.
/// The pool is indexed from `1`; entries following a `Long` or `Double` are unusable.
#[doc = see_jvm_spec!(4, 4)]
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantPool {
    inner: Vec<Slot>,
}

impl ConstantPool {
    /// Creates a new constant pool with the given capacity.
    /// # Parameters
    /// - `count`: the maximum index of entries in the constant pool plus one.
    #[must_use]
    pub fn with_capacity(count: u16) -> Self {
        // Index 0 is never valid.
        let mut inner = Vec::with_capacity(usize::from(count).max(1));
        inner.push(Slot::Padding);
        Self { inner }
    }

    /// Appends a constant to the pool.
    /// Wide constants are followed by an unusable slot.
    pub(crate) fn push(&mut self, constant: Constant) {
        let wide = constant.constant_type.is_wide();
        self.inner.push(Slot::Entry(constant));
        if wide {
            self.inner.push(Slot::Padding);
        }
    }

    /// Gets the count of the constant pool. Note that this is NOT the number of entries.
    /// A wide constant in the last slot adds a padding slot past the declared count, which
    /// saturates at [`u16::MAX`].
    #[must_use]
    pub fn count(&self) -> u16 {
        u16::try_from(self.inner.len()).unwrap_or(u16::MAX)
    }

    /// Gets the constant pool entry at the given index.
    /// # Errors
    /// - [`BadConstantPoolIndex`] if `index` does not point to an entry.
    pub fn get(&self, index: u16) -> Result<&Constant, BadConstantPoolIndex> {
        match self.inner.get(usize::from(index)) {
            Some(Slot::Entry(entry)) => Ok(entry),
            _ => Err(BadConstantPoolIndex(index)),
        }
    }

    /// Gets the string value of the `Utf8` entry at the given index.
    /// # Errors
    /// - [`BadConstantPoolIndex`] if `index` does not point to a `Utf8` entry.
    pub fn get_str(&self, index: u16) -> Result<&str, BadConstantPoolIndex> {
        let entry = self.get(index)?;
        match entry.constant_type {
            ConstantType::Utf8 => entry.string_value().ok_or(BadConstantPoolIndex(index)),
            _ => Err(BadConstantPoolIndex(index)),
        }
    }

    /// Gets the binary name of the `Class` entry at the given index.
    /// # Errors
    /// - [`BadConstantPoolIndex`] if `index` does not point to a `Class` entry, or the entry's
    ///   `name_index` does not point to a `Utf8` entry.
    pub fn class_name(&self, index: u16) -> Result<&str, BadConstantPoolIndex> {
        let entry = self.get(index)?;
        if entry.constant_type != ConstantType::Class {
            return Err(BadConstantPoolIndex(index));
        }
        let name_index = entry
            .index_info(CLASS_NAME_INDEX)
            .ok_or(BadConstantPoolIndex(index))?;
        self.get_str(name_index)
    }

    /// Gets the name and descriptor of the `NameAndType` entry at the given index.
    /// # Errors
    /// - [`BadConstantPoolIndex`] if the entry or one of its strings cannot be resolved.
    pub fn name_and_type(&self, index: u16) -> Result<(&str, &str), BadConstantPoolIndex> {
        let entry = self.get(index)?;
        if entry.constant_type != ConstantType::NameAndType {
            return Err(BadConstantPoolIndex(index));
        }
        let name_index = entry
            .index_info("name_index")
            .ok_or(BadConstantPoolIndex(index))?;
        let descriptor_index = entry
            .index_info("descriptor_index")
            .ok_or(BadConstantPoolIndex(index))?;
        Ok((self.get_str(name_index)?, self.get_str(descriptor_index)?))
    }

    /// Iterates over the entries of the pool, skipping unusable slots.
    pub fn iter(&self) -> impl Iterator<Item = &Constant> {
        self.inner.iter().filter_map(|slot| match slot {
            Slot::Entry(entry) => Some(entry),
            Slot::Padding => None,
        })
    }

    /// Returns the number of entries in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns `true` if the pool has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// The description of the info field of a `Class` entry pointing at its name.
pub const CLASS_NAME_INDEX: &str = "name_index";

impl Serialize for ConstantPool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf8(pool_index: u16, value: &str) -> Constant {
        Constant {
            tag: 1,
            pool_index,
            constant_type: ConstantType::Utf8,
            info: vec![ConstantInfo {
                description: "string_value".to_owned(),
                value: InfoValue::String(value.to_owned()),
            }],
        }
    }

    fn class(pool_index: u16, name_index: u16) -> Constant {
        Constant {
            tag: 7,
            pool_index,
            constant_type: ConstantType::Class,
            info: vec![ConstantInfo {
                description: CLASS_NAME_INDEX.to_owned(),
                value: InfoValue::Int(i32::from(name_index)),
            }],
        }
    }

    fn long(pool_index: u16) -> Constant {
        Constant {
            tag: 5,
            pool_index,
            constant_type: ConstantType::Long,
            info: vec![ConstantInfo {
                description: "long_value".to_owned(),
                value: InfoValue::Long(42),
            }],
        }
    }

    #[test]
    fn index_zero_is_invalid() {
        let pool = ConstantPool::with_capacity(1);
        assert_eq!(pool.get(0), Err(BadConstantPoolIndex(0)));
        assert!(pool.is_empty());
    }

    #[test]
    fn wide_entries_take_two_slots() {
        let mut pool = ConstantPool::with_capacity(4);
        pool.push(long(1));
        pool.push(utf8(3, "after"));
        assert_eq!(pool.count(), 4);
        assert!(pool.get(1).is_ok());
        assert_eq!(pool.get(2), Err(BadConstantPoolIndex(2)));
        assert_eq!(pool.get_str(3), Ok("after"));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn count_saturates_with_trailing_wide_constant() {
        let mut pool = ConstantPool::with_capacity(u16::MAX);
        for pool_index in 1..u16::MAX - 1 {
            pool.push(utf8(pool_index, "x"));
        }
        pool.push(long(u16::MAX - 1));
        assert_eq!(pool.count(), u16::MAX);
        assert!(pool.get(u16::MAX - 1).is_ok());
    }

    #[test]
    fn constant_type_display() {
        assert_eq!(ConstantType::MethodRef.to_string(), "MethodRef");
        assert_eq!(ConstantType::Utf8.to_string(), "Utf8");
    }

    #[test]
    fn resolve_class_name() {
        let mut pool = ConstantPool::with_capacity(3);
        pool.push(class(1, 2));
        pool.push(utf8(2, "java/lang/Object"));
        assert_eq!(pool.class_name(1), Ok("java/lang/Object"));
        assert_eq!(pool.class_name(2), Err(BadConstantPoolIndex(2)));
    }

    #[test]
    fn dangling_class_name() {
        let mut pool = ConstantPool::with_capacity(2);
        pool.push(class(1, 9));
        assert_eq!(pool.class_name(1), Err(BadConstantPoolIndex(9)));
    }
}
