//! Classes referenced by a class file.
use std::{collections::BTreeSet, fmt::Display};

use itertools::Itertools;
use serde::Serialize;

use super::constant_pool::{CLASS_NAME_INDEX, ConstantPool, ConstantType};

/// A deduplicated set of binary class names (e.g. `java/util/List`).
/// Iteration order is lexicographic so that reports are deterministic.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReferencedClasses {
    names: BTreeSet<String>,
}

impl ReferencedClasses {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class name. Returns `true` if it was not present yet.
    pub fn insert(&mut self, binary_name: impl Into<String>) -> bool {
        self.names.insert(binary_name.into())
    }

    /// Returns `true` if the set contains the given class name.
    #[must_use]
    pub fn contains(&self, binary_name: &str) -> bool {
        self.names.contains(binary_name)
    }

    /// Returns the number of class names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Removes all class names.
    pub fn clear(&mut self) {
        self.names.clear();
    }

    /// Iterates over the class names in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Adds all class names of `other`.
    pub fn union_with(&mut self, other: ReferencedClasses) {
        self.names.extend(other.names);
    }
}

impl<S: Into<String>> Extend<S> for ReferencedClasses {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}

impl<S: Into<String>> FromIterator<S> for ReferencedClasses {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut result = Self::new();
        result.extend(iter);
        result
    }
}

impl IntoIterator for ReferencedClasses {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.into_iter()
    }
}

impl Display for ReferencedClasses {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.names.iter().join(", "))
    }
}

/// Collects the names of all `Class` entries of a constant pool.
///
/// The name of each entry is taken literally from the `Utf8` entry its `name_index` points to,
/// so array classes appear in descriptor form (e.g. `[Ljava/lang/String;`).
/// Entries whose name cannot be resolved are skipped.
#[must_use]
pub fn constant_pool_references(constant_pool: Option<&ConstantPool>) -> ReferencedClasses {
    let Some(constant_pool) = constant_pool else {
        return ReferencedClasses::new();
    };
    constant_pool
        .iter()
        .filter(|entry| entry.constant_type == ConstantType::Class)
        .filter_map(|entry| {
            let name_index = entry.index_info(CLASS_NAME_INDEX)?;
            constant_pool.get_str(name_index).ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jvm::constant_pool::{Constant, ConstantInfo, InfoValue};

    fn entry(pool_index: u16, constant_type: ConstantType, info: (&str, InfoValue)) -> Constant {
        Constant {
            tag: 0,
            pool_index,
            constant_type,
            info: vec![ConstantInfo {
                description: info.0.to_owned(),
                value: info.1,
            }],
        }
    }

    #[test]
    fn no_constant_pool() {
        assert!(constant_pool_references(None).is_empty());
    }

    #[test]
    fn collects_class_entries_only() {
        let mut pool = ConstantPool::with_capacity(6);
        pool.push(entry(1, ConstantType::Class, ("name_index", InfoValue::Int(2))));
        pool.push(entry(
            2,
            ConstantType::Utf8,
            ("string_value", InfoValue::String("java/lang/Object".to_owned())),
        ));
        pool.push(entry(3, ConstantType::String, ("string_index", InfoValue::Int(4))));
        pool.push(entry(
            4,
            ConstantType::Utf8,
            ("string_value", InfoValue::String("not/a/Class".to_owned())),
        ));
        pool.push(entry(5, ConstantType::Class, ("name_index", InfoValue::Int(40))));
        let refs = constant_pool_references(Some(&pool));
        assert_eq!(refs.iter().collect::<Vec<_>>(), vec!["java/lang/Object"]);
    }

    #[test]
    fn insert_deduplicates() {
        let mut refs = ReferencedClasses::new();
        assert!(refs.insert("a/B"));
        assert!(!refs.insert("a/B"));
        assert_eq!(refs.len(), 1);
        assert_eq!(refs.to_string(), "{a/B}");
    }
}
