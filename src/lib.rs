#![warn(missing_debug_implementations, rust_2018_idioms, missing_docs)]
//! Inspects compiled JVM artifacts.
//!
//! The crate reads `.class` files (alone, inside directories or inside JAR/ZIP archives),
//! resolves the compiler version of every class, decodes the full constant pool and collects
//! the set of classes each class file refers to through its constant pool, descriptors,
//! generic signatures and annotations.

/// Module containing the per-resource analysis pipeline and its aggregates.
pub mod analysis;
/// Module containing the discovery of class-file resources.
pub mod archive;
/// Module containing the APIs for the JVM class file elements.
pub mod jvm;
pub(crate) mod macros;
/// Module containing the report serialization.
pub mod report;
/// Module containing the versioned class-file specification tables.
pub mod specification;
/// Module containing the JVM type grammar.
pub mod types;

#[cfg(test)]
pub(crate) mod tests;
