//! The parsing logic for the JVM class file format.
//!
//! A class file is decoded in stages so that callers can keep whatever was decoded before a
//! failure: [`parse_header`] reads the magic number and the version, [`parse_constant_pool`]
//! reads the constant pool and [`parse_class_body`] reads everything after it.
mod annotation;
mod attribute;
mod class_file;
mod code;
mod constant_pool;
mod errors;
mod reader_utils;

pub use class_file::{parse_class_body, parse_header};
pub use constant_pool::parse_constant_pool;
pub use errors::Error;
pub use reader_utils::ClassReader;

use tracing::debug;

use crate::{specification::JavaSpecification, types::collect_referenced_classes};

use super::{
    constant_pool::{BadConstantPoolIndex, ConstantPool},
    references::ReferencedClasses,
};

/// The magic number at the start of every class file.
pub const JAVA_CLASS_MAGIC: u32 = 0xCAFE_BABE;

/// Context used to parse the structures following the constant pool.
#[derive(Debug)]
pub struct Context<'a> {
    /// The constant pool of the class file.
    pub constant_pool: &'a ConstantPool,
    /// The tables for the version of the class file being parsed.
    pub specification: &'a JavaSpecification,
    /// The classes referenced by descriptors and signatures seen so far.
    pub references: &'a mut ReferencedClasses,
}

impl Context<'_> {
    /// Gets the `Utf8` entry at `index`, or an empty string if it cannot be resolved.
    pub(crate) fn utf8(&self, index: u16) -> String {
        self.constant_pool
            .get_str(index)
            .map(str::to_owned)
            .unwrap_or_else(|err| unresolved(err))
    }

    /// Gets the name of the `Class` entry at `index`, or an empty string if it cannot be resolved.
    pub(crate) fn class_name(&self, index: u16) -> String {
        self.constant_pool
            .class_name(index)
            .map(str::to_owned)
            .unwrap_or_else(|err| unresolved(err))
    }

    /// Like [`Self::utf8`], but index `0` means absent.
    pub(crate) fn optional_utf8(&self, index: u16) -> Option<String> {
        (index != 0).then(|| self.utf8(index))
    }

    /// Like [`Self::class_name`], but index `0` means absent.
    pub(crate) fn optional_class_name(&self, index: u16) -> Option<String> {
        (index != 0).then(|| self.class_name(index))
    }

    /// Adds the classes mentioned by a descriptor or a signature to the referenced classes.
    pub(crate) fn record_descriptor(&mut self, descriptor: &str) {
        if !collect_referenced_classes(descriptor, self.references) {
            debug!(descriptor, "Skipping malformed descriptor");
        }
    }
}

fn unresolved(err: BadConstantPoolIndex) -> String {
    debug!(error = %Error::from(err), "Unresolved constant pool index");
    String::new()
}
