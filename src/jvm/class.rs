//! Module for the APIs for the class in JVM.
use std::fmt::Display;

use serde::Serialize;

use super::{
    access_flags::ClassAccessFlags, attribute::Attribute, field::Field, method::Method,
};

/// A decoded class file.
/// See the [JVM Specification §4](https://docs.oracle.com/javase/specs/jvms/se21/html/jvms-4.html) for more information.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassFile {
    /// The version of the class file.
    pub version: ClassVersion,
    /// The access modifiers of the class.
    pub access_flags: ClassAccessFlags,
    /// The binary name of the class (e.g., `org/example/Foo`).
    pub this_class: String,
    /// The binary name of the superclass.
    /// The class `java/lang/Object` has no superclass, so this field is `None` for that class.
    pub super_class: Option<String>,
    /// The binary names of the direct superinterfaces.
    pub interfaces: Vec<String>,
    /// The fields declared in the class.
    pub fields: Vec<Field>,
    /// The methods declared in the class.
    pub methods: Vec<Method>,
    /// The class-level attributes.
    pub attributes: Vec<Attribute>,
}

impl ClassFile {
    /// Gets a method of the class by its name and descriptor.
    #[must_use]
    pub fn get_method(&self, name: &str, descriptor: &str) -> Option<&Method> {
        self.methods
            .iter()
            .find(|m| m.name == name && m.descriptor == descriptor)
    }

    /// Gets the generic signature of the class.
    #[must_use]
    pub fn signature(&self) -> Option<&str> {
        self.attributes.iter().find_map(|attr| match attr {
            Attribute::Signature(signature) => Some(signature.as_str()),
            _ => None,
        })
    }

    /// Gets the name of the source file the class was compiled from.
    #[must_use]
    pub fn source_file(&self) -> Option<&str> {
        self.attributes.iter().find_map(|attr| match attr {
            Attribute::SourceFile(file) => Some(file.as_str()),
            _ => None,
        })
    }
}

/// The minor version marking a class file that depends on preview features.
pub const PREVIEW_MINOR_VERSION: u16 = 0xFFFF;

/// The version of a class file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ClassVersion {
    /// The major version, e.g. `52` for Java 8.
    pub major: u16,
    /// The minor version.
    pub minor: u16,
}

impl ClassVersion {
    /// Creates a version from its parts.
    #[must_use]
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }

    /// Returns `true` if the class file depends on preview features.
    #[must_use]
    pub const fn is_preview_enabled(&self) -> bool {
        self.minor == PREVIEW_MINOR_VERSION
    }
}

impl Display for ClassVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
