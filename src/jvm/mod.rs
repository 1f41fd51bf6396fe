//! Module containing the APIs for the JVM elements.

pub mod access_flags;
pub mod annotation;
pub mod attribute;
pub mod class;
pub mod code;
pub mod constant_pool;
pub mod field;
pub mod method;
pub mod parsing;
pub mod references;

pub use class::{ClassFile, ClassVersion};
pub use constant_pool::ConstantPool;
pub use references::ReferencedClasses;
