//! Access flags of classes, nested classes, fields and methods.

use bitflags::{Flags, bitflags};

bitflags! {
    /// The access flags of a class.
    #[derive(Debug, PartialEq, Eq, Clone, Copy)]
    pub struct ClassAccessFlags: u16 {
        /// Declared `public`; may be accessed from outside its package.
        const PUBLIC = 0x0001;
        /// Marked `private` in source.
        /// NOTE: This is not mentioned in the JVM Specification. However it is set in some class
        /// files, even for those in the JDK.
        const PRIVATE = 0x0002;
        /// Declared `final`; no subclasses allowed.
        const FINAL = 0x0010;
        /// Treat superclass methods specially when invoked by the invokespecial instruction.
        const SUPER = 0x0020;
        /// Is an interface, not a class.
        const INTERFACE = 0x0200;
        /// Declared `abstract`; must not be instantiated.
        const ABSTRACT = 0x0400;
        /// Declared synthetic; not present in the source code.
        const SYNTHETIC = 0x1000;
        /// Declared as an annotation interface.
        const ANNOTATION = 0x2000;
        /// Declared as an enum class.
        const ENUM = 0x4000;
        /// Is a module, not a class or interface.
        const MODULE = 0x8000;
    }
}

bitflags! {
    /// The access flags of a nested class.
    #[derive(Debug, PartialEq, Eq, Clone, Copy)]
    pub struct NestedClassAccessFlags: u16 {
        /// Marked or implicitly `public` in source.
        const PUBLIC = 0x0001;
        /// Marked `private` in source.
        const PRIVATE = 0x0002;
        /// Marked `protected` in source.
        const PROTECTED = 0x0004;
        /// Marked or implicitly `static` in source.
        const STATIC = 0x0008;
        /// Marked `final` in source.
        const FINAL = 0x0010;
        /// Was an `interface` in source.
        const INTERFACE = 0x0200;
        /// Marked or implicitly `abstract` in source.
        const ABSTRACT = 0x0400;
        /// Declared `synthetic`; not present in the source code.
        const SYNTHETIC = 0x1000;
        /// Declared as an annotation interface.
        const ANNOTATION = 0x2000;
        /// Declared as an enum class.
        const ENUM = 0x4000;
    }
}

bitflags! {
    /// The access flags of a field.
    #[derive(Debug, PartialEq, Eq, Clone, Copy)]
    pub struct FieldAccessFlags: u16 {
        /// Declared `public`; may be accessed from outside its package.
        const PUBLIC = 0x0001;
        /// Declared `private`; accessible only within the defining class and other classes belonging to the same nest.
        const PRIVATE = 0x0002;
        /// Declared `protected`; may be accessed within subclasses.
        const PROTECTED = 0x0004;
        /// Declared `static`.
        const STATIC = 0x0008;
        /// Declared `final`; never directly assigned to after object construction.
        const FINAL = 0x0010;
        /// Declared `volatile`; cannot be cached.
        const VOLATILE = 0x0040;
        /// Declared `transient`; not written or read by a persistent object manager.
        const TRANSIENT = 0x0080;
        /// Declared synthetic; not present in the source code.
        const SYNTHETIC = 0x1000;
        /// Declared as an element of an `enum` class.
        const ENUM = 0x4000;
    }
}

bitflags! {
    /// The access flags of a method.
    #[derive(Debug, PartialEq, Eq, Clone, Copy)]
    pub struct MethodAccessFlags: u16 {
        /// Declared `public`; may be accessed from outside its package.
        const PUBLIC = 0x0001;
        /// Declared `private`; accessible only within the defining class and other classes belonging to the same nest.
        const PRIVATE = 0x0002;
        /// Declared `protected`; may be accessed within subclasses.
        const PROTECTED = 0x0004;
        /// Declared `static`.
        const STATIC = 0x0008;
        /// Declared `final`; must not be overridden.
        const FINAL = 0x0010;
        /// Declared `synchronized`; invocation is wrapped by a monitor use.
        const SYNCHRONIZED = 0x0020;
        /// A bridge method, generated by the compiler.
        const BRIDGE = 0x0040;
        /// Declared with variable number of arguments.
        const VARARGS = 0x0080;
        /// Declared `native`; implemented in a language other than the Java programming language.
        const NATIVE = 0x0100;
        /// Declared `abstract`; no implementation is provided.
        const ABSTRACT = 0x0400;
        /// In a class file whose major version number is at least 46 and at most 60: Declared `strictfp`.
        const STRICT = 0x0800;
        /// Declared synthetic; not present in the source code.
        const SYNTHETIC = 0x1000;
    }
}

/// The structure a set of access flags belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagContext {
    /// The `access_flags` of a class file.
    Class,
    /// The `inner_class_access_flags` of an `InnerClasses` entry.
    InnerClass,
    /// The `access_flags` of a field.
    Field,
    /// The `access_flags` of a method.
    Method,
}

/// Gets the names of the flags set in `bits`, interpreted in the given context.
/// Bits without a name in that context are ignored.
#[must_use]
pub fn flag_names(context: FlagContext, bits: u16) -> Vec<&'static str> {
    match context {
        FlagContext::Class => names(ClassAccessFlags::from_bits_retain(bits)),
        FlagContext::InnerClass => names(NestedClassAccessFlags::from_bits_retain(bits)),
        FlagContext::Field => names(FieldAccessFlags::from_bits_retain(bits)),
        FlagContext::Method => names(MethodAccessFlags::from_bits_retain(bits)),
    }
}

fn names<F: Flags>(flags: F) -> Vec<&'static str> {
    flags.iter_names().map(|(name, _)| name).collect()
}

macro_rules! impl_names {
    ($($flags:ty => $context:ident),*) => {
        $(
            impl $flags {
                /// Gets the names of the flags that are set, e.g. `["PUBLIC", "FINAL"]`.
                #[must_use]
                pub fn names(&self) -> Vec<&'static str> {
                    flag_names(FlagContext::$context, self.bits())
                }
            }
        )*
    };
}

impl_names!(
    ClassAccessFlags => Class,
    NestedClassAccessFlags => InnerClass,
    FieldAccessFlags => Field,
    MethodAccessFlags => Method
);
