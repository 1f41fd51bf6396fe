//! Module for the APIs for the annotation in JVM.
use crate::macros::see_jvm_spec;

/// An annotation on a class, field, method, parameter or record component.
#[doc = see_jvm_spec!(4, 7, 16)]
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// The field descriptor of the annotation interface, e.g. `Ljava/lang/Deprecated;`.
    pub type_descriptor: String,
    /// The element-value pairs.
    pub element_value_pairs: Vec<(String, ElementValue)>,
}

/// A value of an annotation element.
#[doc = see_jvm_spec!(4, 7, 16, 1)]
#[derive(Debug, Clone, PartialEq)]
pub enum ElementValue {
    /// A constant of a primitive type (`B C D F I J S Z`) or of `String` (`s`).
    Constant {
        /// The tag character.
        tag: char,
        /// The index of the constant in the constant pool.
        const_value_index: u16,
    },
    /// An enum constant.
    EnumConstant {
        /// The field descriptor of the enum type.
        type_name: String,
        /// The simple name of the enum constant.
        const_name: String,
    },
    /// A class literal.
    Class {
        /// The return descriptor of the class literal, e.g. `Ljava/lang/String;` or `V`.
        return_descriptor: String,
    },
    /// Another annotation.
    Annotation(Annotation),
    /// An array of values.
    Array(Vec<ElementValue>),
}

/// An annotation on a type use.
#[doc = see_jvm_spec!(4, 7, 20)]
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAnnotation {
    /// The raw `target_type` byte.
    pub target_type: u8,
    /// Which type in the declaration or expression is annotated.
    pub target_info: TargetInfo,
    /// Which part of the type is annotated.
    pub target_path: Vec<TypePathElement>,
    /// The annotation itself.
    pub annotation: Annotation,
}

/// Information about the target of a [`TypeAnnotation`].
#[doc = see_jvm_spec!(4, 7, 20, 1)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetInfo {
    /// Indicates an annotation appears on a type parameter declaration of a generic class, interface, method, or constructor.
    TypeParameter {
        /// The index of the type parameter declaration.
        index: u8,
    },
    /// Indicates that an annotation appears on a type in the `extends` or `implements` clause of a class or interface declaration.
    SuperType {
        /// The index of the type in the `implements` clause.
        /// A value of [`u16::MAX`] specifies that the annotation appears on the superclass in an extends clause of a class declaration.
        index: u16,
    },
    /// Indicates that an annotation appears on a bound of a type parameter declaration of a generic class, interface, method, or constructor.
    TypeParameterBound {
        /// The index of the type parameter declaration.
        type_parameter_index: u8,
        /// The index of the bound of the type parameter declaration.
        bound_index: u8,
    },
    /// Indicates that an annotation appears on either the type in a field declaration, the type in a record component declaration,
    /// the return type of a method, the type of a newly constructed object, or the receiver type of a method or constructor.
    Empty,
    /// Indicates that an annotation appears on the type in a formal parameter declaration of a method, constructor, or lambda expression.
    FormalParameter {
        /// The index of the formal parameter declaration.
        index: u8,
    },
    /// Indicates that an annotation appears on a type in the throws clause of a method or constructor declaration.
    Throws {
        /// The index of the type in the throws clause.
        index: u16,
    },
    /// Indicates that an annotation appears on the type in a local variable declaration.
    LocalVar(Vec<LocalVarTarget>),
    /// Indicates that an annotation appears on a type in an exception parameter declaration.
    Catch {
        /// The index in the exception table.
        exception_table_index: u16,
    },
    /// Indicates that an annotation appears on either the type in an `instanceof` expression or a `new` expression,
    /// or the type before the `::` in a method reference expression.
    Offset(u16),
    /// Indicates that an annotation appears on a type in a cast expression,
    /// or on a type argument in an explicit type argument list.
    TypeArgument {
        /// The location of the instruction.
        offset: u16,
        /// The index of the type argument.
        index: u8,
    },
}

/// A live range of an annotated local variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalVarTarget {
    /// The first code offset at which the variable has a value.
    pub start_pc: u16,
    /// The length of the range.
    pub length: u16,
    /// The index of the variable in the local variable array.
    pub index: u16,
}

/// Identifies a part of a type that is annotated.
#[doc = see_jvm_spec!(4, 7, 20, 2)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypePathElement {
    /// Annotation is deeper in an array type.
    Array,
    /// Annotation is deeper in a nested type.
    Nested,
    /// Annotation is on the bound of a wildcard type argument of a parameterized type.
    Bound,
    /// Annotation is on a type argument of a parameterized type.
    TypeArgument(u8),
}
