//! Attributes of classes, fields, methods, code bodies and record components.
use crate::macros::see_jvm_spec;

use super::{
    access_flags::NestedClassAccessFlags,
    annotation::{Annotation, ElementValue, TypeAnnotation},
    code::{Code, LineNumberTableEntry, LocalVariable, StackMapFrame},
};

/// A decoded attribute.
#[doc = see_jvm_spec!(4, 7)]
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Attribute {
    /// `ConstantValue`
    ConstantValue {
        /// The index of the constant in the constant pool.
        value_index: u16,
    },
    /// `Code`
    Code(Code),
    /// `StackMapTable`
    StackMapTable(Vec<StackMapFrame>),
    /// `Exceptions`, with the names of the checked exception classes.
    Exceptions(Vec<String>),
    /// `InnerClasses`
    InnerClasses(Vec<InnerClass>),
    /// `EnclosingMethod`
    EnclosingMethod(EnclosingMethod),
    /// `Synthetic`
    Synthetic,
    /// `Deprecated`
    Deprecated,
    /// `Signature`
    Signature(String),
    /// `SourceFile`
    SourceFile(String),
    /// `SourceDebugExtension`
    SourceDebugExtension(Vec<u8>),
    /// `LineNumberTable`
    LineNumberTable(Vec<LineNumberTableEntry>),
    /// `LocalVariableTable`
    LocalVariableTable(Vec<LocalVariable>),
    /// `LocalVariableTypeTable`
    LocalVariableTypeTable(Vec<LocalVariable>),
    /// `AnnotationDefault`
    AnnotationDefault(ElementValue),
    /// `RuntimeVisibleAnnotations`
    RuntimeVisibleAnnotations(Vec<Annotation>),
    /// `RuntimeInvisibleAnnotations`
    RuntimeInvisibleAnnotations(Vec<Annotation>),
    /// `RuntimeVisibleParameterAnnotations`
    RuntimeVisibleParameterAnnotations(Vec<Vec<Annotation>>),
    /// `RuntimeInvisibleParameterAnnotations`
    RuntimeInvisibleParameterAnnotations(Vec<Vec<Annotation>>),
    /// `RuntimeVisibleTypeAnnotations`
    RuntimeVisibleTypeAnnotations(Vec<TypeAnnotation>),
    /// `RuntimeInvisibleTypeAnnotations`
    RuntimeInvisibleTypeAnnotations(Vec<TypeAnnotation>),
    /// `BootstrapMethods`
    BootstrapMethods(Vec<BootstrapMethod>),
    /// `MethodParameters`
    MethodParameters(Vec<MethodParameter>),
    /// `NestHost`
    NestHost(String),
    /// `NestMembers`
    NestMembers(Vec<String>),
    /// `PermittedSubclasses`
    PermittedSubclasses(Vec<String>),
    /// `Record`
    Record(Vec<RecordComponent>),
    /// An attribute whose name is not recognized. Its body is kept as is.
    Unrecognized {
        /// The name of the attribute.
        name: String,
        /// The attribute body.
        info: Vec<u8>,
    },
    /// A recognized attribute whose body could not be decoded.
    Malformed {
        /// The name of the attribute.
        name: String,
        /// Why decoding failed.
        reason: String,
        /// The attribute body.
        info: Vec<u8>,
    },
}

impl Attribute {
    /// Gets the name of the attribute as it appears in the class file.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::ConstantValue { .. } => "ConstantValue",
            Self::Code(_) => "Code",
            Self::StackMapTable(_) => "StackMapTable",
            Self::Exceptions(_) => "Exceptions",
            Self::InnerClasses(_) => "InnerClasses",
            Self::EnclosingMethod(_) => "EnclosingMethod",
            Self::Synthetic => "Synthetic",
            Self::Deprecated => "Deprecated",
            Self::Signature(_) => "Signature",
            Self::SourceFile(_) => "SourceFile",
            Self::SourceDebugExtension(_) => "SourceDebugExtension",
            Self::LineNumberTable(_) => "LineNumberTable",
            Self::LocalVariableTable(_) => "LocalVariableTable",
            Self::LocalVariableTypeTable(_) => "LocalVariableTypeTable",
            Self::AnnotationDefault(_) => "AnnotationDefault",
            Self::RuntimeVisibleAnnotations(_) => "RuntimeVisibleAnnotations",
            Self::RuntimeInvisibleAnnotations(_) => "RuntimeInvisibleAnnotations",
            Self::RuntimeVisibleParameterAnnotations(_) => "RuntimeVisibleParameterAnnotations",
            Self::RuntimeInvisibleParameterAnnotations(_) => "RuntimeInvisibleParameterAnnotations",
            Self::RuntimeVisibleTypeAnnotations(_) => "RuntimeVisibleTypeAnnotations",
            Self::RuntimeInvisibleTypeAnnotations(_) => "RuntimeInvisibleTypeAnnotations",
            Self::BootstrapMethods(_) => "BootstrapMethods",
            Self::MethodParameters(_) => "MethodParameters",
            Self::NestHost(_) => "NestHost",
            Self::NestMembers(_) => "NestMembers",
            Self::PermittedSubclasses(_) => "PermittedSubclasses",
            Self::Record(_) => "Record",
            Self::Unrecognized { name, .. } | Self::Malformed { name, .. } => name,
        }
    }
}

/// An entry of the `InnerClasses` attribute.
#[doc = see_jvm_spec!(4, 7, 6)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerClass {
    /// The binary name of the inner class.
    pub inner_class: String,
    /// The binary name of the enclosing class, absent for local and anonymous classes.
    pub outer_class: Option<String>,
    /// The simple name of the inner class, absent for anonymous classes.
    pub inner_name: Option<String>,
    /// The access flags of the inner class.
    pub access_flags: NestedClassAccessFlags,
}

/// The `EnclosingMethod` attribute.
#[doc = see_jvm_spec!(4, 7, 7)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnclosingMethod {
    /// The binary name of the innermost enclosing class.
    pub class: String,
    /// The name and descriptor of the enclosing method, if any.
    pub method: Option<(String, String)>,
}

/// An entry of the `BootstrapMethods` attribute.
#[doc = see_jvm_spec!(4, 7, 23)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapMethod {
    /// The index of the `MethodHandle` entry in the constant pool.
    pub method_ref: u16,
    /// The indices of the static arguments in the constant pool.
    pub arguments: Vec<u16>,
}

/// An entry of the `MethodParameters` attribute.
#[doc = see_jvm_spec!(4, 7, 24)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodParameter {
    /// The name of the parameter, absent for unnamed parameters.
    pub name: Option<String>,
    /// The raw access flags (`final`, `synthetic`, `mandated`).
    pub access_flags: u16,
}

/// A component of a record class.
#[doc = see_jvm_spec!(4, 7, 30)]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordComponent {
    /// The name of the component.
    pub name: String,
    /// The field descriptor of the component.
    pub descriptor: String,
    /// The attributes of the component.
    pub attributes: Vec<Attribute>,
}
