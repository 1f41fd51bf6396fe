use crate::macros::see_jvm_spec;

/// A frame in the `StackMapTable` attribute.
#[doc = see_jvm_spec!(4, 7, 4)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackMapFrame {
    /// `same_frame` (tags 0-63) or `same_frame_extended` (tag 251).
    SameFrame {
        /// The offset delta.
        offset_delta: u16,
    },
    /// `same_locals_1_stack_item_frame` (tags 64-127) or its extended form (tag 247).
    SameLocals1StackItemFrame {
        /// The offset delta.
        offset_delta: u16,
        /// The single operand stack entry.
        stack: VerificationTypeInfo,
    },
    /// `chop_frame` (tags 248-250).
    ChopFrame {
        /// The number of the last locals that are absent.
        chop_count: u8,
        /// The offset delta.
        offset_delta: u16,
    },
    /// `append_frame` (tags 252-254).
    AppendFrame {
        /// The offset delta.
        offset_delta: u16,
        /// The additional locals.
        locals: Vec<VerificationTypeInfo>,
    },
    /// `full_frame` (tag 255).
    FullFrame {
        /// The offset delta.
        offset_delta: u16,
        /// The locals.
        locals: Vec<VerificationTypeInfo>,
        /// The operand stack.
        stack: Vec<VerificationTypeInfo>,
    },
}

/// The verification type of a local variable or an operand stack entry.
#[doc = see_jvm_spec!(4, 7, 4)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationTypeInfo {
    /// `Top_variable_info`
    TopVariable,
    /// `Integer_variable_info`
    IntegerVariable,
    /// `Float_variable_info`
    FloatVariable,
    /// `Double_variable_info`
    DoubleVariable,
    /// `Long_variable_info`
    LongVariable,
    /// `Null_variable_info`
    NullVariable,
    /// `UninitializedThis_variable_info`
    UninitializedThisVariable,
    /// `Object_variable_info`
    ObjectVariable {
        /// The index of the class in the constant pool.
        cpool_index: u16,
    },
    /// `Uninitialized_variable_info`
    UninitializedVariable {
        /// The offset of the `new` instruction that created the object.
        offset: u16,
    },
}
