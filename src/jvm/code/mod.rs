//! Module for the APIs for the executable code in JVM.
mod stack_map;

pub use stack_map::*;

use std::fmt::Display;

use crate::macros::see_jvm_spec;

use super::attribute::Attribute;

/// The mnemonic given to opcodes missing from the opcode table.
pub const MNEMONIC_NOT_FOUND: &str = "not found";

/// The body of a method.
#[doc = see_jvm_spec!(4, 7, 3)]
#[derive(Debug, Clone, PartialEq)]
pub struct Code {
    /// The maximum number of values on the operand stack of the method.
    pub max_stack: u16,
    /// The maximum number of local variables in the method.
    pub max_locals: u16,
    /// The executable instructions, in code order.
    pub instructions: Vec<Instruction>,
    /// The exception handlers table.
    pub exception_table: Vec<ExceptionTableEntry>,
    /// The attributes of the code, e.g. `LineNumberTable` or `StackMapTable`.
    pub attributes: Vec<Attribute>,
}

impl Code {
    /// Returns the instruction starting at the given code offset.
    #[must_use]
    pub fn instruction_at(&self, offset: u32) -> Option<&Instruction> {
        self.instructions
            .binary_search_by_key(&offset, |it| it.offset)
            .ok()
            .map(|pos| &self.instructions[pos])
    }
}

/// A single instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// The offset of the opcode from the start of the code array.
    pub offset: u32,
    /// The opcode.
    pub opcode: u8,
    /// The mnemonic of the opcode, or [`MNEMONIC_NOT_FOUND`].
    pub mnemonic: String,
    /// The raw operand bytes.
    pub operands: Vec<u8>,
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.offset, self.mnemonic)?;
        for byte in &self.operands {
            write!(f, " {byte:02x}")?;
        }
        Ok(())
    }
}

/// An exception handler of a [`Code`] attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExceptionTableEntry {
    /// The start of the protected range (inclusive).
    pub start_pc: u16,
    /// The end of the protected range (exclusive).
    pub end_pc: u16,
    /// The start of the handler.
    pub handler_pc: u16,
    /// The index of the caught class in the constant pool, or `0` for any exception.
    pub catch_type: u16,
}

/// An entry in the line number table.
#[doc = see_jvm_spec!(4, 7, 12)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineNumberTableEntry {
    /// The offset of the first instruction of the line.
    pub start_pc: u16,
    /// The line number in the source file.
    pub line_number: u16,
}

/// An entry of a `LocalVariableTable` or `LocalVariableTypeTable`.
#[doc = see_jvm_spec!(4, 7, 13)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalVariable {
    /// The first offset at which the variable has a value.
    pub start_pc: u16,
    /// The length of the range in which the variable has a value.
    pub length: u16,
    /// The name of the variable.
    pub name: String,
    /// The field descriptor (`LocalVariableTable`) or field signature (`LocalVariableTypeTable`).
    pub descriptor: String,
    /// The index of the variable in the local variable array.
    pub index: u16,
}
