//! The built-in specification tables.

use crate::jvm::constant_pool::ConstantType;

use super::{
    ConstantLayout, FieldWidth, InfoFragment, JavaSpecification, Mnemonic, OperandLayout,
};

use super::FieldWidth::{Byte, Double, Float, Int, Long, Short, Utf8};

type Fragments = &'static [(&'static str, FieldWidth)];

/// `(tag, type, fields, first major version defining the tag)`
const CONSTANT_LAYOUTS: &[(u8, ConstantType, Fragments, u16)] = &[
    (1, ConstantType::Utf8, &[("string_value", Utf8)], 45),
    (3, ConstantType::Integer, &[("int_value", Int)], 45),
    (4, ConstantType::Float, &[("float_value", Float)], 45),
    (5, ConstantType::Long, &[("long_value", Long)], 45),
    (6, ConstantType::Double, &[("double_value", Double)], 45),
    (7, ConstantType::Class, &[("name_index", Short)], 45),
    (8, ConstantType::String, &[("string_index", Short)], 45),
    (
        9,
        ConstantType::FieldRef,
        &[("class_index", Short), ("name_and_type_index", Short)],
        45,
    ),
    (
        10,
        ConstantType::MethodRef,
        &[("class_index", Short), ("name_and_type_index", Short)],
        45,
    ),
    (
        11,
        ConstantType::InterfaceMethodRef,
        &[("class_index", Short), ("name_and_type_index", Short)],
        45,
    ),
    (
        12,
        ConstantType::NameAndType,
        &[("name_index", Short), ("descriptor_index", Short)],
        45,
    ),
    (
        15,
        ConstantType::MethodHandle,
        &[("reference_kind", Byte), ("reference_index", Short)],
        51,
    ),
    (16, ConstantType::MethodType, &[("descriptor_index", Short)], 51),
    (
        17,
        ConstantType::Dynamic,
        &[
            ("bootstrap_method_attr_index", Short),
            ("name_and_type_index", Short),
        ],
        55,
    ),
    (
        18,
        ConstantType::InvokeDynamic,
        &[
            ("bootstrap_method_attr_index", Short),
            ("name_and_type_index", Short),
        ],
        51,
    ),
    (19, ConstantType::Module, &[("name_index", Short)], 53),
    (20, ConstantType::Package, &[("name_index", Short)], 53),
];

const NO_OPERANDS: OperandLayout = OperandLayout::Fixed(0);
const U1: OperandLayout = OperandLayout::Fixed(1);
const U2: OperandLayout = OperandLayout::Fixed(2);
const U3: OperandLayout = OperandLayout::Fixed(3);
const U4: OperandLayout = OperandLayout::Fixed(4);

/// `(opcode, mnemonic, operands, first major version defining the opcode)`
#[rustfmt::skip]
const MNEMONICS: &[(u8, &str, OperandLayout, u16)] = &[
    (0x00, "nop", NO_OPERANDS, 45),
    (0x01, "aconst_null", NO_OPERANDS, 45),
    (0x02, "iconst_m1", NO_OPERANDS, 45),
    (0x03, "iconst_0", NO_OPERANDS, 45),
    (0x04, "iconst_1", NO_OPERANDS, 45),
    (0x05, "iconst_2", NO_OPERANDS, 45),
    (0x06, "iconst_3", NO_OPERANDS, 45),
    (0x07, "iconst_4", NO_OPERANDS, 45),
    (0x08, "iconst_5", NO_OPERANDS, 45),
    (0x09, "lconst_0", NO_OPERANDS, 45),
    (0x0A, "lconst_1", NO_OPERANDS, 45),
    (0x0B, "fconst_0", NO_OPERANDS, 45),
    (0x0C, "fconst_1", NO_OPERANDS, 45),
    (0x0D, "fconst_2", NO_OPERANDS, 45),
    (0x0E, "dconst_0", NO_OPERANDS, 45),
    (0x0F, "dconst_1", NO_OPERANDS, 45),
    (0x10, "bipush", U1, 45),
    (0x11, "sipush", U2, 45),
    (0x12, "ldc", U1, 45),
    (0x13, "ldc_w", U2, 45),
    (0x14, "ldc2_w", U2, 45),
    (0x15, "iload", U1, 45),
    (0x16, "lload", U1, 45),
    (0x17, "fload", U1, 45),
    (0x18, "dload", U1, 45),
    (0x19, "aload", U1, 45),
    (0x1A, "iload_0", NO_OPERANDS, 45),
    (0x1B, "iload_1", NO_OPERANDS, 45),
    (0x1C, "iload_2", NO_OPERANDS, 45),
    (0x1D, "iload_3", NO_OPERANDS, 45),
    (0x1E, "lload_0", NO_OPERANDS, 45),
    (0x1F, "lload_1", NO_OPERANDS, 45),
    (0x20, "lload_2", NO_OPERANDS, 45),
    (0x21, "lload_3", NO_OPERANDS, 45),
    (0x22, "fload_0", NO_OPERANDS, 45),
    (0x23, "fload_1", NO_OPERANDS, 45),
    (0x24, "fload_2", NO_OPERANDS, 45),
    (0x25, "fload_3", NO_OPERANDS, 45),
    (0x26, "dload_0", NO_OPERANDS, 45),
    (0x27, "dload_1", NO_OPERANDS, 45),
    (0x28, "dload_2", NO_OPERANDS, 45),
    (0x29, "dload_3", NO_OPERANDS, 45),
    (0x2A, "aload_0", NO_OPERANDS, 45),
    (0x2B, "aload_1", NO_OPERANDS, 45),
    (0x2C, "aload_2", NO_OPERANDS, 45),
    (0x2D, "aload_3", NO_OPERANDS, 45),
    (0x2E, "iaload", NO_OPERANDS, 45),
    (0x2F, "laload", NO_OPERANDS, 45),
    (0x30, "faload", NO_OPERANDS, 45),
    (0x31, "daload", NO_OPERANDS, 45),
    (0x32, "aaload", NO_OPERANDS, 45),
    (0x33, "baload", NO_OPERANDS, 45),
    (0x34, "caload", NO_OPERANDS, 45),
    (0x35, "saload", NO_OPERANDS, 45),
    (0x36, "istore", U1, 45),
    (0x37, "lstore", U1, 45),
    (0x38, "fstore", U1, 45),
    (0x39, "dstore", U1, 45),
    (0x3A, "astore", U1, 45),
    (0x3B, "istore_0", NO_OPERANDS, 45),
    (0x3C, "istore_1", NO_OPERANDS, 45),
    (0x3D, "istore_2", NO_OPERANDS, 45),
    (0x3E, "istore_3", NO_OPERANDS, 45),
    (0x3F, "lstore_0", NO_OPERANDS, 45),
    (0x40, "lstore_1", NO_OPERANDS, 45),
    (0x41, "lstore_2", NO_OPERANDS, 45),
    (0x42, "lstore_3", NO_OPERANDS, 45),
    (0x43, "fstore_0", NO_OPERANDS, 45),
    (0x44, "fstore_1", NO_OPERANDS, 45),
    (0x45, "fstore_2", NO_OPERANDS, 45),
    (0x46, "fstore_3", NO_OPERANDS, 45),
    (0x47, "dstore_0", NO_OPERANDS, 45),
    (0x48, "dstore_1", NO_OPERANDS, 45),
    (0x49, "dstore_2", NO_OPERANDS, 45),
    (0x4A, "dstore_3", NO_OPERANDS, 45),
    (0x4B, "astore_0", NO_OPERANDS, 45),
    (0x4C, "astore_1", NO_OPERANDS, 45),
    (0x4D, "astore_2", NO_OPERANDS, 45),
    (0x4E, "astore_3", NO_OPERANDS, 45),
    (0x4F, "iastore", NO_OPERANDS, 45),
    (0x50, "lastore", NO_OPERANDS, 45),
    (0x51, "fastore", NO_OPERANDS, 45),
    (0x52, "dastore", NO_OPERANDS, 45),
    (0x53, "aastore", NO_OPERANDS, 45),
    (0x54, "bastore", NO_OPERANDS, 45),
    (0x55, "castore", NO_OPERANDS, 45),
    (0x56, "sastore", NO_OPERANDS, 45),
    (0x57, "pop", NO_OPERANDS, 45),
    (0x58, "pop2", NO_OPERANDS, 45),
    (0x59, "dup", NO_OPERANDS, 45),
    (0x5A, "dup_x1", NO_OPERANDS, 45),
    (0x5B, "dup_x2", NO_OPERANDS, 45),
    (0x5C, "dup2", NO_OPERANDS, 45),
    (0x5D, "dup2_x1", NO_OPERANDS, 45),
    (0x5E, "dup2_x2", NO_OPERANDS, 45),
    (0x5F, "swap", NO_OPERANDS, 45),
    (0x60, "iadd", NO_OPERANDS, 45),
    (0x61, "ladd", NO_OPERANDS, 45),
    (0x62, "fadd", NO_OPERANDS, 45),
    (0x63, "dadd", NO_OPERANDS, 45),
    (0x64, "isub", NO_OPERANDS, 45),
    (0x65, "lsub", NO_OPERANDS, 45),
    (0x66, "fsub", NO_OPERANDS, 45),
    (0x67, "dsub", NO_OPERANDS, 45),
    (0x68, "imul", NO_OPERANDS, 45),
    (0x69, "lmul", NO_OPERANDS, 45),
    (0x6A, "fmul", NO_OPERANDS, 45),
    (0x6B, "dmul", NO_OPERANDS, 45),
    (0x6C, "idiv", NO_OPERANDS, 45),
    (0x6D, "ldiv", NO_OPERANDS, 45),
    (0x6E, "fdiv", NO_OPERANDS, 45),
    (0x6F, "ddiv", NO_OPERANDS, 45),
    (0x70, "irem", NO_OPERANDS, 45),
    (0x71, "lrem", NO_OPERANDS, 45),
    (0x72, "frem", NO_OPERANDS, 45),
    (0x73, "drem", NO_OPERANDS, 45),
    (0x74, "ineg", NO_OPERANDS, 45),
    (0x75, "lneg", NO_OPERANDS, 45),
    (0x76, "fneg", NO_OPERANDS, 45),
    (0x77, "dneg", NO_OPERANDS, 45),
    (0x78, "ishl", NO_OPERANDS, 45),
    (0x79, "lshl", NO_OPERANDS, 45),
    (0x7A, "ishr", NO_OPERANDS, 45),
    (0x7B, "lshr", NO_OPERANDS, 45),
    (0x7C, "iushr", NO_OPERANDS, 45),
    (0x7D, "lushr", NO_OPERANDS, 45),
    (0x7E, "iand", NO_OPERANDS, 45),
    (0x7F, "land", NO_OPERANDS, 45),
    (0x80, "ior", NO_OPERANDS, 45),
    (0x81, "lor", NO_OPERANDS, 45),
    (0x82, "ixor", NO_OPERANDS, 45),
    (0x83, "lxor", NO_OPERANDS, 45),
    (0x84, "iinc", U2, 45),
    (0x85, "i2l", NO_OPERANDS, 45),
    (0x86, "i2f", NO_OPERANDS, 45),
    (0x87, "i2d", NO_OPERANDS, 45),
    (0x88, "l2i", NO_OPERANDS, 45),
    (0x89, "l2f", NO_OPERANDS, 45),
    (0x8A, "l2d", NO_OPERANDS, 45),
    (0x8B, "f2i", NO_OPERANDS, 45),
    (0x8C, "f2l", NO_OPERANDS, 45),
    (0x8D, "f2d", NO_OPERANDS, 45),
    (0x8E, "d2i", NO_OPERANDS, 45),
    (0x8F, "d2l", NO_OPERANDS, 45),
    (0x90, "d2f", NO_OPERANDS, 45),
    (0x91, "i2b", NO_OPERANDS, 45),
    (0x92, "i2c", NO_OPERANDS, 45),
    (0x93, "i2s", NO_OPERANDS, 45),
    (0x94, "lcmp", NO_OPERANDS, 45),
    (0x95, "fcmpl", NO_OPERANDS, 45),
    (0x96, "fcmpg", NO_OPERANDS, 45),
    (0x97, "dcmpl", NO_OPERANDS, 45),
    (0x98, "dcmpg", NO_OPERANDS, 45),
    (0x99, "ifeq", U2, 45),
    (0x9A, "ifne", U2, 45),
    (0x9B, "iflt", U2, 45),
    (0x9C, "ifge", U2, 45),
    (0x9D, "ifgt", U2, 45),
    (0x9E, "ifle", U2, 45),
    (0x9F, "if_icmpeq", U2, 45),
    (0xA0, "if_icmpne", U2, 45),
    (0xA1, "if_icmplt", U2, 45),
    (0xA2, "if_icmpge", U2, 45),
    (0xA3, "if_icmpgt", U2, 45),
    (0xA4, "if_icmple", U2, 45),
    (0xA5, "if_acmpeq", U2, 45),
    (0xA6, "if_acmpne", U2, 45),
    (0xA7, "goto", U2, 45),
    (0xA8, "jsr", U2, 45),
    (0xA9, "ret", U1, 45),
    (0xAA, "tableswitch", OperandLayout::TableSwitch, 45),
    (0xAB, "lookupswitch", OperandLayout::LookupSwitch, 45),
    (0xAC, "ireturn", NO_OPERANDS, 45),
    (0xAD, "lreturn", NO_OPERANDS, 45),
    (0xAE, "freturn", NO_OPERANDS, 45),
    (0xAF, "dreturn", NO_OPERANDS, 45),
    (0xB0, "areturn", NO_OPERANDS, 45),
    (0xB1, "return", NO_OPERANDS, 45),
    (0xB2, "getstatic", U2, 45),
    (0xB3, "putstatic", U2, 45),
    (0xB4, "getfield", U2, 45),
    (0xB5, "putfield", U2, 45),
    (0xB6, "invokevirtual", U2, 45),
    (0xB7, "invokespecial", U2, 45),
    (0xB8, "invokestatic", U2, 45),
    (0xB9, "invokeinterface", U4, 45),
    (0xBA, "invokedynamic", U4, 51),
    (0xBB, "new", U2, 45),
    (0xBC, "newarray", U1, 45),
    (0xBD, "anewarray", U2, 45),
    (0xBE, "arraylength", NO_OPERANDS, 45),
    (0xBF, "athrow", NO_OPERANDS, 45),
    (0xC0, "checkcast", U2, 45),
    (0xC1, "instanceof", U2, 45),
    (0xC2, "monitorenter", NO_OPERANDS, 45),
    (0xC3, "monitorexit", NO_OPERANDS, 45),
    (0xC4, "wide", OperandLayout::Wide, 45),
    (0xC5, "multianewarray", U3, 45),
    (0xC6, "ifnull", U2, 45),
    (0xC7, "ifnonnull", U2, 45),
    (0xC8, "goto_w", U4, 45),
    (0xC9, "jsr_w", U4, 45),
    (0xCA, "breakpoint", NO_OPERANDS, 45),
    (0xFE, "impdep1", NO_OPERANDS, 45),
    (0xFF, "impdep2", NO_OPERANDS, 45),
];

/// `(major version the generation starts at, compiled versions it applies to)`
const GENERATIONS: &[(u16, &[&str])] = &[
    (45, &["1.1", "1.2", "1.3", "1.4", "1.5", "1.6"]),
    (51, &["1.7", "1.8"]),
    (53, &["9", "10"]),
    (
        55,
        &[
            "11", "12", "13", "14", "15", "16", "17", "18", "19", "20", "21", "22", "23", "24",
            "25",
        ],
    ),
];

/// Builds the specification for the class-file generation starting at `since_major`.
#[must_use]
pub fn specification(since_major: u16, versions: &[&str]) -> JavaSpecification {
    let constants = CONSTANT_LAYOUTS
        .iter()
        .filter(|(.., since)| *since <= since_major)
        .map(|&(tag, constant_type, fragments, _)| ConstantLayout {
            tag,
            constant_type,
            fragments: fragments
                .iter()
                .map(|&(description, width)| InfoFragment {
                    description: description.to_owned(),
                    width,
                })
                .collect(),
        })
        .collect();
    let mnemonics = MNEMONICS
        .iter()
        .filter(|(.., since)| *since <= since_major)
        .map(|&(opcode, name, operands, _)| Mnemonic {
            opcode,
            name: name.to_owned(),
            operands,
        })
        .collect();
    JavaSpecification::new(
        versions.iter().map(|&it| it.to_owned()).collect(),
        constants,
        mnemonics,
    )
}

/// Builds all built-in specifications, ordered from the oldest to the newest.
#[must_use]
pub fn specifications() -> Vec<JavaSpecification> {
    GENERATIONS
        .iter()
        .map(|&(since, versions)| specification(since, versions))
        .collect()
}
