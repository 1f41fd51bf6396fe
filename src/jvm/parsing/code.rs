use std::io::Read;

use tracing::debug;

use crate::{
    jvm::code::{
        Code, ExceptionTableEntry, Instruction, LineNumberTableEntry, LocalVariable,
        MNEMONIC_NOT_FOUND, StackMapFrame, VerificationTypeInfo,
    },
    specification::{JavaSpecification, OperandLayout},
};

use super::{
    Context, Error,
    attribute::{AttributeContext, parse_attributes},
    reader_utils::{ValueReaderExt, read_byte_chunk},
};

const WIDE_IINC: u8 = 0x84;

pub(super) fn parse_code<R: Read>(reader: &mut R, ctx: &mut Context<'_>) -> Result<Code, Error> {
    let max_stack = reader.read_value()?;
    let max_locals = reader.read_value()?;
    let code_length: u32 = reader.read_value()?;
    let code_length = usize::try_from(code_length).unwrap_or(usize::MAX);
    let code = read_byte_chunk(reader, code_length)?;
    let instructions = disassemble(&code, ctx.specification);
    let exception_table_length: u16 = reader.read_value()?;
    let exception_table = (0..exception_table_length)
        .map(|_| {
            Ok(ExceptionTableEntry {
                start_pc: reader.read_value()?,
                end_pc: reader.read_value()?,
                handler_pc: reader.read_value()?,
                catch_type: reader.read_value()?,
            })
        })
        .collect::<Result<_, Error>>()?;
    let attributes = parse_attributes(reader, ctx, AttributeContext::Code)?;
    Ok(Code {
        max_stack,
        max_locals,
        instructions,
        exception_table,
        attributes,
    })
}

/// Splits a code array into instructions.
/// Every opcode is resolved against the opcode table of `specification`; the operand layout of
/// the resolved mnemonic decides where the next opcode starts. Opcodes missing from the table
/// are reported as [`MNEMONIC_NOT_FOUND`] without operands.
pub(crate) fn disassemble(code: &[u8], specification: &JavaSpecification) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut pc = 0usize;
    while let Some(&opcode) = code.get(pc) {
        let (mnemonic, operand_length) = match specification.mnemonic(opcode) {
            Some(it) => (it.name.clone(), operand_length(it.operands, code, pc)),
            None => {
                debug!(opcode, pc, "Unresolved opcode");
                (MNEMONIC_NOT_FOUND.to_owned(), 0)
            }
        };
        let end = pc.saturating_add(1).saturating_add(operand_length).min(code.len());
        instructions.push(Instruction {
            offset: u32::try_from(pc).unwrap_or(u32::MAX),
            opcode,
            mnemonic,
            operands: code[pc + 1..end].to_vec(),
        });
        pc = end;
    }
    instructions
}

fn operand_length(layout: OperandLayout, code: &[u8], pc: usize) -> usize {
    // Switch operands are aligned to 4 bytes relative to the start of the code.
    let padding = (4 - (pc + 1) % 4) % 4;
    let operands_start = pc + 1 + padding;
    match layout {
        OperandLayout::Fixed(length) => length.into(),
        OperandLayout::TableSwitch => {
            let low = read_i32(code, operands_start + 4);
            let high = read_i32(code, operands_start + 8);
            let jump_count = match (low, high) {
                (Some(low), Some(high)) if high >= low => {
                    usize::try_from(i64::from(high) - i64::from(low) + 1).unwrap_or(usize::MAX)
                }
                _ => 0,
            };
            padding
                .saturating_add(12)
                .saturating_add(jump_count.saturating_mul(4))
        }
        OperandLayout::LookupSwitch => {
            let npairs = read_i32(code, operands_start + 4)
                .and_then(|it| usize::try_from(it).ok())
                .unwrap_or(0);
            padding
                .saturating_add(8)
                .saturating_add(npairs.saturating_mul(8))
        }
        OperandLayout::Wide => match code.get(pc + 1) {
            Some(&WIDE_IINC) => 5,
            _ => 3,
        },
    }
}

fn read_i32(code: &[u8], at: usize) -> Option<i32> {
    let bytes = code.get(at..at.checked_add(4)?)?;
    bytes.try_into().ok().map(i32::from_be_bytes)
}

pub(super) fn parse_stack_map_frame<R: Read>(reader: &mut R) -> Result<StackMapFrame, Error> {
    let frame_type: u8 = reader.read_value()?;
    let result = match frame_type {
        it @ 0..=63 => StackMapFrame::SameFrame {
            offset_delta: it.into(),
        },
        it @ 64..=127 => StackMapFrame::SameLocals1StackItemFrame {
            offset_delta: u16::from(it) - 64,
            stack: parse_verification_type(reader)?,
        },
        247 => {
            let offset_delta = reader.read_value()?;
            let stack = parse_verification_type(reader)?;
            StackMapFrame::SameLocals1StackItemFrame {
                offset_delta,
                stack,
            }
        }
        it @ 248..=250 => StackMapFrame::ChopFrame {
            chop_count: 251 - it,
            offset_delta: reader.read_value()?,
        },
        251 => StackMapFrame::SameFrame {
            offset_delta: reader.read_value()?,
        },
        it @ 252..=254 => {
            let offset_delta = reader.read_value()?;
            let locals = (0..it - 251)
                .map(|_| parse_verification_type(reader))
                .collect::<Result<_, _>>()?;
            StackMapFrame::AppendFrame {
                offset_delta,
                locals,
            }
        }
        255 => {
            let offset_delta = reader.read_value()?;
            let locals = parse_verification_types(reader)?;
            let stack = parse_verification_types(reader)?;
            StackMapFrame::FullFrame {
                offset_delta,
                locals,
                stack,
            }
        }
        unexpected => return Err(Error::UnsupportedStackMapFrameTag(unexpected)),
    };
    Ok(result)
}

fn parse_verification_types<R: Read>(reader: &mut R) -> Result<Vec<VerificationTypeInfo>, Error> {
    let count: u16 = reader.read_value()?;
    (0..count).map(|_| parse_verification_type(reader)).collect()
}

fn parse_verification_type<R: Read>(reader: &mut R) -> Result<VerificationTypeInfo, Error> {
    let tag: u8 = reader.read_value()?;
    let result = match tag {
        0 => VerificationTypeInfo::TopVariable,
        1 => VerificationTypeInfo::IntegerVariable,
        2 => VerificationTypeInfo::FloatVariable,
        3 => VerificationTypeInfo::DoubleVariable,
        4 => VerificationTypeInfo::LongVariable,
        5 => VerificationTypeInfo::NullVariable,
        6 => VerificationTypeInfo::UninitializedThisVariable,
        7 => VerificationTypeInfo::ObjectVariable {
            cpool_index: reader.read_value()?,
        },
        8 => VerificationTypeInfo::UninitializedVariable {
            offset: reader.read_value()?,
        },
        unexpected => return Err(Error::UnsupportedVerificationTypeTag(unexpected)),
    };
    Ok(result)
}

pub(super) fn parse_line_number<R: Read>(reader: &mut R) -> Result<LineNumberTableEntry, Error> {
    Ok(LineNumberTableEntry {
        start_pc: reader.read_value()?,
        line_number: reader.read_value()?,
    })
}

pub(super) fn parse_local_variable<R: Read>(
    reader: &mut R,
    ctx: &mut Context<'_>,
) -> Result<LocalVariable, Error> {
    let start_pc = reader.read_value()?;
    let length = reader.read_value()?;
    let name_index = reader.read_value()?;
    let descriptor_index = reader.read_value()?;
    let index = reader.read_value()?;
    let descriptor = ctx.utf8(descriptor_index);
    ctx.record_descriptor(&descriptor);
    Ok(LocalVariable {
        start_pc,
        length,
        name: ctx.utf8(name_index),
        descriptor,
        index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specification::Specifications;

    fn mnemonics(code: &[u8]) -> Vec<(u32, String, usize)> {
        let specs = Specifications::default();
        disassemble(code, specs.for_version("1.8"))
            .into_iter()
            .map(|it| (it.offset, it.mnemonic, it.operands.len()))
            .collect()
    }

    #[test]
    fn fixed_operands() {
        // aload_0; invokespecial #1; return
        let code = [0x2A, 0xB7, 0x00, 0x01, 0xB1];
        assert_eq!(
            mnemonics(&code),
            vec![
                (0, "aload_0".to_owned(), 0),
                (1, "invokespecial".to_owned(), 2),
                (4, "return".to_owned(), 0),
            ]
        );
    }

    #[test]
    fn tableswitch_is_aligned() {
        // iconst_0; tableswitch pad(2) default low=0 high=1 2 offsets; return
        let mut code = vec![0x03, 0xAA, 0x00, 0x00];
        code.extend_from_slice(&[0, 0, 0, 20]);
        code.extend_from_slice(&[0, 0, 0, 0]);
        code.extend_from_slice(&[0, 0, 0, 1]);
        code.extend_from_slice(&[0, 0, 0, 20, 0, 0, 0, 20]);
        code.push(0xB1);
        let result = mnemonics(&code);
        assert_eq!(result[1], (1, "tableswitch".to_owned(), 2 + 12 + 8));
        assert_eq!(result[2], (24, "return".to_owned(), 0));
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn lookupswitch_pairs() {
        // lookupswitch at 0: pad(3) default npairs=1 (match, offset); return
        let mut code = vec![0xAB, 0x00, 0x00, 0x00];
        code.extend_from_slice(&[0, 0, 0, 16]);
        code.extend_from_slice(&[0, 0, 0, 1]);
        code.extend_from_slice(&[0, 0, 0, 7, 0, 0, 0, 16]);
        code.push(0xB1);
        let result = mnemonics(&code);
        assert_eq!(result[0], (0, "lookupswitch".to_owned(), 3 + 8 + 8));
        assert_eq!(result[1], (20, "return".to_owned(), 0));
    }

    #[test]
    fn wide_iinc() {
        // wide iinc 0x0100 5; wide iload 0x0100; return
        let code = [0xC4, 0x84, 0x01, 0x00, 0x00, 0x05, 0xC4, 0x15, 0x01, 0x00, 0xB1];
        let result = mnemonics(&code);
        assert_eq!(result[0], (0, "wide".to_owned(), 5));
        assert_eq!(result[1], (6, "wide".to_owned(), 3));
        assert_eq!(result[2], (10, "return".to_owned(), 0));
    }

    #[test]
    fn unknown_opcode_is_not_fatal() {
        let code = [0xCB, 0xB1];
        let result = mnemonics(&code);
        assert_eq!(result[0], (0, MNEMONIC_NOT_FOUND.to_owned(), 0));
        assert_eq!(result[1], (1, "return".to_owned(), 0));
    }

    #[test]
    fn truncated_operands_stop_at_code_end() {
        let code = [0x11, 0x00];
        let result = mnemonics(&code);
        assert_eq!(result, vec![(0, "sipush".to_owned(), 1)]);
    }

    #[test]
    fn stack_map_frames() {
        let mut bytes = [
            3u8, // same_frame
            65, 7, 0x00, 0x02, // same_locals_1_stack_item, Object #2
            249, 0x00, 0x10, // chop 2
            253, 0x00, 0x04, 1, 8, 0x00, 0x09, // append Integer, Uninitialized(9)
            255, 0x00, 0x01, 0x00, 0x01, 4, 0x00, 0x00, // full, locals [Long], stack []
        ]
        .as_slice();
        let frames = (0..5)
            .map(|_| parse_stack_map_frame(&mut bytes))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert!(bytes.is_empty());
        assert_eq!(frames[0], StackMapFrame::SameFrame { offset_delta: 3 });
        assert_eq!(
            frames[1],
            StackMapFrame::SameLocals1StackItemFrame {
                offset_delta: 1,
                stack: VerificationTypeInfo::ObjectVariable { cpool_index: 2 },
            }
        );
        assert_eq!(
            frames[2],
            StackMapFrame::ChopFrame {
                chop_count: 2,
                offset_delta: 16
            }
        );
        assert_eq!(
            frames[3],
            StackMapFrame::AppendFrame {
                offset_delta: 4,
                locals: vec![
                    VerificationTypeInfo::IntegerVariable,
                    VerificationTypeInfo::UninitializedVariable { offset: 9 },
                ],
            }
        );
        assert_eq!(
            frames[4],
            StackMapFrame::FullFrame {
                offset_delta: 1,
                locals: vec![VerificationTypeInfo::LongVariable],
                stack: vec![],
            }
        );
    }

    #[test]
    fn extended_frames() {
        let mut bytes = [
            247u8, 0x01, 0x00, 2, // same_locals_1_stack_item_extended, Float
            251, 0x02, 0x00, // same_frame_extended
            255, 0x00, 0x05, 0x00, 0x03, 0, 3, 6, 0x00, 0x01, 5, // full [Top, Double, UninitializedThis] [Null]
            0, // same_frame
        ]
        .as_slice();
        let frames = (0..4)
            .map(|_| parse_stack_map_frame(&mut bytes))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert!(bytes.is_empty());
        assert_eq!(
            frames[0],
            StackMapFrame::SameLocals1StackItemFrame {
                offset_delta: 256,
                stack: VerificationTypeInfo::FloatVariable,
            }
        );
        assert_eq!(frames[1], StackMapFrame::SameFrame { offset_delta: 512 });
        assert_eq!(
            frames[2],
            StackMapFrame::FullFrame {
                offset_delta: 5,
                locals: vec![
                    VerificationTypeInfo::TopVariable,
                    VerificationTypeInfo::DoubleVariable,
                    VerificationTypeInfo::UninitializedThisVariable,
                ],
                stack: vec![VerificationTypeInfo::NullVariable],
            }
        );
        assert_eq!(frames[3], StackMapFrame::SameFrame { offset_delta: 0 });
    }

    #[test]
    fn reserved_frame_type() {
        let mut bytes = [128u8].as_slice();
        assert!(matches!(
            parse_stack_map_frame(&mut bytes),
            Err(Error::UnsupportedStackMapFrameTag(128))
        ));
        let mut bytes = [64u8, 9].as_slice();
        assert!(matches!(
            parse_stack_map_frame(&mut bytes),
            Err(Error::UnsupportedVerificationTypeTag(9))
        ));
    }
}
