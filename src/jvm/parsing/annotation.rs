use std::io::Read;

use crate::jvm::annotation::{
    Annotation, ElementValue, LocalVarTarget, TargetInfo, TypeAnnotation, TypePathElement,
};

use super::{Context, Error, reader_utils::ValueReaderExt};

pub(super) fn parse_annotation<R: Read>(
    reader: &mut R,
    ctx: &mut Context<'_>,
) -> Result<Annotation, Error> {
    let type_index = reader.read_value()?;
    let type_descriptor = ctx.utf8(type_index);
    ctx.record_descriptor(&type_descriptor);
    let num_element_value_pairs: u16 = reader.read_value()?;
    let element_value_pairs = (0..num_element_value_pairs)
        .map(|_| {
            let name_index = reader.read_value()?;
            let name = ctx.utf8(name_index);
            let value = parse_element_value(reader, ctx)?;
            Ok((name, value))
        })
        .collect::<Result<_, Error>>()?;
    Ok(Annotation {
        type_descriptor,
        element_value_pairs,
    })
}

pub(super) fn parse_element_value<R: Read>(
    reader: &mut R,
    ctx: &mut Context<'_>,
) -> Result<ElementValue, Error> {
    let tag: u8 = reader.read_value()?;
    let value = match tag {
        b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z' | b's' => ElementValue::Constant {
            tag: char::from(tag),
            const_value_index: reader.read_value()?,
        },
        b'e' => {
            let type_name_index = reader.read_value()?;
            let const_name_index = reader.read_value()?;
            let type_name = ctx.utf8(type_name_index);
            ctx.record_descriptor(&type_name);
            ElementValue::EnumConstant {
                type_name,
                const_name: ctx.utf8(const_name_index),
            }
        }
        b'c' => {
            let class_info_index = reader.read_value()?;
            let return_descriptor = ctx.utf8(class_info_index);
            ctx.record_descriptor(&return_descriptor);
            ElementValue::Class { return_descriptor }
        }
        b'@' => ElementValue::Annotation(parse_annotation(reader, ctx)?),
        b'[' => {
            let num_values: u16 = reader.read_value()?;
            let values = (0..num_values)
                .map(|_| parse_element_value(reader, ctx))
                .collect::<Result<_, _>>()?;
            ElementValue::Array(values)
        }
        unexpected => return Err(Error::UnsupportedElementValueTag(char::from(unexpected))),
    };
    Ok(value)
}

pub(super) fn parse_type_annotation<R: Read>(
    reader: &mut R,
    ctx: &mut Context<'_>,
) -> Result<TypeAnnotation, Error> {
    let target_type: u8 = reader.read_value()?;
    let target_info = parse_target_info(reader, target_type)?;
    let path_length: u8 = reader.read_value()?;
    let target_path = (0..path_length)
        .map(|_| parse_type_path_element(reader))
        .collect::<Result<_, _>>()?;
    let annotation = parse_annotation(reader, ctx)?;
    Ok(TypeAnnotation {
        target_type,
        target_info,
        target_path,
        annotation,
    })
}

fn parse_target_info<R: Read>(reader: &mut R, target_type: u8) -> Result<TargetInfo, Error> {
    let target_info = match target_type {
        0x00 | 0x01 => TargetInfo::TypeParameter {
            index: reader.read_value()?,
        },
        0x10 => TargetInfo::SuperType {
            index: reader.read_value()?,
        },
        0x11 | 0x12 => TargetInfo::TypeParameterBound {
            type_parameter_index: reader.read_value()?,
            bound_index: reader.read_value()?,
        },
        0x13..=0x15 => TargetInfo::Empty,
        0x16 => TargetInfo::FormalParameter {
            index: reader.read_value()?,
        },
        0x17 => TargetInfo::Throws {
            index: reader.read_value()?,
        },
        0x40 | 0x41 => {
            let table_length: u16 = reader.read_value()?;
            let table = (0..table_length)
                .map(|_| {
                    Ok(LocalVarTarget {
                        start_pc: reader.read_value()?,
                        length: reader.read_value()?,
                        index: reader.read_value()?,
                    })
                })
                .collect::<Result<_, Error>>()?;
            TargetInfo::LocalVar(table)
        }
        0x42 => TargetInfo::Catch {
            exception_table_index: reader.read_value()?,
        },
        0x43..=0x46 => TargetInfo::Offset(reader.read_value()?),
        0x47..=0x4B => TargetInfo::TypeArgument {
            offset: reader.read_value()?,
            index: reader.read_value()?,
        },
        unexpected => return Err(Error::InvalidTargetType(unexpected)),
    };
    Ok(target_info)
}

fn parse_type_path_element<R: Read>(reader: &mut R) -> Result<TypePathElement, Error> {
    let kind: u8 = reader.read_value()?;
    let argument_index: u8 = reader.read_value()?;
    match (kind, argument_index) {
        (0, 0) => Ok(TypePathElement::Array),
        (1, 0) => Ok(TypePathElement::Nested),
        (2, 0) => Ok(TypePathElement::Bound),
        (3, idx) => Ok(TypePathElement::TypeArgument(idx)),
        (kind, _) => Err(Error::InvalidTypePathKind(kind)),
    }
}
