use std::io::Read;

use tracing::trace;

use crate::{
    jvm::constant_pool::{Constant, ConstantInfo, ConstantPool, InfoValue},
    specification::{FieldWidth, JavaSpecification},
};

use super::{
    Error,
    reader_utils::{ClassReader, ValueReaderExt, read_modified_utf8},
};

/// Parses the constant pool of a class file.
/// The reader must be positioned right after the version numbers.
/// # Errors
/// - [`Error::UnknownConstantTag`] if `specification` has no layout for a tag.
/// - [`Error::TruncatedInput`] if the input ends before the last entry.
pub fn parse_constant_pool<R: Read>(
    reader: &mut ClassReader<R>,
    specification: &JavaSpecification,
) -> Result<ConstantPool, Error> {
    read_entries(reader, specification).map_err(|err| err.at_offset(reader.position()))
}

fn read_entries<R: Read>(
    reader: &mut ClassReader<R>,
    specification: &JavaSpecification,
) -> Result<ConstantPool, Error> {
    let count: u16 = reader.read_value()?;
    let mut constant_pool = ConstantPool::with_capacity(count);
    let mut pool_index = 1u16;
    while pool_index < count {
        let tag: u8 = reader.read_value()?;
        let layout = specification
            .constant_layout(tag)
            .ok_or(Error::UnknownConstantTag { tag, pool_index })?;
        let info = layout
            .fragments
            .iter()
            .map(|fragment| {
                let value = read_info_value(reader, fragment.width)?;
                Ok(ConstantInfo {
                    description: fragment.description.clone(),
                    value,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;
        let constant = Constant {
            tag,
            pool_index,
            constant_type: layout.constant_type,
            info,
        };
        trace!(pool_index, tag, constant_type = %constant.constant_type, "Decoded constant");
        let slots = if constant.constant_type.is_wide() { 2 } else { 1 };
        constant_pool.push(constant);
        pool_index = pool_index.saturating_add(slots);
    }
    Ok(constant_pool)
}

fn read_info_value<R: Read>(reader: &mut R, width: FieldWidth) -> Result<InfoValue, Error> {
    let value = match width {
        FieldWidth::Byte => InfoValue::Int(reader.read_value::<u8>()?.into()),
        FieldWidth::Short => InfoValue::Int(reader.read_value::<u16>()?.into()),
        FieldWidth::Int => InfoValue::Int(reader.read_value()?),
        FieldWidth::Float => InfoValue::Float(reader.read_value()?),
        FieldWidth::Long => InfoValue::Long(reader.read_value()?),
        FieldWidth::Double => InfoValue::Double(reader.read_value()?),
        FieldWidth::Utf8 => InfoValue::String(read_modified_utf8(reader)?),
    };
    Ok(value)
}
