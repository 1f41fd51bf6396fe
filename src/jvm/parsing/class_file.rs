use std::io::Read;

use tracing::trace;

use crate::{
    jvm::{
        ClassFile, ClassVersion,
        access_flags::{ClassAccessFlags, FieldAccessFlags, MethodAccessFlags},
        constant_pool::ConstantPool,
        field::Field,
        method::Method,
        references::ReferencedClasses,
    },
    specification::JavaSpecification,
};

use super::{
    Context, Error, JAVA_CLASS_MAGIC,
    attribute::{AttributeContext, parse_attributes},
    reader_utils::{ClassReader, ValueReaderExt},
};

/// Parses the first 8 bytes of a class file.
/// Nothing is read past the magic number if it does not match.
/// # Errors
/// - [`Error::InvalidMagicNumber`] if the input does not start with `0xCAFEBABE`.
/// - [`Error::TruncatedInput`] if the input is shorter than the header.
pub fn parse_header<R: Read>(reader: &mut ClassReader<R>) -> Result<ClassVersion, Error> {
    read_header(reader).map_err(|err| err.at_offset(reader.position()))
}

fn read_header<R: Read>(reader: &mut ClassReader<R>) -> Result<ClassVersion, Error> {
    let magic: u32 = reader.read_value()?;
    if magic != JAVA_CLASS_MAGIC {
        return Err(Error::InvalidMagicNumber(magic));
    }
    let minor = reader.read_value()?;
    let major = reader.read_value()?;
    Ok(ClassVersion { major, minor })
}

/// Parses the structures following the constant pool.
/// Every descriptor and signature encountered is decoded and the classes it mentions are added
/// to `references`.
/// # Errors
/// - [`Error::TruncatedInput`] if the input ends in the middle of a structure.
pub fn parse_class_body<R: Read>(
    reader: &mut ClassReader<R>,
    version: ClassVersion,
    constant_pool: &ConstantPool,
    specification: &JavaSpecification,
    references: &mut ReferencedClasses,
) -> Result<ClassFile, Error> {
    let mut ctx = Context {
        constant_pool,
        specification,
        references,
    };
    read_body(reader, version, &mut ctx).map_err(|err| err.at_offset(reader.position()))
}

fn read_body<R: Read>(
    reader: &mut ClassReader<R>,
    version: ClassVersion,
    ctx: &mut Context<'_>,
) -> Result<ClassFile, Error> {
    let access_flags = ClassAccessFlags::from_bits_retain(reader.read_value()?);
    let this_class_index = reader.read_value()?;
    let this_class = ctx.class_name(this_class_index);
    let super_class_index = reader.read_value()?;
    let super_class = ctx.optional_class_name(super_class_index);
    trace!(%this_class, ?super_class, "Parsing class body");

    let interfaces_count: u16 = reader.read_value()?;
    let interfaces = (0..interfaces_count)
        .map(|_| {
            let interface_index = reader.read_value()?;
            Ok(ctx.class_name(interface_index))
        })
        .collect::<Result<_, Error>>()?;

    let fields_count: u16 = reader.read_value()?;
    let fields = (0..fields_count)
        .map(|_| parse_field(reader, ctx))
        .collect::<Result<_, _>>()?;

    let methods_count: u16 = reader.read_value()?;
    let methods = (0..methods_count)
        .map(|_| parse_method(reader, ctx))
        .collect::<Result<_, _>>()?;

    let attributes = parse_attributes(reader, ctx, AttributeContext::Class)?;
    Ok(ClassFile {
        version,
        access_flags,
        this_class,
        super_class,
        interfaces,
        fields,
        methods,
        attributes,
    })
}

fn parse_field<R: Read>(reader: &mut R, ctx: &mut Context<'_>) -> Result<Field, Error> {
    let access_flags = FieldAccessFlags::from_bits_retain(reader.read_value()?);
    let name_index = reader.read_value()?;
    let descriptor_index = reader.read_value()?;
    let name = ctx.utf8(name_index);
    let descriptor = ctx.utf8(descriptor_index);
    ctx.record_descriptor(&descriptor);
    let attributes = parse_attributes(reader, ctx, AttributeContext::Field)?;
    Ok(Field {
        access_flags,
        name,
        descriptor,
        attributes,
    })
}

fn parse_method<R: Read>(reader: &mut R, ctx: &mut Context<'_>) -> Result<Method, Error> {
    let access_flags = MethodAccessFlags::from_bits_retain(reader.read_value()?);
    let name_index = reader.read_value()?;
    let descriptor_index = reader.read_value()?;
    let name = ctx.utf8(name_index);
    let descriptor = ctx.utf8(descriptor_index);
    ctx.record_descriptor(&descriptor);
    let attributes = parse_attributes(reader, ctx, AttributeContext::Method)?;
    Ok(Method {
        access_flags,
        name,
        descriptor,
        attributes,
    })
}
