use std::io::Read;

use tracing::{debug, trace, warn};

use crate::jvm::{
    access_flags::NestedClassAccessFlags,
    annotation::{Annotation, TypeAnnotation},
    attribute::{
        Attribute, BootstrapMethod, EnclosingMethod, InnerClass, MethodParameter, RecordComponent,
    },
    code::LocalVariable,
};

use super::{
    Context, Error,
    annotation::{parse_annotation, parse_element_value, parse_type_annotation},
    code::{parse_code, parse_line_number, parse_local_variable, parse_stack_map_frame},
    reader_utils::{ValueReaderExt, read_byte_chunk},
};

/// The structure an attribute table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum AttributeContext {
    Class,
    Field,
    Method,
    Code,
    RecordComponent,
}

/// Reads an attribute table: a `u2` count followed by that many attributes.
pub(super) fn parse_attributes<R: Read>(
    reader: &mut R,
    ctx: &mut Context<'_>,
    context: AttributeContext,
) -> Result<Vec<Attribute>, Error> {
    let attributes_count: u16 = reader.read_value()?;
    (0..attributes_count)
        .map(|_| parse_attribute(reader, ctx, context))
        .collect()
}

/// Reads a single attribute.
/// The body is always read as a span of `attribute_length` bytes so that the following
/// structures stay aligned no matter how the body is decoded.
fn parse_attribute<R: Read>(
    reader: &mut R,
    ctx: &mut Context<'_>,
    context: AttributeContext,
) -> Result<Attribute, Error> {
    let name_index = reader.read_value()?;
    let attribute_length: u32 = reader.read_value()?;
    let attribute_length = usize::try_from(attribute_length).unwrap_or(usize::MAX);
    let info = read_byte_chunk(reader, attribute_length)?;
    let name = ctx.utf8(name_index);

    let (result, remaining) = {
        let mut span = info.as_slice();
        let result = decode_body(&name, &mut span, ctx, context);
        (result, span.len())
    };
    let attribute = match result {
        Ok(Some(attribute)) => {
            if remaining > 0 {
                debug!(name = attribute.name(), remaining, "Ignoring trailing attribute bytes");
            }
            attribute
        }
        Ok(None) => {
            trace!(%name, ?context, "Unrecognized attribute");
            Attribute::Unrecognized { name, info }
        }
        Err(err) => {
            warn!(%name, ?context, error = %err, "Skipping malformed attribute");
            Attribute::Malformed {
                name,
                reason: err.to_string(),
                info,
            }
        }
    };
    Ok(attribute)
}

fn decode_body(
    name: &str,
    reader: &mut &[u8],
    ctx: &mut Context<'_>,
    context: AttributeContext,
) -> Result<Option<Attribute>, Error> {
    let attribute = match name {
        "ConstantValue" => Attribute::ConstantValue {
            value_index: reader.read_value()?,
        },
        "Code" => Attribute::Code(parse_code(reader, ctx)?),
        "StackMapTable" => {
            let number_of_entries: u16 = reader.read_value()?;
            let frames = (0..number_of_entries)
                .map(|_| parse_stack_map_frame(reader))
                .collect::<Result<_, _>>()?;
            Attribute::StackMapTable(frames)
        }
        "Exceptions" => Attribute::Exceptions(parse_class_names(reader, ctx)?),
        "InnerClasses" => {
            let number_of_classes: u16 = reader.read_value()?;
            let classes = (0..number_of_classes)
                .map(|_| parse_inner_class(reader, ctx))
                .collect::<Result<_, _>>()?;
            Attribute::InnerClasses(classes)
        }
        "EnclosingMethod" => {
            let class_index = reader.read_value()?;
            let method_index: u16 = reader.read_value()?;
            let method = if method_index == 0 {
                None
            } else {
                ctx.constant_pool
                    .name_and_type(method_index)
                    .map(|(name, descriptor)| (name.to_owned(), descriptor.to_owned()))
                    .map_err(|err| debug!(error = %err, "Unresolved enclosing method"))
                    .ok()
            };
            Attribute::EnclosingMethod(EnclosingMethod {
                class: ctx.class_name(class_index),
                method,
            })
        }
        "Synthetic" => Attribute::Synthetic,
        "Deprecated" => Attribute::Deprecated,
        "Signature" => {
            let signature_index = reader.read_value()?;
            let signature = ctx.utf8(signature_index);
            ctx.record_descriptor(&signature);
            Attribute::Signature(signature)
        }
        "SourceFile" => {
            let sourcefile_index = reader.read_value()?;
            Attribute::SourceFile(ctx.utf8(sourcefile_index))
        }
        "SourceDebugExtension" => {
            let debug_extension = reader.to_vec();
            *reader = &[];
            Attribute::SourceDebugExtension(debug_extension)
        }
        "LineNumberTable" => {
            let length: u16 = reader.read_value()?;
            let entries = (0..length)
                .map(|_| parse_line_number(reader))
                .collect::<Result<_, _>>()?;
            Attribute::LineNumberTable(entries)
        }
        "LocalVariableTable" => {
            Attribute::LocalVariableTable(parse_local_variables(reader, ctx)?)
        }
        "LocalVariableTypeTable" => {
            Attribute::LocalVariableTypeTable(parse_local_variables(reader, ctx)?)
        }
        "AnnotationDefault" => Attribute::AnnotationDefault(parse_element_value(reader, ctx)?),
        "RuntimeVisibleAnnotations" => {
            Attribute::RuntimeVisibleAnnotations(parse_annotations(reader, ctx)?)
        }
        "RuntimeInvisibleAnnotations" => {
            Attribute::RuntimeInvisibleAnnotations(parse_annotations(reader, ctx)?)
        }
        "RuntimeVisibleParameterAnnotations" => {
            Attribute::RuntimeVisibleParameterAnnotations(parse_parameter_annotations(reader, ctx)?)
        }
        "RuntimeInvisibleParameterAnnotations" => Attribute::RuntimeInvisibleParameterAnnotations(
            parse_parameter_annotations(reader, ctx)?,
        ),
        "RuntimeVisibleTypeAnnotations" => {
            Attribute::RuntimeVisibleTypeAnnotations(parse_type_annotations(reader, ctx)?)
        }
        "RuntimeInvisibleTypeAnnotations" => {
            Attribute::RuntimeInvisibleTypeAnnotations(parse_type_annotations(reader, ctx)?)
        }
        "BootstrapMethods" => {
            let num_bootstrap_methods: u16 = reader.read_value()?;
            let methods = (0..num_bootstrap_methods)
                .map(|_| parse_bootstrap_method(reader))
                .collect::<Result<_, _>>()?;
            Attribute::BootstrapMethods(methods)
        }
        "MethodParameters" => {
            let parameters_count: u8 = reader.read_value()?;
            let parameters = (0..parameters_count)
                .map(|_| {
                    let name_index = reader.read_value()?;
                    Ok(MethodParameter {
                        name: ctx.optional_utf8(name_index),
                        access_flags: reader.read_value()?,
                    })
                })
                .collect::<Result<_, Error>>()?;
            Attribute::MethodParameters(parameters)
        }
        "NestHost" => {
            let host_class_index = reader.read_value()?;
            Attribute::NestHost(ctx.class_name(host_class_index))
        }
        "NestMembers" => Attribute::NestMembers(parse_class_names(reader, ctx)?),
        "PermittedSubclasses" => Attribute::PermittedSubclasses(parse_class_names(reader, ctx)?),
        "Record" => {
            let components_count: u16 = reader.read_value()?;
            let components = (0..components_count)
                .map(|_| parse_record_component(reader, ctx))
                .collect::<Result<_, _>>()?;
            Attribute::Record(components)
        }
        _ => return Ok(None),
    };
    Ok(Some(attribute))
}

fn parse_class_names<R: Read>(reader: &mut R, ctx: &Context<'_>) -> Result<Vec<String>, Error> {
    let count: u16 = reader.read_value()?;
    (0..count)
        .map(|_| {
            let class_index = reader.read_value()?;
            Ok(ctx.class_name(class_index))
        })
        .collect()
}

fn parse_inner_class<R: Read>(reader: &mut R, ctx: &Context<'_>) -> Result<InnerClass, Error> {
    let inner_class_info_index = reader.read_value()?;
    let outer_class_info_index = reader.read_value()?;
    let inner_name_index = reader.read_value()?;
    let inner_class_access_flags = reader.read_value()?;
    Ok(InnerClass {
        inner_class: ctx.class_name(inner_class_info_index),
        outer_class: ctx.optional_class_name(outer_class_info_index),
        inner_name: ctx.optional_utf8(inner_name_index),
        access_flags: NestedClassAccessFlags::from_bits_retain(inner_class_access_flags),
    })
}

fn parse_local_variables<R: Read>(
    reader: &mut R,
    ctx: &mut Context<'_>,
) -> Result<Vec<LocalVariable>, Error> {
    let length: u16 = reader.read_value()?;
    (0..length)
        .map(|_| parse_local_variable(reader, ctx))
        .collect()
}

fn parse_annotations<R: Read>(
    reader: &mut R,
    ctx: &mut Context<'_>,
) -> Result<Vec<Annotation>, Error> {
    let num_annotations: u16 = reader.read_value()?;
    (0..num_annotations)
        .map(|_| parse_annotation(reader, ctx))
        .collect()
}

fn parse_parameter_annotations<R: Read>(
    reader: &mut R,
    ctx: &mut Context<'_>,
) -> Result<Vec<Vec<Annotation>>, Error> {
    let num_parameters: u8 = reader.read_value()?;
    (0..num_parameters)
        .map(|_| parse_annotations(reader, ctx))
        .collect()
}

fn parse_type_annotations<R: Read>(
    reader: &mut R,
    ctx: &mut Context<'_>,
) -> Result<Vec<TypeAnnotation>, Error> {
    let num_annotations: u16 = reader.read_value()?;
    (0..num_annotations)
        .map(|_| parse_type_annotation(reader, ctx))
        .collect()
}

fn parse_bootstrap_method<R: Read>(reader: &mut R) -> Result<BootstrapMethod, Error> {
    let method_ref = reader.read_value()?;
    let num_bootstrap_arguments: u16 = reader.read_value()?;
    let arguments = (0..num_bootstrap_arguments)
        .map(|_| reader.read_value())
        .collect::<Result<_, _>>()?;
    Ok(BootstrapMethod {
        method_ref,
        arguments,
    })
}

fn parse_record_component<R: Read>(
    reader: &mut R,
    ctx: &mut Context<'_>,
) -> Result<RecordComponent, Error> {
    let name_index = reader.read_value()?;
    let descriptor_index = reader.read_value()?;
    let descriptor = ctx.utf8(descriptor_index);
    ctx.record_descriptor(&descriptor);
    let attributes = parse_attributes(reader, ctx, AttributeContext::RecordComponent)?;
    Ok(RecordComponent {
        name: ctx.utf8(name_index),
        descriptor,
        attributes,
    })
}
