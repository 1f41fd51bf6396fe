//! JSON report of an [`Analysis`].

use std::io::Write;

use serde::Serialize;

use crate::{
    analysis::{Analysis, Meta, Resource},
    jvm::{constant_pool::ConstantPool, references::ReferencedClasses},
};

/// What to include in a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Include the constant pool of every resource.
    pub include_constant_pool: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    meta: &'a Meta,
    resources: Vec<ResourceReport<'a>>,
}

#[derive(Serialize)]
struct ResourceReport<'a> {
    name: &'a str,
    compiled_version: Option<&'a str>,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    access_flags: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    referenced_classes: &'a ReferencedClasses,
    #[serde(skip_serializing_if = "Option::is_none")]
    constant_pool: Option<&'a ConstantPool>,
}

impl<'a> ResourceReport<'a> {
    fn new(resource: &'a Resource, options: ReportOptions) -> Self {
        Self {
            name: &resource.name,
            compiled_version: resource.compiled_version.as_deref(),
            valid: resource.is_valid_class,
            access_flags: resource
                .class_file
                .as_ref()
                .map(|class_file| class_file.access_flags.names()),
            error: resource.error.as_deref(),
            referenced_classes: &resource.referenced_classes,
            constant_pool: resource
                .constant_pool
                .as_ref()
                .filter(|_| options.include_constant_pool),
        }
    }
}

/// Writes the report as pretty-printed JSON.
/// # Errors
/// - [`serde_json::Error`] if writing fails.
pub fn write_json<W: Write>(
    analysis: &Analysis,
    writer: W,
    options: ReportOptions,
) -> Result<(), serde_json::Error> {
    let report = Report {
        meta: &analysis.meta,
        resources: analysis
            .resources
            .iter()
            .map(|it| ResourceReport::new(it, options))
            .collect(),
    };
    serde_json::to_writer_pretty(writer, &report)
}
