//! Analysis of class files: version resolution, structural decoding and reference extraction.
//!
//! Each [`Resource`] goes through the same pipeline:
//! 1. the header is read and the compiler version is resolved (see [`version`]);
//! 2. the constant pool is decoded with the tables for that version;
//! 3. the rest of the class file is decoded, collecting the classes mentioned by descriptors
//!    and signatures;
//! 4. the classes named by `Class` constants are added.
//!
//! Failures only affect the resource being analyzed.

pub mod version;

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug_span, warn};

use crate::{
    archive::ByteSource,
    jvm::{
        ClassFile, ClassVersion,
        constant_pool::ConstantPool,
        parsing::{ClassReader, Error, parse_class_body, parse_constant_pool},
        references::{ReferencedClasses, constant_pool_references},
    },
    specification::{Specifications, VersionTable},
};

/// A class file to analyze, and what was found in it.
#[derive(Debug, Clone)]
pub struct Resource {
    /// The name of the resource, e.g. a path or `app.jar!/com/example/Main.class`.
    pub name: String,
    /// Where the bytes of the class file come from.
    pub byte_source: ByteSource,
    /// The compiler version, e.g. `1.8`, set once the header was read.
    pub compiled_version: Option<String>,
    /// The version numbers from the header.
    pub class_version: Option<ClassVersion>,
    /// `false` if the resource is not a class file.
    pub is_valid_class: bool,
    /// The decoded constant pool.
    pub constant_pool: Option<ConstantPool>,
    /// The classes referenced by the class file.
    pub referenced_classes: ReferencedClasses,
    /// The decoded class file.
    pub class_file: Option<ClassFile>,
    /// Why the analysis failed, if it did.
    pub error: Option<String>,
}

impl Resource {
    /// Creates a resource that has not been analyzed yet.
    pub fn new(name: impl Into<String>, byte_source: ByteSource) -> Self {
        Self {
            name: name.into(),
            byte_source,
            compiled_version: None,
            class_version: None,
            is_valid_class: true,
            constant_pool: None,
            referenced_classes: ReferencedClasses::new(),
            class_file: None,
            error: None,
        }
    }

    fn reset(&mut self) {
        self.compiled_version = None;
        self.class_version = None;
        self.is_valid_class = true;
        self.constant_pool = None;
        self.referenced_classes.clear();
        self.class_file = None;
        self.error = None;
    }
}

/// The overall outcome of an analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// Every class file was analyzed.
    #[default]
    Ok,
    /// At least one class file could not be analyzed.
    Error,
}

/// Aggregated information about an analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Meta {
    /// The overall status.
    pub status: Status,
    /// The message of the last failure.
    pub message: Option<String>,
    /// The number of class files found per compiler version.
    pub found_versions: BTreeMap<String, usize>,
}

impl Meta {
    /// Counts one more class file compiled with `version`.
    pub fn record_version(&mut self, version: &str) {
        *self.found_versions.entry(version.to_owned()).or_default() += 1;
    }

    /// Gets the number of class files found with `version`.
    #[must_use]
    pub fn found_version_count(&self, version: &str) -> usize {
        self.found_versions.get(version).copied().unwrap_or_default()
    }

    /// Marks the analysis as failed.
    pub fn record_failure(&mut self, message: impl Into<String>) {
        self.status = Status::Error;
        self.message = Some(message.into());
    }
}

/// The result of analyzing a set of resources.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// The aggregated information.
    pub meta: Meta,
    /// The analyzed resources, in input order.
    pub resources: Vec<Resource>,
}

/// Analyzes class files with a set of specification tables and a version table.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    specifications: Specifications,
    versions: VersionTable,
}

impl Analyzer {
    /// Creates an analyzer with the given tables.
    #[must_use]
    pub fn new(specifications: Specifications, versions: VersionTable) -> Self {
        Self {
            specifications,
            versions,
        }
    }

    /// Analyzes every resource.
    #[must_use]
    pub fn analyze(&self, resources: Vec<Resource>) -> Analysis {
        let mut meta = Meta::default();
        let mut resources = resources;
        for resource in &mut resources {
            self.analyze_resource(resource, &mut meta);
        }
        Analysis { meta, resources }
    }

    /// Analyzes a single resource, replacing the results of any earlier analysis.
    ///
    /// A resource that is not a class file is marked invalid. Any other failure is recorded on
    /// the resource and in `meta`; the constant pool is kept if it was decoded, but no
    /// referenced classes are reported.
    pub fn analyze_resource(&self, resource: &mut Resource, meta: &mut Meta) {
        let _span = debug_span!("resource", name = %resource.name).entered();
        resource.reset();
        if let Err(err) = self.decode(resource, meta) {
            resource.referenced_classes.clear();
            resource.class_file = None;
            resource.error = Some(err.to_string());
            if let Error::InvalidMagicNumber(_) = err {
                warn!(error = %err, "Not a class file");
                resource.is_valid_class = false;
            } else {
                warn!(error = %err, "Failed to analyze resource");
                meta.record_failure(format!("{}: {err}", resource.name));
            }
        }
    }

    fn decode(&self, resource: &mut Resource, meta: &mut Meta) -> Result<(), Error> {
        let source = resource.byte_source.open()?;
        let mut reader = ClassReader::new(source);
        let (class_version, compiled_version) =
            version::resolve_version(&mut reader, &self.versions, meta)?;
        resource.class_version = Some(class_version);
        let specification = self.specifications.for_version(&compiled_version);
        resource.compiled_version = Some(compiled_version);

        let constant_pool = parse_constant_pool(&mut reader, specification)?;
        let constant_pool = resource.constant_pool.insert(constant_pool);
        let mut references = ReferencedClasses::new();
        let class_file = parse_class_body(
            &mut reader,
            class_version,
            constant_pool,
            specification,
            &mut references,
        )?;
        references.union_with(constant_pool_references(Some(constant_pool)));
        resource.referenced_classes = references;
        resource.class_file = Some(class_file);
        Ok(())
    }
}
