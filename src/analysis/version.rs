//! Resolving the compiler version of a class file from its header.

use std::io::Read;

use tracing::{debug, warn};

use crate::{
    jvm::{
        ClassVersion,
        parsing::{ClassReader, Error, JAVA_CLASS_MAGIC, parse_header},
    },
    specification::{UNKNOWN_VERSION, VersionTable},
};

use super::Meta;

/// Reads the header of a class file and looks up its compiler version.
///
/// The found version is tallied in `meta`, under [`UNKNOWN_VERSION`] if the header is not in
/// `versions`.
/// # Errors
/// - [`Error::InvalidMagicNumber`] if the input is not a class file. Nothing is tallied.
/// - [`Error::TruncatedInput`] if the input is shorter than the header.
pub fn resolve_version<R: Read>(
    reader: &mut ClassReader<R>,
    versions: &VersionTable,
    meta: &mut Meta,
) -> Result<(ClassVersion, String), Error> {
    let class_version = parse_header(reader)?;
    let compiled_version = versions
        .lookup_java_version(JAVA_CLASS_MAGIC, class_version.minor, class_version.major)
        .to_owned();
    if compiled_version == UNKNOWN_VERSION {
        warn!(%class_version, "Unknown compiler version");
    } else {
        debug!(%class_version, %compiled_version, "Resolved compiler version");
    }
    meta.record_version(&compiled_version);
    Ok((class_version, compiled_version))
}
