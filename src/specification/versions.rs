//! The magic-number/version table mapping class-file headers to compiler versions.

use std::{collections::BTreeMap, io::Read};

use serde::{Deserialize, Serialize};

use super::Error;
use crate::jvm::class::PREVIEW_MINOR_VERSION;

/// The compiled version reported for headers missing from the table.
pub const UNKNOWN_VERSION: &str = "unknown";

/// `(major, minor, display string)`
const KNOWN_VERSIONS: &[(u16, u16, &str)] = &[
    (45, 3, "1.1"),
    (46, 0, "1.2"),
    (47, 0, "1.3"),
    (48, 0, "1.4"),
    (49, 0, "1.5"),
    (50, 0, "1.6"),
    (51, 0, "1.7"),
    (52, 0, "1.8"),
    (53, 0, "9"),
    (54, 0, "10"),
    (55, 0, "11"),
    (56, 0, "12"),
    (57, 0, "13"),
    (58, 0, "14"),
    (59, 0, "15"),
    (60, 0, "16"),
    (61, 0, "17"),
    (62, 0, "18"),
    (63, 0, "19"),
    (64, 0, "20"),
    (65, 0, "21"),
    (66, 0, "22"),
    (67, 0, "23"),
    (68, 0, "24"),
    (69, 0, "25"),
];

/// Preview features exist since Java 12.
const FIRST_PREVIEW_MAJOR_VERSION: u16 = 56;

/// A single row of the [`VersionTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    /// The lowercase hex of the first 8 bytes of the class file, e.g. `cafebabe00000034`.
    pub code: String,
    /// The compiler version, e.g. `1.8`.
    pub version: String,
}

/// Maps class-file headers (magic number, minor and major version) to compiler versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTable {
    entries: BTreeMap<String, String>,
}

impl VersionTable {
    /// Creates a table from its rows. Codes are matched case-insensitively.
    pub fn new(entries: impl IntoIterator<Item = VersionEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|VersionEntry { code, version }| (code.to_ascii_lowercase(), version))
            .collect();
        Self { entries }
    }

    /// Loads the table from a JSON array of [`VersionEntry`].
    /// # Errors
    /// See [`Error`].
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let entries: Vec<VersionEntry> = serde_json::from_reader(reader)?;
        if entries.is_empty() {
            return Err(Error::Empty);
        }
        Ok(Self::new(entries))
    }

    /// Gets the compiler version of a class file with the given header.
    /// Returns [`UNKNOWN_VERSION`] if the header is not in the table.
    #[must_use]
    pub fn lookup_java_version(&self, magic: u32, minor: u16, major: u16) -> &str {
        self.entries
            .get(&header_code(magic, minor, major))
            .map_or(UNKNOWN_VERSION, String::as_str)
    }
}

/// Formats a class-file header the way the table keys it.
#[must_use]
pub fn header_code(magic: u32, minor: u16, major: u16) -> String {
    format!("{magic:08x}{minor:04x}{major:04x}")
}

impl Default for VersionTable {
    fn default() -> Self {
        let magic = crate::jvm::parsing::JAVA_CLASS_MAGIC;
        let releases = KNOWN_VERSIONS.iter().map(|&(major, minor, version)| VersionEntry {
            code: header_code(magic, minor, major),
            version: version.to_owned(),
        });
        let previews = KNOWN_VERSIONS
            .iter()
            .filter(|(major, ..)| *major >= FIRST_PREVIEW_MAJOR_VERSION)
            .map(|&(major, _, version)| VersionEntry {
                code: header_code(magic, PREVIEW_MINOR_VERSION, major),
                version: version.to_owned(),
            });
        // Java 1.0.2 and 1.1 share 45.3; 45.0 shows up in some early compilers.
        let early = std::iter::once(VersionEntry {
            code: header_code(magic, 0, 45),
            version: "1.1".to_owned(),
        });
        Self::new(releases.chain(previews).chain(early))
    }
}
