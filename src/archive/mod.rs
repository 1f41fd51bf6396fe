//! Discovering class files on disk and inside archives.
//!
//! Classification is by file extension only: `.class` files are class files and `.jar`,
//! `.zip`, `.war` and `.ear` files are archives whose `*.class` entries are class files.
//! Everything else is ignored.

use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::debug;

use crate::analysis::Resource;

/// The extensions of archives whose entries are inspected.
pub const ARCHIVE_EXTENSIONS: [&str; 4] = ["jar", "zip", "war", "ear"];

/// The separator between the path of an archive and the name of an entry in resource names.
pub const ENTRY_SEPARATOR: &str = "!/";

/// An error that can occur while collecting resources.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Error occurred while reading a file or a directory.
    #[error("IO error on {path}: {source}")]
    IO {
        /// The path being read.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// Error occurred while walking a directory.
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
    /// The archive could not be read.
    #[cfg(feature = "jar")]
    #[error("Malformed archive {path}: {source}")]
    Zip {
        /// The path of the archive.
        path: PathBuf,
        /// The underlying error.
        source: zip::result::ZipError,
    },
}

/// Where the bytes of a resource come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteSource {
    /// A file on disk.
    File(PathBuf),
    /// Bytes held in memory, e.g. an archive entry.
    Memory(Arc<[u8]>),
}

impl ByteSource {
    /// Opens a sequential reader over the bytes.
    /// # Errors
    /// - [`io::Error`] if the file cannot be opened.
    pub fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        match self {
            Self::File(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
            Self::Memory(bytes) => Ok(Box::new(bytes.as_ref())),
        }
    }
}

impl From<Vec<u8>> for ByteSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Memory(bytes.into())
    }
}

/// Collects the class files at `path`.
///
/// A directory is walked recursively in file name order; see the module documentation for how
/// files are classified.
/// # Errors
/// See [`Error`].
pub fn collect_resources(path: &Path) -> Result<Vec<Resource>, Error> {
    let mut resources = Vec::new();
    if path.is_dir() {
        let walker = walkdir::WalkDir::new(path).sort_by_file_name();
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file() {
                collect_file(entry.path(), &mut resources)?;
            }
        }
    } else {
        collect_file(path, &mut resources)?;
    }
    Ok(resources)
}

fn collect_file(path: &Path, resources: &mut Vec<Resource>) -> Result<(), Error> {
    match extension_of(path).as_deref() {
        Some("class") => {
            debug!(path = %path.display(), "Found class file");
            resources.push(Resource::new(
                path.display().to_string(),
                ByteSource::File(path.to_owned()),
            ));
        }
        Some(ext) if ARCHIVE_EXTENSIONS.contains(&ext) => collect_archive(path, resources)?,
        _ => debug!(path = %path.display(), "Skipping unsupported file"),
    }
    Ok(())
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|it| it.to_str())
        .map(str::to_ascii_lowercase)
}

#[cfg(feature = "jar")]
fn collect_archive(path: &Path, resources: &mut Vec<Resource>) -> Result<(), Error> {
    use zip::{ZipArchive, result::ZipError};

    let io_error = |source: io::Error| Error::IO {
        path: path.to_owned(),
        source,
    };
    let zip_error = |err: ZipError| match err {
        ZipError::Io(source) => io_error(source),
        source => Error::Zip {
            path: path.to_owned(),
            source,
        },
    };
    let file = File::open(path).map_err(io_error)?;
    let mut archive = ZipArchive::new(BufReader::new(file)).map_err(zip_error)?;
    let mut entry_names: Vec<String> = archive
        .file_names()
        .filter(|name| name.ends_with(".class"))
        .map(str::to_owned)
        .collect();
    entry_names.sort();
    for entry_name in entry_names {
        let mut entry = archive.by_name(&entry_name).map_err(zip_error)?;
        if entry.is_dir() {
            continue;
        }
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).map_err(io_error)?;
        let name = format!("{}{ENTRY_SEPARATOR}{entry_name}", path.display());
        debug!(%name, size = bytes.len(), "Found archive entry");
        resources.push(Resource::new(name, bytes.into()));
    }
    Ok(())
}

#[cfg(not(feature = "jar"))]
fn collect_archive(path: &Path, _resources: &mut Vec<Resource>) -> Result<(), Error> {
    debug!(path = %path.display(), "Archive support is disabled");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_source_reads_all_bytes() {
        let source = ByteSource::from(vec![0xCA, 0xFE]);
        let mut buf = Vec::new();
        source.open().unwrap().read_to_end(&mut buf).unwrap();
        assert_eq!(buf, [0xCA, 0xFE]);
    }

    #[test]
    fn missing_file_fails_on_open() {
        let source = ByteSource::File(PathBuf::from("/definitely/not/here.class"));
        assert!(source.open().is_err());
    }

    #[test]
    fn extensions_are_case_insensitive() {
        assert_eq!(extension_of(Path::new("A.CLASS")).as_deref(), Some("class"));
        assert_eq!(extension_of(Path::new("lib/x.Jar")).as_deref(), Some("jar"));
        assert_eq!(extension_of(Path::new("README")), None);
    }
}
