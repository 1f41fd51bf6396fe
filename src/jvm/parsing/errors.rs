use crate::jvm::constant_pool::BadConstantPoolIndex;

/// An error that occurs when parsing a Java class file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The first four bytes are not `0xCAFEBABE`.
    #[error("Invalid magic number {0:#010x}")]
    InvalidMagicNumber(u32),
    /// The input ended in the middle of a structure.
    #[error("Unexpected end of input at offset {offset}")]
    TruncatedInput {
        /// The number of bytes consumed before the input ended.
        offset: u64,
    },
    /// An error that occurs when reading from the byte source.
    #[error("Failed to read from buffer: {0}")]
    IO(#[from] std::io::Error),
    /// The specification of the class file version has no layout for a constant pool tag.
    #[error("Unknown constant pool tag {tag} at index {pool_index}")]
    UnknownConstantTag {
        /// The tag byte.
        tag: u8,
        /// The index of the entry being decoded.
        pool_index: u16,
    },
    /// The constant pool index does not point to a desired entry.
    #[error("Error when accessing constant pool: {0}")]
    UnresolvedConstantPoolIndex(#[from] BadConstantPoolIndex),
    /// The value of an element in an annotation has an unknown tag.
    #[error("Unsupported element value tag {0:?}")]
    UnsupportedElementValueTag(char),
    /// The verification type info tag is invalid.
    #[error("Unsupported verification type info tag {0}")]
    UnsupportedVerificationTypeTag(u8),
    /// The stack map frame type is invalid.
    #[error("Unsupported stack map frame type {0}")]
    UnsupportedStackMapFrameTag(u8),
    /// The target type of a type annotation is invalid.
    #[error("Invalid target type {0:#04x}")]
    InvalidTargetType(u8),
    /// The kind of a type path element is invalid.
    #[error("Invalid type path kind {0}")]
    InvalidTypePathKind(u8),
}

impl Error {
    /// Turns an unexpected end of input into [`Error::TruncatedInput`] at the given offset.
    pub(crate) fn at_offset(self, offset: u64) -> Self {
        match self {
            Self::IO(err) if err.kind() == std::io::ErrorKind::UnexpectedEof => {
                Self::TruncatedInput { offset }
            }
            other => other,
        }
    }
}
