use std::{borrow::Cow, io::Read};

pub(crate) trait ValueReaderExt
where
    Self: Read + Sized,
{
    fn read_value<T: Readable>(&mut self) -> std::io::Result<T>;
}

pub(crate) trait Readable {
    fn read_from_reader<R: Read>(reader: &mut R) -> std::io::Result<Self>
    where
        Self: Sized;
}

impl<R: Read + Sized> ValueReaderExt for R {
    fn read_value<T: Readable>(&mut self) -> std::io::Result<T>
    where
        T: Readable,
    {
        T::read_from_reader(self)
    }
}

impl<const N: usize> Readable for [u8; N] {
    fn read_from_reader<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut buf = [0u8; N];
        reader.read_exact(&mut buf)?;
        Ok(buf)
    }
}

macro_rules! impl_readable_for {
    ($($t:ty),*) => {
        $(
            impl Readable for $t {
                fn read_from_reader<R: Read>(reader: &mut R) -> std::io::Result<Self> {
                    let buf = reader.read_value()?;
                    Ok(Self::from_be_bytes(buf))
                }
            }
        )*
    };
}

impl_readable_for!(u8, u16, u32, u64, i32, i64, f32, f64);

/// Reads [len] bytes and advances the reader by [`len`] bytes.
/// The buffer only grows with the bytes actually read, so a length declared by the input
/// never causes a large allocation by itself.
pub(crate) fn read_byte_chunk<R>(reader: &mut R, len: usize) -> std::io::Result<Vec<u8>>
where
    R: Read,
{
    let limit = u64::try_from(len).unwrap_or(u64::MAX);
    let mut buf = Vec::new();
    reader.by_ref().take(limit).read_to_end(&mut buf)?;
    if buf.len() == len {
        Ok(buf)
    } else {
        Err(std::io::ErrorKind::UnexpectedEof.into())
    }
}

/// Reads a `u2` length followed by that many bytes of modified UTF-8.
/// Byte sequences that are not valid modified UTF-8 are decoded lossily.
pub(crate) fn read_modified_utf8<R>(reader: &mut R) -> std::io::Result<String>
where
    R: Read,
{
    let length: u16 = reader.read_value()?;
    let bytes = read_byte_chunk(reader, length.into())?;
    let result = match cesu8::from_java_cesu8(&bytes) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => {
            tracing::debug!(length, "Invalid modified UTF-8, decoding lossily");
            match String::from_utf8_lossy(&bytes) {
                Cow::Borrowed(it) => it.to_owned(),
                Cow::Owned(it) => it,
            }
        }
    };
    Ok(result)
}

/// A forward-only reader over a class file that counts the bytes consumed.
#[derive(Debug)]
pub struct ClassReader<R> {
    inner: R,
    position: u64,
}

impl<R: Read> ClassReader<R> {
    /// Wraps a byte source positioned at the start of a class file.
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Gets the number of bytes consumed so far.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.position
    }
}

impl<R: Read> Read for ClassReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let read = self.inner.read(buf)?;
        self.position += read as u64;
        Ok(read)
    }
}
