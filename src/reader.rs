use std::{
    cmp::min,
    fs::File,
    io::{ErrorKind, Read},
    path::{Path, PathBuf},
};

use log::{debug, trace};

use crate::LiteralError;

/// A source of bytes whose total length is known before reading starts.
pub trait ReadBytes {
    /// Fill as much of `buf` as possible and return the filled part.
    /// An empty slice means end-of-stream.
    fn next_n<'buf>(&mut self, buf: &'buf mut [u8]) -> Result<&'buf [u8], LiteralError>;

    /// Total number of bytes this source was expected to hold
    /// when it was opened.
    fn total_len(&self) -> u64;
}

pub struct ByteSliceReader<'a> {
    slice: &'a [u8],
    index: usize,
}

impl<'a> ByteSliceReader<'a> {
    pub fn new(slice: &'a [u8]) -> ByteSliceReader<'a> {
        Self {
            slice,
            index: 0usize,
        }
    }
}

impl<'a> ReadBytes for ByteSliceReader<'a> {
    fn next_n<'buf>(&mut self, buf: &'buf mut [u8]) -> Result<&'buf [u8], LiteralError> {
        if self.index >= self.slice.len() {
            return Ok(&[]);
        }
        let end = min(self.index + buf.len(), self.slice.len()) - self.index;
        buf[..end].copy_from_slice(&self.slice[self.index..self.index + end]);
        self.index += end;
        Ok(&buf[..end])
    }

    fn total_len(&self) -> u64 {
        self.slice.len() as u64
    }
}

/// Reads a file from disk.
///
/// The length is taken from the file's metadata when it is opened.
/// The handle is released when the reader is dropped.
#[derive(Debug)]
pub struct FileReader {
    file: File,
    path: PathBuf,
    len: u64,
}

impl FileReader {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LiteralError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| LiteralError::Open {
            path: path.clone(),
            source,
        })?;
        let len = file
            .metadata()
            .map_err(|source| LiteralError::Stat {
                path: path.clone(),
                source,
            })?
            .len();

        debug!("opened {} ({} bytes)", path.display(), len);
        Ok(Self { file, path, len })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReadBytes for FileReader {
    fn next_n<'buf>(&mut self, buf: &'buf mut [u8]) -> Result<&'buf [u8], LiteralError> {
        loop {
            match self.file.read(buf) {
                Ok(n) => {
                    trace!("read {} bytes from {}", n, self.path.display());
                    return Ok(&buf[..n]);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(LiteralError::read(e)),
            }
        }
    }

    fn total_len(&self) -> u64 {
        self.len
    }
}
