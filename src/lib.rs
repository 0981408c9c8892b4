//! # sliceobytes
//! Turns a small file into a `[]byte{...}` literal that can be pasted
//! into source code, typically as a unit test fixture.
//!
//! Keep inputs to a few kilobytes: compilers are not fond of huge
//! literals.
//!
//! ## Examples
//!
//! Any slice of bytes [can be rendered](AsLiteral):
//! ```rust
//! use sliceobytes::AsLiteral;
//!
//! let literal = b"Hello, world!".as_literal().dump_to::<String>().unwrap();
//! assert_eq!(literal, concat!(
//!     "[]byte{0x48, 0x65, 0x6c, 0x6c, 0x6f, 0x2c, 0x20, \n",
//!     "0x77, 0x6f, 0x72, 0x6c, 0x64, 0x21}\n",
//! ));
//! ```
//!
//! Files are read in chunks and printed to `stdout`:
//! ```rust,no_run
//! use sliceobytes::Literal;
//!
//! Literal::open("fixture.bin")?.dump()?;
//! # Ok::<(), sliceobytes::LiteralError>(())
//! ```
//!
//! The first line holds seven tokens and every later line eight.
//! Downstream files depend on this exact layout; see [`layout`].

use std::path::Path;

use layout::{CLOSING, OPENING};
use reader::{ByteSliceReader, FileReader, ReadBytes};
use token::TokenIterator;
use writer::{StdoutWriter, WriteLiteral};

mod error;

/// Constants and rules that fix the shape of the literal.
pub mod layout;

/// The [`ReadBytes`](reader::ReadBytes) trait and the sources the crate reads from.
pub mod reader;

/// [`Token`](token::Token)s and the lazy sequence producing them.
pub mod token;

/// The [`WriteLiteral`](writer::WriteLiteral) trait and its sinks.
pub mod writer;

pub use error::LiteralError;

/// The usage line printed when no file is given.
///
/// ```rust
/// assert_eq!(sliceobytes::usage("./sliceobytes"), "Bad mojo! Do ./sliceobytes <filename>\n");
/// ```
pub fn usage(program: &str) -> String {
    format!("Bad mojo! Do {} <filename>\n", program)
}

#[derive(Clone, PartialEq, Eq)]
pub(crate) struct StackBuffer<const N: usize> {
    buffer: [u8; N],
    len: usize,
}

impl<const N: usize> std::fmt::Debug for StackBuffer<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StackBuffer")
            .field("slice", &self.as_slice())
            .field("len", &self.len)
            .finish()
    }
}

impl<const N: usize> StackBuffer<N> {
    pub(crate) fn new() -> Self {
        Self {
            buffer: [0u8; N],
            len: 0,
        }
    }

    fn as_slice(&self) -> &[u8] {
        &self.buffer[..self.len]
    }

    fn clear(&mut self) {
        self.len = 0;
    }

    pub(crate) fn push(&mut self, b: u8) {
        self.check_extension(1);
        self.buffer[self.len] = b;
        self.len += 1;
    }

    fn check_extension(&self, extend_by: usize) {
        if self.len + extend_by > N {
            panic!("Stack-based buffer overflow");
        }
    }

    pub(crate) fn extend_from_slice(&mut self, other: &[u8]) {
        self.check_extension(other.len());
        self.buffer[self.len..self.len + other.len()].copy_from_slice(other);
        self.len += other.len();
    }

    pub(crate) fn as_str(&self) -> &str {
        std::str::from_utf8(self.as_slice()).expect("line buffer only ever holds ASCII")
    }
}

// Longest line: the opening plus seven `0xff, ` tokens and a newline.
const LINE_BUFFER_SIZE: usize = 64;

struct LiteralLineWriter<R: ReadBytes, W: WriteLiteral> {
    tokens: TokenIterator<R>,
    writer: W,
    line: StackBuffer<LINE_BUFFER_SIZE>,
}

impl<R: ReadBytes, W: WriteLiteral> LiteralLineWriter<R, W> {
    fn new(reader: R, writer: W) -> Self {
        Self {
            tokens: TokenIterator::new(reader),
            writer,
            line: StackBuffer::new(),
        }
    }

    fn do_literal(mut self) -> Result<W::Output, LiteralError> {
        self.do_literal_internal()?;

        // Release the source before the sink is finished.
        let Self { tokens, writer, .. } = self;
        drop(tokens);
        writer.finish()
    }

    fn do_literal_internal(&mut self) -> Result<(), LiteralError> {
        self.line.extend_from_slice(OPENING.as_bytes());

        while let Some(token) = self.tokens.next() {
            let token = token?;
            token.write_into(&mut self.line);
            if token.breaks_line() {
                self.flush_line()?;
            }
        }

        self.line.extend_from_slice(CLOSING.as_bytes());
        self.flush_line()
    }

    #[inline]
    fn flush_line(&mut self) -> Result<(), LiteralError> {
        self.line.push(b'\n');
        self.writer.write_line(self.line.as_str())?;
        self.line.clear();
        Ok(())
    }
}

/// Renders the bytes of a [`ReadBytes`] source as a literal.
///
/// Usually built with [`Literal::open`] or the [`AsLiteral`] trait.
pub struct Literal<R: ReadBytes> {
    reader: R,
}

impl Literal<FileReader> {
    /// Open the file at `path` and record its length.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LiteralError> {
        Ok(Literal {
            reader: FileReader::open(path)?,
        })
    }
}

impl<R: ReadBytes> Literal<R> {
    pub fn new(reader: R) -> Self {
        Literal { reader }
    }

    /// Length of the source as reported before reading.
    pub fn total_len(&self) -> u64 {
        self.reader.total_len()
    }

    /// The lazy sequence of [`Token`](token::Token)s for this source.
    pub fn tokens(self) -> TokenIterator<R> {
        TokenIterator::new(self.reader)
    }

    /// Print the literal to `stdout`.
    pub fn dump(self) -> Result<(), LiteralError> {
        self.dump_into(StdoutWriter::new())
    }

    /// Construct a default instance of `W`, write the literal to it and return its output.
    ///
    /// ```
    /// use sliceobytes::AsLiteral;
    ///
    /// assert_eq!([5u8].as_literal().dump_to::<String>().unwrap(), "[]byte{0x5}\n");
    /// ```
    pub fn dump_to<W: WriteLiteral + Default>(self) -> Result<W::Output, LiteralError> {
        self.dump_into(W::default())
    }

    /// Write the literal to `writer` and return its output.
    pub fn dump_into<W: WriteLiteral>(self, writer: W) -> Result<W::Output, LiteralError> {
        LiteralLineWriter::new(self.reader, writer).do_literal()
    }
}

/// Blanket implementation for any type that can be seen as a slice of `u8`.
///
/// ```
/// use sliceobytes::AsLiteral;
///
/// let v = vec![0u8; 3];
/// let s = "hi";
///
/// assert_eq!(v.as_literal().dump_to::<String>().unwrap(), "[]byte{0x0, 0x0, 0x0}\n");
/// assert_eq!(s.literal().dump_to::<String>().unwrap(), "[]byte{0x68, 0x69}\n");
/// ```
pub trait AsLiteral<'a> {
    fn as_literal(&'a self) -> Literal<ByteSliceReader<'a>>;

    /// Synonym for [`as_literal`](AsLiteral::as_literal).
    fn literal(&'a self) -> Literal<ByteSliceReader<'a>> {
        self.as_literal()
    }
}

impl<'a, T: AsRef<[u8]> + ?Sized> AsLiteral<'a> for T {
    fn as_literal(&'a self) -> Literal<ByteSliceReader<'a>> {
        Literal::new(ByteSliceReader::new(self.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_buffer_fills_to_capacity() {
        let mut b = StackBuffer::<4>::new();
        b.extend_from_slice(b"0x");
        b.push(b'f');
        b.push(b'f');
        assert_eq!(b.as_str(), "0xff");
        b.clear();
        assert_eq!(b.as_str(), "");
    }

    #[test]
    #[should_panic(expected = "Stack-based buffer overflow")]
    fn stack_buffer_overflow_panics() {
        let mut b = StackBuffer::<2>::new();
        b.extend_from_slice(b"0x0");
    }

    #[test]
    fn widest_lines_fit() {
        let literal = [0xffu8; 64]
            .as_literal()
            .dump_to::<Vec<String>>()
            .unwrap();
        let widest = literal.iter().map(|l| l.len()).max().unwrap();
        assert_eq!(widest, OPENING.len() + 7 * "0xff, ".len() + 1);
        assert!(widest <= LINE_BUFFER_SIZE);
    }
}
