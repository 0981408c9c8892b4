use std::io::{BufWriter, StdoutLock, Write};

use crate::LiteralError;

/// Receives the literal one line at a time.
pub trait WriteLiteral: Sized {
    /// Type returned once the whole literal has been written.
    ///
    /// ```rust
    /// use sliceobytes::{AsLiteral, LiteralError, writer::WriteLiteral};
    ///
    /// #[derive(Default)]
    /// struct LineCounter(usize);
    ///
    /// impl WriteLiteral for LineCounter {
    ///     type Output = usize;
    ///
    ///     fn write_line(&mut self, _: &str) -> Result<(), LiteralError> {
    ///         self.0 += 1;
    ///         Ok(())
    ///     }
    ///
    ///     fn finish(self) -> Result<Self::Output, LiteralError> {
    ///         Ok(self.0)
    ///     }
    /// }
    ///
    /// let lines = [0u8; 9].as_literal().dump_to::<LineCounter>().unwrap();
    /// assert_eq!(lines, 2);
    /// ```
    type Output;

    /// Write one finished line. `line` ends with `\n`.
    fn write_line(&mut self, line: &str) -> Result<(), LiteralError>;

    /// Called once after the last line.
    fn finish(self) -> Result<Self::Output, LiteralError>;
}

/// Buffered standard output. Flushed when the literal is finished.
pub(crate) struct StdoutWriter(BufWriter<StdoutLock<'static>>);

impl StdoutWriter {
    pub(crate) fn new() -> Self {
        Self(BufWriter::new(std::io::stdout().lock()))
    }
}

impl WriteLiteral for StdoutWriter {
    type Output = ();

    fn write_line(&mut self, line: &str) -> Result<(), LiteralError> {
        self.0.write_all(line.as_bytes()).map_err(LiteralError::write)
    }

    fn finish(mut self) -> Result<Self::Output, LiteralError> {
        self.0.flush().map_err(LiteralError::write)
    }
}

impl WriteLiteral for String {
    type Output = String;

    fn write_line(&mut self, line: &str) -> Result<(), LiteralError> {
        self.push_str(line);
        Ok(())
    }

    fn finish(self) -> Result<Self::Output, LiteralError> {
        Ok(self)
    }
}

/// One entry per line, each ending with `\n`.
impl WriteLiteral for Vec<String> {
    type Output = Vec<String>;

    fn write_line(&mut self, line: &str) -> Result<(), LiteralError> {
        self.push(line.to_owned());
        Ok(())
    }

    fn finish(self) -> Result<Self::Output, LiteralError> {
        Ok(self)
    }
}

impl WriteLiteral for Vec<u8> {
    type Output = Vec<u8>;

    fn write_line(&mut self, line: &str) -> Result<(), LiteralError> {
        self.extend_from_slice(line.as_bytes());
        Ok(())
    }

    fn finish(self) -> Result<Self::Output, LiteralError> {
        Ok(self)
    }
}
