use std::{
    fmt::{self, Write},
    iter::FusedIterator,
};

use log::debug;

use crate::{
    layout::{breaks_after, is_last, CHUNK_SIZE, SEPARATOR},
    reader::ReadBytes,
    LiteralError, StackBuffer,
};

trait ToHex {
    fn to_hex_lower(self) -> [u8; 2];
}

const LOWER_LUT: [u8; 16] = [
    b'0', b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9', b'a', b'b', b'c', b'd', b'e',
    b'f',
];

impl ToHex for u8 {
    fn to_hex_lower(self) -> [u8; 2] {
        let mut x = [0u8; 2];
        x[1] = LOWER_LUT[(self & 0xf) as usize];
        x[0] = LOWER_LUT[(self >> 4) as usize];
        x
    }
}

/// One input byte and where it sits in the input.
///
/// A token renders as `0x` followed by lowercase hex digits, with no
/// leading zero:
///
/// ```rust
/// use sliceobytes::AsLiteral;
///
/// let tokens: Vec<String> = [0x05u8, 0xa0, 0xff]
///     .as_literal()
///     .tokens()
///     .map(|t| t.unwrap().to_string())
///     .collect();
///
/// assert_eq!(tokens, vec!["0x5", "0xa0", "0xff"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    value: u8,
    pos: u64,
    last: bool,
}

impl Token {
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Absolute position in the input, counted from 0.
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// True for the byte at the input's last position, and for any byte
    /// read past the length the input reported.
    pub fn is_last(&self) -> bool {
        self.last
    }

    /// Text written between this token and the next one.
    pub fn separator(&self) -> &'static str {
        if self.last {
            ""
        } else {
            SEPARATOR
        }
    }

    pub fn breaks_line(&self) -> bool {
        breaks_after(self.pos)
    }

    pub(crate) fn write_into<const N: usize>(&self, line: &mut StackBuffer<N>) {
        let [high, low] = self.value.to_hex_lower();
        line.extend_from_slice(b"0x");
        if self.value > 0xf {
            line.push(high);
        }
        line.push(low);
        line.extend_from_slice(self.separator().as_bytes());
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [high, low] = self.value.to_hex_lower();
        f.write_str("0x")?;
        if self.value > 0xf {
            f.write_char(high as char)?;
        }
        f.write_char(low as char)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TokenIteratorState {
    NotStarted,
    InProgress,
    Completed,
}

/// Lazily turns a [`ReadBytes`] source into [`Token`]s, reading
/// [`CHUNK_SIZE`] bytes at a time.
///
/// The sequence ends at end-of-stream. A read error is yielded once
/// and ends the sequence.
pub struct TokenIterator<R: ReadBytes> {
    reader: R,
    len: u64,
    pos: u64,
    chunk: [u8; CHUNK_SIZE],
    chunk_len: usize,
    chunk_index: usize,
    state: TokenIteratorState,
}

impl<R: ReadBytes> TokenIterator<R> {
    pub fn new(reader: R) -> Self {
        let len = reader.total_len();
        Self {
            reader,
            len,
            pos: 0,
            chunk: [0u8; CHUNK_SIZE],
            chunk_len: 0,
            chunk_index: 0,
            state: TokenIteratorState::NotStarted,
        }
    }

    /// Length the source reported before reading started.
    pub fn total_len(&self) -> u64 {
        self.len
    }

    /// Number of tokens produced so far.
    pub fn position(&self) -> u64 {
        self.pos
    }

    fn fill_chunk(&mut self) -> Result<usize, LiteralError> {
        let n = self.reader.next_n(&mut self.chunk)?.len();
        self.chunk_len = n;
        self.chunk_index = 0;
        Ok(n)
    }

    fn complete(&mut self) {
        self.state = TokenIteratorState::Completed;
        debug!("encoded {} of {} bytes", self.pos, self.len);
    }
}

impl<R: ReadBytes> Iterator for TokenIterator<R> {
    type Item = Result<Token, LiteralError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            TokenIteratorState::Completed => None,
            TokenIteratorState::NotStarted | TokenIteratorState::InProgress => {
                self.state = TokenIteratorState::InProgress;

                if self.chunk_index >= self.chunk_len {
                    match self.fill_chunk() {
                        Ok(0) => {
                            self.complete();
                            return None;
                        }
                        Ok(_) => {}
                        Err(e) => {
                            self.complete();
                            return Some(Err(e));
                        }
                    }
                }

                let token = Token {
                    value: self.chunk[self.chunk_index],
                    pos: self.pos,
                    last: is_last(self.pos, self.len),
                };
                self.chunk_index += 1;
                self.pos += 1;
                Some(Ok(token))
            }
        }
    }
}

impl<R: ReadBytes> FusedIterator for TokenIterator<R> {}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::reader::ByteSliceReader;

    struct FailingReader {
        good: usize,
    }

    impl ReadBytes for FailingReader {
        fn next_n<'buf>(&mut self, buf: &'buf mut [u8]) -> Result<&'buf [u8], LiteralError> {
            if self.good == 0 {
                return Err(LiteralError::read(io::Error::new(
                    io::ErrorKind::Other,
                    "disk on fire",
                )));
            }
            let n = self.good.min(buf.len());
            self.good -= n;
            buf[..n].fill(0xaa);
            Ok(&buf[..n])
        }

        fn total_len(&self) -> u64 {
            100
        }
    }

    // Reports fewer bytes than it yields, like a file appended to after
    // it was opened.
    struct GrowingReader<'a> {
        inner: ByteSliceReader<'a>,
        reported: u64,
    }

    impl<'a> ReadBytes for GrowingReader<'a> {
        fn next_n<'buf>(&mut self, buf: &'buf mut [u8]) -> Result<&'buf [u8], LiteralError> {
            self.inner.next_n(buf)
        }

        fn total_len(&self) -> u64 {
            self.reported
        }
    }

    #[test]
    fn bytes_past_reported_length_get_no_separator() {
        let data = [1u8, 2, 3, 4, 5];
        let tokens: Vec<Token> = TokenIterator::new(GrowingReader {
            inner: ByteSliceReader::new(&data),
            reported: 2,
        })
        .collect::<Result<_, _>>()
        .unwrap();

        let separators: Vec<&str> = tokens.iter().map(|t| t.separator()).collect();
        assert_eq!(separators, vec![", ", "", "", "", ""]);
    }

    #[test]
    fn positions_span_chunks() {
        let data: Vec<u8> = (0..CHUNK_SIZE * 2 + 3).map(|i| i as u8).collect();
        let tokens: Vec<Token> = TokenIterator::new(ByteSliceReader::new(&data))
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(tokens.len(), data.len());
        for (i, t) in tokens.iter().enumerate() {
            assert_eq!(t.pos(), i as u64);
            assert_eq!(t.value(), data[i]);
        }
        assert!(tokens.last().unwrap().is_last());
        assert_eq!(tokens.iter().filter(|t| t.is_last()).count(), 1);
    }

    #[test]
    fn read_error_ends_sequence() {
        let mut it = TokenIterator::new(FailingReader { good: 3 });
        for _ in 0..3 {
            assert!(it.next().unwrap().is_ok());
        }
        assert!(matches!(it.next(), Some(Err(LiteralError::Read { .. }))));
        assert!(it.next().is_none());
        assert_eq!(it.position(), 3);
    }

    #[test]
    fn empty_source_yields_nothing() {
        let mut it = TokenIterator::new(ByteSliceReader::new(&[]));
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }

    #[test]
    fn written_token_carries_separator() {
        let mut line = StackBuffer::<16>::new();
        Token {
            value: 0x0c,
            pos: 0,
            last: false,
        }
        .write_into(&mut line);
        Token {
            value: 0xc0,
            pos: 1,
            last: true,
        }
        .write_into(&mut line);
        assert_eq!(line.as_str(), "0xc, 0xc0");
    }
}
