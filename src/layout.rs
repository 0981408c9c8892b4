//! Fixed layout of the emitted literal.
//!
//! Nothing here is configurable at runtime. Consumers paste the output
//! straight into source files, so the layout is part of the contract.

/// Number of bytes requested from the input per read.
pub const CHUNK_SIZE: usize = 1024;

/// Target number of tokens per output line.
pub const WIDTH: u64 = 8;

/// Text that opens the literal.
pub const OPENING: &str = "[]byte{";

/// Text that closes the literal. A newline follows it.
pub const CLOSING: &str = "}";

/// Separator written after every token but the last.
pub const SEPARATOR: &str = ", ";

/// Whether a newline follows the token at absolute position `pos`.
///
/// The first break fires after position `WIDTH - 2`, so the first line
/// holds one token fewer than the lines after it:
///
/// ```rust
/// use sliceobytes::layout::breaks_after;
///
/// let breaks: Vec<u64> = (0..32).filter(|p| breaks_after(*p)).collect();
/// assert_eq!(breaks, vec![6, 14, 22, 30]);
/// ```
pub fn breaks_after(pos: u64) -> bool {
    pos == WIDTH - 2 || (pos > WIDTH && (pos + 2) % WIDTH == 0)
}

/// Whether `pos` is at or past the final position of an input that
/// reported `len` bytes. Bytes beyond `len` (a file that grew after it
/// was opened) count as last too and get no separator.
pub fn is_last(pos: u64, len: u64) -> bool {
    pos + 1 >= len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_break_comes_one_early() {
        assert!(!breaks_after(5));
        assert!(breaks_after(6));
        assert!(!breaks_after(7));
        assert!(!breaks_after(8));
    }

    #[test]
    fn later_breaks_every_width() {
        let breaks: Vec<u64> = (7..200).filter(|p| breaks_after(*p)).collect();
        assert!(breaks.windows(2).all(|w| w[1] - w[0] == WIDTH));
        assert_eq!(breaks[0], 14);
    }

    #[test]
    fn last_position() {
        assert!(is_last(0, 1));
        assert!(is_last(1023, 1024));
        assert!(!is_last(0, 2));
    }

    #[test]
    fn positions_past_the_length_are_last() {
        assert!(is_last(5, 3));
        assert!(is_last(0, 0));
        assert!(is_last(7, 0));
    }
}
