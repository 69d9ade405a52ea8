use derive_more::Display;
use std::cell::Cell;
use std::fmt;
use std::fmt::{Debug, Formatter};

pub const CHAR_LF: char = '\u{000A}';

/// Defines a single character/element in the stream. Note that characters are not the same as
/// bytes, since a single character can be multiple bytes in UTF8.
///
/// The end of the stream is denoted as a separate element, so is Empty to indicate that the
/// buffer is empty but not yet closed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Character {
    /// Standard UTF character
    Ch(char),
    /// Stream buffer empty and closed
    StreamEnd,
    /// Stream buffer empty (but not closed)
    StreamEmpty,
}

use Character::*;

/// Converts the given character to a char. The end-of-stream markers are converted to 0x0000
impl From<&Character> for char {
    fn from(c: &Character) -> Self {
        match c {
            Ch(c) => *c,
            StreamEmpty | StreamEnd => 0x0000 as char,
        }
    }
}

impl From<Character> for char {
    fn from(c: Character) -> Self {
        char::from(&c)
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Ch(ch) => write!(f, "{ch}"),
            StreamEnd => write!(f, "StreamEnd"),
            StreamEmpty => write!(f, "StreamEmpty"),
        }
    }
}

impl Character {
    /// Returns true when the character is a whitespace
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Ch(c) if c.is_whitespace())
    }

    /// Returns true when the character is a numerical
    pub fn is_numeric(&self) -> bool {
        matches!(self, Ch(c) if c.is_ascii_digit())
    }
}

/// Generic stream trait
pub trait Stream {
    /// Read current character
    fn read(&self) -> Character;
    /// Read current character and advance to next
    fn read_and_next(&self) -> Character;
    /// Look ahead in the stream
    fn look_ahead(&self, offset: usize) -> Character;
    /// Tell the current position in bytes
    fn tell_bytes(&self) -> usize;
    /// Retrieves the exact source text between two byte positions
    fn get_slice(&self, start: usize, end: usize) -> &str;
    /// Resets the stream back to the start position
    fn reset_stream(&self);
    /// Closes the stream (no more data can be added)
    fn close(&mut self);
    /// Returns true when the stream is closed
    fn closed(&self) -> bool;
    /// Returns true when the stream is empty (but still open)
    fn exhausted(&self) -> bool;
    /// Returns true when the stream is closed and empty
    fn eof(&self) -> bool;
}

/// A UTF-8 character stream. Unlike a decoding stream, nothing is folded or replaced: every
/// byte that goes in can be sliced back out verbatim, which is what the raw token text relies on.
#[derive(Default)]
pub struct ByteStream {
    /// Actual buffer
    buffer: String,
    /// Current position in the stream, in bytes
    buffer_pos: Cell<usize>,
    /// True when no more data can be appended
    closed: bool,
}

impl Stream for ByteStream {
    /// Read the current character
    fn read(&self) -> Character {
        match self.buffer[self.buffer_pos.get()..].chars().next() {
            Some(c) => Ch(c),
            None if self.closed => StreamEnd,
            None => StreamEmpty,
        }
    }

    /// Read a character and advance to the next
    fn read_and_next(&self) -> Character {
        let ch = self.read();
        if let Ch(c) = ch {
            self.buffer_pos.set(self.buffer_pos.get() + c.len_utf8());
        }

        ch
    }

    /// Looks ahead in the stream without moving the current position
    fn look_ahead(&self, offset: usize) -> Character {
        match self.buffer[self.buffer_pos.get()..].chars().nth(offset) {
            Some(c) => Ch(c),
            None if self.closed => StreamEnd,
            None => StreamEmpty,
        }
    }

    fn tell_bytes(&self) -> usize {
        self.buffer_pos.get()
    }

    fn get_slice(&self, start: usize, end: usize) -> &str {
        self.buffer.get(start..end).unwrap_or_default()
    }

    fn reset_stream(&self) {
        self.buffer_pos.set(0);
    }

    fn close(&mut self) {
        self.closed = true;
    }

    fn closed(&self) -> bool {
        self.closed
    }

    fn exhausted(&self) -> bool {
        self.buffer_pos.get() >= self.buffer.len()
    }

    fn eof(&self) -> bool {
        self.closed() && self.exhausted()
    }
}

impl ByteStream {
    /// Create a new default empty input stream
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Populates the current buffer with the contents of the given string s
    pub fn read_from_str(&mut self, s: &str) {
        self.buffer = s.to_string();
        self.reset_stream();
    }

    /// Returns the number of bytes left in the buffer
    #[cfg(test)]
    fn bytes_left(&self) -> usize {
        self.buffer.len() - self.buffer_pos.get()
    }
}

/// Location holds the start position of the given element in the data source
#[derive(Clone, Copy, PartialEq, Eq, Display, serde::Serialize)]
#[display("{line}:{column}")]
pub struct Location {
    /// Line number, starting with 1
    pub line: usize,
    /// Column number, starting with 1
    pub column: usize,
    /// Byte offset, starting with 0
    pub offset: usize,
}

impl Default for Location {
    /// Default to line 1, column 1
    fn default() -> Self {
        Self::new(1, 1, 0)
    }
}

impl Location {
    /// Create a new Location
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Returns the location directly after the given text, when that text starts at this location
    #[must_use]
    pub fn advanced_by(&self, text: &str) -> Location {
        let mut loc = *self;
        for c in text.chars() {
            loc.inc(Ch(c));
        }
        loc
    }

    /// Will increase the location based on the given character
    pub fn inc(&mut self, ch: Character) {
        match ch {
            Ch(CHAR_LF) => {
                self.line += 1;
                self.column = 1;
                self.offset += 1;
            }
            Ch(c) => {
                self.column += 1;
                self.offset += c.len_utf8();
            }
            StreamEnd | StreamEmpty => {}
        }
    }
}

impl Debug for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}:{})", self.line, self.column)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_stream() {
        let mut stream = ByteStream::new();
        assert!(stream.exhausted());
        assert!(!stream.eof());

        stream.read_from_str("f👽f");
        stream.close();
        assert!(!stream.eof());
        assert_eq!(stream.read_and_next(), Ch('f'));
        assert_eq!(stream.read_and_next(), Ch('👽'));
        assert_eq!(stream.tell_bytes(), 5);
        assert_eq!(stream.read_and_next(), Ch('f'));
        assert!(stream.eof());
        assert!(matches!(stream.read_and_next(), StreamEnd));
        assert!(matches!(stream.read_and_next(), StreamEnd));

        stream.reset_stream();
        assert_eq!(stream.read(), Ch('f'));
    }

    #[test]
    fn test_eof() {
        let mut stream = ByteStream::new();
        stream.read_from_str("abc");
        stream.close();
        assert_eq!(stream.bytes_left(), 3);
        assert_eq!(stream.read_and_next(), Ch('a'));
        assert_eq!(stream.read_and_next(), Ch('b'));
        assert_eq!(stream.read_and_next(), Ch('c'));
        assert_eq!(stream.bytes_left(), 0);
        assert!(matches!(stream.read_and_next(), StreamEnd));
        assert!(matches!(stream.read_and_next(), StreamEnd));
    }

    #[test]
    fn stream_closing() {
        let mut stream = ByteStream::new();
        stream.read_from_str("abc");
        assert_eq!(stream.read_and_next(), Ch('a'));
        assert_eq!(stream.read_and_next(), Ch('b'));
        assert_eq!(stream.read_and_next(), Ch('c'));
        assert!(matches!(stream.read_and_next(), StreamEmpty));
        assert!(stream.exhausted());
        assert!(!stream.eof());

        stream.close();
        assert!(stream.closed());
        assert!(matches!(stream.read_and_next(), StreamEnd));
        assert!(stream.eof());
    }

    #[test]
    fn look_ahead_and_slice() {
        let mut stream = ByteStream::new();
        stream.read_from_str("a /* b */");
        stream.close();

        assert_eq!(stream.look_ahead(0), Ch('a'));
        assert_eq!(stream.look_ahead(2), Ch('/'));
        assert_eq!(stream.look_ahead(20), StreamEnd);
        assert_eq!(stream.tell_bytes(), 0);

        stream.read_and_next();
        assert_eq!(stream.read(), Ch(' '));
        assert_eq!(stream.get_slice(2, 9), "/* b */");
        assert_eq!(stream.get_slice(2, 90), "");
    }

    #[test]
    fn location_advance() {
        let loc = Location::default().advanced_by("a {\n  b");
        assert_eq!(loc, Location::new(2, 4, 7));
        assert_eq!(loc.to_string(), "2:4");

        let loc = Location::new(1, 1, 0).advanced_by("é");
        assert_eq!(loc.offset, 2);
        assert_eq!(loc.column, 2);
    }
}
