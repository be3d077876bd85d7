//! Immutable, cursor-scoped view over a command input.
//!
//! Offsets are UTF-8 byte offsets into the input. The cursor always sits on a
//! character boundary.

// Slices are taken at the cursor, which is validated to be a char boundary.
#![allow(clippy::string_slice)]

use crate::error::{ArgumentParseError, ParseErrorKind, ReaderError};
use crate::string_reader::StringReader;

/// A read-only snapshot of an input string and a cursor into it.
///
/// Never changes after construction, so it can be shared freely between
/// threads. Use [`ArgumentReader::to_mutable`] to get a reader that consumes
/// input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentReader<'a> {
    input: &'a str,
    cursor: usize,
    remaining: usize,
}

impl<'a> ArgumentReader<'a> {
    /// Create a view of `input` positioned at `cursor`.
    pub fn new(input: &'a str, cursor: usize) -> Result<Self, ReaderError> {
        if cursor > input.len() {
            return Err(ReaderError::CursorOutOfBounds {
                cursor,
                length: input.len(),
            });
        }
        if !input.is_char_boundary(cursor) {
            return Err(ReaderError::NotCharBoundary(cursor));
        }
        Ok(Self::new_unchecked(input, cursor))
    }

    /// Caller guarantees `cursor <= input.len()` on a char boundary.
    pub(crate) fn new_unchecked(input: &'a str, cursor: usize) -> Self {
        debug_assert!(input.is_char_boundary(cursor));
        Self {
            input,
            cursor,
            remaining: input.len() - cursor,
        }
    }

    #[must_use]
    pub fn input(&self) -> &'a str {
        self.input
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn remaining_length(&self) -> usize {
        self.remaining
    }

    #[must_use]
    pub fn total_length(&self) -> usize {
        self.input.len()
    }

    /// Everything before the cursor.
    #[must_use]
    pub fn parsed(&self) -> &'a str {
        if self.cursor == 0 {
            return "";
        }
        &self.input[..self.cursor]
    }

    /// Everything from the cursor on.
    #[must_use]
    pub fn remaining(&self) -> &'a str {
        &self.input[self.cursor..]
    }

    /// Whether `length` more bytes are available.
    #[must_use]
    pub fn can_read_n(&self, length: usize) -> bool {
        length <= self.remaining
    }

    #[must_use]
    pub fn can_read(&self) -> bool {
        self.can_read_n(1)
    }

    /// The character under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end of the input. Use
    /// [`ArgumentReader::peek_char`] when that has not been checked.
    #[must_use]
    pub fn peek(&self) -> char {
        self.peek_at(0)
    }

    /// The character starting `offset` bytes after the cursor.
    ///
    /// # Panics
    ///
    /// Panics if `cursor + offset` is at or past the end of the input, or is
    /// not a character boundary.
    #[must_use]
    pub fn peek_at(&self, offset: usize) -> char {
        char_at(self.input, self.cursor + offset)
    }

    /// The character under the cursor, or an error at the end of input.
    pub fn peek_char(&self) -> Result<char, ReaderError> {
        if self.can_read() {
            return Ok(self.peek());
        }
        Err(ReaderError::ReadPastEnd)
    }

    /// A mutable reader over the same input, starting at this cursor.
    #[must_use]
    pub fn to_mutable(&self) -> StringReader<'a> {
        let mut reader = StringReader::new(self.input);
        reader.set_cursor_unchecked(self.cursor);
        reader
    }

    /// A parse error pointing at this cursor.
    #[must_use]
    pub fn create_error(&self, message: impl Into<String>) -> ArgumentParseError {
        ArgumentParseError::new(
            ParseErrorKind::Custom(message.into()),
            self.input,
            self.cursor,
        )
    }
}

fn char_at(input: &str, index: usize) -> char {
    match input[index..].chars().next() {
        Some(c) => c,
        None => panic!("index {index} out of bounds for input of length {}", input.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_and_suffix_cover_input() {
        let input = "give @p hopper 64";
        for cursor in 0..=input.len() {
            let reader = ArgumentReader::new(input, cursor).unwrap();
            assert_eq!(format!("{}{}", reader.parsed(), reader.remaining()), input);
            assert_eq!(reader.parsed().len(), cursor);
            assert_eq!(reader.remaining_length(), input.len() - cursor);
            assert_eq!(reader.total_length(), input.len());
        }
    }

    #[test]
    fn test_parsed_empty_at_start() {
        let reader = ArgumentReader::new("abc", 0).unwrap();
        assert_eq!(reader.parsed(), "");
        assert_eq!(reader.remaining(), "abc");
    }

    #[test]
    fn test_can_read() {
        let reader = ArgumentReader::new("abc", 1).unwrap();
        assert!(reader.can_read());
        assert!(reader.can_read_n(2));
        assert!(!reader.can_read_n(3));

        let end = ArgumentReader::new("abc", 3).unwrap();
        assert!(!end.can_read());
        assert!(end.can_read_n(0));
    }

    #[test]
    fn test_can_read_huge_length() {
        let reader = ArgumentReader::new("abc", 1).unwrap();
        assert!(!reader.can_read_n(usize::MAX));
        assert!(!reader.can_read_n(usize::MAX - 1));
    }

    #[test]
    fn test_peek() {
        let reader = ArgumentReader::new("abc", 1).unwrap();
        assert_eq!(reader.peek(), 'b');
        assert_eq!(reader.peek_at(1), 'c');
        assert_eq!(reader.peek_char(), Ok('b'));
    }

    #[test]
    fn test_peek_char_past_end() {
        let reader = ArgumentReader::new("abc", 3).unwrap();
        assert_eq!(reader.peek_char(), Err(ReaderError::ReadPastEnd));
        assert_eq!(
            ReaderError::ReadPastEnd.to_string(),
            "Cannot read past the end of a string!"
        );
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_peek_past_end_panics() {
        let reader = ArgumentReader::new("abc", 3).unwrap();
        let _ = reader.peek();
    }

    #[test]
    fn test_rejects_bad_cursor() {
        assert_eq!(
            ArgumentReader::new("abc", 4),
            Err(ReaderError::CursorOutOfBounds { cursor: 4, length: 3 })
        );
        assert_eq!(
            ArgumentReader::new("é", 1),
            Err(ReaderError::NotCharBoundary(1))
        );
    }

    #[test]
    fn test_to_mutable_is_independent() {
        let reader = ArgumentReader::new("one two", 4).unwrap();
        let mut mutable = reader.to_mutable();
        assert_eq!(mutable.cursor(), 4);

        mutable.skip();
        mutable.skip();
        assert_eq!(mutable.cursor(), 6);
        assert_eq!(reader.cursor(), 4);
        assert_eq!(reader.remaining(), "two");
    }

    #[test]
    fn test_create_error() {
        let reader = ArgumentReader::new("tp ~ ~ x", 7).unwrap();
        let err = reader.create_error("Not a coordinate");
        assert_eq!(err.input(), "tp ~ ~ x");
        assert_eq!(err.cursor(), 7);
        assert_eq!(err.kind(), &ParseErrorKind::Custom("Not a coordinate".to_string()));
    }

    #[test]
    fn test_shared_across_threads() {
        let input = String::from("shared input");
        let reader = ArgumentReader::new(&input, 7).unwrap();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(move || assert_eq!(reader.remaining(), "input"));
            }
        });
    }
}
