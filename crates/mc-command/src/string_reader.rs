//! Mutable cursor reader used by grammar types to consume input.
//!
//! Mirrors Brigadier's `StringReader`: the reading rules (which characters
//! make up numbers and unquoted strings, how escapes work) and the error each
//! read reports match what the client expects.

// The cursor only ever advances by whole characters, so slices at it are safe.
#![allow(clippy::string_slice)]

use std::str::FromStr;

use mc_key::{MINECRAFT_NAMESPACE, ResourceKey};

use crate::error::{ArgumentParseError, ParseErrorKind, ParseResult, ReaderError};
use crate::reader::ArgumentReader;

const SYNTAX_ESCAPE: char = '\\';
const SYNTAX_DOUBLE_QUOTE: char = '"';
const SYNTAX_SINGLE_QUOTE: char = '\'';

/// A reader that moves through its input as values are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringReader<'a> {
    input: &'a str,
    cursor: usize,
}

impl<'a> StringReader<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, cursor: 0 }
    }

    #[must_use]
    pub fn input(&self) -> &'a str {
        self.input
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor. Fails when it would land outside the input or inside
    /// a multi-byte character.
    pub fn set_cursor(&mut self, cursor: usize) -> Result<(), ReaderError> {
        ArgumentReader::new(self.input, cursor)?;
        self.cursor = cursor;
        Ok(())
    }

    pub(crate) fn set_cursor_unchecked(&mut self, cursor: usize) {
        self.cursor = cursor;
    }

    #[must_use]
    pub fn remaining_length(&self) -> usize {
        self.immutable().remaining_length()
    }

    #[must_use]
    pub fn total_length(&self) -> usize {
        self.input.len()
    }

    #[must_use]
    pub fn parsed(&self) -> &'a str {
        self.immutable().parsed()
    }

    #[must_use]
    pub fn remaining(&self) -> &'a str {
        self.immutable().remaining()
    }

    #[must_use]
    pub fn can_read_n(&self, length: usize) -> bool {
        self.immutable().can_read_n(length)
    }

    #[must_use]
    pub fn can_read(&self) -> bool {
        self.can_read_n(1)
    }

    /// # Panics
    ///
    /// Panics at the end of input.
    #[must_use]
    pub fn peek(&self) -> char {
        self.immutable().peek()
    }

    /// # Panics
    ///
    /// Panics if `cursor + offset` is not inside the input.
    #[must_use]
    pub fn peek_at(&self, offset: usize) -> char {
        self.immutable().peek_at(offset)
    }

    pub fn peek_char(&self) -> Result<char, ReaderError> {
        self.immutable().peek_char()
    }

    /// Consume and return the next character.
    pub fn read(&mut self) -> Result<char, ReaderError> {
        let c = self.peek_char()?;
        self.cursor += c.len_utf8();
        Ok(c)
    }

    /// Step over the next character, if any.
    pub fn skip(&mut self) {
        if let Some(c) = self.remaining().chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn skip_whitespace(&mut self) {
        while self.can_read() && self.peek().is_whitespace() {
            self.skip();
        }
    }

    /// Snapshot the current position.
    #[must_use]
    pub fn immutable(&self) -> ArgumentReader<'a> {
        ArgumentReader::new_unchecked(self.input, self.cursor)
    }

    /// Rewind (or advance) to a snapshot taken from the same input.
    pub fn set_state(&mut self, state: &ArgumentReader<'a>) -> Result<(), ArgumentParseError> {
        if state.input() != self.input {
            return Err(self.error(ParseErrorKind::Custom(
                "The provided state is not for this reader".to_string(),
            )));
        }
        self.cursor = state.cursor();
        Ok(())
    }

    /// A parse error at the current cursor.
    #[must_use]
    pub fn error(&self, kind: ParseErrorKind) -> ArgumentParseError {
        ArgumentParseError::new(kind, self.input, self.cursor)
    }

    #[must_use]
    pub fn create_error(&self, message: impl Into<String>) -> ArgumentParseError {
        self.error(ParseErrorKind::Custom(message.into()))
    }

    #[must_use]
    pub const fn is_allowed_number(c: char) -> bool {
        c.is_ascii_digit() || c == '.' || c == '-'
    }

    #[must_use]
    pub const fn is_quoted_string_start(c: char) -> bool {
        c == SYNTAX_DOUBLE_QUOTE || c == SYNTAX_SINGLE_QUOTE
    }

    #[must_use]
    pub const fn is_allowed_in_unquoted_string(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+')
    }

    fn read_while(&mut self, allowed: impl Fn(char) -> bool) -> &'a str {
        let start = self.cursor;
        while self.can_read() && allowed(self.peek()) {
            self.skip();
        }
        &self.input[start..self.cursor]
    }

    /// Shared shape of every numeric read: take the number characters, then
    /// parse them, rewinding to the start of the token on failure.
    fn read_number<T: FromStr>(
        &mut self,
        expected: ParseErrorKind,
        invalid: fn(String) -> ParseErrorKind,
    ) -> ParseResult<T> {
        let start = self.cursor;
        let number = self.read_while(Self::is_allowed_number);
        if number.is_empty() {
            return Err(self.error(expected));
        }
        number.parse().map_err(|_| {
            self.cursor = start;
            self.error(invalid(number.to_string()))
        })
    }

    pub fn read_int(&mut self) -> ParseResult<i32> {
        self.read_number(ParseErrorKind::ExpectedInt, ParseErrorKind::InvalidInt)
    }

    pub fn read_long(&mut self) -> ParseResult<i64> {
        self.read_number(ParseErrorKind::ExpectedLong, ParseErrorKind::InvalidLong)
    }

    pub fn read_float(&mut self) -> ParseResult<f32> {
        self.read_number(ParseErrorKind::ExpectedFloat, ParseErrorKind::InvalidFloat)
    }

    pub fn read_double(&mut self) -> ParseResult<f64> {
        self.read_number(ParseErrorKind::ExpectedDouble, ParseErrorKind::InvalidDouble)
    }

    /// Read `[0-9A-Za-z_.+-]*`. May be empty.
    pub fn read_unquoted_string(&mut self) -> &'a str {
        self.read_while(Self::is_allowed_in_unquoted_string)
    }

    /// Read a `"` or `'` quoted string. Returns an empty string at end of
    /// input.
    pub fn read_quoted_string(&mut self) -> ParseResult<String> {
        if !self.can_read() {
            return Ok(String::new());
        }
        let next = self.peek();
        if !Self::is_quoted_string_start(next) {
            return Err(self.error(ParseErrorKind::ExpectedStartOfQuote));
        }
        self.skip();
        self.read_string_until(next)
    }

    /// Read up to and past `terminator`, resolving `\` escapes of the
    /// terminator and of the backslash itself.
    pub fn read_string_until(&mut self, terminator: char) -> ParseResult<String> {
        let mut result = String::new();
        let mut escaped = false;

        while self.can_read() {
            let c = self.peek();
            self.skip();
            if escaped {
                if c == terminator || c == SYNTAX_ESCAPE {
                    result.push(c);
                    escaped = false;
                } else {
                    self.cursor -= c.len_utf8();
                    return Err(self.error(ParseErrorKind::InvalidEscape(c)));
                }
            } else if c == SYNTAX_ESCAPE {
                escaped = true;
            } else if c == terminator {
                return Ok(result);
            } else {
                result.push(c);
            }
        }

        Err(self.error(ParseErrorKind::ExpectedEndOfQuote))
    }

    /// Read a quoted string if one starts here, otherwise an unquoted one.
    pub fn read_string(&mut self) -> ParseResult<String> {
        if !self.can_read() {
            return Ok(String::new());
        }
        let next = self.peek();
        if Self::is_quoted_string_start(next) {
            self.skip();
            return self.read_string_until(next);
        }
        Ok(self.read_unquoted_string().to_string())
    }

    /// Read a string without consuming it.
    pub fn peek_string(&mut self) -> ParseResult<String> {
        let start = self.cursor;
        let result = self.read_string();
        self.cursor = start;
        result
    }

    pub fn read_boolean(&mut self) -> ParseResult<bool> {
        let start = self.cursor;
        let value = self.read_string()?;
        if value.is_empty() {
            return Err(self.error(ParseErrorKind::ExpectedBool));
        }

        match value.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => {
                self.cursor = start;
                Err(self.error(ParseErrorKind::InvalidBool(value)))
            }
        }
    }

    /// Consume `c` or fail without moving.
    pub fn expect(&mut self, c: char) -> ParseResult<()> {
        if !self.can_read() || self.peek() != c {
            return Err(self.error(ParseErrorKind::ExpectedSymbol(c)));
        }
        self.skip();
        Ok(())
    }

    /// Read a `namespace:value` key, defaulting to `minecraft`.
    pub fn read_resource_key(&mut self) -> ParseResult<ResourceKey> {
        self.read_resource_key_or(MINECRAFT_NAMESPACE)
    }

    /// Read a key, using `default_namespace` when none is written.
    pub fn read_resource_key_or(&mut self, default_namespace: &str) -> ParseResult<ResourceKey> {
        let start = self.cursor;
        let raw = self.read_while(ResourceKey::is_key_char);
        ResourceKey::parse_with_default(raw, default_namespace).map_err(|err| {
            self.cursor = start;
            self.error(err.into())
        })
    }
}
