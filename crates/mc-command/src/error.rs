//! Reader and argument parse errors.

// Context slices are clamped to UTF-8 boundaries before slicing.
#![allow(clippy::string_slice)]

use std::fmt;

use mc_key::KeyError;
use thiserror::Error;

/// Number of bytes of input shown before the cursor in rendered errors.
const CONTEXT_AMOUNT: usize = 10;

/// Hard failures of the reader itself, as opposed to malformed input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReaderError {
    #[error("Cannot read past the end of a string!")]
    ReadPastEnd,
    #[error("cursor {cursor} is outside of input of length {length}")]
    CursorOutOfBounds { cursor: usize, length: usize },
    #[error("cursor {0} is not on a character boundary")]
    NotCharBoundary(usize),
}

/// What went wrong while parsing an argument.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    #[error("Expected integer")]
    ExpectedInt,
    #[error("Invalid integer '{0}'")]
    InvalidInt(String),
    #[error("Expected long")]
    ExpectedLong,
    #[error("Invalid long '{0}'")]
    InvalidLong(String),
    #[error("Expected float")]
    ExpectedFloat,
    #[error("Invalid float '{0}'")]
    InvalidFloat(String),
    #[error("Expected double")]
    ExpectedDouble,
    #[error("Invalid double '{0}'")]
    InvalidDouble(String),
    #[error("Expected bool")]
    ExpectedBool,
    #[error("Invalid bool, expected true or false but found '{0}'")]
    InvalidBool(String),
    #[error("Expected quote to start a string")]
    ExpectedStartOfQuote,
    #[error("Unclosed quoted string")]
    ExpectedEndOfQuote,
    #[error("Invalid escape sequence '{0}' in quoted string")]
    InvalidEscape(char),
    #[error("Expected '{0}'")]
    ExpectedSymbol(char),
    #[error("Integer must not be less than {min}, found {found}")]
    IntegerTooLow { min: i32, found: i32 },
    #[error("Integer must not be more than {max}, found {found}")]
    IntegerTooHigh { max: i32, found: i32 },
    #[error("Long must not be less than {min}, found {found}")]
    LongTooLow { min: i64, found: i64 },
    #[error("Long must not be more than {max}, found {found}")]
    LongTooHigh { max: i64, found: i64 },
    #[error("Float must not be less than {min}, found {found}")]
    FloatTooLow { min: f32, found: f32 },
    #[error("Float must not be more than {max}, found {found}")]
    FloatTooHigh { max: f32, found: f32 },
    #[error("Double must not be less than {min}, found {found}")]
    DoubleTooLow { min: f64, found: f64 },
    #[error("Double must not be more than {max}, found {found}")]
    DoubleTooHigh { max: f64, found: f64 },
    #[error("{0}")]
    InvalidKey(#[from] KeyError),
    #[error("{0}")]
    Custom(String),
}

/// A structured parse failure: what failed, on which input, and where.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentParseError {
    kind: ParseErrorKind,
    input: String,
    cursor: usize,
}

impl ArgumentParseError {
    #[must_use]
    pub fn new(kind: ParseErrorKind, input: impl Into<String>, cursor: usize) -> Self {
        Self {
            kind,
            input: input.into(),
            cursor,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The input leading up to the cursor, marked with `<--[HERE]`.
    #[must_use]
    pub fn context(&self) -> String {
        let cursor = self.cursor.min(self.input.len());
        let mut start = cursor.saturating_sub(CONTEXT_AMOUNT);
        while !self.input.is_char_boundary(start) {
            start += 1;
        }

        let mut context = String::new();
        if cursor > CONTEXT_AMOUNT {
            context.push_str("...");
        }
        context.push_str(&self.input[start..cursor]);
        context.push_str("<--[HERE]");
        context
    }
}

impl fmt::Display for ArgumentParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at position {}: {}",
            self.kind,
            self.cursor,
            self.context()
        )
    }
}

impl std::error::Error for ArgumentParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ParseErrorKind::InvalidKey(err) => Some(err),
            _ => None,
        }
    }
}

pub type ParseResult<T> = Result<T, ArgumentParseError>;
