//! Grammar types: the syntax of one argument.
//!
//! A grammar type does all the text scanning for an argument and knows how it
//! is announced to the client in the command tree. Parser bindings in
//! [`crate::parser`] only reshape what a grammar produces.

use bytes::{BufMut, BytesMut};

use crate::error::{ParseErrorKind, ParseResult};
use crate::string_reader::StringReader;
use crate::tree::put_varint;

/// Describes one argument syntax.
pub trait ArgumentType: Send + Sync + 'static {
    type Output;

    /// Consume this argument from `reader`.
    fn parse(&self, reader: &mut StringReader<'_>) -> ParseResult<Self::Output>;

    /// How the client should parse (and complete) this argument itself.
    fn client_parser(&self) -> ClientParser;

    fn examples(&self) -> &'static [&'static str] {
        &[]
    }
}

/// How a string argument consumes input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringKind {
    /// `[0-9A-Za-z_.+-]*`
    SingleWord,
    /// A quoted string, or a single word.
    QuotablePhrase,
    /// Everything up to the end of input.
    GreedyPhrase,
}

impl StringKind {
    const fn protocol_id(self) -> i32 {
        match self {
            Self::SingleWord => 0,
            Self::QuotablePhrase => 1,
            Self::GreedyPhrase => 2,
        }
    }
}

/// A parser the client knows natively, with its properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClientParser {
    Bool,
    Float { min: Option<f32>, max: Option<f32> },
    Double { min: Option<f64>, max: Option<f64> },
    Integer { min: Option<i32>, max: Option<i32> },
    Long { min: Option<i64>, max: Option<i64> },
    String(StringKind),
}

/// Numeric property flag: minimum present.
const FLAG_MIN: u8 = 0x01;
/// Numeric property flag: maximum present.
const FLAG_MAX: u8 = 0x02;

fn bound_flags<T>(min: Option<T>, max: Option<T>) -> u8 {
    let mut flags = 0;
    if min.is_some() {
        flags |= FLAG_MIN;
    }
    if max.is_some() {
        flags |= FLAG_MAX;
    }
    flags
}

impl ClientParser {
    /// Index in the `command_argument_type` registry.
    #[must_use]
    pub const fn id(&self) -> i32 {
        match self {
            Self::Bool => 0,
            Self::Float { .. } => 1,
            Self::Double { .. } => 2,
            Self::Integer { .. } => 3,
            Self::Long { .. } => 4,
            Self::String(_) => 5,
        }
    }

    #[must_use]
    pub const fn identifier(&self) -> &'static str {
        match self {
            Self::Bool => "brigadier:bool",
            Self::Float { .. } => "brigadier:float",
            Self::Double { .. } => "brigadier:double",
            Self::Integer { .. } => "brigadier:integer",
            Self::Long { .. } => "brigadier:long",
            Self::String(_) => "brigadier:string",
        }
    }

    /// Write the parser-specific properties that follow the parser id.
    pub fn write_properties(&self, data: &mut BytesMut) {
        match *self {
            Self::Bool => {}
            Self::Float { min, max } => {
                data.put_u8(bound_flags(min, max));
                min.into_iter().chain(max).for_each(|v| data.put_f32(v));
            }
            Self::Double { min, max } => {
                data.put_u8(bound_flags(min, max));
                min.into_iter().chain(max).for_each(|v| data.put_f64(v));
            }
            Self::Integer { min, max } => {
                data.put_u8(bound_flags(min, max));
                min.into_iter().chain(max).for_each(|v| data.put_i32(v));
            }
            Self::Long { min, max } => {
                data.put_u8(bound_flags(min, max));
                min.into_iter().chain(max).for_each(|v| data.put_i64(v));
            }
            Self::String(kind) => put_varint(data, kind.protocol_id()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoolArgument;

impl ArgumentType for BoolArgument {
    type Output = bool;

    fn parse(&self, reader: &mut StringReader<'_>) -> ParseResult<bool> {
        reader.read_boolean()
    }

    fn client_parser(&self) -> ClientParser {
        ClientParser::Bool
    }

    fn examples(&self) -> &'static [&'static str] {
        &["true", "false"]
    }
}

/// Numeric grammars share one shape: read, then check inclusive bounds with
/// the cursor reset to the start of the number on failure.
macro_rules! bounded_number_argument {
    (
        $(#[$meta:meta])*
        $name:ident, $ty:ty, $read:ident, $client:ident, $too_low:ident, $too_high:ident,
        $examples:expr
    ) => {
        $(#[$meta])*
        #[allow(clippy::derive_partial_eq_without_eq)]
        #[derive(Debug, Clone, Copy, Default, PartialEq)]
        pub struct $name {
            min: Option<$ty>,
            max: Option<$ty>,
        }

        impl $name {
            #[must_use]
            pub const fn new() -> Self {
                Self { min: None, max: None }
            }

            #[must_use]
            pub const fn at_least(min: $ty) -> Self {
                Self { min: Some(min), max: None }
            }

            #[must_use]
            pub const fn between(min: $ty, max: $ty) -> Self {
                Self { min: Some(min), max: Some(max) }
            }

            #[must_use]
            pub const fn min(&self) -> Option<$ty> {
                self.min
            }

            #[must_use]
            pub const fn max(&self) -> Option<$ty> {
                self.max
            }
        }

        impl ArgumentType for $name {
            type Output = $ty;

            fn parse(&self, reader: &mut StringReader<'_>) -> ParseResult<$ty> {
                let start = reader.cursor();
                let found = reader.$read()?;

                if let Some(min) = self.min {
                    if found < min {
                        reader.set_cursor_unchecked(start);
                        return Err(reader.error(ParseErrorKind::$too_low { min, found }));
                    }
                }
                if let Some(max) = self.max {
                    if found > max {
                        reader.set_cursor_unchecked(start);
                        return Err(reader.error(ParseErrorKind::$too_high { max, found }));
                    }
                }

                Ok(found)
            }

            fn client_parser(&self) -> ClientParser {
                ClientParser::$client {
                    min: self.min,
                    max: self.max,
                }
            }

            fn examples(&self) -> &'static [&'static str] {
                $examples
            }
        }
    };
}

bounded_number_argument!(
    /// A 32-bit integer, optionally bounded.
    IntegerArgument, i32, read_int, Integer, IntegerTooLow, IntegerTooHigh,
    &["0", "123", "-123"]
);

bounded_number_argument!(
    /// A 64-bit integer, optionally bounded.
    LongArgument, i64, read_long, Long, LongTooLow, LongTooHigh,
    &["0", "123", "-123"]
);

bounded_number_argument!(
    /// A 32-bit float, optionally bounded.
    FloatArgument, f32, read_float, Float, FloatTooLow, FloatTooHigh,
    &["0", "1.2", ".5", "-1", "-.5", "-1234.56"]
);

bounded_number_argument!(
    /// A 64-bit float, optionally bounded.
    DoubleArgument, f64, read_double, Double, DoubleTooLow, DoubleTooHigh,
    &["0", "1.2", ".5", "-1", "-.5", "-1234.56"]
);

/// A string argument in one of the three [`StringKind`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringArgument {
    kind: StringKind,
}

impl StringArgument {
    #[must_use]
    pub const fn word() -> Self {
        Self {
            kind: StringKind::SingleWord,
        }
    }

    #[must_use]
    pub const fn string() -> Self {
        Self {
            kind: StringKind::QuotablePhrase,
        }
    }

    #[must_use]
    pub const fn greedy() -> Self {
        Self {
            kind: StringKind::GreedyPhrase,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> StringKind {
        self.kind
    }
}

impl ArgumentType for StringArgument {
    type Output = String;

    fn parse(&self, reader: &mut StringReader<'_>) -> ParseResult<String> {
        match self.kind {
            StringKind::SingleWord => Ok(reader.read_unquoted_string().to_string()),
            StringKind::QuotablePhrase => reader.read_string(),
            StringKind::GreedyPhrase => {
                let text = reader.remaining().to_string();
                reader.set_cursor_unchecked(reader.total_length());
                Ok(text)
            }
        }
    }

    fn client_parser(&self) -> ClientParser {
        ClientParser::String(self.kind)
    }

    fn examples(&self) -> &'static [&'static str] {
        match self.kind {
            StringKind::SingleWord => &["word", "words_with_underscores"],
            StringKind::QuotablePhrase => &["\"quoted phrase\"", "word", "\"\""],
            StringKind::GreedyPhrase => &["word", "words with spaces", "\"and symbols\""],
        }
    }
}
