//! Parser bindings: a grammar type plus a conversion of what it produces.
//!
//! Bindings never scan text themselves. Grammar errors pass through untouched,
//! and conversions are total functions, so a binding adds no failure modes of
//! its own.

use std::fmt;
use std::sync::Arc;

use mc_key::ResourceKey;

use crate::error::ParseResult;
use crate::grammar::{ArgumentType, ClientParser};
use crate::string_reader::StringReader;

/// Something that parses a `T` out of command input.
pub trait ValueParser<T>: Send + Sync {
    fn parse(&self, reader: &mut StringReader<'_>) -> ParseResult<T>;

    /// The parser announced to the client for this argument.
    fn client_parser(&self) -> ClientParser;

    /// Whether the client completes this argument on its own, without asking
    /// the server for suggestions.
    fn has_client_native_completions(&self) -> bool {
        false
    }
}

type Converter<S, T> = Arc<dyn Fn(S) -> T + Send + Sync>;

/// A grammar with a conversion applied to its output. Completions for it are
/// computed by the server.
pub struct StandardParser<A: ArgumentType, T> {
    grammar: A,
    converter: Converter<A::Output, T>,
}

impl<A: ArgumentType> StandardParser<A, A::Output> {
    /// Binding that returns the grammar's output unchanged.
    #[must_use]
    pub fn identity(grammar: A) -> Self {
        Self::converting(grammar, |value| value)
    }
}

impl<A: ArgumentType, T> StandardParser<A, T> {
    #[must_use]
    pub fn converting(
        grammar: A,
        converter: impl Fn(A::Output) -> T + Send + Sync + 'static,
    ) -> Self {
        Self {
            grammar,
            converter: Arc::new(converter),
        }
    }

    #[must_use]
    pub fn grammar(&self) -> &A {
        &self.grammar
    }
}

impl<A: ArgumentType, T> ValueParser<T> for StandardParser<A, T> {
    fn parse(&self, reader: &mut StringReader<'_>) -> ParseResult<T> {
        let value = self.grammar.parse(reader)?;
        Ok((self.converter)(value))
    }

    fn client_parser(&self) -> ClientParser {
        self.grammar.client_parser()
    }
}

impl<A: ArgumentType + Clone, T> Clone for StandardParser<A, T> {
    fn clone(&self) -> Self {
        Self {
            grammar: self.grammar.clone(),
            converter: Arc::clone(&self.converter),
        }
    }
}

impl<A: ArgumentType + fmt::Debug, T> fmt::Debug for StandardParser<A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardParser")
            .field("grammar", &self.grammar)
            .finish_non_exhaustive()
    }
}

/// A keyed binding whose grammar the client parses and completes natively.
pub struct ClientNativeParser<A: ArgumentType, T> {
    key: ResourceKey,
    inner: StandardParser<A, T>,
}

impl<A: ArgumentType> ClientNativeParser<A, A::Output> {
    #[must_use]
    pub fn identity(key: ResourceKey, grammar: A) -> Self {
        Self {
            key,
            inner: StandardParser::identity(grammar),
        }
    }
}

impl<A: ArgumentType, T> ClientNativeParser<A, T> {
    #[must_use]
    pub fn converting(
        key: ResourceKey,
        grammar: A,
        converter: impl Fn(A::Output) -> T + Send + Sync + 'static,
    ) -> Self {
        Self {
            key,
            inner: StandardParser::converting(grammar, converter),
        }
    }

    #[must_use]
    pub fn key(&self) -> &ResourceKey {
        &self.key
    }

    #[must_use]
    pub fn grammar(&self) -> &A {
        self.inner.grammar()
    }
}

impl<A: ArgumentType, T> ValueParser<T> for ClientNativeParser<A, T> {
    fn parse(&self, reader: &mut StringReader<'_>) -> ParseResult<T> {
        self.inner.parse(reader)
    }

    fn client_parser(&self) -> ClientParser {
        self.inner.client_parser()
    }

    fn has_client_native_completions(&self) -> bool {
        true
    }
}

impl<A: ArgumentType + Clone, T> Clone for ClientNativeParser<A, T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<A: ArgumentType + fmt::Debug, T> fmt::Debug for ClientNativeParser<A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientNativeParser")
            .field("key", &self.key)
            .field("grammar", self.inner.grammar())
            .finish_non_exhaustive()
    }
}
