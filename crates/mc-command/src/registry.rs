//! Keyed parser registry.
//!
//! Parsers are registered during start-up through a [`ParserRegistryBuilder`].
//! Building it produces an immutable [`ParserRegistry`]; after that lookups
//! are plain reads keyed by [`ResourceKey`]. One registry can be installed
//! process-wide with [`install_global`].

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::{Arc, OnceLock};

use mc_key::ResourceKey;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, info};

use crate::error::{ArgumentParseError, ParseResult};
use crate::grammar::{
    ArgumentType, BoolArgument, ClientParser, DoubleArgument, FloatArgument, IntegerArgument,
    LongArgument, StringArgument,
};
use crate::parser::{ClientNativeParser, ValueParser};
use crate::string_reader::StringReader;

/// Keys of the parsers in [`ParserRegistryBuilder::standard`].
pub mod keys {
    use mc_key::{ResourceKey, SPONGE_NAMESPACE};

    pub const BOOLEAN: ResourceKey = ResourceKey::of_static(SPONGE_NAMESPACE, "boolean");
    pub const INTEGER: ResourceKey = ResourceKey::of_static(SPONGE_NAMESPACE, "integer");
    pub const LONG: ResourceKey = ResourceKey::of_static(SPONGE_NAMESPACE, "long");
    pub const FLOAT: ResourceKey = ResourceKey::of_static(SPONGE_NAMESPACE, "float");
    pub const DOUBLE: ResourceKey = ResourceKey::of_static(SPONGE_NAMESPACE, "double");
    pub const STRING: ResourceKey = ResourceKey::of_static(SPONGE_NAMESPACE, "string");
    pub const WORD: ResourceKey = ResourceKey::of_static(SPONGE_NAMESPACE, "word");
    pub const REMAINING_JOINED_STRINGS: ResourceKey =
        ResourceKey::of_static(SPONGE_NAMESPACE, "remaining_joined_strings");
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("a parser is already registered for {0}")]
    Duplicate(ResourceKey),
    #[error("no parser registered for {0}")]
    UnknownParser(ResourceKey),
    #[error("parser {key} produces {actual}, not {expected}")]
    TypeMismatch {
        key: ResourceKey,
        expected: &'static str,
        actual: &'static str,
    },
    #[error(transparent)]
    Parse(#[from] ArgumentParseError),
    #[error("the global parser registry is already installed")]
    AlreadyInstalled,
}

/// Type-erased view of a keyed parser, as stored in the registry.
pub trait RegisteredParser: Send + Sync {
    fn key(&self) -> &ResourceKey;

    fn output_type_id(&self) -> TypeId;

    fn output_type_name(&self) -> &'static str;

    fn client_parser(&self) -> ClientParser;

    fn has_client_native_completions(&self) -> bool;

    fn parse_any(&self, reader: &mut StringReader<'_>) -> ParseResult<Box<dyn Any + Send>>;
}

impl<A: ArgumentType, T: Send + 'static> RegisteredParser for ClientNativeParser<A, T> {
    fn key(&self) -> &ResourceKey {
        ClientNativeParser::key(self)
    }

    fn output_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn output_type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn client_parser(&self) -> ClientParser {
        <Self as ValueParser<T>>::client_parser(self)
    }

    fn has_client_native_completions(&self) -> bool {
        <Self as ValueParser<T>>::has_client_native_completions(self)
    }

    fn parse_any(&self, reader: &mut StringReader<'_>) -> ParseResult<Box<dyn Any + Send>> {
        let value = <Self as ValueParser<T>>::parse(self, reader)?;
        Ok(Box::new(value))
    }
}

impl fmt::Debug for dyn RegisteredParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredParser")
            .field("key", self.key())
            .field("output", &self.output_type_name())
            .field("client_parser", &self.client_parser().identifier())
            .finish()
    }
}

/// Collects parsers during the registration phase.
#[derive(Default)]
pub struct ParserRegistryBuilder {
    parsers: FxHashMap<ResourceKey, Arc<dyn RegisteredParser>>,
}

impl ParserRegistryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder pre-loaded with the standard client-native parsers.
    pub fn standard() -> Result<Self, RegistryError> {
        let mut builder = Self::new();
        builder
            .register(ClientNativeParser::identity(keys::BOOLEAN, BoolArgument))?
            .register(ClientNativeParser::identity(keys::INTEGER, IntegerArgument::new()))?
            .register(ClientNativeParser::identity(keys::LONG, LongArgument::new()))?
            .register(ClientNativeParser::identity(keys::FLOAT, FloatArgument::new()))?
            .register(ClientNativeParser::identity(keys::DOUBLE, DoubleArgument::new()))?
            .register(ClientNativeParser::identity(keys::STRING, StringArgument::string()))?
            .register(ClientNativeParser::identity(keys::WORD, StringArgument::word()))?
            .register(ClientNativeParser::identity(
                keys::REMAINING_JOINED_STRINGS,
                StringArgument::greedy(),
            ))?;
        Ok(builder)
    }

    /// Register a keyed parser. Keys must be unique.
    pub fn register<A, T>(
        &mut self,
        parser: ClientNativeParser<A, T>,
    ) -> Result<&mut Self, RegistryError>
    where
        A: ArgumentType,
        T: Send + 'static,
    {
        let key = parser.key().clone();
        if self.parsers.contains_key(&key) {
            return Err(RegistryError::Duplicate(key));
        }

        debug!("Registered parser {} ({})", key, type_name::<T>());
        self.parsers.insert(key, Arc::new(parser));
        Ok(self)
    }

    /// Close the registration phase.
    #[must_use]
    pub fn build(self) -> ParserRegistry {
        debug!("Built parser registry with {} parsers", self.parsers.len());
        ParserRegistry {
            parsers: self.parsers,
        }
    }
}

impl fmt::Debug for ParserRegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserRegistryBuilder")
            .field("count", &self.parsers.len())
            .field("parsers", &self.parsers.values().collect::<Vec<_>>())
            .finish()
    }
}

/// An immutable set of keyed parsers.
pub struct ParserRegistry {
    parsers: FxHashMap<ResourceKey, Arc<dyn RegisteredParser>>,
}

impl ParserRegistry {
    #[must_use]
    pub fn get(&self, key: &ResourceKey) -> Option<&dyn RegisteredParser> {
        self.parsers.get(key).map(|parser| &**parser)
    }

    #[must_use]
    pub fn contains(&self, key: &ResourceKey) -> bool {
        self.parsers.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    /// Registered keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &ResourceKey> {
        self.parsers.keys()
    }

    /// Parse with the parser registered under `key`, which must produce a `T`.
    ///
    /// The output type is checked before any input is consumed.
    pub fn parse<T: 'static>(
        &self,
        key: &ResourceKey,
        reader: &mut StringReader<'_>,
    ) -> Result<T, RegistryError> {
        let parser = self
            .get(key)
            .ok_or_else(|| RegistryError::UnknownParser(key.clone()))?;

        let mismatch = || RegistryError::TypeMismatch {
            key: key.clone(),
            expected: type_name::<T>(),
            actual: parser.output_type_name(),
        };

        if parser.output_type_id() != TypeId::of::<T>() {
            return Err(mismatch());
        }

        let value = parser.parse_any(reader)?;
        value.downcast::<T>().map(|boxed| *boxed).map_err(|_| mismatch())
    }
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("count", &self.len())
            .field("parsers", &self.parsers.values().collect::<Vec<_>>())
            .finish()
    }
}

static GLOBAL_REGISTRY: OnceLock<ParserRegistry> = OnceLock::new();

/// Install the process-wide registry. Only the first call succeeds.
pub fn install_global(registry: ParserRegistry) -> Result<&'static ParserRegistry, RegistryError> {
    let count = registry.len();
    GLOBAL_REGISTRY
        .set(registry)
        .map_err(|_| RegistryError::AlreadyInstalled)?;
    info!("Installed global parser registry with {} parsers", count);
    global().ok_or(RegistryError::AlreadyInstalled)
}

/// The process-wide registry, once installed.
#[must_use]
pub fn global() -> Option<&'static ParserRegistry> {
    GLOBAL_REGISTRY.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> ParserRegistry {
        ParserRegistryBuilder::standard().unwrap().build()
    }

    #[test]
    fn test_standard_keys() {
        let registry = standard();
        let mut keys: Vec<String> = registry.keys().map(ToString::to_string).collect();
        keys.sort();
        assert_eq!(
            keys,
            [
                "sponge:boolean",
                "sponge:double",
                "sponge:float",
                "sponge:integer",
                "sponge:long",
                "sponge:remaining_joined_strings",
                "sponge:string",
                "sponge:word",
            ]
        );
        assert!(
            registry
                .keys()
                .all(|key| registry.get(key).unwrap().has_client_native_completions())
        );
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut builder = ParserRegistryBuilder::new();
        builder
            .register(ClientNativeParser::identity(keys::INTEGER, IntegerArgument::new()))
            .unwrap();
        let err = builder
            .register(ClientNativeParser::identity(keys::INTEGER, LongArgument::new()))
            .unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate(key) if key == keys::INTEGER));

        let debug = format!("{builder:?}");
        assert!(debug.starts_with("ParserRegistryBuilder { count: 1"));
        assert!(debug.contains("sponge:integer"));
    }

    #[test]
    fn test_typed_parse() {
        let registry = standard();
        let mut reader = StringReader::new("17 true rest of line");

        assert_eq!(registry.parse::<i32>(&keys::INTEGER, &mut reader).unwrap(), 17);
        reader.skip();
        assert!(registry.parse::<bool>(&keys::BOOLEAN, &mut reader).unwrap());
        reader.skip();
        assert_eq!(
            registry
                .parse::<String>(&keys::REMAINING_JOINED_STRINGS, &mut reader)
                .unwrap(),
            "rest of line"
        );
    }

    #[test]
    fn test_type_mismatch_consumes_nothing() {
        let registry = standard();
        let mut reader = StringReader::new("17");
        let err = registry.parse::<i64>(&keys::INTEGER, &mut reader).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::TypeMismatch { expected: "i64", actual: "i32", .. }
        ));
        assert_eq!(reader.cursor(), 0);
    }

    #[test]
    fn test_unknown_and_parse_errors() {
        let registry = standard();
        let mut reader = StringReader::new("abc");

        let missing = ResourceKey::sponge("vector3d").unwrap();
        let err = registry.parse::<i32>(&missing, &mut reader).unwrap_err();
        assert_eq!(err.to_string(), "no parser registered for sponge:vector3d");

        let err = registry.parse::<i32>(&keys::INTEGER, &mut reader).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"Expected integer at position 0: <--[HERE]");
    }

    #[test]
    fn test_converting_parser_registered() {
        let key = ResourceKey::sponge("ticks").unwrap();
        let mut builder = ParserRegistryBuilder::new();
        builder
            .register(ClientNativeParser::converting(
                key.clone(),
                IntegerArgument::at_least(0),
                |n: i32| std::time::Duration::from_millis(u64::from(n.unsigned_abs()) * 50),
            ))
            .unwrap();
        let registry = builder.build();

        let mut reader = StringReader::new("20");
        let duration = registry
            .parse::<std::time::Duration>(&key, &mut reader)
            .unwrap();
        assert_eq!(duration.as_secs(), 1);
    }

    #[test]
    fn test_global_installs_once() {
        let installed = install_global(standard()).unwrap();
        assert!(installed.contains(&keys::WORD));
        assert!(global().is_some());
        assert!(matches!(
            install_global(standard()),
            Err(RegistryError::AlreadyInstalled)
        ));
    }
}
