//! Namespaced resource keys.
//!
//! A [`ResourceKey`] is the `namespace:value` identifier Minecraft uses for
//! registry entries. Command parsers and data keys are both identified this way.
//!
//! ```
//! use mc_key::ResourceKey;
//!
//! let key: ResourceKey = "sponge:cooldown".parse().unwrap();
//! assert_eq!(key.namespace(), "sponge");
//! assert_eq!(key.value(), "cooldown");
//!
//! // A bare value lands in the `minecraft` namespace.
//! let stone: ResourceKey = "stone".parse().unwrap();
//! assert_eq!(stone.to_string(), "minecraft:stone");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Namespace used when a key is written without one.
pub const MINECRAFT_NAMESPACE: &str = "minecraft";

/// Namespace of keys registered by the plugin layer itself.
pub const SPONGE_NAMESPACE: &str = "sponge";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("Non [a-z0-9_.-] character in namespace of location: {0}")]
    InvalidNamespace(String),
    #[error("Non [a-z0-9/._-] character in path of location: {0}")]
    InvalidValue(String),
}

/// A `namespace:value` identifier.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceKey {
    namespace: Cow<'static, str>,
    value: Cow<'static, str>,
}

impl ResourceKey {
    /// Build a key from static parts.
    ///
    /// # Panics
    ///
    /// Panics if either part contains a disallowed character. In a `const`
    /// context that is a compile error.
    #[must_use]
    pub const fn of_static(namespace: &'static str, value: &'static str) -> Self {
        assert!(valid_namespace(namespace), "invalid namespace");
        assert!(valid_value(value), "invalid value");
        Self {
            namespace: Cow::Borrowed(namespace),
            value: Cow::Borrowed(value),
        }
    }

    /// Build a key, validating both parts.
    pub fn new(
        namespace: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, KeyError> {
        let namespace = namespace.into();
        let value = value.into();

        if !valid_namespace(&namespace) {
            return Err(KeyError::InvalidNamespace(format!("{namespace}:{value}")));
        }
        if !valid_value(&value) {
            return Err(KeyError::InvalidValue(format!("{namespace}:{value}")));
        }

        Ok(Self {
            namespace: Cow::Owned(namespace),
            value: Cow::Owned(value),
        })
    }

    /// Key in the `minecraft` namespace.
    pub fn minecraft(value: impl Into<String>) -> Result<Self, KeyError> {
        Self::new(MINECRAFT_NAMESPACE, value)
    }

    /// Key in the `sponge` namespace.
    pub fn sponge(value: impl Into<String>) -> Result<Self, KeyError> {
        Self::new(SPONGE_NAMESPACE, value)
    }

    /// Parse `namespace:value`, falling back to `default_namespace` when the
    /// input has no namespace (or an empty one, as in `:value`).
    pub fn parse_with_default(input: &str, default_namespace: &str) -> Result<Self, KeyError> {
        match input.split_once(':') {
            Some(("", value)) => Self::new(default_namespace, value),
            Some((namespace, value)) => Self::new(namespace, value),
            None => Self::new(default_namespace, input),
        }
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether `c` may appear in the namespace part.
    #[must_use]
    pub const fn is_namespace_char(c: char) -> bool {
        matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.')
    }

    /// Whether `c` may appear in the value part.
    #[must_use]
    pub const fn is_value_char(c: char) -> bool {
        Self::is_namespace_char(c) || c == '/'
    }

    /// Whether `c` may appear anywhere in a formatted key.
    #[must_use]
    pub const fn is_key_char(c: char) -> bool {
        Self::is_value_char(c) || c == ':'
    }
}

const fn valid_namespace(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !ResourceKey::is_namespace_char(bytes[i] as char) {
            return false;
        }
        i += 1;
    }
    true
}

const fn valid_value(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !ResourceKey::is_value_char(bytes[i] as char) {
            return false;
        }
        i += 1;
    }
    true
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.value)
    }
}

impl fmt::Debug for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceKey({self})")
    }
}

impl FromStr for ResourceKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_default(s, MINECRAFT_NAMESPACE)
    }
}

impl Serialize for ResourceKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ResourceKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOLDOWN: ResourceKey = ResourceKey::of_static("sponge", "cooldown");

    #[test]
    fn test_parse_namespaced() {
        let key: ResourceKey = "sponge:cooldown".parse().unwrap();
        assert_eq!(key, COOLDOWN);
        assert_eq!(key.to_string(), "sponge:cooldown");
    }

    #[test]
    fn test_parse_default_namespace() {
        let key: ResourceKey = "hopper".parse().unwrap();
        assert_eq!(key.namespace(), MINECRAFT_NAMESPACE);

        let key: ResourceKey = ":hopper".parse().unwrap();
        assert_eq!(key.namespace(), MINECRAFT_NAMESPACE);
        assert_eq!(key.value(), "hopper");

        let key = ResourceKey::parse_with_default("word", SPONGE_NAMESPACE).unwrap();
        assert_eq!(key.to_string(), "sponge:word");
    }

    #[test]
    fn test_value_allows_slash() {
        let key: ResourceKey = "minecraft:block/hopper".parse().unwrap();
        assert_eq!(key.value(), "block/hopper");
    }

    #[test]
    fn test_rejects_invalid_characters() {
        assert_eq!(
            "Sponge:cooldown".parse::<ResourceKey>(),
            Err(KeyError::InvalidNamespace("Sponge:cooldown".to_string()))
        );
        assert_eq!(
            "sponge:cool down".parse::<ResourceKey>(),
            Err(KeyError::InvalidValue("sponge:cool down".to_string()))
        );
        // Only the first colon separates the namespace.
        assert!("a:b:c".parse::<ResourceKey>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&COOLDOWN).unwrap();
        assert_eq!(json, "\"sponge:cooldown\"");

        let back: ResourceKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, COOLDOWN);

        assert!(serde_json::from_str::<ResourceKey>("\"Bad:key\"").is_err());
    }
}
