//! Bounded values: a current value with an inclusive range and a default.

use mc_key::ResourceKey;
use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd> Bounds<T> {
    #[must_use]
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        *value >= self.min && *value <= self.max
    }
}

/// A live, writable bounded value.
///
/// `set` does not clamp or validate; whether a value is acceptable is the
/// business of whatever writes it back to a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundedValue<T> {
    key: ResourceKey,
    bounds: Bounds<T>,
    default: T,
    current: T,
}

impl<T: Copy + PartialOrd> BoundedValue<T> {
    #[must_use]
    pub fn new(key: ResourceKey, bounds: Bounds<T>, default: T, current: T) -> Self {
        Self {
            key,
            bounds,
            default,
            current,
        }
    }

    #[must_use]
    pub fn key(&self) -> &ResourceKey {
        &self.key
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds<T> {
        self.bounds
    }

    #[must_use]
    pub fn min(&self) -> T {
        self.bounds.min
    }

    #[must_use]
    pub fn max(&self) -> T {
        self.bounds.max
    }

    #[must_use]
    pub fn default_value(&self) -> T {
        self.default
    }

    #[must_use]
    pub fn get(&self) -> T {
        self.current
    }

    pub fn set(&mut self, value: T) {
        self.current = value;
    }

    #[must_use]
    pub fn is_within_bounds(&self) -> bool {
        self.bounds.contains(&self.current)
    }

    /// A read-only copy of this value.
    #[must_use]
    pub fn as_immutable(&self) -> ImmutableBoundedValue<T> {
        ImmutableBoundedValue {
            key: self.key.clone(),
            bounds: self.bounds,
            default: self.default,
            current: self.current,
        }
    }
}

/// A read-only bounded value snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImmutableBoundedValue<T> {
    key: ResourceKey,
    bounds: Bounds<T>,
    default: T,
    current: T,
}

impl<T: Copy + PartialOrd> ImmutableBoundedValue<T> {
    #[must_use]
    pub fn key(&self) -> &ResourceKey {
        &self.key
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds<T> {
        self.bounds
    }

    #[must_use]
    pub fn min(&self) -> T {
        self.bounds.min
    }

    #[must_use]
    pub fn max(&self) -> T {
        self.bounds.max
    }

    #[must_use]
    pub fn default_value(&self) -> T {
        self.default
    }

    #[must_use]
    pub fn get(&self) -> T {
        self.current
    }

    /// The same value with a different current value.
    #[must_use]
    pub fn with(&self, value: T) -> Self {
        Self {
            current: value,
            ..self.clone()
        }
    }

    /// A writable copy of this snapshot.
    #[must_use]
    pub fn as_mutable(&self) -> BoundedValue<T> {
        BoundedValue::new(self.key.clone(), self.bounds, self.default, self.current)
    }
}
