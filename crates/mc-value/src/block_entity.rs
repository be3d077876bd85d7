//! Block entities that values are read from and written to.
//!
//! These carry only the state the value processors touch. Ticking, item
//! transfer and persistence live elsewhere.

use mc_key::ResourceKey;
use serde::{Deserialize, Serialize};

/// Cooldown a hopper sits at when it has no pending transfer.
pub const NO_COOLDOWN: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hopper {
    /// Ticks until the next item transfer; below 1 means none is pending.
    pub transfer_cooldown: i32,
    pub custom_name: Option<String>,
}

impl Default for Hopper {
    fn default() -> Self {
        Self {
            transfer_cooldown: NO_COOLDOWN,
            custom_name: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Furnace {
    pub burn_time: i32,
    pub cook_time: i32,
    pub cook_time_total: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chest {
    pub custom_name: Option<String>,
}

/// Any block entity a value can be offered to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockEntity {
    Hopper(Hopper),
    Furnace(Furnace),
    Chest(Chest),
}

impl BlockEntity {
    /// Registry key of this block entity's type.
    #[must_use]
    pub const fn type_key(&self) -> ResourceKey {
        match self {
            Self::Hopper(_) => ResourceKey::of_static("minecraft", "hopper"),
            Self::Furnace(_) => ResourceKey::of_static("minecraft", "furnace"),
            Self::Chest(_) => ResourceKey::of_static("minecraft", "chest"),
        }
    }
}

impl From<Hopper> for BlockEntity {
    fn from(hopper: Hopper) -> Self {
        Self::Hopper(hopper)
    }
}

impl From<Furnace> for BlockEntity {
    fn from(furnace: Furnace) -> Self {
        Self::Furnace(furnace)
    }
}

impl From<Chest> for BlockEntity {
    fn from(chest: Chest) -> Self {
        Self::Chest(chest)
    }
}

/// Result of asking a block entity for the part a processor works on.
#[derive(Debug, PartialEq, Eq)]
pub enum ContainerMatch<'a, T> {
    Supported(&'a mut T),
    /// The block entity is of another kind; processors treat this as a no-op.
    Unsupported,
}

impl<'a, T> ContainerMatch<'a, T> {
    #[must_use]
    pub fn into_option(self) -> Option<&'a mut T> {
        match self {
            Self::Supported(target) => Some(target),
            Self::Unsupported => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_hopper_has_no_cooldown() {
        assert_eq!(Hopper::default().transfer_cooldown, NO_COOLDOWN);
    }

    #[test]
    fn test_type_keys() {
        assert_eq!(
            BlockEntity::from(Hopper::default()).type_key().to_string(),
            "minecraft:hopper"
        );
        assert_eq!(
            BlockEntity::from(Chest::default()).type_key().to_string(),
            "minecraft:chest"
        );
    }
}
