//! Keyed, bounded values on block entities.
//!
//! # Key Concepts
//!
//! - **Bounded value**: a current value with an inclusive range and a default,
//!   either live ([`BoundedValue`]) or a snapshot ([`ImmutableBoundedValue`])
//! - **Transaction result**: what a data change did ([`DataTransactionResult`])
//! - **Value processor**: reads and writes one keyed value on the block
//!   entities that carry it ([`ValueProcessor`])
//!
//! # Example
//!
//! ```
//! use mc_value::{BlockEntity, CooldownProcessor, Hopper, ValueProcessor};
//!
//! let processor = CooldownProcessor::new();
//! let mut hopper = BlockEntity::from(Hopper::default());
//!
//! assert_eq!(processor.get_value(&hopper), None);
//! assert!(processor.offer(&mut hopper, 8).is_successful());
//! assert_eq!(processor.get_value(&hopper), Some(8));
//!
//! let removed = processor.remove_from(&mut hopper);
//! assert_eq!(removed.replaced_data()[0].get(), 8);
//! assert_eq!(processor.get_value(&hopper), None);
//! ```

mod block_entity;
mod processor;
mod transaction;
mod value;

pub use block_entity::{BlockEntity, Chest, ContainerMatch, Furnace, Hopper, NO_COOLDOWN};
pub use processor::{
    BoundedIntField, BoundedIntProcessor, CooldownProcessor, TransferCooldown, ValueProcessor,
};
pub use transaction::{DataTransactionResult, ResultKind};
pub use value::{BoundedValue, Bounds, ImmutableBoundedValue};
