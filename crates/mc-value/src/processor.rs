//! Value processors: read and write one keyed value on block entities.
//!
//! A [`BoundedIntField`] names one integer field of one kind of block entity,
//! its bounds and its default. [`BoundedIntProcessor`] turns that description
//! into the get/offer/remove operations of a [`ValueProcessor`]. Any value
//! below the minimum reads as "not set".

use std::fmt;
use std::marker::PhantomData;

use mc_key::ResourceKey;
use tracing::{debug, trace};

use crate::block_entity::{BlockEntity, ContainerMatch, Hopper, NO_COOLDOWN};
use crate::transaction::DataTransactionResult;
use crate::value::{BoundedValue, Bounds, ImmutableBoundedValue};

/// Reads and writes one keyed value on block entities.
pub trait ValueProcessor {
    type Value;
    type Snapshot;

    fn key(&self) -> ResourceKey;

    /// Whether `container` is of a kind this processor handles.
    fn supports(&self, container: &BlockEntity) -> bool;

    /// The value on `container`, or `None` if unset or unsupported.
    fn get_value(&self, container: &BlockEntity) -> Option<Self::Value>;

    /// Try to write `value` to `container`.
    fn offer(
        &self,
        container: &mut BlockEntity,
        value: Self::Value,
    ) -> DataTransactionResult<Self::Snapshot>;

    /// Unset the value, reporting what was removed.
    fn remove_from(&self, container: &mut BlockEntity) -> DataTransactionResult<Self::Snapshot>;
}

/// One bounded integer field on one kind of block entity.
pub trait BoundedIntField {
    /// The block entity type holding the field.
    type Target;

    const KEY: ResourceKey;
    const BOUNDS: Bounds<i32>;
    const DEFAULT: i32;
    /// Written on removal. Must be below `BOUNDS.min`.
    const ABSENT: i32;

    fn select(container: &mut BlockEntity) -> ContainerMatch<'_, Self::Target>;

    fn select_ref(container: &BlockEntity) -> Option<&Self::Target>;

    fn read(target: &Self::Target) -> i32;

    fn write(target: &mut Self::Target, value: i32);
}

/// The hopper's transfer cooldown, in ticks.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransferCooldown;

impl BoundedIntField for TransferCooldown {
    type Target = Hopper;

    const KEY: ResourceKey = ResourceKey::of_static("sponge", "cooldown");
    const BOUNDS: Bounds<i32> = Bounds::new(1, i32::MAX);
    const DEFAULT: i32 = 8;
    const ABSENT: i32 = NO_COOLDOWN;

    fn select(container: &mut BlockEntity) -> ContainerMatch<'_, Hopper> {
        match container {
            BlockEntity::Hopper(hopper) => ContainerMatch::Supported(hopper),
            _ => ContainerMatch::Unsupported,
        }
    }

    fn select_ref(container: &BlockEntity) -> Option<&Hopper> {
        match container {
            BlockEntity::Hopper(hopper) => Some(hopper),
            _ => None,
        }
    }

    fn read(hopper: &Hopper) -> i32 {
        hopper.transfer_cooldown
    }

    fn write(hopper: &mut Hopper, value: i32) {
        hopper.transfer_cooldown = value;
    }
}

/// Processor for a [`BoundedIntField`].
pub struct BoundedIntProcessor<F> {
    _field: PhantomData<fn() -> F>,
}

/// Processor for the hopper's `sponge:cooldown` value.
pub type CooldownProcessor = BoundedIntProcessor<TransferCooldown>;

impl<F> Default for BoundedIntProcessor<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> Clone for BoundedIntProcessor<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for BoundedIntProcessor<F> {}

impl<F: BoundedIntField> fmt::Debug for BoundedIntProcessor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedIntProcessor")
            .field("key", &F::KEY)
            .field("bounds", &F::BOUNDS)
            .field("default", &F::DEFAULT)
            .finish()
    }
}

impl<F> BoundedIntProcessor<F> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _field: PhantomData,
        }
    }
}

impl<F: BoundedIntField> BoundedIntProcessor<F> {
    /// A live value with this field's bounds and default.
    #[must_use]
    pub fn construct_value(&self, value: i32) -> BoundedValue<i32> {
        BoundedValue::new(F::KEY, F::BOUNDS, F::DEFAULT, value)
    }

    #[must_use]
    pub fn construct_immutable_value(&self, value: i32) -> ImmutableBoundedValue<i32> {
        self.construct_value(value).as_immutable()
    }

    /// Write `value` unless it is below the minimum. Returns whether it was
    /// written.
    pub fn set(&self, target: &mut F::Target, value: i32) -> bool {
        if value < F::BOUNDS.min {
            trace!("Rejected {} = {} (minimum {})", F::KEY, value, F::BOUNDS.min);
            return false;
        }
        F::write(target, value);
        true
    }

    /// The field's value, or `None` when it is below the minimum.
    #[must_use]
    pub fn get_val(&self, target: &F::Target) -> Option<i32> {
        let value = F::read(target);
        (value >= F::BOUNDS.min).then_some(value)
    }

    /// The value on `container` as a live bounded value.
    #[must_use]
    pub fn get_api_value(&self, container: &BlockEntity) -> Option<BoundedValue<i32>> {
        self.get_value(container).map(|value| self.construct_value(value))
    }
}

impl<F: BoundedIntField> ValueProcessor for BoundedIntProcessor<F> {
    type Value = i32;
    type Snapshot = ImmutableBoundedValue<i32>;

    fn key(&self) -> ResourceKey {
        F::KEY
    }

    fn supports(&self, container: &BlockEntity) -> bool {
        F::select_ref(container).is_some()
    }

    fn get_value(&self, container: &BlockEntity) -> Option<i32> {
        F::select_ref(container).and_then(|target| self.get_val(target))
    }

    fn offer(
        &self,
        container: &mut BlockEntity,
        value: i32,
    ) -> DataTransactionResult<ImmutableBoundedValue<i32>> {
        let ContainerMatch::Supported(target) = F::select(container) else {
            return DataTransactionResult::fail_no_data();
        };

        let new_value = self.construct_immutable_value(value);
        let old = self.get_val(target);

        if !self.set(target, value) {
            return DataTransactionResult::fail_result(new_value);
        }

        match old {
            Some(old) => DataTransactionResult::success_replace_result(
                new_value,
                self.construct_immutable_value(old),
            ),
            None => DataTransactionResult::success_result(new_value),
        }
    }

    fn remove_from(
        &self,
        container: &mut BlockEntity,
    ) -> DataTransactionResult<ImmutableBoundedValue<i32>> {
        let ContainerMatch::Supported(target) = F::select(container) else {
            return DataTransactionResult::fail_no_data();
        };

        let Some(removed) = self.get_val(target) else {
            return DataTransactionResult::fail_no_data();
        };

        F::write(target, F::ABSENT);
        debug!("Removed {} = {}", F::KEY, removed);
        DataTransactionResult::success_remove(self.construct_immutable_value(removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_entity::{Chest, Furnace};
    use crate::transaction::ResultKind;

    const PROCESSOR: CooldownProcessor = CooldownProcessor::new();

    fn hopper(cooldown: i32) -> BlockEntity {
        BlockEntity::Hopper(Hopper {
            transfer_cooldown: cooldown,
            custom_name: None,
        })
    }

    fn cooldown_of(container: &BlockEntity) -> i32 {
        match container {
            BlockEntity::Hopper(hopper) => hopper.transfer_cooldown,
            other => panic!("not a hopper: {other:?}"),
        }
    }

    #[test]
    fn test_construct_value() {
        let value = PROCESSOR.construct_value(3);
        assert_eq!(value.key().to_string(), "sponge:cooldown");
        assert_eq!(value.min(), 1);
        assert_eq!(value.max(), i32::MAX);
        assert_eq!(value.default_value(), 8);
        assert_eq!(value.get(), 3);

        assert_eq!(PROCESSOR.construct_immutable_value(3), value.as_immutable());
    }

    #[test]
    fn test_set_rejects_below_minimum() {
        let mut target = Hopper {
            transfer_cooldown: 4,
            custom_name: None,
        };
        assert!(!PROCESSOR.set(&mut target, 0));
        assert_eq!(target.transfer_cooldown, 4);

        assert!(PROCESSOR.set(&mut target, 5));
        assert_eq!(PROCESSOR.get_val(&target), Some(5));
    }

    #[test]
    fn test_get_val_treats_below_minimum_as_unset() {
        for cooldown in [i32::MIN, -1, 0] {
            let target = Hopper {
                transfer_cooldown: cooldown,
                custom_name: None,
            };
            assert_eq!(PROCESSOR.get_val(&target), None);
        }
    }

    #[test]
    fn test_remove_lifecycle() {
        let mut container = hopper(NO_COOLDOWN);
        assert!(PROCESSOR.remove_from(&mut container).is_no_data());

        assert!(PROCESSOR.offer(&mut container, 8).is_successful());

        let result = PROCESSOR.remove_from(&mut container);
        assert_eq!(result.kind(), ResultKind::Success);
        assert_eq!(result.replaced_data(), &[PROCESSOR.construct_immutable_value(8)]);
        assert_eq!(cooldown_of(&container), NO_COOLDOWN);
        assert_eq!(PROCESSOR.get_value(&container), None);
    }

    #[test]
    fn test_offer_reports_replaced_and_rejected() {
        let mut container = hopper(NO_COOLDOWN);

        let result = PROCESSOR.offer(&mut container, 8);
        assert_eq!(result.success_data(), &[PROCESSOR.construct_immutable_value(8)]);
        assert!(result.replaced_data().is_empty());

        let result = PROCESSOR.offer(&mut container, 2);
        assert_eq!(result.success_data()[0].get(), 2);
        assert_eq!(result.replaced_data()[0].get(), 8);

        let result = PROCESSOR.offer(&mut container, 0);
        assert_eq!(result.kind(), ResultKind::Failure);
        assert_eq!(result.rejected_data()[0].get(), 0);
        assert_eq!(cooldown_of(&container), 2);
    }

    #[test]
    fn test_unsupported_containers_are_no_ops() {
        for mut container in [
            BlockEntity::Furnace(Furnace::default()),
            BlockEntity::Chest(Chest::default()),
        ] {
            let before = container.clone();
            assert!(!PROCESSOR.supports(&container));
            assert_eq!(PROCESSOR.get_value(&container), None);
            assert_eq!(PROCESSOR.get_api_value(&container), None);
            assert!(PROCESSOR.offer(&mut container, 5).is_no_data());
            assert!(PROCESSOR.remove_from(&mut container).is_no_data());
            assert_eq!(container, before);
        }
    }

    #[test]
    fn test_get_api_value() {
        let container = hopper(12);
        let value = PROCESSOR.get_api_value(&container).unwrap();
        assert_eq!(value.get(), 12);
        assert!(value.is_within_bounds());
    }
}
