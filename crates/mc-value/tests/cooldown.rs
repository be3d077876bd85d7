//! Hopper cooldown behaviour as seen through the processor API, plus a second
//! field wired through the same generic processor.

use mc_key::ResourceKey;
use mc_value::{
    BlockEntity, BoundedIntField, BoundedIntProcessor, Bounds, Chest, ContainerMatch,
    CooldownProcessor, Furnace, Hopper, NO_COOLDOWN, ResultKind, ValueProcessor,
};

fn hopper_with(cooldown: i32) -> BlockEntity {
    BlockEntity::Hopper(Hopper {
        transfer_cooldown: cooldown,
        custom_name: Some("Sorter".to_string()),
    })
}

fn raw_cooldown(container: &BlockEntity) -> Option<i32> {
    match container {
        BlockEntity::Hopper(hopper) => Some(hopper.transfer_cooldown),
        _ => None,
    }
}

#[test]
fn test_set_then_get() {
    let processor = CooldownProcessor::new();
    let mut container = hopper_with(NO_COOLDOWN);

    let rejected = processor.offer(&mut container, 0);
    assert_eq!(rejected.kind(), ResultKind::Failure);
    assert_eq!(raw_cooldown(&container), Some(NO_COOLDOWN));

    assert!(processor.offer(&mut container, 5).is_successful());
    assert_eq!(processor.get_value(&container), Some(5));
}

#[test]
fn test_remove_round() {
    let processor = CooldownProcessor::new();
    let mut container = hopper_with(0);

    assert!(processor.remove_from(&mut container).is_no_data());

    assert!(processor.offer(&mut container, 8).is_successful());
    let removed = processor.remove_from(&mut container);
    assert!(removed.is_successful());

    let snapshot = &removed.replaced_data()[0];
    assert_eq!(snapshot.get(), 8);
    assert_eq!(snapshot.key(), &processor.key());

    assert_eq!(processor.get_value(&container), None);
    assert_eq!(raw_cooldown(&container), Some(-1));
}

#[test]
fn test_other_block_entities_untouched() {
    let processor = CooldownProcessor::new();
    let mut chest = BlockEntity::Chest(Chest {
        custom_name: Some("Loot".to_string()),
    });
    let before = chest.clone();

    assert!(processor.offer(&mut chest, 8).is_no_data());
    assert!(processor.remove_from(&mut chest).is_no_data());
    assert_eq!(processor.get_value(&chest), None);
    assert_eq!(chest, before);
}

#[test]
fn test_removed_snapshot_serializes() {
    let processor = CooldownProcessor::new();
    let mut container = hopper_with(3);
    let removed = processor.remove_from(&mut container);

    let json = serde_json::to_value(&removed).unwrap();
    assert_eq!(json["kind"], "Success");
    assert_eq!(json["replaced"][0]["key"], "sponge:cooldown");
    assert_eq!(json["replaced"][0]["current"], 3);
}

/// Furnace burn time, bounded at zero, as an example of another field.
struct BurnTime;

impl BoundedIntField for BurnTime {
    type Target = Furnace;

    const KEY: ResourceKey = ResourceKey::of_static("sponge", "remaining_fuel");
    const BOUNDS: Bounds<i32> = Bounds::new(0, i32::MAX);
    const DEFAULT: i32 = 1600;
    const ABSENT: i32 = -1;

    fn select(container: &mut BlockEntity) -> ContainerMatch<'_, Furnace> {
        match container {
            BlockEntity::Furnace(furnace) => ContainerMatch::Supported(furnace),
            _ => ContainerMatch::Unsupported,
        }
    }

    fn select_ref(container: &BlockEntity) -> Option<&Furnace> {
        match container {
            BlockEntity::Furnace(furnace) => Some(furnace),
            _ => None,
        }
    }

    fn read(furnace: &Furnace) -> i32 {
        furnace.burn_time
    }

    fn write(furnace: &mut Furnace, value: i32) {
        furnace.burn_time = value;
    }
}

#[test]
fn test_generic_processor_for_other_field() {
    let processor = BoundedIntProcessor::<BurnTime>::new();
    let mut furnace = BlockEntity::Furnace(Furnace::default());
    let mut hopper = hopper_with(4);

    // Zero is inside these bounds.
    assert_eq!(processor.get_value(&furnace), Some(0));
    assert!(processor.offer(&mut furnace, 200).is_successful());
    assert_eq!(processor.construct_value(200).default_value(), 1600);

    assert!(!processor.supports(&hopper));
    assert!(processor.offer(&mut hopper, 10).is_no_data());
    assert_eq!(raw_cooldown(&hopper), Some(4));

    let removed = processor.remove_from(&mut furnace);
    assert_eq!(removed.replaced_data()[0].get(), 200);
    assert_eq!(processor.get_value(&furnace), None);
}
