//! Equipment-capability queries used to gate navigation on breathing
//! gear. All of these are side-effect-free.

use crate::core::types::{CharacterId, HullId};
use crate::world::{ItemClass, World};

/// Water level above which a hull's air pocket is too thin to breathe.
pub const UNBREATHABLE_WATER_PCT: f32 = 50.0;

/// Oxygen level below which a hull's air is not safe to breathe.
pub const LOW_OXYGEN_PCT: f32 = 50.0;

/// Water level above which a mask is not enough and a full suit is
/// required.
pub const SUIT_WATER_PCT: f32 = 90.0;

/// Whether a character in `hull` needs breathing gear of some kind.
/// `None` means open water, where gear is always needed.
pub fn needs_diving_gear(world: &World, hull: Option<HullId>) -> bool {
    match hull.and_then(|id| world.hull(id)) {
        Some(hull) => {
            hull.water_percentage > UNBREATHABLE_WATER_PCT
                || hull.oxygen_percentage < LOW_OXYGEN_PCT
        }
        None => true,
    }
}

/// Whether `hull` demands a full diving suit rather than a mask:
/// critically flooded or not a hull at all.
pub fn needs_diving_suit(world: &World, hull: Option<HullId>) -> bool {
    match hull.and_then(|id| world.hull(id)) {
        Some(hull) => hull.water_percentage > SUIT_WATER_PCT,
        None => true,
    }
}

pub fn has_diving_suit(world: &World, character: CharacterId) -> bool {
    world.character_has_item_of(character, ItemClass::DivingSuit)
}

pub fn has_diving_mask(world: &World, character: CharacterId) -> bool {
    world.character_has_item_of(character, ItemClass::DivingMask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Rect, Vec2};

    fn world_with_hull(water: f32, oxygen: f32) -> (World, HullId) {
        let mut world = World::new();
        let vessel = world.spawn_vessel("Tidehollow", Vec2::ZERO);
        let hull = world.spawn_hull(vessel, "test hull", Rect::new(0.0, 0.0, 100.0, 100.0));
        let h = world.hull_mut(hull).unwrap();
        h.water_percentage = water;
        h.oxygen_percentage = oxygen;
        (world, hull)
    }

    #[test]
    fn test_dry_hull_needs_nothing() {
        let (world, hull) = world_with_hull(0.0, 100.0);
        assert!(!needs_diving_gear(&world, Some(hull)));
        assert!(!needs_diving_suit(&world, Some(hull)));
    }

    #[test]
    fn test_flooded_hull_needs_gear_not_suit() {
        let (world, hull) = world_with_hull(60.0, 100.0);
        assert!(needs_diving_gear(&world, Some(hull)));
        assert!(!needs_diving_suit(&world, Some(hull)));
    }

    #[test]
    fn test_critically_flooded_hull_needs_suit() {
        let (world, hull) = world_with_hull(95.0, 100.0);
        assert!(needs_diving_gear(&world, Some(hull)));
        assert!(needs_diving_suit(&world, Some(hull)));
    }

    #[test]
    fn test_low_oxygen_hull_needs_gear() {
        let (world, hull) = world_with_hull(0.0, 20.0);
        assert!(needs_diving_gear(&world, Some(hull)));
        assert!(!needs_diving_suit(&world, Some(hull)));
    }

    #[test]
    fn test_open_water_needs_suit() {
        let world = World::new();
        assert!(needs_diving_gear(&world, None));
        assert!(needs_diving_suit(&world, None));
    }

    #[test]
    fn test_has_gear_checks_item_class() {
        let mut world = World::new();
        let vessel = world.spawn_vessel("Tidehollow", Vec2::ZERO);
        let character = world.spawn_character("Mara", Some(vessel), Vec2::ZERO);
        assert!(!has_diving_mask(&world, character));
        let mask = world.spawn_item("mask", ItemClass::DivingMask, Some(vessel), Vec2::ZERO, 60.0);
        world.pick_up(character, mask).unwrap();
        assert!(has_diving_mask(&world, character));
        assert!(!has_diving_suit(&world, character));
    }
}
