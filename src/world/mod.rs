//! World state: vessels, hulls, items, characters, and waypoints,
//! addressed by id.
//!
//! The world is the single source of truth the AI reads from and
//! writes to. Lookups return `Option` so callers can treat a missing
//! entity (despawned mid-objective, for instance) as a normal outcome
//! rather than a panic.

pub mod character;
pub mod equipment;
pub mod hull;
pub mod item;
pub mod loader;
pub mod target;
pub mod vessel;

use ahash::AHashMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::{
    CharacterId, HullId, ItemId, Rect, Tick, Vec2, VesselId, WaypointId,
};

pub use character::{Character, Voice};
pub use hull::Hull;
pub use item::{Item, ItemClass};
pub use target::Target;
pub use vessel::Vessel;

/// A named navigation point. Waypoints in open water have no vessel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: WaypointId,
    pub name: String,
    /// Vessel-local position when aboard, world-space otherwise.
    pub position: Vec2,
    pub vessel: Option<VesselId>,
}

#[derive(Debug, Clone, Default)]
pub struct World {
    vessels: AHashMap<VesselId, Vessel>,
    hulls: AHashMap<HullId, Hull>,
    items: AHashMap<ItemId, Item>,
    characters: AHashMap<CharacterId, Character>,
    waypoints: AHashMap<WaypointId, Waypoint>,
    /// Character under direct player control, if any. AI skips it.
    controlled: Option<CharacterId>,
    /// Simulation clock in seconds.
    time: f64,
    tick: Tick,
    next_vessel: u32,
    next_hull: u32,
    next_item: u32,
    next_character: u32,
    next_waypoint: u32,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Advances the simulation clock by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.time += f64::from(dt);
        self.tick += 1;
    }

    pub fn controlled(&self) -> Option<CharacterId> {
        self.controlled
    }

    pub fn set_controlled(&mut self, character: Option<CharacterId>) {
        self.controlled = character;
    }

    // --- Spawning ---

    pub fn spawn_vessel(&mut self, name: impl Into<String>, sim_position: Vec2) -> VesselId {
        let id = VesselId::new(self.next_vessel);
        self.next_vessel += 1;
        self.vessels.insert(id, Vessel::new(id, name, sim_position));
        id
    }

    pub fn spawn_hull(&mut self, vessel: VesselId, name: impl Into<String>, rect: Rect) -> HullId {
        let id = HullId::new(self.next_hull);
        self.next_hull += 1;
        self.hulls.insert(id, Hull::new(id, vessel, name, rect));
        id
    }

    pub fn spawn_item(
        &mut self,
        name: impl Into<String>,
        class: ItemClass,
        vessel: Option<VesselId>,
        position: Vec2,
        interact_distance: f32,
    ) -> ItemId {
        let id = ItemId::new(self.next_item);
        self.next_item += 1;
        let current_hull = vessel.and_then(|v| self.hull_at(v, position));
        self.items.insert(
            id,
            Item {
                id,
                name: name.into(),
                class,
                position,
                vessel,
                current_hull,
                interact_distance,
                holder: None,
            },
        );
        id
    }

    pub fn spawn_character(
        &mut self,
        name: impl Into<String>,
        vessel: Option<VesselId>,
        position: Vec2,
    ) -> CharacterId {
        let id = CharacterId::new(self.next_character);
        self.next_character += 1;
        let mut character = Character::new(id, name, position, vessel);
        character.current_hull = vessel.and_then(|v| self.hull_at(v, position));
        self.characters.insert(id, character);
        id
    }

    pub fn spawn_waypoint(
        &mut self,
        name: impl Into<String>,
        vessel: Option<VesselId>,
        position: Vec2,
    ) -> WaypointId {
        let id = WaypointId::new(self.next_waypoint);
        self.next_waypoint += 1;
        self.waypoints.insert(
            id,
            Waypoint {
                id,
                name: name.into(),
                position,
                vessel,
            },
        );
        id
    }

    // --- Removal ---

    pub fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        for character in self.characters.values_mut() {
            character.inventory.retain(|&held| held != id);
            if character.selected_item == Some(id) {
                character.selected_item = None;
            }
        }
        self.items.remove(&id)
    }

    pub fn remove_character(&mut self, id: CharacterId) -> Option<Character> {
        if self.controlled == Some(id) {
            self.controlled = None;
        }
        for item in self.items.values_mut() {
            if item.holder == Some(id) {
                item.holder = None;
            }
        }
        self.characters.remove(&id)
    }

    // --- Lookups ---

    pub fn vessel(&self, id: VesselId) -> Option<&Vessel> {
        self.vessels.get(&id)
    }

    pub fn hull(&self, id: HullId) -> Option<&Hull> {
        self.hulls.get(&id)
    }

    pub fn hull_mut(&mut self, id: HullId) -> Option<&mut Hull> {
        self.hulls.get_mut(&id)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(&id)
    }

    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(&id)
    }

    pub fn waypoint(&self, id: WaypointId) -> Option<&Waypoint> {
        self.waypoints.get(&id)
    }

    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    /// Character ids in ascending order, for deterministic iteration.
    pub fn character_ids(&self) -> Vec<CharacterId> {
        let mut ids: Vec<CharacterId> = self.characters.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn item_by_name(&self, name: &str) -> Option<ItemId> {
        self.items
            .values()
            .filter(|i| i.name == name)
            .map(|i| i.id)
            .min()
    }

    pub fn character_by_name(&self, name: &str) -> Option<CharacterId> {
        self.characters
            .values()
            .filter(|c| c.name == name)
            .map(|c| c.id)
            .min()
    }

    pub fn hull_by_name(&self, name: &str) -> Option<HullId> {
        self.hulls
            .values()
            .filter(|h| h.name == name)
            .map(|h| h.id)
            .min()
    }

    pub fn waypoint_by_name(&self, name: &str) -> Option<WaypointId> {
        self.waypoints
            .values()
            .filter(|w| w.name == name)
            .map(|w| w.id)
            .min()
    }

    // --- Spatial queries ---

    /// Hull of `vessel` containing the vessel-local point, if any.
    /// Lowest id wins should hulls ever overlap.
    pub fn hull_at(&self, vessel: VesselId, local: Vec2) -> Option<HullId> {
        self.hulls
            .values()
            .filter(|h| h.vessel == vessel && h.contains(local))
            .map(|h| h.id)
            .min()
    }

    /// Converts a position in `vessel`'s local frame (or already in
    /// world space, when `vessel` is `None`) to world space.
    pub fn to_world(&self, vessel: Option<VesselId>, local: Vec2) -> Vec2 {
        match vessel.and_then(|v| self.vessels.get(&v)) {
            Some(v) => v.to_world(local),
            None => local,
        }
    }

    pub fn character_world_position(&self, id: CharacterId) -> Option<Vec2> {
        let c = self.characters.get(&id)?;
        Some(self.to_world(c.vessel, c.position))
    }

    pub fn item_world_position(&self, id: ItemId) -> Option<Vec2> {
        let i = self.items.get(&id)?;
        Some(self.to_world(i.vessel, i.position))
    }

    pub fn hull_world_position(&self, id: HullId) -> Option<Vec2> {
        let h = self.hulls.get(&id)?;
        Some(self.to_world(Some(h.vessel), h.center()))
    }

    pub fn waypoint_world_position(&self, id: WaypointId) -> Option<Vec2> {
        let w = self.waypoints.get(&id)?;
        Some(self.to_world(w.vessel, w.position))
    }

    /// Repositions a character and rederives its containing hull.
    pub fn move_character(&mut self, id: CharacterId, position: Vec2) {
        let Some(vessel) = self.characters.get(&id).map(|c| c.vessel) else {
            return;
        };
        let hull = vessel.and_then(|v| self.hull_at(v, position));
        if let Some(c) = self.characters.get_mut(&id) {
            c.position = position;
            c.current_hull = hull;
        }
    }

    // --- Interaction ---

    /// Whether `character` is close enough to physically use `item`.
    /// Linked-device access rules are not modeled; this is purely a
    /// range check against the item's interact distance.
    pub fn can_interact_with_item(&self, character: CharacterId, item: ItemId) -> bool {
        let (Some(cp), Some(ip)) = (
            self.character_world_position(character),
            self.item_world_position(item),
        ) else {
            return false;
        };
        let Some(item) = self.items.get(&item) else {
            return false;
        };
        cp.distance_squared(&ip) <= item.interact_distance * item.interact_distance
    }

    /// Whether `character` is within `max_dist` of `target`.
    pub fn can_interact_with_character(
        &self,
        character: CharacterId,
        target: CharacterId,
        max_dist: f32,
    ) -> bool {
        let (Some(cp), Some(tp)) = (
            self.character_world_position(character),
            self.character_world_position(target),
        ) else {
            return false;
        };
        cp.distance_squared(&tp) <= max_dist * max_dist
    }

    pub fn character_has_item_of(&self, character: CharacterId, class: ItemClass) -> bool {
        let Some(c) = self.characters.get(&character) else {
            return false;
        };
        c.inventory
            .iter()
            .any(|id| self.items.get(id).is_some_and(|i| i.class == class))
    }

    /// Nearest unheld item of `class`, by world-space distance from
    /// `near`.
    pub fn nearest_free_item_of(&self, class: ItemClass, near: Vec2) -> Option<ItemId> {
        self.items
            .values()
            .filter(|i| i.class == class && !i.is_held())
            .min_by_key(|i| {
                (
                    OrderedFloat(near.distance_squared(&self.to_world(i.vessel, i.position))),
                    i.id,
                )
            })
            .map(|i| i.id)
    }

    /// Moves `item` into `character`'s inventory. Returns `Ok(false)`
    /// if the item is already held by someone else.
    pub fn pick_up(&mut self, character: CharacterId, item: ItemId) -> Result<bool> {
        let (holder_pos, holder_vessel, holder_hull) = {
            let c = self
                .characters
                .get(&character)
                .ok_or_else(|| SimError::UnknownCharacter(format!("{character:?}")))?;
            (c.position, c.vessel, c.current_hull)
        };
        {
            let i = self
                .items
                .get_mut(&item)
                .ok_or_else(|| SimError::UnknownItem(format!("{item:?}")))?;
            match i.holder {
                Some(h) if h != character => return Ok(false),
                _ => {}
            }
            i.holder = Some(character);
            i.position = holder_pos;
            i.vessel = holder_vessel;
            i.current_hull = holder_hull;
        }
        let c = self
            .characters
            .get_mut(&character)
            .ok_or_else(|| SimError::UnknownCharacter(format!("{character:?}")))?;
        if !c.inventory.contains(&item) {
            c.inventory.push(item);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_vessel(world: &mut World) -> (VesselId, HullId) {
        let vessel = world.spawn_vessel("Tidehollow", Vec2::new(1000.0, 0.0));
        let hull = world.spawn_hull(vessel, "crew quarters", Rect::new(0.0, 0.0, 200.0, 100.0));
        (vessel, hull)
    }

    #[test]
    fn test_spawn_derives_current_hull() {
        let mut world = World::new();
        let (vessel, hull) = test_vessel(&mut world);
        let inside = world.spawn_character("Mara", Some(vessel), Vec2::new(50.0, 50.0));
        let outside = world.spawn_character("Joris", Some(vessel), Vec2::new(500.0, 50.0));
        assert_eq!(world.character(inside).unwrap().current_hull, Some(hull));
        assert_eq!(world.character(outside).unwrap().current_hull, None);
    }

    #[test]
    fn test_move_character_updates_hull() {
        let mut world = World::new();
        let (vessel, hull) = test_vessel(&mut world);
        let id = world.spawn_character("Mara", Some(vessel), Vec2::new(500.0, 50.0));
        assert_eq!(world.character(id).unwrap().current_hull, None);
        world.move_character(id, Vec2::new(20.0, 20.0));
        assert_eq!(world.character(id).unwrap().current_hull, Some(hull));
    }

    #[test]
    fn test_world_position_applies_vessel_offset() {
        let mut world = World::new();
        let (vessel, _) = test_vessel(&mut world);
        let id = world.spawn_character("Mara", Some(vessel), Vec2::new(50.0, 50.0));
        assert_eq!(
            world.character_world_position(id),
            Some(Vec2::new(1050.0, 50.0))
        );
    }

    #[test]
    fn test_can_interact_with_item_range() {
        let mut world = World::new();
        let (vessel, _) = test_vessel(&mut world);
        let character = world.spawn_character("Mara", Some(vessel), Vec2::new(50.0, 50.0));
        let near = world.spawn_item(
            "console",
            ItemClass::Console,
            Some(vessel),
            Vec2::new(80.0, 50.0),
            60.0,
        );
        let far = world.spawn_item(
            "pump",
            ItemClass::Pump,
            Some(vessel),
            Vec2::new(190.0, 50.0),
            60.0,
        );
        assert!(world.can_interact_with_item(character, near));
        assert!(!world.can_interact_with_item(character, far));
    }

    #[test]
    fn test_pick_up_moves_item_to_inventory() {
        let mut world = World::new();
        let (vessel, _) = test_vessel(&mut world);
        let character = world.spawn_character("Mara", Some(vessel), Vec2::new(50.0, 50.0));
        let mask = world.spawn_item(
            "diving mask",
            ItemClass::DivingMask,
            Some(vessel),
            Vec2::new(60.0, 50.0),
            60.0,
        );
        assert!(world.pick_up(character, mask).unwrap());
        assert!(world.character(character).unwrap().carries(mask));
        assert!(world.character_has_item_of(character, ItemClass::DivingMask));
        assert_eq!(world.item(mask).unwrap().holder, Some(character));
    }

    #[test]
    fn test_pick_up_refuses_held_item() {
        let mut world = World::new();
        let (vessel, _) = test_vessel(&mut world);
        let a = world.spawn_character("Mara", Some(vessel), Vec2::new(50.0, 50.0));
        let b = world.spawn_character("Joris", Some(vessel), Vec2::new(60.0, 50.0));
        let mask = world.spawn_item(
            "diving mask",
            ItemClass::DivingMask,
            Some(vessel),
            Vec2::new(55.0, 50.0),
            60.0,
        );
        assert!(world.pick_up(a, mask).unwrap());
        assert!(!world.pick_up(b, mask).unwrap());
        assert_eq!(world.item(mask).unwrap().holder, Some(a));
    }

    #[test]
    fn test_remove_character_frees_held_items() {
        let mut world = World::new();
        let (vessel, _) = test_vessel(&mut world);
        let character = world.spawn_character("Mara", Some(vessel), Vec2::new(50.0, 50.0));
        let mask = world.spawn_item(
            "diving mask",
            ItemClass::DivingMask,
            Some(vessel),
            Vec2::new(55.0, 50.0),
            60.0,
        );
        world.pick_up(character, mask).unwrap();
        world.remove_character(character);
        assert_eq!(world.item(mask).unwrap().holder, None);
    }

    #[test]
    fn test_nearest_free_item_prefers_closer() {
        let mut world = World::new();
        let (vessel, _) = test_vessel(&mut world);
        let _far = world.spawn_item(
            "suit A",
            ItemClass::DivingSuit,
            Some(vessel),
            Vec2::new(190.0, 50.0),
            60.0,
        );
        let near = world.spawn_item(
            "suit B",
            ItemClass::DivingSuit,
            Some(vessel),
            Vec2::new(60.0, 50.0),
            60.0,
        );
        let found = world.nearest_free_item_of(ItemClass::DivingSuit, Vec2::new(1050.0, 50.0));
        assert_eq!(found, Some(near));
    }
}
