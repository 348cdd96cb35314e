//! Loads a world from a TOML scenario file.
//!
//! Scenario files declare vessels, hulls, items, characters, and
//! waypoints; cross-references use names, which the loader resolves to
//! ids. See `data/scenarios/` for examples.

use std::path::Path;

use ahash::AHashMap;
use serde::Deserialize;

use crate::core::error::{Result, SimError};
use crate::core::types::{Rect, Vec2, VesselId};
use crate::world::{ItemClass, World};

#[derive(Debug, Deserialize)]
struct ScenarioFile {
    #[serde(default)]
    vessels: Vec<VesselDef>,
    #[serde(default)]
    hulls: Vec<HullDef>,
    #[serde(default)]
    items: Vec<ItemDef>,
    #[serde(default)]
    characters: Vec<CharacterDef>,
    #[serde(default)]
    waypoints: Vec<WaypointDef>,
}

#[derive(Debug, Deserialize)]
struct VesselDef {
    name: String,
    #[serde(default)]
    position: [f32; 2],
}

#[derive(Debug, Deserialize)]
struct HullDef {
    vessel: String,
    name: String,
    /// x, y, width, height in vessel-local coordinates.
    rect: [f32; 4],
    #[serde(default)]
    water: f32,
    #[serde(default = "full_oxygen")]
    oxygen: f32,
}

#[derive(Debug, Deserialize)]
struct ItemDef {
    name: String,
    class: ItemClass,
    vessel: Option<String>,
    position: [f32; 2],
    #[serde(default = "default_interact_distance")]
    interact_distance: f32,
}

#[derive(Debug, Deserialize)]
struct CharacterDef {
    name: String,
    vessel: Option<String>,
    position: [f32; 2],
    /// Marks this character as player-controlled. If several are
    /// marked, the last one listed wins.
    #[serde(default)]
    controlled: bool,
}

#[derive(Debug, Deserialize)]
struct WaypointDef {
    name: String,
    vessel: Option<String>,
    position: [f32; 2],
}

fn full_oxygen() -> f32 {
    100.0
}

fn default_interact_distance() -> f32 {
    60.0
}

fn vec2(p: [f32; 2]) -> Vec2 {
    Vec2::new(p[0], p[1])
}

pub fn load_scenario(path: &Path) -> Result<World> {
    let text = std::fs::read_to_string(path)?;
    parse_scenario(&text)
}

pub fn parse_scenario(text: &str) -> Result<World> {
    let file: ScenarioFile = toml::from_str(text)?;
    let mut world = World::new();
    let mut vessel_ids: AHashMap<String, VesselId> = AHashMap::new();

    for def in &file.vessels {
        let id = world.spawn_vessel(&def.name, vec2(def.position));
        vessel_ids.insert(def.name.clone(), id);
    }

    let resolve = |name: &Option<String>| -> Result<Option<VesselId>> {
        match name {
            Some(n) => vessel_ids
                .get(n)
                .copied()
                .map(Some)
                .ok_or_else(|| SimError::UnknownVessel(n.clone())),
            None => Ok(None),
        }
    };

    for def in &file.hulls {
        let vessel = vessel_ids
            .get(&def.vessel)
            .copied()
            .ok_or_else(|| SimError::UnknownVessel(def.vessel.clone()))?;
        let [x, y, w, h] = def.rect;
        let hull = world.spawn_hull(vessel, &def.name, Rect::new(x, y, w, h));
        let hull = world.hull_mut(hull).unwrap();
        hull.water_percentage = def.water;
        hull.oxygen_percentage = def.oxygen;
    }

    for def in &file.items {
        world.spawn_item(
            &def.name,
            def.class,
            resolve(&def.vessel)?,
            vec2(def.position),
            def.interact_distance,
        );
    }

    for def in &file.characters {
        let id = world.spawn_character(&def.name, resolve(&def.vessel)?, vec2(def.position));
        if def.controlled {
            world.set_controlled(Some(id));
        }
    }

    for def in &file.waypoints {
        world.spawn_waypoint(&def.name, resolve(&def.vessel)?, vec2(def.position));
    }

    tracing::info!(
        vessels = file.vessels.len(),
        hulls = file.hulls.len(),
        items = file.items.len(),
        characters = file.characters.len(),
        waypoints = file.waypoints.len(),
        "scenario loaded"
    );
    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
        [[vessels]]
        name = "Tidehollow"
        position = [0.0, 0.0]

        [[hulls]]
        vessel = "Tidehollow"
        name = "crew quarters"
        rect = [0.0, 0.0, 300.0, 120.0]

        [[hulls]]
        vessel = "Tidehollow"
        name = "flooded deck"
        rect = [300.0, 0.0, 300.0, 120.0]
        water = 95.0

        [[items]]
        name = "status console"
        class = "console"
        vessel = "Tidehollow"
        position = [80.0, 40.0]

        [[characters]]
        name = "Mara"
        vessel = "Tidehollow"
        position = [20.0, 40.0]

        [[waypoints]]
        name = "aft mark"
        vessel = "Tidehollow"
        position = [580.0, 40.0]
    "#;

    #[test]
    fn test_parse_scenario_resolves_names() {
        let world = parse_scenario(SCENARIO).unwrap();
        let mara = world.character_by_name("Mara").unwrap();
        let deck = world.hull_by_name("flooded deck").unwrap();
        assert_eq!(world.hull(deck).unwrap().water_percentage, 95.0);
        assert_eq!(world.hull(deck).unwrap().oxygen_percentage, 100.0);
        let quarters = world.hull_by_name("crew quarters").unwrap();
        assert_eq!(world.character(mara).unwrap().current_hull, Some(quarters));
        assert!(world.item_by_name("status console").is_some());
        assert!(world.waypoint_by_name("aft mark").is_some());
    }

    #[test]
    fn test_unknown_vessel_is_an_error() {
        let bad = r#"
            [[hulls]]
            vessel = "Ghost Ship"
            name = "nowhere"
            rect = [0.0, 0.0, 10.0, 10.0]
        "#;
        let err = parse_scenario(bad).unwrap_err();
        assert!(matches!(err, SimError::UnknownVessel(name) if name == "Ghost Ship"));
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let err = parse_scenario("[[vessels]]\nname = ").unwrap_err();
        assert!(matches!(err, SimError::ScenarioParse(_)));
    }
}
