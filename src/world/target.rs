//! Navigation targets: anything a character can be sent toward.
//!
//! A target is a lightweight id, not a borrowed reference, so an
//! objective can outlive the entity it points at. Every query returns
//! `Option` and callers decide what a vanished target means (usually:
//! abandon).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::{CharacterId, HullId, ItemId, Vec2, VesselId, WaypointId};
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Hull(HullId),
    Item(ItemId),
    Character(CharacterId),
    Waypoint(WaypointId),
}

impl Target {
    /// Whether the underlying entity no longer exists.
    pub fn is_removed(&self, world: &World) -> bool {
        match *self {
            Target::Hull(id) => world.hull(id).is_none(),
            Target::Item(id) => world.item(id).is_none(),
            Target::Character(id) => world.character(id).is_none(),
            Target::Waypoint(id) => world.waypoint(id).is_none(),
        }
    }

    /// Position in the target's own frame: vessel-local when aboard a
    /// vessel, world-space otherwise. Hulls report their center.
    pub fn local_position(&self, world: &World) -> Option<Vec2> {
        match *self {
            Target::Hull(id) => world.hull(id).map(|h| h.center()),
            Target::Item(id) => world.item(id).map(|i| i.position),
            Target::Character(id) => world.character(id).map(|c| c.position),
            Target::Waypoint(id) => world.waypoint(id).map(|w| w.position),
        }
    }

    pub fn world_position(&self, world: &World) -> Option<Vec2> {
        match *self {
            Target::Hull(id) => world.hull_world_position(id),
            Target::Item(id) => world.item_world_position(id),
            Target::Character(id) => world.character_world_position(id),
            Target::Waypoint(id) => world.waypoint_world_position(id),
        }
    }

    /// The vessel whose frame the target lives in. `None` means open
    /// water (or a removed target; check `is_removed` first).
    pub fn vessel(&self, world: &World) -> Option<VesselId> {
        match *self {
            Target::Hull(id) => world.hull(id).map(|h| h.vessel),
            Target::Item(id) => world.item(id).and_then(|i| i.vessel),
            Target::Character(id) => world.character(id).and_then(|c| c.vessel),
            Target::Waypoint(id) => world.waypoint(id).and_then(|w| w.vessel),
        }
    }

    /// The hull the destination is in, used to judge whether breathing
    /// gear is needed there. Targets that don't track a hull of their
    /// own (waypoints) fall back to the asking agent's hull.
    pub fn containing_hull(&self, world: &World, agent_hull: Option<HullId>) -> Option<HullId> {
        match *self {
            Target::Hull(id) => Some(id),
            Target::Item(id) => world.item(id).and_then(|i| i.current_hull),
            Target::Character(id) => world.character(id).and_then(|c| c.current_hull),
            Target::Waypoint(_) => agent_hull,
        }
    }

    /// Short description for logs and speech.
    pub fn describe(&self, world: &World) -> String {
        match *self {
            Target::Hull(id) => world
                .hull(id)
                .map_or_else(|| format!("{self:?}"), |h| h.name.clone()),
            Target::Item(id) => world
                .item(id)
                .map_or_else(|| format!("{self:?}"), |i| i.name.clone()),
            Target::Character(id) => world
                .character(id)
                .map_or_else(|| format!("{self:?}"), |c| c.name.clone()),
            Target::Waypoint(id) => world
                .waypoint(id)
                .map_or_else(|| format!("{self:?}"), |w| w.name.clone()),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Hull(id) => write!(f, "hull #{}", id.0),
            Target::Item(id) => write!(f, "item #{}", id.0),
            Target::Character(id) => write!(f, "character #{}", id.0),
            Target::Waypoint(id) => write!(f, "waypoint #{}", id.0),
        }
    }
}
