//! Items: interactable objects that can sit in a hull, float in open
//! water, or be carried in a character's inventory.

use serde::{Deserialize, Serialize};

use crate::core::types::{CharacterId, HullId, ItemId, Vec2, VesselId};

/// Broad functional category of an item. Capability checks (e.g. "is
/// the agent wearing a diving suit") match on class rather than name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemClass {
    DivingSuit,
    DivingMask,
    Ladder,
    Console,
    Pump,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub class: ItemClass,
    /// Vessel-local position when aboard, world-space otherwise.
    pub position: Vec2,
    pub vessel: Option<VesselId>,
    pub current_hull: Option<HullId>,
    /// Maximum distance (world units) from which a character can use
    /// this item.
    pub interact_distance: f32,
    /// Character carrying the item, if any. A held item is repositioned
    /// when picked up but does not track its holder afterwards.
    pub holder: Option<CharacterId>,
}

impl Item {
    pub fn is_held(&self) -> bool {
        self.holder.is_some()
    }
}
