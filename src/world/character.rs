//! Characters: crew members, whether player-controlled or autonomous.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::ai::steering::SteeringController;
use crate::core::types::{CharacterId, Direction, HullId, ItemId, Vec2, VesselId};

/// Throttled speech. Each message key remembers when it was last
/// spoken, so a character repeating the same complaint every tick only
/// actually says it once per interval.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Voice {
    last_spoken: AHashMap<String, f64>,
    /// Lines emitted this run, oldest first. Drained by the caller.
    pub log: Vec<String>,
}

impl Voice {
    /// Speaks `line` under `key` unless the same key was spoken less
    /// than `min_interval` seconds ago. Returns whether the line was
    /// actually said.
    pub fn say(&mut self, key: &str, line: impl Into<String>, now: f64, min_interval: f64) -> bool {
        if let Some(&last) = self.last_spoken.get(key) {
            if now - last < min_interval {
                return false;
            }
        }
        self.last_spoken.insert(key.to_string(), now);
        self.log.push(line.into());
        true
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    /// Vessel-local position when aboard, world-space otherwise.
    pub position: Vec2,
    pub vessel: Option<VesselId>,
    pub current_hull: Option<HullId>,
    pub inventory: Vec<ItemId>,
    pub is_dead: bool,
    /// Set while the character is traversing a ladder.
    pub is_climbing: bool,
    /// Item the character is actively operating, if any. Operating an
    /// item pins the character in place, so navigation treats it as
    /// "already there".
    pub selected_item: Option<ItemId>,
    pub facing: Direction,
    pub steering: SteeringController,
    pub voice: Voice,
}

impl Character {
    pub fn new(
        id: CharacterId,
        name: impl Into<String>,
        position: Vec2,
        vessel: Option<VesselId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            vessel,
            current_hull: None,
            inventory: Vec::new(),
            is_dead: false,
            is_climbing: false,
            selected_item: None,
            facing: Direction::Right,
            steering: SteeringController::default(),
            voice: Voice::default(),
        }
    }

    pub fn carries(&self, item: ItemId) -> bool {
        self.inventory.contains(&item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_throttles_repeat_key() {
        let mut voice = Voice::default();
        assert!(voice.say("cannot_reach", "I can't get there!", 0.0, 10.0));
        assert!(!voice.say("cannot_reach", "I can't get there!", 5.0, 10.0));
        assert!(voice.say("cannot_reach", "I can't get there!", 10.0, 10.0));
        assert_eq!(voice.log.len(), 2);
    }

    #[test]
    fn test_voice_keys_are_independent() {
        let mut voice = Voice::default();
        assert!(voice.say("cannot_reach", "I can't get there!", 0.0, 10.0));
        assert!(voice.say("need_suit", "I need a diving suit.", 0.0, 10.0));
    }
}
