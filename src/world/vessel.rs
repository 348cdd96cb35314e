//! Vessels: mobile structures that carry hulls, items, and crew.
//!
//! Everything aboard a vessel stores its position in vessel-local
//! coordinates. World-space positions are recovered by adding the
//! vessel's `sim_position`, which drifts as the vessel moves.

use serde::{Deserialize, Serialize};

use crate::core::types::{Vec2, VesselId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vessel {
    pub id: VesselId,
    pub name: String,
    /// World-space origin of the vessel's local coordinate frame.
    pub sim_position: Vec2,
}

impl Vessel {
    pub fn new(id: VesselId, name: impl Into<String>, sim_position: Vec2) -> Self {
        Self {
            id,
            name: name.into(),
            sim_position,
        }
    }

    /// Converts a vessel-local position to world space.
    pub fn to_world(&self, local: Vec2) -> Vec2 {
        local + self.sim_position
    }
}
