//! Hulls: the watertight compartments that make up a vessel's interior.
//!
//! A hull tracks how flooded it is and how breathable its air is. A
//! position with no containing hull is open water.

use serde::{Deserialize, Serialize};

use crate::core::types::{HullId, Rect, Vec2, VesselId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hull {
    pub id: HullId,
    pub vessel: VesselId,
    pub name: String,
    /// Bounds in vessel-local coordinates.
    pub rect: Rect,
    /// How full of water the hull is, 0.0 (dry) to 100.0 (submerged).
    pub water_percentage: f32,
    /// Air quality, 0.0 (none) to 100.0 (fresh).
    pub oxygen_percentage: f32,
}

impl Hull {
    pub fn new(id: HullId, vessel: VesselId, name: impl Into<String>, rect: Rect) -> Self {
        Self {
            id,
            vessel,
            name: name.into(),
            rect,
            water_percentage: 0.0,
            oxygen_percentage: 100.0,
        }
    }

    /// Center of the hull in vessel-local coordinates. Navigation
    /// targeting a hull steers toward this point.
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.rect.x + self.rect.width / 2.0,
            self.rect.y + self.rect.height / 2.0,
        )
    }

    pub fn contains(&self, local: Vec2) -> bool {
        self.rect.contains(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_is_rect_midpoint() {
        let hull = Hull::new(
            HullId::new(0),
            VesselId::new(0),
            "engine room",
            Rect::new(-100.0, 0.0, 200.0, 80.0),
        );
        assert_eq!(hull.center(), Vec2::new(0.0, 40.0));
    }

    #[test]
    fn test_new_hull_is_dry_and_breathable() {
        let hull = Hull::new(
            HullId::new(0),
            VesselId::new(0),
            "bridge",
            Rect::new(0.0, 0.0, 10.0, 10.0),
        );
        assert_eq!(hull.water_percentage, 0.0);
        assert_eq!(hull.oxygen_percentage, 100.0);
    }
}
