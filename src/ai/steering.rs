//! Steering facade: the interface objectives use to move a character.
//!
//! Objectives don't pathfind. They issue a seek command (or reset to
//! neutral) and read back whatever the active path reports about
//! itself. The locomotion that consumes the command lives outside the
//! AI layer entirely.

use serde::{Deserialize, Serialize};

use crate::core::types::{Vec2, VesselId};
use crate::world::{Target, World};

/// How the character is currently being steered.
///
/// `Path` means an indoor pathfinder owns the route and seek points
/// are already expressed in the shared frame; `Direct` means raw seek
/// vectors that may need cross-frame translation first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SteeringMode {
    #[default]
    Direct,
    Path,
}

/// What the pathfinder reports about the route it is following.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStatus {
    /// The path no longer matches the requested destination and is
    /// being recomputed.
    pub dirty: bool,
    /// The pathfinder could not connect start to destination.
    pub unreachable: bool,
    /// At least one node of the path is outside any hull.
    pub has_outdoor_nodes: bool,
}

/// Movement command for the locomotion layer, refreshed every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum SteeringCommand {
    #[default]
    Idle,
    /// Head toward a point in the character's own frame.
    Seek(Vec2),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SteeringController {
    pub mode: SteeringMode,
    /// Present once the pathfinder has produced a route for the
    /// current destination. Meaningless in `Direct` mode.
    pub path: Option<PathStatus>,
    command: SteeringCommand,
    selected_target: Option<Target>,
    keep_in_sight: bool,
}

impl SteeringController {
    /// Whether a valid, current path is being followed. Only then do
    /// path-derived facts (outdoor nodes, unreachability) mean
    /// anything.
    pub fn is_following_path(&self) -> bool {
        self.mode == SteeringMode::Path && self.path.is_some_and(|p| !p.dirty)
    }

    pub fn path_has_outdoor_nodes(&self) -> bool {
        self.path.is_some_and(|p| p.has_outdoor_nodes)
    }

    pub fn path_unreachable(&self) -> bool {
        self.mode == SteeringMode::Path && self.path.is_some_and(|p| p.unreachable)
    }

    pub fn seek(&mut self, aim: Vec2) {
        self.command = SteeringCommand::Seek(aim);
    }

    /// Drops any pending movement command. The selected target is kept;
    /// it belongs to target tracking, not to the current command.
    pub fn reset(&mut self) {
        self.command = SteeringCommand::Idle;
    }

    pub fn command(&self) -> SteeringCommand {
        self.command
    }

    /// Tells the steering layer which entity the movement is about, so
    /// it can weigh avoidance and line-of-sight.
    pub fn select_target(&mut self, target: Target, keep_in_sight: bool) {
        self.selected_target = Some(target);
        self.keep_in_sight = keep_in_sight;
    }

    pub fn selected_target(&self) -> Option<Target> {
        self.selected_target
    }

    pub fn keeps_target_in_sight(&self) -> bool {
        self.keep_in_sight
    }
}

/// Re-expresses `aim`, given in the target's frame, in the agent's
/// frame: a frameless agent adds the target vessel's offset, a
/// frameless target subtracts the agent vessel's, and two distinct
/// vessels subtract their offset delta. Same vessel (or both in open
/// water) needs no translation.
pub fn translate_between_frames(
    world: &World,
    agent_vessel: Option<VesselId>,
    target_vessel: Option<VesselId>,
    aim: Vec2,
) -> Vec2 {
    let offset_of = |id| world.vessel(id).map_or(Vec2::ZERO, |v| v.sim_position);
    match (agent_vessel, target_vessel) {
        (None, Some(tv)) => aim + offset_of(tv),
        (Some(av), None) => aim - offset_of(av),
        (Some(av), Some(tv)) if av != tv => aim - (offset_of(av) - offset_of(tv)),
        _ => aim,
    }
}
