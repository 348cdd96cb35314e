//! Objective framework: the contract every unit of goal-directed
//! behavior implements, and the scheduling helpers shared by all of
//! them.
//!
//! An objective is ticked by its manager through `drive`, which runs
//! the deepest pending sub-objective first and guarantees `act` and
//! `is_completed` each run at most once per objective per tick.

use std::any::Any;

use serde::{Deserialize, Serialize};

use crate::ai::events::AiEvent;
use crate::core::config::SimulationConfig;
use crate::core::types::CharacterId;
use crate::world::World;

/// Lifecycle of an objective. `Abandoned` and `Completed` are both
/// terminal for the scheduler: it drops the objective either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectiveState {
    Active,
    Abandoned,
    Completed,
}

impl ObjectiveState {
    /// Active -> Abandoned. Terminal states are never overwritten, so
    /// a completed objective cannot be retroactively abandoned.
    pub fn abandon(&mut self) {
        if *self == ObjectiveState::Active {
            *self = ObjectiveState::Abandoned;
        }
    }

    /// Latches completion. One-way: once completed, an objective stays
    /// completed for the rest of its life. Completion is allowed to
    /// override an abandonment recorded earlier the same tick, since
    /// the completion test runs independently of `act`.
    pub fn complete(&mut self) {
        if *self != ObjectiveState::Completed {
            *self = ObjectiveState::Completed;
        }
    }

    pub fn is_active(&self) -> bool {
        *self == ObjectiveState::Active
    }
}

/// Everything an objective may touch during a tick.
pub struct AiCtx<'a> {
    pub world: &'a mut World,
    pub config: &'a SimulationConfig,
    /// Sink for structured events; drained by the simulation loop.
    pub events: &'a mut Vec<AiEvent>,
    /// Whether the objective chain being ticked is the agent's current
    /// explicit order. Order chains surface failures to the player.
    pub is_order: bool,
}

pub trait Objective: Any {
    /// Short stable name for logs and events.
    fn debug_tag(&self) -> &'static str;

    /// The agent this objective drives.
    fn agent(&self) -> CharacterId;

    fn state(&self) -> ObjectiveState;

    /// Priority for arbitration. Side-effect-free; called every pass,
    /// including for objectives that won't run this tick.
    fn priority(&self, world: &World, is_current_order: bool) -> f32;

    /// Per-tick behavior. Only called while the state is `Active`.
    fn act(&mut self, dt: f32, ctx: &mut AiCtx<'_>);

    /// Per-tick completion test, independent of `act`'s abandonment
    /// logic. Latches internally; returns the latched value.
    fn is_completed(&mut self, ctx: &mut AiCtx<'_>) -> bool;

    /// Whether this objective and `other` would steer toward the same
    /// destination, so the manager can merge them instead of queueing
    /// both.
    fn is_duplicate(&self, other: &dyn Objective) -> bool;

    fn as_any(&self) -> &dyn Any;

    /// Live child objective, if any. The scheduler runs a pending
    /// child instead of its parent.
    fn sub_objective_mut(&mut self) -> Option<&mut dyn Objective> {
        None
    }
}

/// Creates a sub-objective in `slot` only if the slot is empty or the
/// occupant has already finished or given up; a pending child is left
/// alone. Returns whether a new child was created.
pub fn try_add_sub_objective<T, F>(slot: &mut Option<T>, factory: F) -> bool
where
    T: Objective,
    F: FnOnce() -> T,
{
    let replace = match slot {
        Some(existing) => !existing.state().is_active(),
        None => true,
    };
    if replace {
        *slot = Some(factory());
    }
    replace
}

/// Ticks one objective chain: a pending sub-objective runs in place of
/// its parent; otherwise the objective itself acts and then tests
/// completion. Each node's `act`/`is_completed` run at most once.
pub fn drive(objective: &mut dyn Objective, dt: f32, ctx: &mut AiCtx<'_>) {
    if !objective.state().is_active() {
        return;
    }
    if let Some(child) = objective.sub_objective_mut() {
        if child.state().is_active() {
            drive(child, dt, ctx);
            return;
        }
    }
    objective.act(dt, ctx);
    if objective.state().is_active() {
        objective.is_completed(ctx);
    }
}
