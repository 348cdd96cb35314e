//! Per-character objective scheduling.
//!
//! The manager owns a character's autonomous objectives plus at most
//! one explicit order, arbitrates between them by priority each tick,
//! and drives only the winner. Everything else stays queued.

use ahash::AHashMap;
use ordered_float::OrderedFloat;

use crate::ai::events::AiEvent;
use crate::ai::objective::{drive, AiCtx, Objective};
use crate::core::config::SimulationConfig;
use crate::core::types::CharacterId;
use crate::world::World;

/// Priority of the character's current explicit order. High enough to
/// outrank any autonomous objective, low enough to stay comparable.
pub const ORDER_PRIORITY: f32 = 50.0;

/// Baseline priority of an autonomous objective that has no reason to
/// be suppressed.
pub const BASE_PRIORITY: f32 = 1.0;

/// Owns and schedules the objectives of one character.
pub struct ObjectiveManager {
    character: CharacterId,
    objectives: Vec<Box<dyn Objective>>,
    /// The player-issued order, if any. Only one at a time; a new
    /// order replaces the old one.
    current_order: Option<Box<dyn Objective>>,
}

impl ObjectiveManager {
    pub fn new(character: CharacterId) -> Self {
        Self {
            character,
            objectives: Vec::new(),
            current_order: None,
        }
    }

    pub fn character(&self) -> CharacterId {
        self.character
    }

    /// Queues an autonomous objective unless an equivalent one (same
    /// destination, per `is_duplicate`) is already queued or ordered.
    /// Returns whether the objective was actually added.
    pub fn add_objective(&mut self, objective: Box<dyn Objective>) -> bool {
        let duplicate = self
            .objectives
            .iter()
            .chain(self.current_order.iter())
            .any(|existing| existing.is_duplicate(objective.as_ref()));
        if duplicate {
            tracing::debug!(
                objective = objective.debug_tag(),
                "dropping duplicate objective"
            );
            return false;
        }
        self.objectives.push(objective);
        true
    }

    /// Replaces the current order.
    pub fn set_order(&mut self, order: Box<dyn Objective>) {
        self.current_order = Some(order);
    }

    pub fn clear_order(&mut self) {
        self.current_order = None;
    }

    pub fn current_order(&self) -> Option<&dyn Objective> {
        self.current_order.as_deref()
    }

    pub fn objective_count(&self) -> usize {
        self.objectives.len()
    }

    /// One scheduling pass: drop finished objectives, pick the
    /// highest-priority survivor, drive it, then run the completion
    /// test on the rest. No objective's `act` or `is_completed` runs
    /// more than once per tick: the driven one is tested inside
    /// `drive`, the others only in the completion pass.
    pub fn tick(
        &mut self,
        world: &mut World,
        config: &SimulationConfig,
        dt: f32,
        events: &mut Vec<AiEvent>,
    ) {
        self.cull();

        // Selection first: priorities are side-effect-free, so nothing
        // has run yet when the winner is picked.
        let mut best: Option<(bool, usize, f32)> = None;
        if let Some(order) = &self.current_order {
            let priority = order.priority(world, true);
            if priority > 0.0 {
                best = Some((true, 0, priority));
            }
        }
        for (index, objective) in self.objectives.iter().enumerate() {
            let priority = objective.priority(world, false);
            if priority > 0.0
                && best.map_or(true, |(_, _, b)| OrderedFloat(priority) > OrderedFloat(b))
            {
                best = Some((false, index, priority));
            }
        }

        let driven = best.map(|(is_order, index, _)| (is_order, index));
        if let Some((is_order, index)) = driven {
            let objective = if is_order {
                self.current_order.as_deref_mut()
            } else {
                self.objectives.get_mut(index).map(|boxed| &mut **boxed)
            };
            if let Some(objective) = objective {
                let mut ctx = AiCtx {
                    world,
                    config,
                    events,
                    is_order,
                };
                drive(objective, dt, &mut ctx);
            }
        }

        // Completion pass for everything that didn't run. A queued
        // objective can become complete while another one is driven
        // (the agent happened to end up at its destination).
        if let Some(order) = &mut self.current_order {
            if order.state().is_active() && driven != Some((true, 0)) {
                let mut ctx = AiCtx {
                    world,
                    config,
                    events,
                    is_order: true,
                };
                order.is_completed(&mut ctx);
            }
        }
        for (index, objective) in self.objectives.iter_mut().enumerate() {
            if objective.state().is_active() && driven != Some((false, index)) {
                let mut ctx = AiCtx {
                    world,
                    config,
                    events,
                    is_order: false,
                };
                objective.is_completed(&mut ctx);
            }
        }
    }

    /// Drops abandoned and completed objectives. The scheduler treats
    /// both as terminal.
    fn cull(&mut self) {
        self.objectives.retain(|o| o.state().is_active());
        if self
            .current_order
            .as_ref()
            .is_some_and(|o| !o.state().is_active())
        {
            tracing::debug!(character = ?self.character, "order finished, clearing slot");
            self.current_order = None;
        }
    }
}

/// Objective managers for the whole crew, keyed by character.
#[derive(Default)]
pub struct CrewAi {
    managers: AHashMap<CharacterId, ObjectiveManager>,
}

impl CrewAi {
    pub fn new() -> Self {
        Self::default()
    }

    /// The character's manager, created on first use.
    pub fn manager_mut(&mut self, character: CharacterId) -> &mut ObjectiveManager {
        self.managers
            .entry(character)
            .or_insert_with(|| ObjectiveManager::new(character))
    }

    pub fn manager(&self, character: CharacterId) -> Option<&ObjectiveManager> {
        self.managers.get(&character)
    }
}
