//! Fetching breathing gear before a trip into unbreathable space.
//!
//! Spawned by the go-to objective's equipment gate. The acquisition
//! logic here is deliberately shallow: find the nearest free item of
//! the required class, walk over, pick it up. Done means the agent
//! holds something of that class, however it got there.

use std::any::Any;

use crate::ai::events::{AbandonReason, AiEvent};
use crate::ai::manager::{BASE_PRIORITY, ORDER_PRIORITY};
use crate::ai::objective::{AiCtx, Objective, ObjectiveState};
use crate::ai::steering::{self, SteeringMode};
use crate::core::types::{CharacterId, ItemId};
use crate::world::{ItemClass, Target, World};

#[derive(Debug)]
pub struct FindDivingGear {
    agent: CharacterId,
    /// A full suit rather than a mask: the destination is critically
    /// flooded or outside any hull.
    needs_suit: bool,
    state: ObjectiveState,
    /// The item currently being fetched. Re-resolved when it vanishes
    /// or someone else grabs it first.
    gear_target: Option<ItemId>,
}

impl FindDivingGear {
    pub fn new(agent: CharacterId, needs_suit: bool) -> Self {
        Self {
            agent,
            needs_suit,
            state: ObjectiveState::Active,
            gear_target: None,
        }
    }

    pub fn needs_suit(&self) -> bool {
        self.needs_suit
    }

    fn required_class(&self) -> ItemClass {
        if self.needs_suit {
            ItemClass::DivingSuit
        } else {
            ItemClass::DivingMask
        }
    }

    fn has_required_gear(&self, world: &World) -> bool {
        world.character_has_item_of(self.agent, self.required_class())
    }
}

impl Objective for FindDivingGear {
    fn debug_tag(&self) -> &'static str {
        "find diving gear"
    }

    fn agent(&self) -> CharacterId {
        self.agent
    }

    fn state(&self) -> ObjectiveState {
        self.state
    }

    fn priority(&self, _world: &World, is_current_order: bool) -> f32 {
        if is_current_order {
            ORDER_PRIORITY
        } else {
            BASE_PRIORITY
        }
    }

    fn act(&mut self, _dt: f32, ctx: &mut AiCtx<'_>) {
        let Some(agent) = ctx.world.character(self.agent) else {
            self.state.abandon();
            return;
        };
        let agent_vessel = agent.vessel;
        let direct_steering = agent.steering.mode != SteeringMode::Path;
        let Some(agent_pos) = ctx.world.character_world_position(self.agent) else {
            self.state.abandon();
            return;
        };

        // Someone else may have taken the gear since last tick.
        if let Some(item) = self.gear_target {
            let still_free = ctx
                .world
                .item(item)
                .is_some_and(|i| i.holder.is_none() || i.holder == Some(self.agent));
            if !still_free {
                self.gear_target = None;
            }
        }
        if self.gear_target.is_none() {
            self.gear_target = ctx.world.nearest_free_item_of(self.required_class(), agent_pos);
        }
        let Some(item) = self.gear_target else {
            self.state.abandon();
            let character = ctx
                .world
                .character(self.agent)
                .map_or_else(String::new, |c| c.name.clone());
            tracing::debug!(agent = %character, needs_suit = self.needs_suit, "no diving gear to fetch");
            ctx.events.push(AiEvent::ObjectiveAbandoned {
                character,
                objective: self.debug_tag(),
                target: format!("{:?}", self.required_class()),
                reason: AbandonReason::NoGearAvailable,
            });
            return;
        };

        if ctx.world.can_interact_with_item(self.agent, item) {
            if ctx.world.pick_up(self.agent, item).unwrap_or(false) {
                if let Some(agent) = ctx.world.character_mut(self.agent) {
                    agent.steering.reset();
                }
            }
            return;
        }

        let Some((mut aim, target_vessel)) =
            ctx.world.item(item).map(|i| (i.position, i.vessel))
        else {
            return;
        };
        if direct_steering {
            aim = steering::translate_between_frames(ctx.world, agent_vessel, target_vessel, aim);
        }
        if let Some(agent) = ctx.world.character_mut(self.agent) {
            agent.steering.select_target(Target::Item(item), false);
            agent.steering.seek(aim);
        }
    }

    fn is_completed(&mut self, ctx: &mut AiCtx<'_>) -> bool {
        if self.state == ObjectiveState::Completed {
            return true;
        }
        if self.has_required_gear(ctx.world) {
            self.state.complete();
            if let Some(agent) = ctx.world.character_mut(self.agent) {
                agent.steering.reset();
            }
            let character = ctx
                .world
                .character(self.agent)
                .map_or_else(String::new, |c| c.name.clone());
            tracing::debug!(agent = %character, needs_suit = self.needs_suit, "diving gear acquired");
            ctx.events.push(AiEvent::ObjectiveCompleted {
                character,
                objective: self.debug_tag(),
                target: format!("{:?}", self.required_class()),
            });
        }
        self.state == ObjectiveState::Completed
    }

    fn is_duplicate(&self, other: &dyn Objective) -> bool {
        other
            .as_any()
            .downcast_ref::<FindDivingGear>()
            .is_some_and(|o| o.agent == self.agent && o.needs_suit == self.needs_suit)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
