//! The navigation objective: walk (or swim) an agent to a target.
//!
//! Most of the work is not pathfinding, which belongs to the steering
//! layer, but deciding every tick whether the trip still makes sense:
//! is the target gone, unreachable, outdoors when we must stay in,
//! somewhere that needs breathing gear we don't carry? Completion is
//! tested in tiers so the common miss case costs one squared-distance
//! comparison.

use std::any::Any;
use std::fmt;

use crate::ai::events::{AbandonReason, AiEvent};
use crate::ai::find_diving_gear::FindDivingGear;
use crate::ai::manager::{BASE_PRIORITY, ORDER_PRIORITY};
use crate::ai::objective::{try_add_sub_objective, AiCtx, Objective, ObjectiveState};
use crate::ai::steering::{self, SteeringMode};
use crate::core::config::SimulationConfig;
use crate::core::types::{CharacterId, Direction, Vec2};
use crate::world::{equipment, Target, World};

type Condition = Box<dyn Fn(&World) -> bool>;

pub struct GoTo {
    agent: CharacterId,
    target: Target,
    state: ObjectiveState,
    /// Arrival threshold in world units. Never below the interaction
    /// range of an item target (see `calibrate_close_enough`).
    close_enough: f32,
    /// Standing behavior: keep approaching forever, never complete.
    repeat: bool,
    /// Grace period (seconds) before an unreachable-flagged path is
    /// believed. Set once at construction, counts down every tick.
    wait_until_path_unreachable: f32,
    get_diving_gear_if_needed: bool,
    allow_going_outside: bool,
    check_visibility: bool,
    ignore_if_target_dead: bool,
    /// Re-resolve the target every tick to whichever character the
    /// player controls.
    follow_controlled: bool,
    custom_condition: Option<Condition>,
    find_diving_gear: Option<FindDivingGear>,
}

impl GoTo {
    pub fn new(
        agent: CharacterId,
        target: Target,
        world: &World,
        config: &SimulationConfig,
    ) -> Self {
        Self {
            agent,
            target,
            state: ObjectiveState::Active,
            close_enough: calibrate_close_enough(target, world, config),
            repeat: false,
            wait_until_path_unreachable: config.path_unreachable_timeout,
            get_diving_gear_if_needed: true,
            allow_going_outside: false,
            check_visibility: false,
            ignore_if_target_dead: false,
            follow_controlled: false,
            custom_condition: None,
            find_diving_gear: None,
        }
    }

    pub fn with_repeat(mut self) -> Self {
        self.repeat = true;
        self
    }

    pub fn without_diving_gear(mut self) -> Self {
        self.get_diving_gear_if_needed = false;
        self
    }

    pub fn with_outside_allowed(mut self) -> Self {
        self.allow_going_outside = true;
        self
    }

    pub fn with_visibility_check(mut self) -> Self {
        self.check_visibility = true;
        self
    }

    pub fn ignoring_dead_target(mut self) -> Self {
        self.ignore_if_target_dead = true;
        self
    }

    pub fn following_controlled(mut self) -> Self {
        self.follow_controlled = true;
        self
    }

    /// Raises the arrival threshold. It can only grow: the calibrated
    /// interaction range of an item target is a hard floor.
    pub fn with_close_enough(mut self, distance: f32) -> Self {
        self.close_enough = self.close_enough.max(distance);
        self
    }

    /// Extra predicate that must pass, on top of proximity, before the
    /// objective may complete.
    pub fn with_condition(mut self, condition: impl Fn(&World) -> bool + 'static) -> Self {
        self.custom_condition = Some(Box::new(condition));
        self
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn close_enough(&self) -> f32 {
        self.close_enough
    }

    fn agent_name(&self, world: &World) -> String {
        world
            .character(self.agent)
            .map_or_else(String::new, |c| c.name.clone())
    }

    fn reset_steering(&self, world: &mut World) {
        if let Some(agent) = world.character_mut(self.agent) {
            agent.steering.reset();
        }
    }

    fn push_abandoned(&self, ctx: &mut AiCtx<'_>, reason: AbandonReason) {
        let target = self.target.describe(ctx.world);
        tracing::debug!(
            agent = %self.agent_name(ctx.world),
            %target,
            ?reason,
            "goto abandoned"
        );
        ctx.events.push(AiEvent::ObjectiveAbandoned {
            character: self.agent_name(ctx.world),
            objective: self.debug_tag(),
            target,
            reason,
        });
    }

    /// Unreachable verdicts are surfaced: an event always, a throttled
    /// spoken line when the trip was an explicit order.
    fn report_cannot_reach(&self, ctx: &mut AiCtx<'_>) {
        let character = self.agent_name(ctx.world);
        let target = self.target.describe(ctx.world);
        ctx.events.push(AiEvent::CannotReach {
            character: character.clone(),
            target,
        });
        if ctx.is_order {
            let now = ctx.world.time();
            let interval = ctx.config.cannot_reach_interval;
            if let Some(agent) = ctx.world.character_mut(self.agent) {
                let line = "I can't get there!";
                if agent.voice.say("cannot_reach", line, now, interval) {
                    ctx.events.push(AiEvent::Spoke {
                        character,
                        line: line.to_string(),
                    });
                }
            }
        }
    }

    /// Stop moving and turn toward the target's side.
    fn settle(&self, world: &mut World, target_pos: Vec2, agent_pos: Vec2) {
        let facing = if target_pos.x > agent_pos.x {
            Direction::Right
        } else {
            Direction::Left
        };
        if let Some(agent) = world.character_mut(self.agent) {
            agent.steering.reset();
            agent.facing = facing;
        }
    }
}

/// An item target pulls the arrival threshold up to a margin of its
/// interaction distance, so the agent stops where it can actually use
/// the thing instead of just near it.
fn calibrate_close_enough(target: Target, world: &World, config: &SimulationConfig) -> f32 {
    let interaction = match target {
        Target::Item(id) => world
            .item(id)
            .map_or(0.0, |i| i.interact_distance * config.interact_margin),
        _ => 0.0,
    };
    interaction.max(config.default_close_enough)
}

impl Objective for GoTo {
    fn debug_tag(&self) -> &'static str {
        "go to"
    }

    fn agent(&self) -> CharacterId {
        self.agent
    }

    fn state(&self) -> ObjectiveState {
        self.state
    }

    fn priority(&self, world: &World, is_current_order: bool) -> f32 {
        if self.follow_controlled && world.controlled().is_none() {
            return 0.0;
        }
        if self.target.is_removed(world) {
            return 0.0;
        }
        if self.ignore_if_target_dead {
            if let Target::Character(id) = self.target {
                if world.character(id).is_some_and(|c| c.is_dead) {
                    return 0.0;
                }
            }
        }
        if is_current_order {
            ORDER_PRIORITY
        } else {
            BASE_PRIORITY
        }
    }

    fn act(&mut self, dt: f32, ctx: &mut AiCtx<'_>) {
        if self.follow_controlled {
            match ctx.world.controlled() {
                Some(id) => self.target = Target::Character(id),
                None => {
                    self.state.abandon();
                    self.push_abandoned(ctx, AbandonReason::NoControlledCharacter);
                    return;
                }
            }
        }
        if self.target == Target::Character(self.agent) {
            self.reset_steering(ctx.world);
            self.state.abandon();
            self.push_abandoned(ctx, AbandonReason::SelfTarget);
            return;
        }
        self.wait_until_path_unreachable -= dt;

        let Some(agent) = ctx.world.character(self.agent) else {
            self.state.abandon();
            return;
        };
        let agent_hull = agent.current_hull;
        let agent_vessel = agent.vessel;
        let is_climbing = agent.is_climbing;
        let direct_steering = agent.steering.mode != SteeringMode::Path;
        let following_path = agent.steering.is_following_path();
        let path_outdoors = agent.steering.path_has_outdoor_nodes();
        let path_unreachable = agent.steering.path_unreachable();

        // Don't keep operating a console while relocating. Climbing is
        // the exception: the ladder is how we relocate.
        if !is_climbing {
            if let Some(agent) = ctx.world.character_mut(self.agent) {
                agent.selected_item = None;
            }
        }

        if self.target.is_removed(ctx.world) {
            // Environment consistency, not a pathing failure: no notice.
            self.state.abandon();
            self.reset_steering(ctx.world);
            self.push_abandoned(ctx, AbandonReason::TargetRemoved);
            return;
        }
        let target = self.target;
        let keep_in_sight = self.check_visibility;
        if let Some(agent) = ctx.world.character_mut(self.agent) {
            agent.steering.select_target(target, keep_in_sight);
        }

        let is_inside = agent_hull.is_some();
        let target_hull = self.target.containing_hull(ctx.world, agent_hull);
        let target_is_outside = target_hull.is_none() || (following_path && path_outdoors);

        let verdict = if is_inside && target_is_outside && !self.allow_going_outside {
            Some(AbandonReason::TargetOutside)
        } else if !self.repeat && self.wait_until_path_unreachable < 0.0 && path_unreachable {
            Some(AbandonReason::PathUnreachable)
        } else {
            None
        };
        if let Some(reason) = verdict {
            self.state.abandon();
            self.reset_steering(ctx.world);
            self.report_cannot_reach(ctx);
            self.push_abandoned(ctx, reason);
            return;
        }

        // Aim at the target in its own frame, then translate into the
        // agent's frame when steering raw vectors. Path steering skips
        // the translation: the pathfinder already works in the shared
        // frame.
        let Some(mut aim) = self.target.local_position(ctx.world) else {
            return;
        };
        if direct_steering {
            let target_vessel = self.target.vessel(ctx.world);
            aim = steering::translate_between_frames(ctx.world, agent_vessel, target_vessel, aim);
        }
        if let Some(agent) = ctx.world.character_mut(self.agent) {
            agent.steering.seek(aim);
        }

        if self.get_diving_gear_if_needed {
            let needs_gear = equipment::needs_diving_gear(ctx.world, target_hull);
            let needs_suit = needs_gear
                && (target_is_outside || equipment::needs_diving_suit(ctx.world, target_hull));
            let missing = if needs_suit {
                !equipment::has_diving_suit(ctx.world, self.agent)
            } else if needs_gear {
                !equipment::has_diving_mask(ctx.world, self.agent)
            } else {
                false
            };
            if missing {
                let agent = self.agent;
                if try_add_sub_objective(&mut self.find_diving_gear, || {
                    FindDivingGear::new(agent, needs_suit)
                }) {
                    tracing::debug!(
                        agent = %self.agent_name(ctx.world),
                        needs_suit,
                        "diving gear needed before moving on"
                    );
                    ctx.events.push(AiEvent::DivingGearNeeded {
                        character: self.agent_name(ctx.world),
                        needs_suit,
                    });
                }
            }
        }
    }

    fn is_completed(&mut self, ctx: &mut AiCtx<'_>) -> bool {
        // Cheapest checks first: the latch, then squared distance,
        // then the custom predicate, then interaction feasibility.
        if self.state == ObjectiveState::Completed {
            return true;
        }
        if self.target.is_removed(ctx.world) {
            self.state.abandon();
            return false;
        }
        let (Some(target_pos), Some(agent_pos)) = (
            self.target.world_position(ctx.world),
            ctx.world.character_world_position(self.agent),
        ) else {
            self.state.abandon();
            return false;
        };
        let close_enough =
            target_pos.distance_squared(&agent_pos) < self.close_enough * self.close_enough;
        if self.repeat {
            if close_enough {
                self.settle(ctx.world, target_pos, agent_pos);
            }
            return false;
        }
        if close_enough
            && self
                .custom_condition
                .as_ref()
                .map_or(true, |cond| cond(ctx.world))
        {
            let reachable = match self.target {
                Target::Item(item) => ctx.world.can_interact_with_item(self.agent, item),
                Target::Character(other) => {
                    ctx.world
                        .can_interact_with_character(self.agent, other, self.close_enough)
                }
                _ => true,
            };
            if reachable {
                self.state.complete();
            }
        }
        if self.state == ObjectiveState::Completed {
            self.settle(ctx.world, target_pos, agent_pos);
            let target = self.target.describe(ctx.world);
            tracing::debug!(
                agent = %self.agent_name(ctx.world),
                %target,
                "goto completed"
            );
            ctx.events.push(AiEvent::ObjectiveCompleted {
                character: self.agent_name(ctx.world),
                objective: self.debug_tag(),
                target,
            });
            true
        } else {
            false
        }
    }

    fn is_duplicate(&self, other: &dyn Objective) -> bool {
        other
            .as_any()
            .downcast_ref::<GoTo>()
            .is_some_and(|o| o.target == self.target)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn sub_objective_mut(&mut self) -> Option<&mut dyn Objective> {
        self.find_diving_gear
            .as_mut()
            .map(|child| child as &mut dyn Objective)
    }
}

impl fmt::Debug for GoTo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoTo")
            .field("agent", &self.agent)
            .field("target", &self.target)
            .field("state", &self.state)
            .field("repeat", &self.repeat)
            .field("close_enough", &self.close_enough)
            .finish_non_exhaustive()
    }
}
