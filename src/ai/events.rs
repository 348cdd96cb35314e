//! Structured events emitted by the AI during a tick.
//!
//! Objectives never print; they push events and the caller decides
//! what to do with them (log, display, assert in tests).

use serde::Serialize;

/// Why an objective gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AbandonReason {
    /// The target entity no longer exists in the world.
    TargetRemoved,
    /// The objective resolved to the agent itself.
    SelfTarget,
    /// The destination is outdoors and the objective may not leave the
    /// vessel.
    TargetOutside,
    /// The pathfinder flagged the route unreachable and the grace
    /// period ran out.
    PathUnreachable,
    /// Following the controlled character, but nobody is controlled.
    NoControlledCharacter,
    /// No diving gear of the required kind exists to fetch.
    NoGearAvailable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AiEvent {
    /// An objective latched completion.
    ObjectiveCompleted {
        character: String,
        objective: &'static str,
        target: String,
    },
    /// An objective gave up and expects to be dropped by its manager.
    ObjectiveAbandoned {
        character: String,
        objective: &'static str,
        target: String,
        reason: AbandonReason,
    },
    /// A navigation target was judged unreachable. Emitted alongside
    /// the abandonment so observers don't have to infer it.
    CannotReach { character: String, target: String },
    /// The destination demands breathing gear the agent doesn't carry;
    /// a fetch sub-objective was spawned.
    DivingGearNeeded { character: String, needs_suit: bool },
    /// A character said a line out loud (already throttled).
    Spoke { character: String, line: String },
}
