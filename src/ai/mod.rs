//! The objective layer: goal-directed behavior for autonomous crew.
//!
//! Objectives are composable units of behavior (go somewhere, fetch
//! gear) owned by a per-character manager that arbitrates between them
//! by priority. The steering facade is the only way objectives move a
//! character.

pub mod events;
pub mod find_diving_gear;
pub mod go_to;
pub mod manager;
pub mod objective;
pub mod steering;

pub use events::{AbandonReason, AiEvent};
pub use find_diving_gear::FindDivingGear;
pub use go_to::GoTo;
pub use manager::{CrewAi, ObjectiveManager, BASE_PRIORITY, ORDER_PRIORITY};
pub use objective::{drive, try_add_sub_objective, AiCtx, Objective, ObjectiveState};
pub use steering::{PathStatus, SteeringCommand, SteeringController, SteeringMode};
