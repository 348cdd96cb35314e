//! Tidehollow - objective-driven crew navigation for flooded vessels
//!
//! A tick-driven simulation core: autonomous characters aboard
//! independently-moving vessels pursue go-to objectives across hulls
//! that can flood, fetching diving gear first when the destination is
//! not survivable. See `ai::go_to` for the heart of the crate.

pub mod ai;
pub mod core;
pub mod simulation;
pub mod world;
