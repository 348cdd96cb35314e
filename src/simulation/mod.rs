//! Per-tick orchestration of the crew AI.

pub mod tick;

pub use tick::run_ai_tick;
