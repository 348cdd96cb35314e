//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

/// Configuration for the crew navigation systems
///
/// These values have been tuned against crew behavior inside multi-hull
/// vessels. Changing them affects how patient an agent is with a bad path
/// and how close it parks to its destinations.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    // === NAVIGATION ===
    /// Default arrival threshold for go-to objectives (world units)
    ///
    /// An agent within this distance of its target counts as arrived,
    /// unless the target is an item with a larger interaction range, in
    /// which case the threshold is raised at construction
    /// (see `interact_margin`).
    pub default_close_enough: f32,

    /// Fraction of an item's interaction distance used as the arrival floor
    ///
    /// At 0.9, the agent stops slightly inside the range at which it can
    /// actually operate the item, so arrival never strands it just out of
    /// reach.
    pub interact_margin: f32,

    /// Seconds a non-repeating objective tolerates an invalid path
    ///
    /// The countdown starts at construction. Once it expires, a path the
    /// pathfinder flags as unreachable abandons the objective. Two seconds
    /// is long enough to survive a path recomputation mid-route.
    pub path_unreachable_timeout: f32,

    // === NOTIFICATIONS ===
    /// Minimum seconds between repeated "cannot reach" lines per agent
    ///
    /// Keeps an agent stuck against a sealed bulkhead from repeating the
    /// same complaint every tick.
    pub cannot_reach_interval: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            // Navigation
            default_close_enough: 50.0,
            interact_margin: 0.9,
            path_unreachable_timeout: 2.0,

            // Notifications
            cannot_reach_interval: 10.0,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.interact_margin) {
            return Err(format!(
                "interact_margin ({}) must be within 0.0..=1.0",
                self.interact_margin
            ));
        }

        if self.default_close_enough <= 0.0 {
            return Err("default_close_enough must be positive".into());
        }

        if self.path_unreachable_timeout < 0.0 {
            return Err("path_unreachable_timeout must not be negative".into());
        }

        Ok(())
    }
}
