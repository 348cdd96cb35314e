//! Tick system - advances the crew AI one simulation step.
//!
//! Each tick advances the world clock and runs every autonomous
//! character's objective manager exactly once, in ascending character
//! id order so runs are deterministic. The structured events produced
//! along the way are returned to the caller, which decides what to
//! log, display, or assert.

use crate::ai::events::AiEvent;
use crate::ai::manager::CrewAi;
use crate::core::config::SimulationConfig;
use crate::world::World;

/// Runs one AI tick over the whole crew. `dt` is simulation seconds.
///
/// The player-controlled character and the dead are skipped: neither
/// is driven by objectives.
pub fn run_ai_tick(
    world: &mut World,
    crew: &mut CrewAi,
    config: &SimulationConfig,
    dt: f32,
) -> Vec<AiEvent> {
    world.advance(dt);
    let mut events = Vec::new();

    for id in world.character_ids() {
        if world.controlled() == Some(id) {
            continue;
        }
        if world.character(id).is_some_and(|c| c.is_dead) {
            continue;
        }
        crew.manager_mut(id).tick(world, config, dt, &mut events);
    }

    if !events.is_empty() {
        tracing::debug!(tick = world.tick(), count = events.len(), "ai events");
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::go_to::GoTo;
    use crate::ai::steering::SteeringCommand;
    use crate::core::types::{Rect, Vec2};
    use crate::world::Target;

    #[test]
    fn test_tick_advances_clock() {
        let mut world = World::new();
        let mut crew = CrewAi::new();
        let config = SimulationConfig::default();
        run_ai_tick(&mut world, &mut crew, &config, 0.25);
        run_ai_tick(&mut world, &mut crew, &config, 0.25);
        assert_eq!(world.tick(), 2);
        assert!((world.time() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_controlled_character_is_skipped() {
        let mut world = World::new();
        let vessel = world.spawn_vessel("Nereid", Vec2::ZERO);
        world.spawn_hull(vessel, "deck", Rect::new(0.0, 0.0, 600.0, 200.0));
        let agent = world.spawn_character("Mara", Some(vessel), Vec2::new(20.0, 100.0));
        let mark = world.spawn_waypoint("mark", Some(vessel), Vec2::new(500.0, 100.0));
        let config = SimulationConfig::default();

        let mut crew = CrewAi::new();
        crew.manager_mut(agent).set_order(Box::new(GoTo::new(
            agent,
            Target::Waypoint(mark),
            &world,
            &config,
        )));

        world.set_controlled(Some(agent));
        run_ai_tick(&mut world, &mut crew, &config, 0.1);
        assert_eq!(
            world.character(agent).unwrap().steering.command(),
            SteeringCommand::Idle
        );

        world.set_controlled(None);
        run_ai_tick(&mut world, &mut crew, &config, 0.1);
        assert_eq!(
            world.character(agent).unwrap().steering.command(),
            SteeringCommand::Seek(Vec2::new(500.0, 100.0))
        );
    }

    #[test]
    fn test_dead_character_is_skipped() {
        let mut world = World::new();
        let vessel = world.spawn_vessel("Nereid", Vec2::ZERO);
        world.spawn_hull(vessel, "deck", Rect::new(0.0, 0.0, 600.0, 200.0));
        let agent = world.spawn_character("Mara", Some(vessel), Vec2::new(20.0, 100.0));
        let mark = world.spawn_waypoint("mark", Some(vessel), Vec2::new(500.0, 100.0));
        let config = SimulationConfig::default();

        let mut crew = CrewAi::new();
        crew.manager_mut(agent).set_order(Box::new(GoTo::new(
            agent,
            Target::Waypoint(mark),
            &world,
            &config,
        )));
        world.character_mut(agent).unwrap().is_dead = true;
        run_ai_tick(&mut world, &mut crew, &config, 0.1);
        assert_eq!(
            world.character(agent).unwrap().steering.command(),
            SteeringCommand::Idle
        );
    }
}
