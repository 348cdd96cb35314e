//! Headless crew navigation runner
//!
//! Loads a scenario, orders a character to a target item, and runs the
//! AI tick loop. Locomotion is outside this crate, so the runner
//! emulates it by sliding each character along its current seek
//! command at a fixed speed. Prints the event stream as text or a JSON
//! summary.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use tidehollow::ai::{AiEvent, CrewAi, GoTo, SteeringCommand};
use tidehollow::core::config::SimulationConfig;
use tidehollow::core::error::{Result, SimError};
use tidehollow::core::types::CharacterId;
use tidehollow::simulation::run_ai_tick;
use tidehollow::world::{loader, Target, World};

/// Headless crew navigation runner
#[derive(Parser, Debug)]
#[command(name = "crew_sim")]
#[command(about = "Order a crew member to a target and watch the navigation AI run")]
struct Args {
    /// Scenario file to load
    #[arg(long, default_value = "data/scenarios/flooded_deck.toml")]
    scenario: PathBuf,

    /// Name of the character to order
    #[arg(long, default_value = "Mara")]
    character: String,

    /// Name of the item the character is ordered to reach
    #[arg(long, default_value = "bilge pump")]
    target: String,

    /// Maximum ticks before giving up
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Simulation seconds per tick
    #[arg(long, default_value_t = 0.1)]
    dt: f32,

    /// Emulated walking speed (world units per second)
    #[arg(long, default_value_t = 80.0)]
    speed: f32,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,
}

/// JSON output structure
#[derive(Serialize)]
struct RunResult {
    scenario: String,
    character: String,
    target: String,
    ticks_run: u32,
    completed: bool,
    abandoned: bool,
    events: Vec<AiEvent>,
}

/// Stand-in for the locomotion layer: every character with a pending
/// seek command walks straight toward the aim point.
fn emulate_locomotion(world: &mut World, dt: f32, speed: f32) {
    for id in world.character_ids() {
        let Some(character) = world.character(id) else {
            continue;
        };
        let SteeringCommand::Seek(aim) = character.steering.command() else {
            continue;
        };
        let pos = character.position;
        let delta = aim - pos;
        let distance = delta.length();
        if distance < 0.001 {
            continue;
        }
        let step = (speed * dt).min(distance);
        let next = pos + delta.normalize() * step;
        world.move_character(id, next);
    }
}

fn order_finished(events: &[AiEvent], character: &str) -> (bool, bool) {
    let completed = events.iter().any(|e| {
        matches!(e, AiEvent::ObjectiveCompleted { character: c, objective, .. }
            if c == character && *objective == "go to")
    });
    let abandoned = events.iter().any(|e| {
        matches!(e, AiEvent::ObjectiveAbandoned { character: c, objective, .. }
            if c == character && *objective == "go to")
    });
    (completed, abandoned)
}

fn run(args: &Args) -> Result<RunResult> {
    let mut world = loader::load_scenario(&args.scenario)?;
    let config = SimulationConfig::default();

    let agent: CharacterId = world
        .character_by_name(&args.character)
        .ok_or_else(|| SimError::UnknownCharacter(args.character.clone()))?;
    let item = world
        .item_by_name(&args.target)
        .ok_or_else(|| SimError::UnknownItem(args.target.clone()))?;

    let mut crew = CrewAi::new();
    crew.manager_mut(agent).set_order(Box::new(GoTo::new(
        agent,
        Target::Item(item),
        &world,
        &config,
    )));
    tracing::info!(character = %args.character, target = %args.target, "order issued");

    let text = args.format == "text";
    let mut all_events = Vec::new();
    let mut ticks_run = 0;
    let mut completed = false;
    let mut abandoned = false;

    for tick in 0..args.ticks {
        let events = run_ai_tick(&mut world, &mut crew, &config, args.dt);
        emulate_locomotion(&mut world, args.dt, args.speed);
        if text {
            for event in &events {
                println!("[{tick:4}] {event:?}");
            }
        }
        let (done, gave_up) = order_finished(&events, &args.character);
        all_events.extend(events);
        ticks_run = tick + 1;
        if done || gave_up {
            completed = done;
            abandoned = gave_up;
            break;
        }
    }

    Ok(RunResult {
        scenario: args.scenario.display().to_string(),
        character: args.character.clone(),
        target: args.target.clone(),
        ticks_run,
        completed,
        abandoned,
        events: all_events,
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(result) => {
            if args.format == "json" {
                match serde_json::to_string_pretty(&result) {
                    Ok(json) => println!("{json}"),
                    Err(e) => eprintln!("Failed to serialize result: {e}"),
                }
            } else {
                let outcome = if result.completed {
                    "arrived"
                } else if result.abandoned {
                    "gave up"
                } else {
                    "timed out"
                };
                println!(
                    "{} -> {}: {} after {} ticks ({} events)",
                    result.character,
                    result.target,
                    outcome,
                    result.ticks_run,
                    result.events.len()
                );
            }
        }
        Err(e) => {
            eprintln!("crew_sim failed: {e}");
            std::process::exit(1);
        }
    }
}
