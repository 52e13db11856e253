//! Fixed-step headless runner: plays one level as fast as possible.

use serde::Serialize;
use tracing::info;

use verdant_core::commands::PlayerCommand;
use verdant_core::enums::GamePhase;
use verdant_core::events::GameEvent;
use verdant_core::state::{GameStateSnapshot, Lifecycle};
use verdant_levels::LevelError;
use verdant_sim::SimulationEngine;

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub max_ticks: u64,
    /// Collect every pickup the step after it appears.
    pub auto_collect: bool,
}

/// Event tallies over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub level_id: u32,
    pub ticks: u64,
    pub phase: GamePhase,
    pub attackers_spawned: u32,
    pub attackers_killed: u32,
    pub defenders_placed: u32,
    pub defenders_lost: u32,
    pub shots_fired: u32,
    pub pickups_collected: u32,
    pub pickups_expired: u32,
    pub mowers_used: u32,
}

impl RunSummary {
    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::AttackerSpawned { .. } => self.attackers_spawned += 1,
                GameEvent::AttackerKilled { .. } => self.attackers_killed += 1,
                GameEvent::DefenderPlaced { .. } => self.defenders_placed += 1,
                GameEvent::DefenderRemoved { .. } => self.defenders_lost += 1,
                GameEvent::ProjectileFired { .. } => self.shots_fired += 1,
                GameEvent::ResourceCollected { .. } => self.pickups_collected += 1,
                GameEvent::ResourceExpired { .. } => self.pickups_expired += 1,
                GameEvent::MowerActivated { .. } => self.mowers_used += 1,
                _ => {}
            }
        }
    }
}

/// Start `level_id` and step it until it ends or `max_ticks` run out.
pub fn run_level(
    engine: &mut SimulationEngine,
    level_id: u32,
    options: RunOptions,
) -> Result<(RunSummary, GameStateSnapshot), LevelError> {
    engine.start_level(level_id)?;

    let mut summary = RunSummary {
        level_id,
        ..Default::default()
    };
    let mut snapshot = engine.snapshot();

    for _ in 0..options.max_ticks {
        if options.auto_collect {
            let pickups = snapshot.entities.iter().filter(|view| {
                view.alive && matches!(view.lifecycle, Lifecycle::Pickup { collected: false, .. })
            });
            for view in pickups {
                engine.queue_command(PlayerCommand::CollectResource { entity: view.id });
            }
        }

        snapshot = engine.tick();
        summary.record(&snapshot.events);
        if snapshot.phase.is_terminal() {
            break;
        }
    }

    summary.ticks = snapshot.time.tick;
    summary.phase = snapshot.phase;
    info!(
        level_id,
        ticks = summary.ticks,
        phase = ?summary.phase,
        killed = summary.attackers_killed,
        balance = snapshot.balance,
        "run finished"
    );
    Ok((summary, snapshot))
}
