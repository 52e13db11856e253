//! Win/lose check. Runs before any behavior so this step's actions cannot
//! retroactively undo a terminal condition.

use hecs::World;
use tracing::info;

use verdant_core::components::AttackerState;
use verdant_core::constants::LOSE_LINE_X;
use verdant_core::enums::{AttackerPhase, GamePhase};
use verdant_core::events::GameEvent;
use verdant_core::types::Position;

use super::spawn::WaveState;

/// Transition to Lost or Won at most once. A no-op unless `phase` is Playing.
pub fn run(
    world: &World,
    phase: &mut GamePhase,
    waves: &WaveState,
    level_id: u32,
    events: &mut Vec<GameEvent>,
) {
    if *phase != GamePhase::Playing {
        return;
    }

    let breached = world
        .query::<(&AttackerState, &Position)>()
        .iter()
        .any(|(_, (state, pos))| state.phase.is_active() && pos.x < LOSE_LINE_X);
    if breached {
        *phase = GamePhase::Lost;
        info!(level_id, "level lost");
        events.push(GameEvent::PhaseChanged {
            phase: GamePhase::Lost,
        });
        events.push(GameEvent::LevelFailed { level_id });
        return;
    }

    if !waves.all_spawned {
        return;
    }
    let remaining = world
        .query::<&AttackerState>()
        .iter()
        .filter(|(_, state)| state.phase != AttackerPhase::Removed)
        .count();
    if remaining == 0 {
        *phase = GamePhase::Won;
        info!(level_id, "level won");
        events.push(GameEvent::PhaseChanged {
            phase: GamePhase::Won,
        });
        events.push(GameEvent::LevelCompleted { level_id });
    }
}
