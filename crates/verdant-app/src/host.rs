//! Host command surface.
//!
//! A renderer or other front end drives the simulation through these
//! functions. They bridge requests to the game loop thread via channels and
//! never touch the engine directly.

use thiserror::Error;
use tracing::info;

use verdant_core::commands::PlayerCommand;
use verdant_core::state::GameStateSnapshot;
use verdant_levels::LevelConfig;
use verdant_sim::SimConfig;

use crate::game_loop::{self, LoopSetup};
use crate::state::{AppState, LoopMessage};

#[derive(Debug, Error)]
pub enum HostError {
    #[error("simulation already running")]
    AlreadyRunning,
    #[error("simulation not started")]
    NotStarted,
    #[error("game loop has stopped")]
    Disconnected,
    #[error("host state lock poisoned")]
    Poisoned,
    #[error("could not spawn the game loop: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Start the simulation. Spawns the game loop thread if not already running.
pub fn start_simulation(
    state: &AppState,
    config: SimConfig,
    levels: Vec<LevelConfig>,
) -> Result<(), HostError> {
    let mut running = state.running.lock().map_err(|_| HostError::Poisoned)?;
    if *running {
        return Err(HostError::AlreadyRunning);
    }

    let (cmd_tx, handle) = game_loop::spawn_game_loop(LoopSetup {
        config,
        levels,
        progress: state.progress.clone(),
        progress_path: state.progress_path.clone(),
        latest_snapshot: state.latest_snapshot.clone(),
    })?;

    *state.command_tx.lock().map_err(|_| HostError::Poisoned)? = Some(cmd_tx);
    *state.loop_handle.lock().map_err(|_| HostError::Poisoned)? = Some(handle);
    *running = true;
    info!("simulation started");
    Ok(())
}

/// Forward a player command to the simulation.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), HostError> {
    let tx_lock = state.command_tx.lock().map_err(|_| HostError::Poisoned)?;
    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(LoopMessage::Player(command))
            .map_err(|_| HostError::Disconnected),
        None => Err(HostError::NotStarted),
    }
}

/// Latest snapshot, for polling and initial state.
pub fn get_snapshot(state: &AppState) -> Result<Option<GameStateSnapshot>, HostError> {
    let lock = state.latest_snapshot.lock().map_err(|_| HostError::Poisoned)?;
    Ok(lock.clone())
}

/// Shut the loop down and wait for the thread to exit.
pub fn stop_simulation(state: &AppState) -> Result<(), HostError> {
    let mut running = state.running.lock().map_err(|_| HostError::Poisoned)?;
    let tx = state
        .command_tx
        .lock()
        .map_err(|_| HostError::Poisoned)?
        .take()
        .ok_or(HostError::NotStarted)?;
    // The loop also exits on disconnect, so a failed send is fine here.
    let _ = tx.send(LoopMessage::Stop);

    let handle = state.loop_handle.lock().map_err(|_| HostError::Poisoned)?.take();
    if let Some(handle) = handle {
        handle.join().map_err(|_| HostError::Disconnected)?;
    }
    *running = false;
    info!("simulation stopped");
    Ok(())
}
