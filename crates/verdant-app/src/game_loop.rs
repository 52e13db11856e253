//! Game loop thread: feeds wall-clock frames through the tick driver and
//! stores snapshots for polling.
//!
//! The engine is created inside the thread and never leaves it. Commands
//! arrive over an `mpsc` channel. Level completions are folded into the
//! shared progress record (and saved, if a path is configured) and handed
//! back to the engine for the next level setup.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use verdant_core::events::GameEvent;
use verdant_core::state::GameStateSnapshot;
use verdant_levels::{LevelConfig, Progress};
use verdant_sim::{SimConfig, SimulationEngine};

use crate::state::LoopMessage;

/// Upper bound on the sleep between frames.
const FRAME_SLEEP: Duration = Duration::from_millis(4);

/// Everything the loop thread takes ownership of.
pub struct LoopSetup {
    pub config: SimConfig,
    pub levels: Vec<LevelConfig>,
    pub progress: Arc<Mutex<Progress>>,
    pub progress_path: Option<PathBuf>,
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    setup: LoopSetup,
) -> std::io::Result<(mpsc::Sender<LoopMessage>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopMessage>();

    let handle = thread::Builder::new()
        .name("verdant-game-loop".into())
        .spawn(move || run_game_loop(setup, cmd_rx))?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until a Shutdown command or channel disconnect.
fn run_game_loop(setup: LoopSetup, cmd_rx: mpsc::Receiver<LoopMessage>) {
    let LoopSetup {
        config,
        levels,
        progress,
        progress_path,
        latest_snapshot,
    } = setup;

    let initial = match progress.lock() {
        Ok(progress) => progress.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    };
    let mut engine = SimulationEngine::new(config)
        .with_levels(levels.clone())
        .with_progress(initial);

    let progress_changed = Arc::new(AtomicBool::new(false));
    {
        let progress = Arc::clone(&progress);
        let changed = Arc::clone(&progress_changed);
        engine.subscribe(move |event| {
            if let GameEvent::LevelCompleted { level_id } = event {
                if let Ok(mut progress) = progress.lock() {
                    progress.record_completion(*level_id, &levels);
                    changed.store(true, Ordering::Release);
                }
            }
        });
    }

    let mut driver = engine.config().driver();
    driver.start(Instant::now());
    info!("game loop started");

    'frames: loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopMessage::Player(cmd)) => engine.queue_command(cmd),
                Ok(LoopMessage::Stop) | Err(mpsc::TryRecvError::Disconnected) => {
                    break 'frames
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Run whatever steps have accumulated (pause handled by the engine)
        let (report, snapshot) = engine.frame(&mut driver, Instant::now());
        if let Ok(mut lock) = latest_snapshot.lock() {
            match (snapshot, lock.as_mut()) {
                (Some(snapshot), _) => *lock = Some(snapshot),
                (None, Some(latest)) => latest.interpolation = report.interpolation,
                (None, None) => {}
            }
        }

        // 3. Persist unlocks raised during this frame
        if progress_changed.swap(false, Ordering::Acquire) {
            sync_progress(&mut engine, &progress, progress_path.as_deref());
        }

        thread::sleep(driver.step().min(FRAME_SLEEP));
    }

    driver.stop();
    info!(tick = engine.time().tick, "game loop stopped");
}

fn sync_progress(engine: &mut SimulationEngine, progress: &Mutex<Progress>, path: Option<&Path>) {
    let Ok(progress) = progress.lock() else {
        return;
    };
    engine.set_progress(progress.clone());
    debug!(unlocked_level = progress.unlocked_level, "progress updated");

    if let Some(path) = path {
        if let Err(error) = progress.save(path) {
            warn!(path = %path.display(), %error, "could not save progress");
        }
    }
}
