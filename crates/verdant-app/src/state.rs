//! What the host keeps between calls: the line into the loop thread, the
//! thread itself, and the two values the thread writes back (the newest
//! snapshot and the unlock record).

use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use verdant_core::commands::PlayerCommand;
use verdant_core::state::GameStateSnapshot;
use verdant_levels::Progress;

/// Messages the loop thread drains at the top of each frame.
#[derive(Debug)]
pub enum LoopMessage {
    Player(PlayerCommand),
    /// Leave the loop after this frame's drain.
    Stop,
}

/// Host-side handles for one simulation thread.
///
/// Every field is lock-guarded so a front end can hold `AppState` behind a
/// shared reference from any thread.
pub struct AppState {
    /// Set by `start_simulation`, taken by `stop_simulation`.
    pub command_tx: Mutex<Option<mpsc::Sender<LoopMessage>>>,
    pub loop_handle: Mutex<Option<JoinHandle<()>>>,
    /// Written by the loop whenever a frame yields a snapshot.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    /// Folded forward by the loop when a level is completed, then re-read by
    /// the engine at its next level setup.
    pub progress: Arc<Mutex<Progress>>,
    pub progress_path: Option<PathBuf>,
    pub running: Mutex<bool>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_progress(Progress::default(), None)
    }

    /// Host state that starts from a saved unlock record and writes changes
    /// back to `path`.
    pub fn with_progress(progress: Progress, path: Option<PathBuf>) -> Self {
        Self {
            command_tx: Mutex::new(None),
            loop_handle: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            progress: Arc::new(Mutex::new(progress)),
            progress_path: path,
            running: Mutex::new(false),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_fresh_state_has_no_loop() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.loop_handle.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(!*state.running.lock().unwrap());
        assert_eq!(*state.progress.lock().unwrap(), Progress::default());
    }

    #[test]
    fn test_saved_progress_is_carried() {
        let progress = Progress {
            unlocked_level: 3,
            ..Progress::default()
        };
        let state = AppState::with_progress(progress.clone(), Some(PathBuf::from("save.json")));
        assert_eq!(*state.progress.lock().unwrap(), progress);
        assert_eq!(state.progress_path.as_deref(), Some(Path::new("save.json")));
    }
}
