//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world and all level-scoped state,
//! processes player commands, runs the system pipeline once per fixed step,
//! and produces `GameStateSnapshot`s. Completely headless, enabling
//! deterministic testing.

use std::collections::VecDeque;
use std::time::Instant;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, trace};

use verdant_core::commands::PlayerCommand;
use verdant_core::constants::{COOLDOWN_BROADCAST_SECS, DT, MAX_FRAME_SECS};
use verdant_core::enums::{DefenderKind, GamePhase};
use verdant_core::events::GameEvent;
use verdant_core::state::GameStateSnapshot;
use verdant_core::types::{GridCell, SimTime};
use verdant_levels::{builtin_levels, LevelConfig, LevelError, Progress};

use crate::channel::{EventChannel, SubscriptionId};
use crate::clock::{FrameReport, TickDriver};
use crate::economy::LevelSession;
use crate::gateway::{self, ActionError};
use crate::systems;
use crate::world_setup::{self, entity_from_id};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Fixed step size in seconds.
    pub step_secs: f64,
    /// Longest wall-clock frame absorbed by the tick driver.
    pub max_frame_secs: f64,
    /// Minimum interval between cooldown broadcasts.
    pub cooldown_broadcast_secs: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            step_secs: DT,
            max_frame_secs: MAX_FRAME_SECS,
            cooldown_broadcast_secs: COOLDOWN_BROADCAST_SECS,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config json")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f64 },
}

impl SimConfig {
    /// Parse and validate. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("step_secs", self.step_secs),
            ("max_frame_secs", self.max_frame_secs),
            ("cooldown_broadcast_secs", self.cooldown_broadcast_secs),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        Ok(())
    }

    /// A tick driver matching this config's step and frame clamp.
    pub fn driver(&self) -> TickDriver {
        TickDriver::new(self.step_secs, self.max_frame_secs)
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    config: SimConfig,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    /// Events raised since the last publish.
    events: Vec<GameEvent>,
    channel: EventChannel,
    levels: Vec<LevelConfig>,
    progress: Option<Progress>,
    /// Present while a level is loaded (playing, paused, or finished).
    session: Option<LevelSession>,
}

impl SimulationEngine {
    /// Create a new engine in the menu phase with the built-in level catalog.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            channel: EventChannel::new(),
            levels: builtin_levels(),
            progress: None,
            session: None,
        }
    }

    /// Replace the level catalog.
    pub fn with_levels(mut self, levels: Vec<LevelConfig>) -> Self {
        self.levels = levels;
        self
    }

    /// Restrict rosters to what `progress` has unlocked.
    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Replace the unlock record. Takes effect at the next level setup.
    pub fn set_progress(&mut self, progress: Progress) {
        self.progress = Some(progress);
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Apply queued commands now without stepping.
    pub fn apply_pending(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Advance the simulation by one step and return the resulting snapshot.
    ///
    /// Queued commands are applied first. Systems only run while Playing.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.apply_pending();

        if self.phase == GamePhase::Playing {
            self.run_systems();
            self.time.advance(self.config.step_secs);
            trace!(tick = self.time.tick, "step");
        }

        self.publish()
    }

    /// Run one host frame through `driver`.
    ///
    /// The snapshot is that of the last step taken, or of the command
    /// results if no step ran but something happened. It carries the
    /// report's interpolation fraction.
    pub fn frame(
        &mut self,
        driver: &mut TickDriver,
        now: Instant,
    ) -> (FrameReport, Option<GameStateSnapshot>) {
        self.apply_pending();

        match (self.phase == GamePhase::Paused, driver.is_paused()) {
            (true, false) => driver.pause(),
            (false, true) => driver.resume(now),
            _ => {}
        }

        let mut latest = None;
        let report = driver.frame(now, || latest = Some(self.tick()));

        if latest.is_none() && !self.events.is_empty() {
            latest = Some(self.publish());
        }
        if let Some(snapshot) = latest.as_mut() {
            snapshot.interpolation = report.interpolation;
        }
        (report, latest)
    }

    /// Current visible state, without consuming pending events.
    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.session.as_ref(),
            Vec::new(),
        )
    }

    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + Send + 'static,
    {
        self.channel.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.channel.unsubscribe(id)
    }

    // --- Level flow ---

    /// Set up level `level_id` from the catalog and start playing.
    pub fn start_level(&mut self, level_id: u32) -> Result<(), LevelError> {
        let level = self
            .levels
            .iter()
            .find(|level| level.id == level_id)
            .cloned()
            .ok_or(LevelError::UnknownLevel(level_id))?;
        self.setup_level(level);
        Ok(())
    }

    /// Tear down and set up the current level again.
    pub fn restart_level(&mut self) -> bool {
        let Some(level) = self.session.as_ref().map(|s| s.level.clone()) else {
            debug!("restart ignored, no level loaded");
            return false;
        };
        info!(level_id = level.id, "level restarted");
        self.setup_level(level);
        true
    }

    /// Abandon the current level.
    pub fn return_to_menu(&mut self) {
        self.world.clear();
        self.despawn_buffer.clear();
        self.session = None;
        self.time = SimTime::default();
        self.set_phase(GamePhase::Menu);
        info!("returned to menu");
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.set_phase(GamePhase::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        self.set_phase(GamePhase::Playing);
        true
    }

    // --- Player actions ---

    pub fn place_defender(&mut self, kind: DefenderKind, cell: GridCell) -> Result<Entity, ActionError> {
        let Some(session) = self.session.as_mut() else {
            return Err(ActionError::NotPlaying);
        };
        gateway::place_defender(&mut self.world, session, self.phase, kind, cell, &mut self.events)
    }

    /// Collect a pickup by its snapshot id.
    pub fn collect_resource(&mut self, id: u64) -> Result<(), ActionError> {
        let entity = entity_from_id(id).ok_or(ActionError::NotAPickup)?;
        gateway::collect_resource(&mut self.world, self.phase, entity, &mut self.events)
    }

    pub fn remove_defender(&mut self, cell: GridCell) -> Result<Entity, ActionError> {
        let Some(session) = self.session.as_mut() else {
            return Err(ActionError::NotPlaying);
        };
        gateway::remove_defender(
            &mut self.world,
            session,
            self.phase,
            self.time.tick,
            cell,
            &mut self.events,
        )
    }

    // --- Accessors ---

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for scenario setup.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn balance(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.balance)
    }

    pub fn level_id(&self) -> Option<u32> {
        self.session.as_ref().map(LevelSession::level_id)
    }

    pub fn session(&self) -> Option<&LevelSession> {
        self.session.as_ref()
    }

    pub fn levels(&self) -> &[LevelConfig] {
        &self.levels
    }

    // --- Internals ---

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartLevel { level_id } => {
                if let Err(error) = self.start_level(level_id) {
                    debug!(level_id, %error, "start rejected");
                }
            }
            PlayerCommand::RestartLevel => {
                self.restart_level();
            }
            PlayerCommand::ReturnToMenu => self.return_to_menu(),
            PlayerCommand::Pause => {
                self.pause();
            }
            PlayerCommand::Resume => {
                self.resume();
            }
            PlayerCommand::PlaceDefender { kind, row, col } => {
                if let Err(error) = self.place_defender(kind, GridCell::new(row, col)) {
                    debug!(?kind, row, col, %error, "placement rejected");
                }
            }
            PlayerCommand::CollectResource { entity } => {
                if let Err(error) = self.collect_resource(entity) {
                    debug!(entity, %error, "collection rejected");
                }
            }
            PlayerCommand::RemoveDefender { row, col } => {
                if let Err(error) = self.remove_defender(GridCell::new(row, col)) {
                    debug!(row, col, %error, "removal rejected");
                }
            }
        }
    }

    /// Clear everything level-scoped and build `level` from scratch.
    fn setup_level(&mut self, level: LevelConfig) {
        self.world.clear();
        self.despawn_buffer.clear();
        self.time = SimTime::default();
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);

        let mut roster = match &self.progress {
            Some(progress) => progress.roster_for(&level),
            None => level.roster.clone(),
        };
        if roster.is_empty() {
            debug!(level_id = level.id, "nothing unlocked, offering full roster");
            roster = level.roster.clone();
        }

        info!(
            level_id = level.id,
            name = %level.name,
            balance = level.initial_balance,
            waves = level.waves.len(),
            "level started"
        );

        let session = LevelSession::new(level, roster, self.config.cooldown_broadcast_secs);
        let balance = session.balance;
        let total = session.waves.total_waves;
        self.session = Some(session);

        world_setup::spawn_mowers(&mut self.world);

        self.events.push(GameEvent::BalanceChanged { balance });
        self.set_phase(GamePhase::Playing);
        self.events.push(GameEvent::WaveProgress { current: 0, total });
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase == phase {
            return;
        }
        debug!(from = ?self.phase, to = ?phase, "phase change");
        self.phase = phase;
        self.events.push(GameEvent::PhaseChanged { phase });
    }

    /// Run the system pipeline for one step.
    fn run_systems(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let dt = self.config.step_secs;
        let tick = self.time.tick;
        let events = &mut self.events;

        // 1. Spawn: sky drops and the wave plan
        systems::spawn::run(
            &mut self.world,
            &mut self.rng,
            &mut session.waves,
            &session.level.waves,
            dt,
            events,
        );

        // 2. Win/lose, before anything this step can change the outcome
        systems::outcome::run(
            &self.world,
            &mut self.phase,
            &session.waves,
            session.level.id,
            events,
        );
        if self.phase != GamePhase::Playing {
            return;
        }

        // 3. Behavior
        systems::defender::run(
            &mut self.world,
            &mut self.rng,
            &mut session.occupancy,
            &mut session.pending_shots,
            dt,
            tick,
            events,
        );
        systems::attacker::run(&mut self.world, dt, tick, events);

        // 4. Projectile lifetime, then movement
        systems::projectile::run(&mut self.world, tick);
        systems::movement::run(&mut self.world, dt);

        // 5. Hits and triggers, then deaths
        systems::collision::run(&mut self.world, tick, events);
        systems::combat::run(&mut self.world, &mut session.occupancy, tick, events);

        // 6. Economy and bookkeeping
        systems::resource::run(&mut self.world, &mut session.balance, dt, tick, events);
        systems::cooldown::run(&mut session.cooldowns, dt, events);

        // 7. Cleanup last so every system above still sees this step's dead
        systems::cleanup::run(&mut self.world, dt, tick, &mut self.despawn_buffer);
    }

    /// Hand pending events to subscribers and fold them into a snapshot.
    fn publish(&mut self) -> GameStateSnapshot {
        let events = std::mem::take(&mut self.events);
        self.channel.publish_all(&events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.session.as_ref(),
            events,
        )
    }
}
