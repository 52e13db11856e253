//! Spawn system: the wave state machine plus periodic sky drops.
//!
//! Per wave: Delaying (count up to the wave delay) → Spawning (groups in
//! order; within a group the first unit spawns immediately, the rest one
//! interval apart) → WaveComplete (advance and report progress). Sky drops
//! run on their own timer regardless of wave state.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use verdant_core::constants::{GRID_ROWS, SKY_DROP_FIRST_SECS, SKY_DROP_INTERVAL_SECS};
use verdant_core::events::GameEvent;
use verdant_core::types::Position;
use verdant_levels::WaveConfig;

use crate::world_setup::{self, entity_id};

/// Progress through a level's wave plan.
#[derive(Debug, Clone, Default)]
pub struct WaveState {
    /// Index of the wave being delayed or spawned. Equals the number of
    /// completed waves.
    pub wave_index: usize,
    pub total_waves: usize,
    pub all_spawned: bool,
    pub delay_timer: f64,
    pub spawn_timer: f64,
    pub group_index: usize,
    pub group_spawned: u32,
    /// Attackers spawned over the whole level.
    pub spawned_total: u32,
    /// Seconds until the next sky drop.
    pub sky_drop_timer: f64,
}

impl WaveState {
    pub fn new(total_waves: usize) -> Self {
        Self {
            total_waves,
            sky_drop_timer: SKY_DROP_FIRST_SECS,
            ..Default::default()
        }
    }
}

/// Advance sky drops and the wave plan by one step.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    state: &mut WaveState,
    waves: &[WaveConfig],
    dt: f64,
    events: &mut Vec<GameEvent>,
) {
    run_sky_drops(world, rng, state, dt, events);
    run_waves(world, rng, state, waves, dt, events);
}

fn run_sky_drops(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    state: &mut WaveState,
    dt: f64,
    events: &mut Vec<GameEvent>,
) {
    state.sky_drop_timer -= dt;
    if state.sky_drop_timer > 0.0 {
        return;
    }
    state.sky_drop_timer = SKY_DROP_INTERVAL_SECS;

    let entity = world_setup::spawn_sky_pickup(world, rng);
    if let Ok(pos) = world.get::<&Position>(entity) {
        events.push(GameEvent::ResourceProduced {
            entity: entity_id(entity),
            x: pos.x,
            y: pos.y,
            from_sky: true,
        });
    }
}

fn run_waves(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    state: &mut WaveState,
    waves: &[WaveConfig],
    dt: f64,
    events: &mut Vec<GameEvent>,
) {
    if state.all_spawned {
        return;
    }

    let Some(wave) = waves.get(state.wave_index) else {
        state.all_spawned = true;
        debug!(spawned = state.spawned_total, "all waves spawned");
        return;
    };

    // Delaying
    if state.delay_timer < wave.delay_secs {
        state.delay_timer += dt;
        return;
    }

    // WaveComplete
    let Some(group) = wave.groups.get(state.group_index) else {
        state.wave_index += 1;
        state.delay_timer = 0.0;
        state.spawn_timer = 0.0;
        state.group_index = 0;
        state.group_spawned = 0;
        debug!(wave = state.wave_index, total = state.total_waves, "wave complete");
        events.push(GameEvent::WaveProgress {
            current: state.wave_index,
            total: state.total_waves,
        });
        return;
    };

    // Spawning
    state.spawn_timer += dt;
    if state.group_spawned > 0 && state.spawn_timer < group.interval_secs {
        return;
    }
    state.spawn_timer = 0.0;

    let row = rng.gen_range(0..GRID_ROWS);
    let entity = world_setup::spawn_attacker(world, group.kind, row);
    events.push(GameEvent::AttackerSpawned {
        entity: entity_id(entity),
        kind: group.kind,
        row,
    });

    state.group_spawned += 1;
    state.spawned_total += 1;
    if state.group_spawned >= group.count {
        state.group_index += 1;
        state.group_spawned = 0;
        state.spawn_timer = 0.0;
    }
}
