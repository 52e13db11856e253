//! Entity spawn factories for the simulation world.
//!
//! Each factory attaches exactly the component bundle its entity type needs,
//! so entities are never partially constructed mid-step.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use verdant_core::components::*;
use verdant_core::constants::*;
use verdant_core::enums::*;
use verdant_core::types::{column_of, lane_center_y, GridCell, Position};
use verdant_roster::profiles::{attacker_stats, defender_stats};

fn tag(kind: EntityKind) -> EntityTag {
    EntityTag {
        kind,
        alive: true,
        removal_tick: 0,
    }
}

/// One idle mower at the left end of every lane.
pub fn spawn_mowers(world: &mut World) {
    for row in 0..GRID_ROWS {
        spawn_mower(world, row);
    }
}

pub fn spawn_mower(world: &mut World, row: usize) -> Entity {
    world.spawn((
        tag(EntityKind::Mower),
        Position::new(MOWER_X, lane_center_y(row), MOWER_WIDTH, MOWER_HEIGHT),
        GridCell::new(row, -1),
        Kinetics {
            speed: 0.0,
            base_speed: MOWER_SPEED,
            dx: 1.0,
            dy: 0.0,
        },
        MowerState::default(),
    ))
}

/// Spawn a defender centred in `cell`. Occupancy is the caller's job.
pub fn spawn_defender(world: &mut World, kind: DefenderKind, cell: GridCell) -> Entity {
    let stats = defender_stats(kind);
    let (x, y) = cell.center();
    world.spawn((
        tag(EntityKind::Defender),
        Position::new(x, y, DEFENDER_WIDTH, DEFENDER_HEIGHT),
        cell,
        Vitality {
            health: stats.health,
            max_health: stats.health,
            armor: 0.0,
            max_armor: 0.0,
        },
        DefenderState {
            kind,
            phase: DefenderPhase::Idle,
            action_timer: 0.0,
            action_interval: stats.action_interval,
        },
    ))
}

/// Spawn an attacker at the right edge of `row`.
pub fn spawn_attacker(world: &mut World, kind: AttackerKind, row: usize) -> Entity {
    spawn_attacker_at(world, kind, row, ATTACKER_SPAWN_X)
}

pub fn spawn_attacker_at(world: &mut World, kind: AttackerKind, row: usize, x: f64) -> Entity {
    let stats = attacker_stats(kind);
    world.spawn((
        tag(EntityKind::Attacker),
        Position::new(x, lane_center_y(row), ATTACKER_WIDTH, ATTACKER_HEIGHT),
        GridCell::new(row, column_of(x)),
        Vitality {
            health: stats.health,
            max_health: stats.health,
            armor: stats.armor,
            max_armor: stats.armor,
        },
        Kinetics {
            speed: stats.speed,
            base_speed: stats.speed,
            dx: -1.0,
            dy: 0.0,
        },
        MeleeAttack {
            damage: stats.damage,
            interval: stats.attack_interval,
            timer: 0.0,
        },
        AttackerState {
            kind,
            phase: AttackerPhase::Advancing,
            has_leaped: false,
            armor_broken: false,
            slow_remaining: 0.0,
            dying_elapsed: 0.0,
        },
    ))
}

/// Spawn a projectile travelling right along `row`.
pub fn spawn_projectile(world: &mut World, x: f64, y: f64, row: usize, chill: bool) -> Entity {
    world.spawn((
        tag(EntityKind::Projectile),
        Position::new(x, y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
        GridCell::new(row, column_of(x)),
        Kinetics {
            speed: PROJECTILE_SPEED,
            base_speed: PROJECTILE_SPEED,
            dx: 1.0,
            dy: 0.0,
        },
        ProjectileState {
            damage: PROJECTILE_DAMAGE,
            chill,
            chill_secs: if chill { CHILL_DURATION_SECS } else { 0.0 },
        },
    ))
}

/// Pickup dropped by a producer. It lands where it appears.
pub fn spawn_producer_pickup(world: &mut World, rng: &mut ChaCha8Rng, x: f64, y: f64) -> Entity {
    let px = x + rng.gen_range(-PRODUCER_DROP_SCATTER_X..=PRODUCER_DROP_SCATTER_X);
    let py = y + PRODUCER_DROP_OFFSET_Y;
    spawn_pickup(world, px, py, py, 0.0)
}

/// Pickup falling from above the playfield to a random landing height.
pub fn spawn_sky_pickup(world: &mut World, rng: &mut ChaCha8Rng) -> Entity {
    let x = rng.gen_range(SKY_DROP_MIN_X..SKY_DROP_MAX_X);
    let landing_y = rng.gen_range(SKY_DROP_MIN_LANDING_Y..SKY_DROP_MAX_LANDING_Y);
    spawn_pickup(world, x, SKY_DROP_START_Y, landing_y, SKY_DROP_FALL_SPEED)
}

fn spawn_pickup(world: &mut World, x: f64, y: f64, landing_y: f64, fall_speed: f64) -> Entity {
    world.spawn((
        tag(EntityKind::Pickup),
        Position::new(x, y, PICKUP_WIDTH, PICKUP_HEIGHT),
        Kinetics {
            speed: fall_speed,
            base_speed: fall_speed,
            dx: 0.0,
            dy: 1.0,
        },
        PickupState {
            value: PICKUP_VALUE,
            lifetime_remaining: PICKUP_LIFETIME_SECS,
            collected: false,
            landing_y,
            landed: y >= landing_y,
            flight_target: None,
        },
    ))
}

/// Cosmetic remnant that drifts upward from a dying attacker.
pub fn spawn_remnant(world: &mut World, x: f64, y: f64) -> Entity {
    world.spawn((
        tag(EntityKind::Effect),
        Position::new(x, y - 30.0, REMNANT_WIDTH, REMNANT_HEIGHT),
        Kinetics {
            speed: REMNANT_RISE_SPEED,
            base_speed: REMNANT_RISE_SPEED,
            dx: 0.0,
            dy: -1.0,
        },
        TransientEffect {
            duration: REMNANT_EFFECT_SECS,
            elapsed: 0.0,
        },
    ))
}

/// Stationary blast effect covering three cells.
pub fn spawn_explosion(world: &mut World, x: f64, y: f64) -> Entity {
    world.spawn((
        tag(EntityKind::Effect),
        Position::new(x, y, CELL_WIDTH * 3.0, CELL_HEIGHT * 3.0),
        TransientEffect {
            duration: EXPLOSION_EFFECT_SECS,
            elapsed: 0.0,
        },
    ))
}

/// Opaque id used on the render surface and in events.
pub fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}

/// Inverse of `entity_id`. The entity may no longer exist.
pub fn entity_from_id(id: u64) -> Option<Entity> {
    Entity::from_bits(id)
}
