//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only and never modifies the world.

use std::collections::BTreeMap;

use hecs::{Entity, World};

use verdant_core::components::*;
use verdant_core::enums::*;
use verdant_core::events::GameEvent;
use verdant_core::state::*;
use verdant_core::types::{Position, SimTime};
use verdant_roster::damage::{damage_tier, health_ratio};
use verdant_roster::profiles::presentation_kind;

use crate::economy::LevelSession;
use crate::world_setup::entity_id;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    session: Option<&LevelSession>,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    let (level_id, balance, wave, cooldowns) = match session {
        Some(s) => (
            Some(s.level_id()),
            s.balance,
            WaveView {
                current: s.waves.wave_index,
                total: s.waves.total_waves,
                all_spawned: s.waves.all_spawned,
            },
            s.cooldowns.fractions(),
        ),
        None => (None, 0, WaveView::default(), BTreeMap::new()),
    };

    GameStateSnapshot {
        time: *time,
        phase,
        level_id,
        balance,
        wave,
        cooldowns,
        entities: build_entities(world),
        events,
        interpolation: 0.0,
    }
}

/// Build the entity list, sorted by id so output is stable across runs.
fn build_entities(world: &World) -> Vec<EntityView> {
    let mut views: Vec<EntityView> = world
        .query::<(&EntityTag, &Position)>()
        .iter()
        .filter_map(|(entity, (tag, pos))| build_view(world, entity, tag, pos))
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_view(world: &World, entity: Entity, tag: &EntityTag, pos: &Position) -> Option<EntityView> {
    let ratio = world
        .get::<&Vitality>(entity)
        .map(|v| health_ratio(&v))
        .unwrap_or(1.0);

    let mut armor_broken = false;
    let mut tier = None;

    let lifecycle = match tag.kind {
        EntityKind::Defender => {
            let state = world.get::<&DefenderState>(entity).ok()?;
            if state.kind == DefenderKind::WallNut {
                tier = Some(damage_tier(ratio));
            }
            Lifecycle::Defender {
                kind: state.kind,
                phase: state.phase,
            }
        }
        EntityKind::Attacker => {
            let state = world.get::<&AttackerState>(entity).ok()?;
            armor_broken = state.armor_broken;
            Lifecycle::Attacker {
                kind: presentation_kind(state.kind, state.armor_broken),
                phase: state.phase,
            }
        }
        EntityKind::Projectile => {
            let state = world.get::<&ProjectileState>(entity).ok()?;
            Lifecycle::Projectile { chill: state.chill }
        }
        EntityKind::Pickup => {
            let state = world.get::<&PickupState>(entity).ok()?;
            Lifecycle::Pickup {
                collected: state.collected,
                landed: state.landed,
            }
        }
        EntityKind::Mower => {
            let state = world.get::<&MowerState>(entity).ok()?;
            Lifecycle::Mower {
                active: state.active,
            }
        }
        EntityKind::Effect => Lifecycle::Effect,
    };

    Some(EntityView {
        id: entity_id(entity),
        kind: tag.kind,
        alive: tag.alive,
        position: *pos,
        health_ratio: ratio,
        armor_broken,
        lifecycle,
        damage_tier: tier,
    })
}
