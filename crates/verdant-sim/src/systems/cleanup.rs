//! Cleanup system: expires transient effects and despawns dead entities.
//!
//! Entities marked not-alive stay in the world for the rest of the step that
//! killed them and are despawned by the cleanup pass of the following step.

use hecs::{Entity, World};

use verdant_core::components::{EntityTag, TransientEffect};

/// Mark an entity not-alive on `tick`. Marking twice keeps the first tick.
pub fn mark_removed(tag: &mut EntityTag, tick: u64) {
    if tag.alive {
        tag.alive = false;
        tag.removal_tick = tick;
    }
}

/// `mark_removed` by entity id. Missing entities are ignored.
pub fn mark_entity_removed(world: &World, entity: Entity, tick: u64) {
    if let Ok(mut tag) = world.get::<&mut EntityTag>(entity) {
        mark_removed(&mut tag, tick);
    }
}

/// Age effects, then despawn everything killed before `tick`.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, dt: f64, tick: u64, despawn_buffer: &mut Vec<Entity>) {
    for (_entity, (tag, effect)) in world.query_mut::<(&mut EntityTag, &mut TransientEffect)>() {
        if !tag.alive {
            continue;
        }
        effect.elapsed += dt;
        if effect.elapsed >= effect.duration {
            mark_removed(tag, tick);
        }
    }

    despawn_buffer.clear();
    for (entity, tag) in world.query_mut::<&EntityTag>() {
        if !tag.alive && tag.removal_tick < tick {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
