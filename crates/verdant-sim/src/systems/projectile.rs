//! Projectile lifetime: projectiles that leave the playfield are destroyed.

use hecs::World;

use verdant_core::components::{EntityTag, ProjectileState};
use verdant_core::constants::{DESIGN_WIDTH, PROJECTILE_BOUNDS_MARGIN};
use verdant_core::types::Position;

use super::cleanup::mark_removed;

pub fn run(world: &mut World, tick: u64) {
    for (_entity, (tag, _, pos)) in
        world.query_mut::<(&mut EntityTag, &ProjectileState, &Position)>()
    {
        if !tag.alive {
            continue;
        }
        if pos.x > DESIGN_WIDTH + PROJECTILE_BOUNDS_MARGIN || pos.x < -PROJECTILE_BOUNDS_MARGIN {
            mark_removed(tag, tick);
        }
    }
}
