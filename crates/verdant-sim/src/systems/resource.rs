//! Resource pickup lifecycle.
//!
//! Uncollected pickups decay from the moment they appear, falling or not. Collected pickups fly toward the balance
//! anchor and credit their value on arrival.

use glam::DVec2;
use hecs::World;
use tracing::debug;

use verdant_core::components::{EntityTag, PickupState};
use verdant_core::constants::{
    COLLECT_ANCHOR_X, COLLECT_ANCHOR_Y, COLLECT_ARRIVAL_EPSILON, COLLECT_FLIGHT_SPEED,
};
use verdant_core::events::GameEvent;
use verdant_core::types::Position;

use super::cleanup::mark_removed;
use crate::world_setup::entity_id;

pub fn run(world: &mut World, balance: &mut u32, dt: f64, tick: u64, events: &mut Vec<GameEvent>) {
    for (entity, (tag, pickup, pos)) in
        world.query_mut::<(&mut EntityTag, &mut PickupState, &mut Position)>()
    {
        if !tag.alive {
            continue;
        }

        if pickup.collected {
            let (tx, ty) = pickup
                .flight_target
                .unwrap_or((COLLECT_ANCHOR_X, COLLECT_ANCHOR_Y));
            let here = DVec2::new(pos.x, pos.y);
            let to_target = DVec2::new(tx, ty) - here;
            let dist = to_target.length();

            if dist < COLLECT_ARRIVAL_EPSILON {
                *balance = balance.saturating_add(pickup.value);
                mark_removed(tag, tick);
                debug!(id = entity_id(entity), value = pickup.value, balance = *balance, "resource credited");
                events.push(GameEvent::BalanceChanged { balance: *balance });
            } else {
                let step = (COLLECT_FLIGHT_SPEED * dt).min(dist);
                let next = here + to_target / dist * step;
                pos.x = next.x;
                pos.y = next.y;
            }
            continue;
        }

        pickup.lifetime_remaining -= dt;
        // Tolerance absorbs float drift from summing many steps.
        if pickup.lifetime_remaining <= 1e-9 {
            mark_removed(tag, tick);
            events.push(GameEvent::ResourceExpired {
                entity: entity_id(entity),
            });
        }
    }
}
