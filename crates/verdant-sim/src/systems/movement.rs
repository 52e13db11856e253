//! Kinematic integration system.
//!
//! Updates Position from Kinetics each step: position += speed * direction * dt.
//! Attackers only walk while Advancing. Pickups fall until they land and then
//! stay put; collected pickups are steered by the resource system instead.

use hecs::World;

use verdant_core::components::{AttackerState, EntityTag, Kinetics, PickupState};
use verdant_core::enums::AttackerPhase;
use verdant_core::types::{column_of, GridCell, Position};

/// Run kinematic integration for all entities with Position + Kinetics.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (tag, pos, kinetics, attacker, pickup, cell)) in world.query_mut::<(
        &EntityTag,
        &mut Position,
        &Kinetics,
        Option<&AttackerState>,
        Option<&mut PickupState>,
        Option<&mut GridCell>,
    )>() {
        if !tag.alive {
            continue;
        }

        if let Some(state) = attacker {
            if state.phase != AttackerPhase::Advancing {
                continue;
            }
        }

        if let Some(pickup) = pickup {
            if pickup.collected || pickup.landed {
                continue;
            }
            pos.y += kinetics.speed * kinetics.dy * dt;
            if pos.y >= pickup.landing_y {
                pos.y = pickup.landing_y;
                pickup.landed = true;
            }
            continue;
        }

        pos.x += kinetics.speed * kinetics.dx * dt;
        pos.y += kinetics.speed * kinetics.dy * dt;

        if let Some(cell) = cell {
            cell.col = column_of(pos.x);
        }
    }
}
