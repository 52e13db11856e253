//! Attacker lifecycle finite state machine.
//!
//! Pure functions that compute phase transitions for attacker entities from
//! their kind, current phase and what is in front of them.
//! No ECS dependency. Operates on plain data.

use verdant_core::constants::*;
use verdant_core::enums::{AttackerKind, AttackerPhase};

/// The nearest defender in the attacker's lane that the attacker has not passed.
#[derive(Debug, Clone, Copy)]
pub struct DefenderContact {
    /// Defender centre x.
    pub x: f64,
    /// Attacker x minus defender x. Always positive.
    pub gap: f64,
    /// Gap below which the two footprints touch.
    pub reach: f64,
}

/// Input to the attacker FSM for a single entity.
pub struct AttackerContext {
    pub kind: AttackerKind,
    pub phase: AttackerPhase,
    pub has_leaped: bool,
    pub dying_elapsed: f64,
    pub defender_ahead: Option<DefenderContact>,
}

/// Output from the attacker FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackerUpdate {
    pub new_phase: AttackerPhase,
    /// Set when the attacker hops; the new centre x.
    pub leap_to: Option<f64>,
    pub phase_changed: bool,
}

/// Evaluate the FSM for one attacker.
pub fn evaluate(ctx: &AttackerContext) -> AttackerUpdate {
    let no_change = AttackerUpdate {
        new_phase: ctx.phase,
        leap_to: None,
        phase_changed: false,
    };

    match ctx.phase {
        AttackerPhase::Removed => no_change,
        AttackerPhase::Dying => {
            if ctx.dying_elapsed >= ATTACKER_DYING_SECS {
                transition(ctx, AttackerPhase::Removed)
            } else {
                no_change
            }
        }
        AttackerPhase::Advancing | AttackerPhase::Engaging => evaluate_active(ctx),
    }
}

fn evaluate_active(ctx: &AttackerContext) -> AttackerUpdate {
    let Some(contact) = ctx.defender_ahead else {
        return transition(ctx, AttackerPhase::Advancing);
    };

    if can_leap(ctx) && contact.gap < LEAP_TRIGGER_DISTANCE {
        return AttackerUpdate {
            new_phase: AttackerPhase::Advancing,
            leap_to: Some(contact.x - LEAP_LANDING_OFFSET),
            phase_changed: ctx.phase != AttackerPhase::Advancing,
        };
    }

    if contact.gap < contact.reach {
        transition(ctx, AttackerPhase::Engaging)
    } else {
        transition(ctx, AttackerPhase::Advancing)
    }
}

fn can_leap(ctx: &AttackerContext) -> bool {
    ctx.kind == AttackerKind::PoleVaulter && !ctx.has_leaped
}

fn transition(ctx: &AttackerContext, to: AttackerPhase) -> AttackerUpdate {
    AttackerUpdate {
        new_phase: to,
        leap_to: None,
        phase_changed: ctx.phase != to,
    }
}
