//! Per-kind placement cooldowns and their throttled broadcast.

use std::collections::BTreeMap;

use verdant_core::enums::DefenderKind;
use verdant_core::events::GameEvent;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Timer {
    remaining: f64,
    total: f64,
}

/// Cooldown timers for every kind on the level's roster.
#[derive(Debug, Clone)]
pub struct CooldownTable {
    timers: BTreeMap<DefenderKind, Timer>,
    since_broadcast: f64,
    broadcast_interval: f64,
}

impl CooldownTable {
    pub fn new(kinds: &[DefenderKind], broadcast_interval: f64) -> Self {
        Self {
            timers: kinds.iter().map(|&k| (k, Timer::default())).collect(),
            since_broadcast: 0.0,
            broadcast_interval,
        }
    }

    /// Start (or restart) the cooldown for `kind`.
    pub fn start(&mut self, kind: DefenderKind, secs: f64) {
        let secs = secs.max(0.0);
        self.timers.insert(
            kind,
            Timer {
                remaining: secs,
                total: secs,
            },
        );
    }

    pub fn remaining(&self, kind: DefenderKind) -> f64 {
        self.timers.get(&kind).map_or(0.0, |t| t.remaining)
    }

    pub fn is_ready(&self, kind: DefenderKind) -> bool {
        self.remaining(kind) <= 0.0
    }

    /// Remaining fraction in `[0, 1]`. Zero when idle.
    pub fn fraction(&self, kind: DefenderKind) -> f64 {
        self.timers.get(&kind).map_or(0.0, |t| {
            if t.total > 0.0 {
                (t.remaining / t.total).clamp(0.0, 1.0)
            } else {
                0.0
            }
        })
    }

    pub fn fractions(&self) -> BTreeMap<DefenderKind, f64> {
        self.timers.keys().map(|&k| (k, self.fraction(k))).collect()
    }

    pub fn any_active(&self) -> bool {
        self.timers.values().any(|t| t.remaining > 0.0)
    }

    /// Count every running timer down by `dt`, flooring at zero.
    /// Returns true if at least one timer reached zero during this call.
    pub fn advance(&mut self, dt: f64) -> bool {
        let mut finished = false;
        for timer in self.timers.values_mut() {
            if timer.remaining <= 0.0 {
                continue;
            }
            timer.remaining -= dt;
            if timer.remaining <= 0.0 {
                timer.remaining = 0.0;
                finished = true;
            }
        }
        self.since_broadcast += dt;
        finished
    }
}

/// Advance cooldowns and broadcast when due.
///
/// A broadcast goes out at most once per broadcast interval while any timer
/// runs, and always on the step a timer reaches zero.
pub fn run(table: &mut CooldownTable, dt: f64, events: &mut Vec<GameEvent>) {
    let finished = table.advance(dt);
    let due = table.any_active() && table.since_broadcast >= table.broadcast_interval;
    if finished || due {
        table.since_broadcast = 0.0;
        events.push(GameEvent::CooldownUpdate {
            fractions: table.fractions(),
        });
    }
}
