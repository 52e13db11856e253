//! Simulation constants and tuning parameters.
//!
//! Distances are in design-space pixels, times in seconds, speeds in px/s.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Longest wall-clock frame the tick driver will absorb in one go.
pub const MAX_FRAME_SECS: f64 = 0.25;

/// Minimum interval between cooldown broadcasts.
pub const COOLDOWN_BROADCAST_SECS: f64 = 0.1;

// --- Playfield ---

/// Logical playfield width.
pub const DESIGN_WIDTH: f64 = 900.0;

/// Logical playfield height.
pub const DESIGN_HEIGHT: f64 = 600.0;

/// Number of lanes.
pub const GRID_ROWS: usize = 5;

/// Number of placement columns per lane.
pub const GRID_COLS: usize = 9;

/// Left edge of the placement grid.
pub const GRID_OFFSET_X: f64 = 70.0;

/// Top edge of the placement grid.
pub const GRID_OFFSET_Y: f64 = 100.0;

pub const CELL_WIDTH: f64 = 80.0;
pub const CELL_HEIGHT: f64 = 95.0;

// --- Footprints ---

pub const DEFENDER_WIDTH: f64 = 60.0;
pub const DEFENDER_HEIGHT: f64 = 70.0;

pub const ATTACKER_WIDTH: f64 = 40.0;
pub const ATTACKER_HEIGHT: f64 = 90.0;

pub const PROJECTILE_WIDTH: f64 = 14.0;
pub const PROJECTILE_HEIGHT: f64 = 14.0;

pub const PICKUP_WIDTH: f64 = 40.0;
pub const PICKUP_HEIGHT: f64 = 40.0;

pub const MOWER_WIDTH: f64 = 50.0;
pub const MOWER_HEIGHT: f64 = 50.0;

pub const REMNANT_WIDTH: f64 = 30.0;
pub const REMNANT_HEIGHT: f64 = 30.0;

// --- Attackers ---

/// X coordinate at which attackers enter the playfield.
pub const ATTACKER_SPAWN_X: f64 = DESIGN_WIDTH + 20.0;

/// An attacker whose centre passes left of this line ends the level.
pub const LOSE_LINE_X: f64 = 10.0;

/// Duration of the dying state before the attacker is removed.
pub const ATTACKER_DYING_SECS: f64 = 1.2;

/// A leaper hops when it comes within this distance of a defender.
pub const LEAP_TRIGGER_DISTANCE: f64 = CELL_WIDTH * 0.8;

/// A leaper lands this far behind the defender it hopped over.
pub const LEAP_LANDING_OFFSET: f64 = CELL_WIDTH * 0.5;

/// Permanent speed of a leaper after its one hop.
pub const LEAPER_LANDED_SPEED: f64 = 15.0;

/// Rise speed of the cosmetic remnant spawned when an attacker dies.
pub const REMNANT_RISE_SPEED: f64 = 80.0;

pub const REMNANT_EFFECT_SECS: f64 = 1.0;

// --- Projectiles ---

pub const PROJECTILE_SPEED: f64 = 300.0;
pub const PROJECTILE_DAMAGE: f64 = 20.0;

/// Projectiles further than this outside the playfield are destroyed.
pub const PROJECTILE_BOUNDS_MARGIN: f64 = 50.0;

/// Fraction of base speed kept while chilled.
pub const CHILL_SPEED_FACTOR: f64 = 0.5;

pub const CHILL_DURATION_SECS: f64 = 3.0;

/// Delay before a double-shot defender fires its second projectile.
pub const FOLLOW_UP_SHOT_DELAY_SECS: f64 = 0.15;

/// Ranged defenders ignore attackers further right than this.
pub const TARGET_SCAN_LIMIT_X: f64 = DESIGN_WIDTH + 100.0;

// --- Area damage ---

/// Damage dealt by the instant area kind and the proximity trap.
pub const BLAST_DAMAGE: f64 = 1800.0;

pub const CHERRY_BOMB_FUSE_SECS: f64 = 0.5;

pub const POTATO_MINE_ARM_SECS: f64 = 15.0;

pub const EXPLOSION_EFFECT_SECS: f64 = 0.8;

// --- Chewing kind ---

/// Reach of the chewing kind measured from its centre.
pub const CHOMPER_REACH: f64 = CELL_WIDTH * 1.2;

pub const CHOMPER_DIGEST_SECS: f64 = 42.0;

// --- Resource economy ---

/// Value of every resource pickup.
pub const PICKUP_VALUE: u32 = 25;

/// Lifetime of an uncollected pickup, counted from its creation.
pub const PICKUP_LIFETIME_SECS: f64 = 8.0;

pub const SKY_DROP_INTERVAL_SECS: f64 = 10.0;

/// Delay before the first sky drop of a level.
pub const SKY_DROP_FIRST_SECS: f64 = 10.0;

pub const SKY_DROP_START_Y: f64 = -20.0;
pub const SKY_DROP_FALL_SPEED: f64 = 50.0;
pub const SKY_DROP_MIN_X: f64 = 100.0;
pub const SKY_DROP_MAX_X: f64 = DESIGN_WIDTH - 100.0;
pub const SKY_DROP_MIN_LANDING_Y: f64 = 100.0;
pub const SKY_DROP_MAX_LANDING_Y: f64 = 500.0;

/// Horizontal scatter of pickups made by a producer.
pub const PRODUCER_DROP_SCATTER_X: f64 = 20.0;

/// Vertical offset of pickups made by a producer.
pub const PRODUCER_DROP_OFFSET_Y: f64 = -20.0;

/// Where collected pickups fly to (the balance counter).
pub const COLLECT_ANCHOR_X: f64 = 40.0;
pub const COLLECT_ANCHOR_Y: f64 = 30.0;

pub const COLLECT_FLIGHT_SPEED: f64 = 600.0;

/// A collected pickup closer than this to the anchor is credited.
pub const COLLECT_ARRIVAL_EPSILON: f64 = 10.0;

// --- Mowers ---

pub const MOWER_X: f64 = GRID_OFFSET_X - 35.0;
pub const MOWER_SPEED: f64 = 300.0;

/// Attacker leading edge within this distance of a mower activates it.
pub const MOWER_TRIGGER_OFFSET: f64 = 30.0;

/// Active mowers past `DESIGN_WIDTH + MOWER_EXIT_MARGIN` are destroyed.
pub const MOWER_EXIT_MARGIN: f64 = 100.0;

// --- Presentation ---

/// Health ratio above which a blocker shows no damage.
pub const TIER_INTACT_RATIO: f64 = 2.0 / 3.0;

/// Health ratio above which a blocker shows light damage.
pub const TIER_CRACKED_RATIO: f64 = 1.0 / 3.0;
