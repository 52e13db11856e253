//! Built-in level catalog: hardcoded wave plans for the five campaign levels.
//!
//! Each level defines its roster, starting balance and wave composition.
//! Groups within a wave run back to back; the wave delay is the pause
//! before the first group.

use verdant_core::enums::AttackerKind::{self, *};
use verdant_core::enums::DefenderKind::{self, *};

use crate::config::{LevelConfig, SpawnGroup, WaveConfig};
use crate::LevelError;

/// All built-in levels, ordered by id.
pub fn builtin_levels() -> Vec<LevelConfig> {
    vec![
        build_first_contact(),
        build_roadblock(),
        build_buckets(),
        build_vaulters(),
        build_final_stand(),
    ]
}

/// Look up a built-in level by id.
pub fn find_level(id: u32) -> Result<LevelConfig, LevelError> {
    builtin_levels()
        .into_iter()
        .find(|level| level.id == id)
        .ok_or(LevelError::UnknownLevel(id))
}

/// Level 1: "First Contact"
/// 3 waves, 10 plain attackers. Producer + single shot only.
fn build_first_contact() -> LevelConfig {
    LevelConfig {
        id: 1,
        name: "First Contact".to_string(),
        roster: vec![Sunflower, Peashooter],
        initial_balance: 50,
        waves: vec![
            wave(15.0, &[(Normal, 2, 5.0)]),
            wave(5.0, &[(Normal, 3, 4.0)]),
            wave(5.0, &[(Normal, 5, 3.0)]),
        ],
    }
}

/// Level 2: "Roadblock"
/// Introduces light armor; blocker and chill shot join the roster.
fn build_roadblock() -> LevelConfig {
    LevelConfig {
        id: 2,
        name: "Roadblock".to_string(),
        roster: vec![Sunflower, Peashooter, WallNut, SnowPea],
        initial_balance: 100,
        waves: vec![
            wave(15.0, &[(Normal, 3, 5.0)]),
            wave(5.0, &[(Normal, 3, 4.0), (Conehead, 1, 5.0)]),
            wave(3.0, &[(Normal, 4, 3.0), (Conehead, 2, 5.0)]),
            wave(3.0, &[(Normal, 5, 2.5), (Conehead, 3, 4.0)]),
        ],
    }
}

/// Level 3: "Bucket Brigade"
/// Heavy armor arrives; both area-damage kinds unlocked.
fn build_buckets() -> LevelConfig {
    LevelConfig {
        id: 3,
        name: "Bucket Brigade".to_string(),
        roster: vec![Sunflower, Peashooter, WallNut, SnowPea, CherryBomb, PotatoMine],
        initial_balance: 150,
        waves: vec![
            wave(12.0, &[(Normal, 3, 4.0), (Conehead, 1, 5.0)]),
            wave(3.0, &[(Normal, 4, 3.0), (Conehead, 2, 4.0)]),
            wave(
                3.0,
                &[(Normal, 3, 3.0), (Conehead, 2, 4.0), (Buckethead, 1, 5.0)],
            ),
            wave(
                2.0,
                &[(Normal, 5, 2.5), (Conehead, 3, 3.0), (Buckethead, 2, 5.0)],
            ),
            wave(
                2.0,
                &[(Normal, 6, 2.0), (Conehead, 4, 3.0), (Buckethead, 3, 4.0)],
            ),
        ],
    }
}

/// Level 4: "Over the Wall"
/// Leapers hop the first defender in their lane; double shot unlocked.
fn build_vaulters() -> LevelConfig {
    LevelConfig {
        id: 4,
        name: "Over the Wall".to_string(),
        roster: vec![
            Sunflower, Peashooter, WallNut, SnowPea, CherryBomb, PotatoMine, Repeater,
        ],
        initial_balance: 150,
        waves: vec![
            wave(12.0, &[(Normal, 4, 4.0), (Conehead, 2, 5.0)]),
            wave(3.0, &[(Normal, 4, 3.0), (PoleVaulter, 2, 5.0)]),
            wave(
                2.0,
                &[(Normal, 4, 2.5), (Conehead, 3, 3.0), (PoleVaulter, 2, 5.0)],
            ),
            wave(
                2.0,
                &[
                    (Normal, 5, 2.0),
                    (Conehead, 3, 3.0),
                    (Buckethead, 2, 5.0),
                    (PoleVaulter, 3, 4.0),
                ],
            ),
            wave(
                2.0,
                &[
                    (Normal, 6, 2.0),
                    (Conehead, 4, 2.5),
                    (Buckethead, 3, 4.0),
                    (PoleVaulter, 3, 3.0),
                ],
            ),
            wave(
                1.0,
                &[
                    (Normal, 8, 1.5),
                    (Conehead, 5, 2.0),
                    (Buckethead, 3, 3.0),
                    (PoleVaulter, 4, 3.0),
                ],
            ),
        ],
    }
}

/// Level 5: "Final Stand"
/// Every attacker kind, eight waves; full roster including the chewing kind.
fn build_final_stand() -> LevelConfig {
    LevelConfig {
        id: 5,
        name: "Final Stand".to_string(),
        roster: DefenderKind::ALL.to_vec(),
        initial_balance: 200,
        waves: vec![
            wave(12.0, &[(Normal, 4, 3.0), (Conehead, 2, 4.0)]),
            wave(
                3.0,
                &[(Normal, 5, 2.5), (Conehead, 3, 3.0), (Newspaper, 2, 5.0)],
            ),
            wave(
                2.0,
                &[
                    (Normal, 5, 2.0),
                    (Conehead, 3, 3.0),
                    (Buckethead, 2, 5.0),
                    (Newspaper, 2, 4.0),
                ],
            ),
            wave(
                2.0,
                &[
                    (Normal, 6, 2.0),
                    (Conehead, 4, 2.5),
                    (PoleVaulter, 3, 3.0),
                    (Newspaper, 2, 5.0),
                ],
            ),
            wave(
                2.0,
                &[
                    (Normal, 7, 1.5),
                    (Conehead, 4, 2.5),
                    (Buckethead, 3, 3.0),
                    (PoleVaulter, 3, 3.0),
                ],
            ),
            wave(
                1.0,
                &[
                    (Normal, 8, 1.5),
                    (Conehead, 5, 2.0),
                    (Buckethead, 3, 3.0),
                    (Newspaper, 3, 3.0),
                ],
            ),
            wave(
                1.0,
                &[
                    (Normal, 10, 1.0),
                    (Conehead, 5, 2.0),
                    (Buckethead, 4, 2.5),
                    (PoleVaulter, 4, 2.5),
                    (Newspaper, 3, 3.0),
                ],
            ),
            wave(
                0.5,
                &[
                    (Normal, 12, 1.0),
                    (Conehead, 6, 1.5),
                    (Buckethead, 5, 2.0),
                    (PoleVaulter, 5, 2.0),
                    (Newspaper, 4, 2.0),
                ],
            ),
        ],
    }
}

fn wave(delay_secs: f64, groups: &[(AttackerKind, u32, f64)]) -> WaveConfig {
    WaveConfig {
        delay_secs,
        groups: groups
            .iter()
            .map(|&(kind, count, interval_secs)| SpawnGroup {
                kind,
                count,
                interval_secs,
            })
            .collect(),
    }
}
