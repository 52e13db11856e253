//! Level configuration consumed by the simulation at level setup.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use verdant_core::enums::{AttackerKind, DefenderKind};

use crate::LevelError;

/// One level: roster, starting balance and wave plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub id: u32,
    pub name: String,
    /// Defender kinds this level offers.
    pub roster: Vec<DefenderKind>,
    pub initial_balance: u32,
    pub waves: Vec<WaveConfig>,
}

/// A pre-wave pause followed by groups spawned one after another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveConfig {
    pub delay_secs: f64,
    pub groups: Vec<SpawnGroup>,
}

/// `count` attackers of one kind. The first spawns immediately, the rest
/// `interval_secs` apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnGroup {
    pub kind: AttackerKind,
    pub count: u32,
    pub interval_secs: f64,
}

impl LevelConfig {
    /// Parse and validate a single level.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: LevelConfig = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Parse and validate a list of levels. Ids must be unique.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, LevelError> {
        let levels: Vec<LevelConfig> = serde_json::from_str(json)?;
        let mut seen = HashSet::new();
        for level in &levels {
            level.validate()?;
            if !seen.insert(level.id) {
                return Err(LevelError::Invalid(format!("duplicate level id {}", level.id)));
            }
        }
        Ok(levels)
    }

    pub fn load(path: &Path) -> Result<Self, LevelError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), LevelError> {
        if self.roster.is_empty() {
            return Err(LevelError::Invalid(format!("level {} has an empty roster", self.id)));
        }
        for (w, wave) in self.waves.iter().enumerate() {
            if !wave.delay_secs.is_finite() || wave.delay_secs < 0.0 {
                return Err(LevelError::Invalid(format!(
                    "level {} wave {} has delay {}",
                    self.id, w, wave.delay_secs
                )));
            }
            for group in &wave.groups {
                if group.count == 0 {
                    return Err(LevelError::Invalid(format!(
                        "level {} wave {} has an empty {:?} group",
                        self.id, w, group.kind
                    )));
                }
                if !group.interval_secs.is_finite() || group.interval_secs < 0.0 {
                    return Err(LevelError::Invalid(format!(
                        "level {} wave {} has interval {}",
                        self.id, w, group.interval_secs
                    )));
                }
            }
        }
        Ok(())
    }

    /// Attackers the whole wave plan spawns.
    pub fn total_attackers(&self) -> u32 {
        self.waves.iter().map(WaveConfig::total_attackers).sum()
    }
}

impl WaveConfig {
    pub fn total_attackers(&self) -> u32 {
        self.groups.iter().map(|g| g.count).sum()
    }
}
