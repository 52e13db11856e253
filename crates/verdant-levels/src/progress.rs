//! Persisted campaign progress.
//!
//! The simulation reads this once at level setup to restrict the roster and
//! never writes it. The host records completions in response to
//! `LevelCompleted` events.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use verdant_core::enums::DefenderKind;

use crate::config::LevelConfig;
use crate::LevelError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Highest level id the player may start.
    pub unlocked_level: u32,
    pub unlocked_defenders: BTreeSet<DefenderKind>,
    #[serde(default)]
    pub completed_levels: BTreeSet<u32>,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            unlocked_level: 1,
            unlocked_defenders: [DefenderKind::Sunflower, DefenderKind::Peashooter]
                .into_iter()
                .collect(),
            completed_levels: BTreeSet::new(),
        }
    }
}

impl Progress {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let progress: Progress = serde_json::from_str(json)?;
        if progress.unlocked_level == 0 {
            return Err(LevelError::Invalid("unlocked level must be at least 1".to_string()));
        }
        Ok(progress)
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, LevelError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: &Path) -> Result<(), LevelError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn is_level_unlocked(&self, id: u32) -> bool {
        id <= self.unlocked_level
    }

    pub fn is_level_completed(&self, id: u32) -> bool {
        self.completed_levels.contains(&id)
    }

    /// The part of a level's roster the player has unlocked, in roster order.
    pub fn roster_for(&self, level: &LevelConfig) -> Vec<DefenderKind> {
        level
            .roster
            .iter()
            .copied()
            .filter(|kind| self.unlocked_defenders.contains(kind))
            .collect()
    }

    /// Mark a level completed. Completing the highest unlocked level unlocks
    /// the next one along with the defenders its roster introduces.
    pub fn record_completion(&mut self, id: u32, levels: &[LevelConfig]) {
        self.completed_levels.insert(id);

        if id < self.unlocked_level {
            return;
        }
        let Some(next) = levels.iter().find(|level| level.id == id + 1) else {
            return;
        };
        self.unlocked_level = next.id;
        self.unlocked_defenders.extend(next.roster.iter().copied());
    }
}
