//! Badges for the endings a player has reached
//!
//! Every ending kind is a badge. Counters persist across restarts and,
//! when saved to disk, across runs.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::game_state::Ending;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Badges {
    /// How many times each ending was reached
    pub earned: BTreeMap<Ending, u32>,
}

impl Badges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count an ending. Returns true the first time it is reached.
    pub fn record(&mut self, ending: Ending) -> bool {
        let count = self.earned.entry(ending).or_insert(0);
        *count += 1;
        *count == 1
    }

    pub fn has(&self, ending: Ending) -> bool {
        self.earned.contains_key(&ending)
    }

    pub fn count(&self, ending: Ending) -> u32 {
        self.earned.get(&ending).copied().unwrap_or(0)
    }

    pub fn unlocked(&self) -> usize {
        self.earned.len()
    }

    /// Load badges from a JSON file. A missing file means no badges yet.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read progress file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid progress file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self).context("Failed to serialize badges")?;
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write progress file {}", path.display()))
    }
}
