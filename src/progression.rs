//! Persisted player progression
//!
//! Credits, upgrade levels, and best-run stats. The simulation only reads
//! this at run start (to resolve upgrade levels) and the host writes it
//! back at run end; nothing here mutates mid-run.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::RunOutcome;
use crate::tuning::{MAX_UPGRADE_LEVEL, UPGRADE_COSTS, UpgradeLevels};

/// The three purchasable upgrade tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeKind {
    Cloning,
    Hull,
    Fuel,
}

/// Persisted save data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveData {
    pub credits: u64,
    /// Most cargo ever delivered in one run
    pub best_cargo: u64,
    pub total_deliveries: u32,
    pub upgrades: UpgradeLevels,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            credits: 0,
            best_cargo: 0,
            total_deliveries: 0,
            upgrades: UpgradeLevels::default(),
        }
    }
}

impl SaveData {
    /// Fold a finished run into the save
    pub fn apply_outcome(&mut self, outcome: &RunOutcome) {
        match outcome {
            RunOutcome::Succeeded { cargo, credits, .. } => {
                self.credits += credits;
                self.total_deliveries += 1;
                self.best_cargo = self.best_cargo.max(*cargo);
            }
            // Failures pay nothing
            RunOutcome::Failed { .. } => {}
        }
    }

    fn level(&self, kind: UpgradeKind) -> u8 {
        match kind {
            UpgradeKind::Cloning => self.upgrades.cloning,
            UpgradeKind::Hull => self.upgrades.hull,
            UpgradeKind::Fuel => self.upgrades.fuel,
        }
    }

    /// Cost of the next level on a track, or `None` at max
    pub fn upgrade_cost(&self, kind: UpgradeKind) -> Option<u64> {
        let level = self.level(kind);
        if level >= MAX_UPGRADE_LEVEL {
            None
        } else {
            Some(UPGRADE_COSTS[level as usize])
        }
    }

    /// Buy one level on a track if affordable; returns whether it happened
    pub fn buy_upgrade(&mut self, kind: UpgradeKind) -> bool {
        let Some(cost) = self.upgrade_cost(kind) else {
            return false;
        };
        if self.credits < cost {
            return false;
        }
        self.credits -= cost;
        let slot = match kind {
            UpgradeKind::Cloning => &mut self.upgrades.cloning,
            UpgradeKind::Hull => &mut self.upgrades.hull,
            UpgradeKind::Fuel => &mut self.upgrades.fuel,
        };
        *slot += 1;
        true
    }

    /// Load save data, falling back to defaults on a missing or corrupt file
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(save) => {
                    log::info!("loaded save data from {}", path.display());
                    save
                }
                Err(err) => {
                    log::warn!("corrupt save data ({err}), starting fresh");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no save data found, starting fresh");
                Self::default()
            }
        }
    }

    /// Write save data to disk
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("save data written to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_pays_credits_and_tracks_best() {
        let mut save = SaveData::default();
        save.apply_outcome(&RunOutcome::Succeeded {
            cargo: 120,
            multiplier: 2.5,
            credits: 300,
        });
        assert_eq!(save.credits, 300);
        assert_eq!(save.best_cargo, 120);
        assert_eq!(save.total_deliveries, 1);

        // A worse run does not regress the best
        save.apply_outcome(&RunOutcome::Succeeded {
            cargo: 40,
            multiplier: 1.0,
            credits: 40,
        });
        assert_eq!(save.best_cargo, 120);
        assert_eq!(save.total_deliveries, 2);
    }

    #[test]
    fn test_failure_pays_nothing() {
        let mut save = SaveData::default();
        save.apply_outcome(&RunOutcome::Failed {
            reason: crate::sim::REASON_FUEL,
            cargo: 55,
            credits: 0,
        });
        assert_eq!(save.credits, 0);
        assert_eq!(save.total_deliveries, 0);
        assert_eq!(save.best_cargo, 0);
    }

    #[test]
    fn test_buy_upgrade_walks_the_cost_table() {
        let mut save = SaveData {
            credits: 20_000,
            ..Default::default()
        };
        assert_eq!(save.upgrade_cost(UpgradeKind::Hull), Some(500));
        assert!(save.buy_upgrade(UpgradeKind::Hull));
        assert_eq!(save.upgrades.hull, 2);
        assert_eq!(save.credits, 19_500);
        assert_eq!(save.upgrade_cost(UpgradeKind::Hull), Some(1500));
    }

    #[test]
    fn test_buy_upgrade_refuses_broke_or_maxed() {
        let mut save = SaveData::default();
        assert!(!save.buy_upgrade(UpgradeKind::Fuel), "no credits");

        save.credits = 1_000_000;
        save.upgrades.fuel = MAX_UPGRADE_LEVEL;
        assert_eq!(save.upgrade_cost(UpgradeKind::Fuel), None);
        assert!(!save.buy_upgrade(UpgradeKind::Fuel), "already maxed");
        assert_eq!(save.credits, 1_000_000);
    }
}
