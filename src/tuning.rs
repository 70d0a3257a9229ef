//! Data-driven game balance
//!
//! Difficulty bundles and upgrade lookup tables. A run resolves these once
//! at start into a [`Tuning`] snapshot; nothing here changes mid-run.

use serde::{Deserialize, Serialize};

/// Difficulty selection, chosen on the menu before a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Insane,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Insane => "Insane",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            "insane" => Some(Difficulty::Insane),
            _ => None,
        }
    }

    /// Collector ability bundle for this difficulty
    pub fn collector(&self) -> CollectorConfig {
        match self {
            Difficulty::Easy => CollectorConfig {
                uses: 5,
                duration_ticks: 300,
                radius: 250.0,
                pull_speed: 0.15,
            },
            Difficulty::Normal => CollectorConfig {
                uses: 4,
                duration_ticks: 240,
                radius: 220.0,
                pull_speed: 0.12,
            },
            Difficulty::Hard => CollectorConfig {
                uses: 3,
                duration_ticks: 180,
                radius: 190.0,
                pull_speed: 0.10,
            },
            Difficulty::Insane => CollectorConfig {
                uses: 2,
                duration_ticks: 120,
                radius: 160.0,
                pull_speed: 0.08,
            },
        }
    }

    /// Mining beam bundle for this difficulty
    pub fn mining(&self) -> MiningConfig {
        match self {
            Difficulty::Easy => MiningConfig {
                speed: 0.020,
                mineral_count: (3, 6),
                mineral_speed: 0.6,
            },
            Difficulty::Normal => MiningConfig {
                speed: 0.015,
                mineral_count: (2, 5),
                mineral_speed: 0.8,
            },
            Difficulty::Hard => MiningConfig {
                speed: 0.010,
                mineral_count: (2, 4),
                mineral_speed: 1.0,
            },
            Difficulty::Insane => MiningConfig {
                speed: 0.008,
                mineral_count: (1, 3),
                mineral_speed: 1.2,
            },
        }
    }
}

/// Interaction strategy selected at run start
///
/// The two game modes share the full physics/resource core; only the
/// ranged interaction differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Loadout {
    /// Mining beam + collector pull (the collector mode)
    #[default]
    MiningRig,
    /// Fixed-cooldown projectile weapon (the shooter mode)
    Cannon,
}

/// Collector ability parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Activations before the ability is exhausted
    pub uses: u32,
    /// Ticks of active time per use
    pub duration_ticks: u32,
    /// Pull radius around the craft
    pub radius: f32,
    /// Base pull impulse per tick
    pub pull_speed: f32,
}

/// Mining beam parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MiningConfig {
    /// Progress added per tick of beam contact (1.0 destroys the hazard)
    pub speed: f32,
    /// Inclusive range of minerals emitted by a destroyed hazard
    pub mineral_count: (u32, u32),
    /// Base outward speed of emitted minerals
    pub mineral_speed: f32,
}

/// Cost in credits to reach level 2..=5 (index = current level)
pub const UPGRADE_COSTS: [u64; 5] = [0, 500, 1500, 4000, 10_000];
/// Cargo cloned per tick-fraction, by cloning level
const CLONING_RATES: [f32; 5] = [0.2, 0.5, 1.0, 1.8, 3.0];
/// Cargo capacity, by hull level
const HULL_CAPACITIES: [f32; 5] = [1000.0, 2500.0, 5000.0, 10_000.0, 25_000.0];
/// Fuel consumption multiplier, by fuel level (lower is better)
const FUEL_EFFICIENCY: [f32; 5] = [1.0, 0.8, 0.6, 0.5, 0.4];

/// Maximum level for any upgrade track
pub const MAX_UPGRADE_LEVEL: u8 = 5;

/// Persisted upgrade levels, each 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeLevels {
    pub cloning: u8,
    pub hull: u8,
    pub fuel: u8,
}

impl Default for UpgradeLevels {
    fn default() -> Self {
        Self {
            cloning: 1,
            hull: 1,
            fuel: 1,
        }
    }
}

impl UpgradeLevels {
    pub fn cloning_rate(&self) -> f32 {
        CLONING_RATES[table_index(self.cloning)]
    }

    pub fn cargo_capacity(&self) -> f32 {
        HULL_CAPACITIES[table_index(self.hull)]
    }

    pub fn fuel_efficiency(&self) -> f32 {
        FUEL_EFFICIENCY[table_index(self.fuel)]
    }
}

/// Clamp a 1-based level into a table index
fn table_index(level: u8) -> usize {
    (level.clamp(1, MAX_UPGRADE_LEVEL) - 1) as usize
}

/// Tunables resolved once at run start from upgrades + difficulty
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tuning {
    pub cloning_rate: f32,
    pub cargo_capacity: f32,
    pub fuel_efficiency: f32,
    pub collector: CollectorConfig,
    pub mining: MiningConfig,
}

impl Tuning {
    pub fn resolve(upgrades: UpgradeLevels, difficulty: Difficulty) -> Self {
        Self {
            cloning_rate: upgrades.cloning_rate(),
            cargo_capacity: upgrades.cargo_capacity(),
            fuel_efficiency: upgrades.fuel_efficiency(),
            collector: difficulty.collector(),
            mining: difficulty.mining(),
        }
    }
}
