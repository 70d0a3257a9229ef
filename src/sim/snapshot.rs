//! Per-tick presentation snapshot
//!
//! The one-way boundary to the HUD/renderer/audio collaborators: built
//! once per tick, read-only, no references back into the run state.

use serde::{Deserialize, Serialize};

use super::state::{RunPhase, RunState};
use crate::consts::*;

/// Collector ability readout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbilityStatus {
    pub uses_remaining: u32,
    pub active: bool,
    /// Fraction of the current use remaining, 0-1
    pub progress: f32,
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub phase: RunPhase,
    pub fuel_pct: f32,
    pub hull_pct: f32,
    /// Floored cargo count for display
    pub cargo: u64,
    pub cargo_capacity: u64,
    /// Credits this run would pay out if landed right now
    pub credits_preview: u64,
    pub multiplier: f32,
    pub boost_pct: f32,
    /// Name of the landing target offering a prompt, if any
    pub nearest_target: Option<String>,
    pub collector: AbilityStatus,
    /// Beam contact this tick; drives the presentation-side mining tone
    pub mining_active: bool,
    /// Heat of the hazard under the beam, 0-1
    pub mining_progress: f32,
    pub screen_shake: f32,
}

impl RunState {
    /// Build the read-only snapshot for this tick
    pub fn snapshot(&self) -> HudSnapshot {
        HudSnapshot {
            phase: self.phase,
            fuel_pct: self.craft.fuel / FUEL_MAX * 100.0,
            hull_pct: self.craft.hull / HULL_MAX * 100.0,
            cargo: self.craft.cargo.floor() as u64,
            cargo_capacity: self.tuning.cargo_capacity as u64,
            credits_preview: self.credits_preview(),
            multiplier: self.craft.multiplier,
            boost_pct: self.craft.boost_charge / BOOST_MAX * 100.0,
            nearest_target: self.target_near.clone(),
            collector: AbilityStatus {
                uses_remaining: self.collector.uses_left,
                active: self.collector.active,
                progress: self.collector.progress(),
            },
            mining_active: self.mining_active,
            mining_progress: self.mining_progress,
            screen_shake: self.screen_shake,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::RunConfig;

    #[test]
    fn test_snapshot_reflects_meters() {
        let mut state = RunState::new(RunConfig::default());
        state.craft.fuel = 50.0;
        state.craft.cargo = 42.9;
        state.craft.multiplier = 2.0;

        let snap = state.snapshot();
        assert_eq!(snap.fuel_pct, 50.0);
        assert_eq!(snap.cargo, 42);
        assert_eq!(snap.credits_preview, (42.9f32 * 2.0).floor() as u64);
        assert_eq!(snap.cargo_capacity, 1000);
        assert_eq!(snap.collector.uses_remaining, state.collector.uses_left);
        assert!(snap.nearest_target.is_none());
    }
}
