//! Zombie Freight entry point
//!
//! Headless demo driver: an autopilot flies a full run against the
//! simulation core and the terminal outcome is folded into the save file.
//! Rendering/HUD hosts embed the library the same way, swapping the
//! autopilot for real input.

use std::path::PathBuf;

use glam::Vec2;
use zombie_freight::SaveData;
use zombie_freight::sim::{EntityKind, RunConfig, RunState, TickInput, tick};
use zombie_freight::tuning::Difficulty;

/// Safety valve so a drifting autopilot cannot loop forever
const MAX_DEMO_TICKS: u64 = 200_000;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0FFEE);
    let difficulty = args
        .next()
        .and_then(|s| Difficulty::from_str(&s))
        .unwrap_or_default();

    let save_path = PathBuf::from("zombie_freight_save.json");
    let mut save = SaveData::load(&save_path);

    let config = RunConfig {
        seed,
        upgrades: save.upgrades,
        difficulty,
        ..Default::default()
    };
    log::info!(
        "starting run: seed={seed} difficulty={} loadout={:?}",
        difficulty.as_str(),
        config.loadout
    );

    let mut state = RunState::new(config);
    let outcome = loop {
        let input = autopilot(&state);
        if let Some(outcome) = tick(&mut state, &input) {
            break outcome;
        }
        if state.time_ticks % 600 == 0 {
            let snap = state.snapshot();
            log::info!(
                "t={} fuel={:.0}% hull={:.0}% cargo={} x{:.1} entities={}",
                state.time_ticks,
                snap.fuel_pct,
                snap.hull_pct,
                snap.cargo,
                snap.multiplier,
                state.entities.len()
            );
        }
        if state.time_ticks >= MAX_DEMO_TICKS {
            log::warn!("demo tick limit reached, aborting run");
            return;
        }
    };

    log::info!("outcome: {outcome:?}");
    save.apply_outcome(&outcome);
    if let Err(err) = save.save(&save_path) {
        log::error!("failed to write save data: {err}");
    }
}

/// Simple demo pilot: dodge the nearest hazard, chase pickups, mine
/// whatever drifts close, and take the first landing offer
fn autopilot(state: &RunState) -> TickInput {
    let craft = &state.craft;
    let mut input = TickInput {
        pointer: craft.pos,
        ..Default::default()
    };

    if state.target_near.is_some() {
        input.accept_landing = true;
        return input;
    }

    // Nearest threat and nearest prize, by straight-line distance
    let nearest_hazard = state
        .entities
        .iter()
        .filter(|e| matches!(e.kind, EntityKind::Hazard { dying: false, .. }))
        .min_by(|a, b| {
            craft
                .pos
                .distance_squared(a.pos)
                .total_cmp(&craft.pos.distance_squared(b.pos))
        });
    let nearest_pickup = state
        .entities
        .iter()
        .filter(|e| e.kind.is_collectible())
        .min_by(|a, b| {
            craft
                .pos
                .distance_squared(a.pos)
                .total_cmp(&craft.pos.distance_squared(b.pos))
        });

    if let Some(hazard) = nearest_hazard {
        let dist = craft.pos.distance(hazard.pos);
        if dist < hazard.radius + 120.0 {
            // Steer away on both axes
            input.thrust_left = hazard.pos.x > craft.pos.x;
            input.thrust_right = hazard.pos.x <= craft.pos.x;
            input.thrust_up = hazard.pos.y > craft.pos.y;
            input.thrust_down = hazard.pos.y <= craft.pos.y;
        } else if dist < 400.0 && craft.boost_charge > 30.0 {
            // Burn spare charge on the beam while it is in reach
            input.pointer = hazard.pos;
            input.primary = true;
        }
    }

    if !input.thrust_left && !input.thrust_right {
        if let Some(pickup) = nearest_pickup {
            input.thrust_left = pickup.pos.x < craft.pos.x - 10.0;
            input.thrust_right = pickup.pos.x > craft.pos.x + 10.0;
            input.thrust_up = pickup.pos.y < craft.pos.y - 10.0;
            input.thrust_down = pickup.pos.y > craft.pos.y + 10.0;
        } else {
            // Drift back toward the middle of the field
            let center = Vec2::new(state.config.width / 2.0, state.config.height / 2.0);
            input.thrust_left = craft.pos.x > center.x + 50.0;
            input.thrust_right = craft.pos.x < center.x - 50.0;
            input.thrust_up = craft.pos.y > center.y + 50.0;
            input.thrust_down = craft.pos.y < center.y - 50.0;
        }
    }

    input
}
