//! Entity spawning
//!
//! Probabilistically injects new entities just above the top edge, scaled
//! by elapsed distance, plus the mineral bursts and explosion debris that
//! destroyed hazards leave behind.

use glam::Vec2;
use rand::Rng;

use super::state::{Entity, EntityKind, Particle, RunState};
use crate::consts::*;

/// Names drawn uniformly for landing targets
pub const PLANET_NAMES: [&str; 8] = [
    "Kepler-186f",
    "Proxima B",
    "Trappist-1e",
    "Gliese 667",
    "Titan Prime",
    "Zeta Reticuli",
    "Omicron Persei 8",
    "LV-426",
];

/// Per-tick spawn attempt
///
/// Kind bands are evaluated high-roll-first so the rare, high-value kinds
/// take priority. A landing target spawn is a no-op while one is live.
pub fn maybe_spawn(state: &mut RunState) {
    let p = (SPAWN_RATE_BASE + state.craft.distance / SPAWN_RATE_DISTANCE_SCALE)
        .min(SPAWN_RATE_CAP);
    if state.rng.random::<f32>() >= p {
        return;
    }

    let width = state.config.width;
    let roll: f32 = state.rng.random();

    if roll > 0.98 {
        spawn_landing_target(state, width);
    } else if roll > 0.94 {
        spawn_pickup(state, width, EntityKind::RepairKit { value: 25.0 }, 15.0);
    } else if roll > 0.90 {
        spawn_pickup(state, width, EntityKind::FuelCell { value: 20.0 }, 15.0);
    } else if roll > 0.88 {
        spawn_pickup(state, width, EntityKind::BoostCell { value: 50.0 }, 10.0);
    } else {
        spawn_hazard(state, width);
    }
}

fn spawn_landing_target(state: &mut RunState, width: f32) {
    // Only one live landing target at a time
    if state.landing_target().is_some() {
        return;
    }

    let name = PLANET_NAMES[state.rng.random_range(0..PLANET_NAMES.len())].to_string();
    let x = state.rng.random_range(100.0..(width - 100.0).max(101.0));
    let id = state.next_entity_id();
    state.entities.push(Entity {
        id,
        kind: EntityKind::LandingTarget { name },
        pos: Vec2::new(x, -300.0),
        // Fixed slow downward drift
        vel: Vec2::new(0.0, 1.0),
        radius: 150.0,
        rotation: 0.0,
        rotation_speed: 0.001,
    });
}

fn spawn_pickup(state: &mut RunState, width: f32, kind: EntityKind, radius: f32) {
    let x = state.rng.random_range(0.0..width);
    let vel = drift_velocity(state);
    let rotation = state.rng.random_range(0.0..std::f32::consts::PI);
    let rotation_speed = state.rng.random_range(-0.05..0.05);
    let id = state.next_entity_id();
    state.entities.push(Entity {
        id,
        kind,
        pos: Vec2::new(x, -50.0),
        vel,
        radius,
        rotation,
        rotation_speed,
    });
}

fn spawn_hazard(state: &mut RunState, width: f32) {
    let x = state.rng.random_range(0.0..width);
    let radius = state.rng.random_range(20.0..50.0);
    let vel = drift_velocity(state);
    let rotation = state.rng.random_range(0.0..std::f32::consts::PI);
    let rotation_speed = state.rng.random_range(-0.05..0.05);
    let id = state.next_entity_id();
    state.entities.push(Entity {
        id,
        kind: EntityKind::Hazard {
            mining_progress: 0.0,
            dying: false,
            flash_ticks: 0,
        },
        pos: Vec2::new(x, -50.0),
        vel,
        radius,
        rotation,
        rotation_speed,
    });
}

/// Randomized sideways drift plus a little extra downward speed
fn drift_velocity(state: &mut RunState) -> Vec2 {
    Vec2::new(
        state.rng.random_range(-1.0..1.0),
        state.rng.random_range(0.0..2.0),
    )
}

/// Burst of minerals where a mined-out hazard died
pub fn spawn_minerals(state: &mut RunState, pos: Vec2) {
    let (min, max) = state.tuning.mining.mineral_count;
    let count = state.rng.random_range(min..=max);
    for _ in 0..count {
        let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
        let speed = state.tuning.mining.mineral_speed + state.rng.random::<f32>() * 0.05;
        let id = state.next_entity_id();
        state.entities.push(Entity {
            id,
            kind: EntityKind::Mineral,
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            radius: MINERAL_RADIUS,
            rotation: 0.0,
            rotation_speed: 0.1,
        });
    }
}

/// Explosion debris: a mix of sparks, fire, and slow grey chunks
pub fn spawn_explosion(state: &mut RunState, pos: Vec2, amount: usize) {
    for _ in 0..amount {
        if state.particles.len() >= MAX_PARTICLES {
            return;
        }
        let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
        let speed = state.rng.random_range(2.0..5.0);
        let class: f32 = state.rng.random();

        let (color, size, life, decay) = if class > 0.7 {
            // Spark
            (0xFFFFFF, 3.0, 0.6, 0.05)
        } else if class > 0.3 {
            // Fire
            let color = if state.rng.random::<f32>() > 0.5 {
                0xFF4500
            } else {
                0xFFA500
            };
            (color, state.rng.random_range(4.0..12.0), 1.0, 0.03)
        } else {
            // Debris
            (0x666666, state.rng.random_range(1.0..5.0), 1.0, 0.02)
        };

        state.particles.push(Particle {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            color,
            size,
            life,
            decay,
        });
    }
}
