//! Per-frame simulation tick
//!
//! Advances a run one logical step: input integration, resource
//! bookkeeping, spawning, collision resolution, and the run state machine.
//! One call per rendered frame; everything completes synchronously.

use glam::Vec2;

use super::collision;
use super::physics;
use super::spawn;
use super::state::{FxEvent, RunPhase, RunState};
use crate::consts::*;

/// Held-input and decision state for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub thrust_up: bool,
    pub thrust_down: bool,
    pub thrust_left: bool,
    pub thrust_right: bool,
    /// Boost modifier held
    pub boost: bool,
    /// Primary action held (mining beam, rig loadout)
    pub primary: bool,
    /// Secondary action held (collector pull, rig loadout)
    pub secondary: bool,
    /// Fire requested (cannon loadout; cooldown is implicit)
    pub fire: bool,
    /// Pointer position in viewport coordinates
    pub pointer: Vec2,
    /// Affirm the landing prompt (only effective while a target is near)
    pub accept_landing: bool,
    /// Dismiss the landing prompt
    pub decline_landing: bool,
}

/// Terminal result of a run, emitted exactly once
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Failed {
        reason: &'static str,
        cargo: u64,
        credits: u64,
    },
    Succeeded {
        cargo: u64,
        multiplier: f32,
        credits: u64,
    },
}

pub const REASON_HULL: &str = "CRITICAL HULL FAILURE";
pub const REASON_FUEL: &str = "OUT OF FUEL - DRIFTING ETERNALLY";
pub const REASON_CARGO: &str = "CONTAINMENT BREACH - SHIP OVERRUN";

/// Advance the run by one tick
///
/// Returns the terminal outcome on the tick it occurs; `None` otherwise.
/// Once terminal, further calls are no-ops.
pub fn tick(state: &mut RunState, input: &TickInput) -> Option<RunOutcome> {
    if state.phase.is_terminal() {
        return None;
    }

    state.events.clear();
    state.time_ticks += 1;

    // Screen shake decay
    if state.screen_shake > 0.0 {
        state.screen_shake *= 0.9;
        if state.screen_shake < 0.5 {
            state.screen_shake = 0.0;
        }
    }

    if state.phase == RunPhase::Landing {
        return landing_tick(state);
    }

    // Landing decisions act on the prompt raised by the previous tick.
    // Accepting while already landing is a no-op by construction; declining
    // with no prompt near does nothing.
    if input.accept_landing && state.target_near.is_some() {
        begin_landing(state);
        return None;
    }
    if input.decline_landing {
        state.target_near = None;
    }

    physics::integrate(state, input);
    apply_resources(state);
    spawn::maybe_spawn(state);
    update_particles(state);
    collision::resolve(state, input);

    check_failure(state)
}

/// Enter the scripted landing sequence
///
/// Cargo and multiplier are pinned here; the sequence itself runs no
/// resource updates, so the credited reward reflects the moment of
/// commitment.
fn begin_landing(state: &mut RunState) {
    state.phase = RunPhase::Landing;
    state.landing_progress = 0.0;
    state.landing_cargo = state.craft.cargo;
    state.landing_multiplier = state.craft.multiplier;
    state.mining_active = false;
    state.mining_progress = 0.0;
    state.collector.active = false;
    state.events.push(FxEvent::LandingStarted);
    log::info!(
        "landing sequence started: cargo={:.1} multiplier={:.1}",
        state.landing_cargo,
        state.landing_multiplier
    );
}

/// One tick of the approach-and-shrink landing animation
///
/// Spawner, resolver, ledger, and failure checks are all suppressed here;
/// the run can only resolve to Success.
fn landing_tick(state: &mut RunState) -> Option<RunOutcome> {
    state.landing_progress += LANDING_PROGRESS_PER_TICK;

    if let Some(target_pos) = state.landing_target().map(|e| e.pos) {
        let craft = &mut state.craft;
        craft.pos += (target_pos - craft.pos) * LANDING_APPROACH_LERP;
    }

    if state.landing_progress >= LANDING_COMPLETE {
        state.phase = RunPhase::Success;
        let cargo = state.landing_cargo.floor() as u64;
        let credits = (state.landing_cargo * state.landing_multiplier).floor() as u64;
        let multiplier = state.landing_multiplier;
        log::info!("run succeeded: cargo={cargo} credits={credits}");
        return Some(RunOutcome::Succeeded {
            cargo,
            multiplier,
            credits,
        });
    }
    None
}

/// Passive per-tick resource accumulation, clamped; thresholds are checked
/// downstream in `check_failure`
fn apply_resources(state: &mut RunState) {
    let burn = FUEL_CONSUMPTION_BASE
        * state.tuning.fuel_efficiency
        * if state.craft.boosting {
            BOOST_FUEL_FACTOR
        } else {
            1.0
        };
    let craft = &mut state.craft;
    craft.fuel = (craft.fuel - burn).clamp(0.0, FUEL_MAX);
    craft.hull = craft.hull.clamp(0.0, HULL_MAX);
    craft.cargo =
        (craft.cargo + state.tuning.cloning_rate * CLONING_TICK_FRACTION)
            .clamp(0.0, state.tuning.cargo_capacity);
    craft.distance += craft.scroll_speed;
}

/// Advance visual debris
fn update_particles(state: &mut RunState) {
    for p in &mut state.particles {
        p.pos += p.vel;
        p.life -= p.decay;
    }
    state.particles.retain(|p| p.life > 0.0);
}

/// Failure thresholds, fixed priority order: hull, then fuel, then cargo.
/// First match wins and ends the run with zero credited reward.
fn check_failure(state: &mut RunState) -> Option<RunOutcome> {
    let reason = if state.craft.hull <= 0.0 {
        REASON_HULL
    } else if state.craft.fuel <= 0.0 {
        REASON_FUEL
    } else if state.craft.cargo >= state.tuning.cargo_capacity {
        REASON_CARGO
    } else {
        return None;
    };

    state.phase = RunPhase::Failure;
    let cargo = state.craft.cargo.floor() as u64;
    log::info!("run failed: {reason} (cargo={cargo})");
    Some(RunOutcome::Failed {
        reason,
        cargo,
        credits: 0,
    })
}
