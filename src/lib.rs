//! Zombie Freight - a vertically scrolling space-courier arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, run state)
//! - `tuning`: Data-driven game balance (difficulty bundles, upgrade tables)
//! - `progression`: Persisted player progression (credits, upgrades, bests)
//!
//! Rendering, audio, and UI are external collaborators: they read the
//! per-tick [`sim::HudSnapshot`] and feed [`sim::TickInput`] back in.

pub mod progression;
pub mod sim;
pub mod tuning;

pub use progression::SaveData;
pub use tuning::{Difficulty, Loadout, UpgradeLevels};

/// Game configuration constants
pub mod consts {
    /// Default viewport dimensions (pixels, y grows downward)
    pub const VIEW_WIDTH: f32 = 1280.0;
    pub const VIEW_HEIGHT: f32 = 720.0;

    /// Resource meters
    pub const FUEL_MAX: f32 = 100.0;
    pub const HULL_MAX: f32 = 100.0;
    pub const BOOST_MAX: f32 = 100.0;
    /// Passive fuel burn per tick, before efficiency scaling
    pub const FUEL_CONSUMPTION_BASE: f32 = 0.05;
    /// Fuel burn multiplier while boosting
    pub const BOOST_FUEL_FACTOR: f32 = 3.0;
    /// Fraction of the cloning rate applied per tick
    pub const CLONING_TICK_FRACTION: f32 = 0.05;
    /// Cargo aboard at launch
    pub const STARTING_CARGO: f32 = 10.0;

    /// Craft handling
    pub const CRAFT_RADIUS: f32 = 15.0;
    pub const SHIP_THRUST: f32 = 0.4;
    pub const SHIP_FRICTION: f32 = 0.92;
    /// Velocity scale applied to an axis that clamps against the viewport
    pub const WALL_BOUNCE: f32 = -0.5;

    /// Field scrolling
    pub const SCROLL_SPEED_BASE: f32 = 2.0;
    pub const SCROLL_SPEED_MAX: f32 = 12.0;
    /// Entity scroll multiplier while boosting
    pub const BOOST_SCROLL_MULTIPLIER: f32 = 2.5;
    pub const BOOST_DRAIN: f32 = 0.5;
    pub const BOOST_REGEN: f32 = 0.02;

    /// Hazard collisions
    pub const COLLISION_DAMAGE: f32 = 20.0;
    pub const COLLISION_FUEL_LEAK: f32 = 10.0;
    pub const COLLISION_IMPULSE: f32 = 10.0;

    /// Mining beam
    pub const MINING_COST: f32 = 0.15;
    /// Extra reach around a hazard when the pointer selects a beam target
    pub const MINING_POINTER_SLOP: f32 = 20.0;
    /// Ticks a mined-out hazard flashes before removal
    pub const DYING_FLASH_TICKS: u32 = 3;

    /// Minerals
    pub const MINERAL_RADIUS: f32 = 5.0;
    pub const MINERAL_ENERGY: f32 = 5.0;

    /// Projectiles (cannon loadout)
    pub const FIRE_COOLDOWN_TICKS: u32 = 12;
    pub const PROJECTILE_SPEED: f32 = 12.0;
    pub const PROJECTILE_RADIUS: f32 = 4.0;
    pub const PROJECTILE_LIFETIME_TICKS: u32 = 180;

    /// Landing
    pub const LANDING_PROMPT_RANGE: f32 = 200.0;
    pub const LANDING_PROGRESS_PER_TICK: f32 = 0.01;
    pub const LANDING_COMPLETE: f32 = 1.2;
    pub const LANDING_APPROACH_LERP: f32 = 0.08;
    /// Multiplier reward when a landing target scrolls past unclaimed
    pub const BYPASS_MULTIPLIER_BONUS: f32 = 0.5;

    /// Entities are culled this far below the bottom edge
    pub const DESPAWN_MARGIN: f32 = 300.0;

    /// Spawn probability: base + distance ramp, hard cap
    pub const SPAWN_RATE_BASE: f32 = 0.05;
    pub const SPAWN_RATE_DISTANCE_SCALE: f32 = 100_000.0;
    pub const SPAWN_RATE_CAP: f32 = 0.5;

    /// Maximum visual particles
    pub const MAX_PARTICLES: usize = 256;
}
