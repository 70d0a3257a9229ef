//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One logical step per rendered frame
//! - Seeded RNG only
//! - Stable entity iteration order
//! - No rendering or platform dependencies

pub mod collision;
pub mod physics;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use snapshot::{AbilityStatus, HudSnapshot};
pub use state::{
    Craft, Entity, EntityKind, FxEvent, Particle, RunConfig, RunPhase, RunState,
};
pub use tick::{REASON_CARGO, REASON_FUEL, REASON_HULL, RunOutcome, TickInput, tick};
