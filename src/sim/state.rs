//! Run state and core simulation types
//!
//! All state that must be persisted for replay/determinism lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::{Difficulty, Loadout, Tuning, UpgradeLevels};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Active flight through the hazard field
    Flight,
    /// Scripted approach-and-shrink landing sequence
    Landing,
    /// Terminal: delivery completed
    Success,
    /// Terminal: a failure threshold was crossed
    Failure,
}

impl RunPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunPhase::Success | RunPhase::Failure)
    }
}

/// Entity kind with kind-specific payload
///
/// One tag, one exhaustive match in the spawner and the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Asteroid. Damages the craft on contact; mineable in the rig loadout.
    Hazard {
        /// Beam progress toward destruction (1.0 = done)
        mining_progress: f32,
        /// Set once mined out; the hazard stops interacting
        dying: bool,
        /// Flash window ticks remaining once dying
        flash_ticks: u32,
    },
    FuelCell { value: f32 },
    RepairKit { value: f32 },
    BoostCell { value: f32 },
    /// Rare large planet offering the win-condition prompt. Never consumed
    /// by contact; at most one live at a time.
    LandingTarget { name: String },
    /// Dropped by a mined-out hazard, collected as cargo
    Mineral,
    /// Cannon round (shooter loadout)
    Projectile { ttl: u32 },
}

impl EntityKind {
    pub fn is_hazard(&self) -> bool {
        matches!(self, EntityKind::Hazard { .. })
    }

    /// Pickups respond to the collector pull
    pub fn is_collectible(&self) -> bool {
        matches!(
            self,
            EntityKind::FuelCell { .. }
                | EntityKind::RepairKit { .. }
                | EntityKind::BoostCell { .. }
                | EntityKind::Mineral
        )
    }

    pub fn is_landing_target(&self) -> bool {
        matches!(self, EntityKind::LandingTarget { .. })
    }
}

/// A dynamic in-world object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
}

/// The player craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Craft {
    pub pos: Vec2,
    pub vel: Vec2,
    pub fuel: f32,
    pub hull: f32,
    /// Fractional cargo count; floored for display and scoring
    pub cargo: f32,
    pub boost_charge: f32,
    /// True while boost is held with charge available
    pub boosting: bool,
    /// Total field distance scrolled past
    pub distance: f32,
    pub scroll_speed: f32,
    /// Score multiplier; only ever increases during a run
    pub multiplier: f32,
}

impl Craft {
    fn new(width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(width / 2.0, height / 2.0),
            vel: Vec2::ZERO,
            fuel: FUEL_MAX,
            hull: HULL_MAX,
            cargo: STARTING_CARGO,
            boost_charge: BOOST_MAX,
            boosting: false,
            distance: 0.0,
            scroll_speed: SCROLL_SPEED_BASE,
            multiplier: 1.0,
        }
    }
}

/// Collector ability state (rig loadout)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorState {
    pub uses_left: u32,
    pub ticks_left: u32,
    pub max_ticks: u32,
    pub active: bool,
}

impl CollectorState {
    fn new(uses: u32, duration_ticks: u32) -> Self {
        Self {
            uses_left: uses,
            ticks_left: duration_ticks,
            max_ticks: duration_ticks,
            active: false,
        }
    }

    /// Fraction of the current use remaining
    pub fn progress(&self) -> f32 {
        if self.max_ticks == 0 {
            0.0
        } else {
            self.ticks_left as f32 / self.max_ticks as f32
        }
    }
}

/// A visual debris particle (not gameplay-affecting)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Packed RGB for the renderer
    pub color: u32,
    pub size: f32,
    /// 0-1, decreases by `decay` per tick
    pub life: f32,
    pub decay: f32,
}

/// One-shot presentation events, drained by the host each tick
#[derive(Debug, Clone, PartialEq)]
pub enum FxEvent {
    /// Something blew up; `strength` doubles as a screen-shake hint
    Explosion { pos: Vec2, strength: f32 },
    /// A pickup or mineral was collected
    Collect,
    /// The landing sequence just began
    LandingStarted,
}

/// Immutable configuration for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub seed: u64,
    /// Viewport size the field scrolls through
    pub width: f32,
    pub height: f32,
    /// Upgrade levels resolved from persisted progression at run start
    pub upgrades: UpgradeLevels,
    pub difficulty: Difficulty,
    pub loadout: Loadout,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            width: VIEW_WIDTH,
            height: VIEW_HEIGHT,
            upgrades: UpgradeLevels::default(),
            difficulty: Difficulty::default(),
            loadout: Loadout::default(),
        }
    }
}

/// Complete run state (deterministic, serializable)
///
/// Exclusively owned by the tick driver; presentation only ever sees the
/// [`super::HudSnapshot`] built from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub config: RunConfig,
    /// Tunables resolved once at run start
    pub tuning: Tuning,
    /// Seeded RNG; every stochastic decision draws from here
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: RunPhase,
    pub craft: Craft,
    /// Live entities, stable insertion order
    pub entities: Vec<Entity>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Screen shake magnitude, decays each tick
    pub screen_shake: f32,
    /// Name of the landing target currently in prompt range
    pub target_near: Option<String>,
    pub collector: CollectorState,
    /// Ticks until the cannon may fire again
    pub fire_cooldown: u32,
    /// Beam made contact this tick (drives the presentation-side tone)
    pub mining_active: bool,
    /// Progress of the hazard under the beam when contact was made
    pub mining_progress: f32,
    /// Scripted landing sequence accumulator
    pub landing_progress: f32,
    /// Cargo and multiplier pinned when the landing sequence began;
    /// the credited reward is computed from these
    pub landing_cargo: f32,
    pub landing_multiplier: f32,
    /// One-shot presentation events for this tick
    #[serde(skip)]
    pub events: Vec<FxEvent>,
    /// Next entity ID
    next_id: u32,
}

impl RunState {
    /// Create a fresh run from its configuration
    pub fn new(config: RunConfig) -> Self {
        let tuning = Tuning::resolve(config.upgrades, config.difficulty);
        let collector = CollectorState::new(
            tuning.collector.uses,
            tuning.collector.duration_ticks,
        );
        Self {
            rng: Pcg32::seed_from_u64(config.seed),
            tuning,
            craft: Craft::new(config.width, config.height),
            config,
            time_ticks: 0,
            phase: RunPhase::Flight,
            entities: Vec::new(),
            particles: Vec::new(),
            screen_shake: 0.0,
            target_near: None,
            collector,
            fire_cooldown: 0,
            mining_active: false,
            mining_progress: 0.0,
            landing_progress: 0.0,
            landing_cargo: 0.0,
            landing_multiplier: 1.0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The live landing target, if any
    pub fn landing_target(&self) -> Option<&Entity> {
        self.entities.iter().find(|e| e.kind.is_landing_target())
    }

    /// Credits this run would pay out if landed right now
    pub fn credits_preview(&self) -> u64 {
        (self.craft.cargo * self.craft.multiplier).floor() as u64
    }
}
