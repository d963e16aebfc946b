//! Reactor state and core simulation types
//!
//! Everything a tick reads or writes lives in `ReactorState`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::stats::{Statistics, StatsSnapshot};
use super::store::{EntityId, EntityStore};
use crate::consts::*;
use crate::settings::Settings;

/// Entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Fissionable material, consumed on fission
    Fissile,
    /// Fast particle that splits fissile material or gets absorbed
    Neutron,
    /// Stationary rod that swallows neutrons
    Absorber,
    /// Inert fission waste
    Byproduct,
}

impl EntityKind {
    pub fn radius(&self) -> f32 {
        match self {
            EntityKind::Fissile => FISSILE_RADIUS,
            EntityKind::Neutron => NEUTRON_RADIUS,
            EntityKind::Absorber => ABSORBER_RADIUS,
            EntityKind::Byproduct => BYPRODUCT_RADIUS,
        }
    }

    pub fn mass(&self) -> f32 {
        match self {
            EntityKind::Fissile => FISSILE_MASS,
            EntityKind::Neutron => NEUTRON_MASS,
            EntityKind::Absorber => ABSORBER_MASS,
            EntityKind::Byproduct => BYPRODUCT_MASS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Fissile => "Fissile",
            EntityKind::Neutron => "Neutron",
            EntityKind::Absorber => "Absorber",
            EntityKind::Byproduct => "Byproduct",
        }
    }

    /// Draw a starting velocity appropriate to this kind
    pub fn random_velocity<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let ambient = Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0));
        match self {
            EntityKind::Absorber => Vec2::ZERO,
            EntityKind::Neutron => ambient * NEUTRON_SPEED_SCALE,
            EntityKind::Fissile | EntityKind::Byproduct => ambient,
        }
    }
}

/// A simulated particle
///
/// Radius and mass come from `kind` and never change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind, pos: Vec2, vel: Vec2) -> Self {
        let vel = if kind == EntityKind::Absorber {
            Vec2::ZERO
        } else {
            vel
        };
        Self { id, kind, pos, vel }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.kind.radius()
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.kind.mass()
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Informational events produced during a tick (cleared at the start of the next one)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ReactorEvent {
    /// A fissile entity split; drives the shell's screen shake
    Fission { pos: Vec2 },
    /// A neutron was swallowed by an absorber
    Absorption { pos: Vec2 },
}

/// Whether the tick driver advances the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    #[default]
    Running,
    Stopped,
}

/// Render-facing view of one entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Complete reactor state
#[derive(Debug, Clone)]
pub struct ReactorState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Arena width
    pub width: f32,
    /// Arena height
    pub height: f32,
    /// All live entities (sorted by id)
    pub store: EntityStore,
    /// Derived statistics
    pub stats: Statistics,
    /// Tick driver phase
    pub phase: RunPhase,
    /// Events from the most recent tick
    pub events: Vec<ReactorEvent>,
    /// Number of ticks actually executed
    pub tick_count: u64,
    rng: Pcg32,
}

impl ReactorState {
    /// Empty reactor in the default arena
    pub fn new(seed: u64) -> Self {
        Self::with_arena(seed, DEFAULT_ARENA_WIDTH, DEFAULT_ARENA_HEIGHT)
    }

    /// Empty reactor in a `width` x `height` arena
    pub fn with_arena(seed: u64, width: f32, height: f32) -> Self {
        Self {
            seed,
            width,
            height,
            store: EntityStore::new(),
            stats: Statistics::default(),
            phase: RunPhase::Running,
            events: Vec::new(),
            tick_count: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Arena and population from validated settings
    pub fn from_settings(settings: &Settings) -> Self {
        let mut state =
            Self::with_arena(settings.seed, settings.arena_width, settings.arena_height);
        state.initialize(settings.fissile_count, settings.absorber_count);
        state
    }

    /// Clear everything and repopulate with fresh fissile material and absorber rods.
    ///
    /// Statistics return to baseline. Runs to completion in one call.
    pub fn initialize(&mut self, fissile_count: usize, absorber_count: usize) {
        self.store.clear();
        self.events.clear();
        self.stats.reset();

        for _ in 0..fissile_count {
            self.spawn_random(EntityKind::Fissile);
        }
        for _ in 0..absorber_count {
            self.spawn_random(EntityKind::Absorber);
        }

        self.stats.recount_neutrons(&self.store);
        log::info!(
            "Reactor initialized: {} fissile, {} absorbers in {}x{}",
            fissile_count,
            absorber_count,
            self.width,
            self.height
        );
    }

    /// Add one entity with a random velocity for its kind.
    ///
    /// `pos` defaults to the arena center and is clamped into bounds.
    pub fn inject(&mut self, kind: EntityKind, pos: Option<Vec2>) -> EntityId {
        let pos = pos.unwrap_or_else(|| self.center());
        let vel = kind.random_velocity(&mut self.rng);
        self.place(kind, pos, vel)
    }

    /// Add one neutron (the shell's "inject" button)
    pub fn inject_neutron(&mut self, pos: Option<Vec2>) -> EntityId {
        self.inject(EntityKind::Neutron, pos)
    }

    /// Add one entity with an explicit velocity (clamped into bounds)
    pub fn place(&mut self, kind: EntityKind, pos: Vec2, vel: Vec2) -> EntityId {
        let pos = self.clamp_to_bounds(pos, kind.radius());
        let id = self.store.spawn(kind, pos, vel);
        if kind == EntityKind::Neutron {
            self.stats.recount_neutrons(&self.store);
        }
        id
    }

    /// Remove one entity; stale IDs are ignored
    pub fn remove(&mut self, id: EntityId) -> bool {
        let removed = self.store.remove(id);
        if removed {
            self.stats.recount_neutrons(&self.store);
        }
        removed
    }

    /// Stop scheduling ticks
    pub fn stop(&mut self) {
        if self.phase != RunPhase::Stopped {
            log::info!("Reactor stopped at tick {}", self.tick_count);
        }
        self.phase = RunPhase::Stopped;
    }

    /// Resume ticking where the simulation left off
    pub fn resume(&mut self) {
        if self.phase != RunPhase::Running {
            log::info!("Reactor resumed at tick {}", self.tick_count);
        }
        self.phase = RunPhase::Running;
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }

    /// Clamp a center point so a body of `radius` stays inside the arena
    pub fn clamp_to_bounds(&self, pos: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            clamp_axis(pos.x, radius, self.width),
            clamp_axis(pos.y, radius, self.height),
        )
    }

    /// Entities in store order, for rendering
    pub fn entity_views(&self) -> Vec<EntityView> {
        self.store
            .iter()
            .map(|e| EntityView {
                id: e.id,
                kind: e.kind,
                x: e.pos.x,
                y: e.pos.y,
                radius: e.radius(),
            })
            .collect()
    }

    /// Statistics for display
    pub fn stats_snapshot(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub(crate) fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    fn spawn_random(&mut self, kind: EntityKind) -> EntityId {
        let r = kind.radius();
        let x = random_axis(&mut self.rng, r, self.width);
        let y = random_axis(&mut self.rng, r, self.height);
        let vel = kind.random_velocity(&mut self.rng);
        self.store.spawn(kind, Vec2::new(x, y), vel)
    }
}

/// Clamp one coordinate into `[radius, extent - radius]`.
///
/// An arena narrower than the body pins it to the middle.
#[inline]
pub(crate) fn clamp_axis(value: f32, radius: f32, extent: f32) -> f32 {
    let (lo, hi) = (radius, extent - radius);
    if lo > hi {
        return extent * 0.5;
    }
    if value.is_nan() {
        return lo;
    }
    value.clamp(lo, hi)
}

fn random_axis<R: Rng + ?Sized>(rng: &mut R, radius: f32, extent: f32) -> f32 {
    let (lo, hi) = (radius, extent - radius);
    if lo < hi {
        rng.random_range(lo..hi)
    } else {
        extent * 0.5
    }
}
