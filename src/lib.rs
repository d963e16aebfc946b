//! Reactor Core - a toy reactor particle simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity store, kinematics, collisions, reactions, stats)
//! - `settings`: Control panel values and their per-tick projection
//! - `error`: Errors raised at the configuration boundary
//!
//! Rendering, input widgets and visual effects live in the surrounding shell. The core only
//! exposes plain numeric state for them to read.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use settings::Settings;
pub use sim::{
    EntityKind, EntityView, ReactorEvent, ReactorState, RunPhase, StatsSnapshot, StatusBand,
    TickInput, tick,
};

/// Simulation configuration constants
pub mod consts {
    /// Default arena dimensions
    pub const DEFAULT_ARENA_WIDTH: f32 = 800.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 600.0;

    /// Fissile material
    pub const FISSILE_RADIUS: f32 = 6.0;
    pub const FISSILE_MASS: f32 = 10.0;

    /// Free neutrons
    pub const NEUTRON_RADIUS: f32 = 2.0;
    pub const NEUTRON_MASS: f32 = 1.0;
    /// Neutrons leave fission (or injection) this much faster than ambient entities
    pub const NEUTRON_SPEED_SCALE: f32 = 5.0;

    /// Absorber rods (never move)
    pub const ABSORBER_RADIUS: f32 = 8.0;
    pub const ABSORBER_MASS: f32 = 100.0;

    /// Decay byproducts
    pub const BYPRODUCT_RADIUS: f32 = 4.0;
    pub const BYPRODUCT_MASS: f32 = 5.0;

    /// Fission output
    pub const FISSION_BYPRODUCTS: usize = 2;
    pub const FISSION_NEUTRONS_MIN: usize = 2;
    pub const FISSION_NEUTRONS_MAX: usize = 3;
    pub const FISSION_ENERGY: f32 = 50.0;
    pub const FISSION_HEAT: f32 = 10.0;

    /// Per-tick decay factors
    pub const ENERGY_DECAY: f32 = 0.99;
    pub const TEMPERATURE_DECAY: f32 = 0.995;
    /// Ambient core temperature (initial value and decay floor)
    pub const AMBIENT_TEMPERATURE: f32 = 25.0;

    /// Status band thresholds (core temperature)
    pub const WARNING_TEMPERATURE: f32 = 800.0;
    pub const CRITICAL_TEMPERATURE: f32 = 2000.0;

    /// Control scalar limits
    pub const MIN_SPEED_MULTIPLIER: f32 = 0.05;
    pub const MAX_DAMPING: f32 = 1.0;
    /// Pressure that maps to a 1.0 speed multiplier
    pub const NEUTRAL_PRESSURE: f32 = 50.0;
    /// Cooling divisor: damping = 1 - cooling / COOLING_SCALE
    pub const COOLING_SCALE: f32 = 200.0;

    /// Centers closer than this are treated as coincident during a bounce
    pub const MIN_SEPARATION: f32 = 1e-6;
}
