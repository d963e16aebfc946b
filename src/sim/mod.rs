//! Deterministic simulation module
//!
//! All reactor logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies
//!
//! One tick runs kinematics, collision detection, reaction resolution and statistics decay,
//! in that order.

pub mod collision;
pub mod kinematics;
pub mod reaction;
pub mod state;
pub mod stats;
pub mod store;
pub mod tick;

pub use collision::{CollisionPair, bounce_apart, detect_collisions, overlaps};
pub use kinematics::advance;
pub use reaction::{Reaction, ResolveOutcome, classify, resolve_collisions};
pub use state::{Entity, EntityKind, EntityView, ReactorEvent, ReactorState, RunPhase};
pub use stats::{Statistics, StatsSnapshot, StatusBand};
pub use store::{EntityId, EntityStore};
pub use tick::{TickInput, tick};
