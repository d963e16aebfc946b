//! Reaction resolution
//!
//! Walks the collision pairs of one scan and applies fission, absorption or an elastic
//! bounce to each. Consumed entities are only flagged during the walk; the store is
//! compacted once at the end and fission products are appended after that, so indices stay
//! valid for the whole walk and new entities never react in the tick that made them.

use glam::Vec2;
use rand::Rng;

use super::collision::{CollisionPair, bounce_apart};
use super::state::{EntityKind, ReactorEvent, ReactorState};
use crate::consts::*;

/// Outcome class for a pair of entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Fissile + Neutron
    Fission,
    /// Neutron + Absorber; the neutron is consumed
    Absorption,
    /// Everything else
    Bounce,
}

/// Classify an unordered pair of kinds
pub fn classify(a: EntityKind, b: EntityKind) -> Reaction {
    use EntityKind::*;
    match (a, b) {
        (Fissile, Neutron) | (Neutron, Fissile) => Reaction::Fission,
        (Neutron, Absorber) | (Absorber, Neutron) => Reaction::Absorption,
        _ => Reaction::Bounce,
    }
}

/// Tally of what one resolution pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOutcome {
    pub fissions: u32,
    pub absorptions: u32,
    pub bounces: u32,
    /// Pairs dropped because a member was already consumed
    pub skipped: u32,
}

/// Apply reactions for `pairs`, found by a scan over the current store order.
///
/// Pairs whose indices are out of range or that touch an already consumed entity are
/// skipped.
pub fn resolve_collisions(state: &mut ReactorState, pairs: &[CollisionPair]) -> ResolveOutcome {
    let mut outcome = ResolveOutcome::default();
    let len = state.store.len();
    let mut consumed = vec![false; len];
    let mut spawns: Vec<(EntityKind, Vec2, Vec2)> = Vec::new();

    for &CollisionPair { a, b } in pairs {
        if a >= len || b >= len || a == b || consumed[a] || consumed[b] {
            outcome.skipped += 1;
            continue;
        }

        let (first, second) = {
            let entities = state.store.as_slice();
            (entities[a].clone(), entities[b].clone())
        };

        match classify(first.kind, second.kind) {
            Reaction::Fission => {
                consumed[a] = true;
                consumed[b] = true;
                let at = (first.pos + second.pos) * 0.5;

                let rng = state.rng_mut();
                for _ in 0..FISSION_BYPRODUCTS {
                    let vel = EntityKind::Byproduct.random_velocity(rng);
                    spawns.push((EntityKind::Byproduct, at, vel));
                }
                let neutrons = rng.random_range(FISSION_NEUTRONS_MIN..=FISSION_NEUTRONS_MAX);
                for _ in 0..neutrons {
                    let vel = EntityKind::Neutron.random_velocity(rng);
                    spawns.push((EntityKind::Neutron, at, vel));
                }

                state.stats.record_fission();
                state.events.push(ReactorEvent::Fission { pos: at });
                outcome.fissions += 1;
                log::debug!(
                    "Fission #{} at ({:.1}, {:.1}): {} neutrons released",
                    state.stats.reaction_count,
                    at.x,
                    at.y,
                    neutrons
                );
            }
            Reaction::Absorption => {
                let neutron = if first.kind == EntityKind::Neutron {
                    (a, &first)
                } else {
                    (b, &second)
                };
                consumed[neutron.0] = true;
                state
                    .events
                    .push(ReactorEvent::Absorption { pos: neutron.1.pos });
                outcome.absorptions += 1;
                log::trace!("Neutron {:?} absorbed", neutron.1.id);
            }
            Reaction::Bounce => {
                let (va, vb) = bounce_apart(&first, &second);
                let entities = state.store.as_mut_slice();
                entities[a].vel = va;
                entities[b].vel = vb;
                outcome.bounces += 1;
            }
        }
    }

    state.store.compact(&consumed);
    for (kind, pos, vel) in spawns {
        state.store.spawn(kind, pos, vel);
    }
    state.stats.recount_neutrons(&state.store);

    outcome
}
