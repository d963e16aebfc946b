//! Simulation tick
//!
//! Core loop that advances the reactor one step deterministically:
//! kinematics, collision scan, reaction resolution, statistics decay.

use serde::{Deserialize, Serialize};

use super::collision::detect_collisions;
use super::kinematics::advance;
use super::reaction::resolve_collisions;
use super::state::{ReactorState, RunPhase};
use crate::consts::*;

/// Control values for a single tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Pressure-derived speed multiplier (> 0)
    pub speed_multiplier: f32,
    /// Cooling-derived damping factor, in `(0, 1]`
    pub damping: f32,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            damping: MAX_DAMPING,
        }
    }
}

impl TickInput {
    pub fn new(speed_multiplier: f32, damping: f32) -> Self {
        Self {
            speed_multiplier,
            damping,
        }
    }

    /// Speed multiplier as given; anything not a positive finite number falls back to the
    /// minimum multiplier
    pub fn effective_speed(&self) -> f32 {
        if self.speed_multiplier.is_finite() && self.speed_multiplier > 0.0 {
            self.speed_multiplier
        } else {
            MIN_SPEED_MULTIPLIER
        }
    }

    /// Damping as given when in `(0, 1]`. Values above 1 cap at 1; zero, negative or NaN
    /// damping would freeze or flip velocities and is treated as no damping.
    pub fn effective_damping(&self) -> f32 {
        if self.damping.is_nan() || self.damping <= 0.0 {
            MAX_DAMPING
        } else {
            self.damping.min(MAX_DAMPING)
        }
    }

    /// Velocity scale applied by kinematics this tick
    pub fn step_scale(&self) -> f32 {
        self.effective_speed() * self.effective_damping()
    }
}

/// Advance the reactor by one step. Does nothing while stopped.
pub fn tick(state: &mut ReactorState, input: &TickInput) {
    if state.phase == RunPhase::Stopped {
        return;
    }

    state.events.clear();
    state.tick_count += 1;
    let status_before = state.stats.status();

    advance(&mut state.store, state.width, state.height, input);

    let pairs = detect_collisions(state.store.as_slice());
    if !pairs.is_empty() {
        let outcome = resolve_collisions(state, &pairs);
        log::trace!(
            "Tick {}: {} pairs, {:?}",
            state.tick_count,
            pairs.len(),
            outcome
        );
    }

    state.stats.apply_decay();
    state.stats.recount_neutrons(&state.store);

    let status_after = state.stats.status();
    if status_after != status_before {
        log::info!(
            "Core status {} -> {} at {:.0} degrees",
            status_before.as_str(),
            status_after.as_str(),
            state.stats.core_temperature
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EntityKind, ReactorEvent};
    use glam::Vec2;

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = ReactorState::new(99999);
        let mut state2 = ReactorState::new(99999);
        state1.initialize(60, 4);
        state2.initialize(60, 4);
        for _ in 0..5 {
            state1.inject_neutron(None);
            state2.inject_neutron(None);
        }

        let inputs = [
            TickInput::default(),
            TickInput::new(1.8, 0.9),
            TickInput::new(0.4, 0.6),
        ];
        for i in 0..600 {
            let input = inputs[i % inputs.len()];
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.stats, state2.stats);
        assert_eq!(state1.entity_views(), state2.entity_views());
    }

    #[test]
    fn test_stopped_tick_is_noop() {
        let mut state = ReactorState::new(5);
        state.initialize(10, 1);
        state.stats.energy_output = 100.0;
        let before = state.entity_views();

        state.stop();
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.tick_count, 0);
        assert_eq!(state.entity_views(), before);
        assert_eq!(state.stats.energy_output, 100.0);

        state.resume();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.tick_count, 1);
        assert!(state.stats.energy_output < 100.0);
    }

    #[test]
    fn test_fission_tick_decays_after_resolution() {
        let mut state = ReactorState::new(3);
        state.place(EntityKind::Fissile, Vec2::new(100.0, 100.0), Vec2::ZERO);
        state.place(EntityKind::Neutron, Vec2::new(110.0, 100.0), Vec2::new(-5.0, 0.0));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.stats.reaction_count, 1);
        assert!((state.stats.energy_output - 50.0 * ENERGY_DECAY).abs() < 1e-4);
        assert!((state.stats.core_temperature - 35.0 * TEMPERATURE_DECAY).abs() < 1e-4);
        assert!(matches!(
            state.events.as_slice(),
            [ReactorEvent::Fission { .. }]
        ));

        // Events last only for the tick that produced them
        state.stop();
        state.resume();
        state.store.clear();
        tick(&mut state, &TickInput::default());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_control_sanitizing() {
        assert_eq!(TickInput::new(0.0, 1.0).effective_speed(), MIN_SPEED_MULTIPLIER);
        assert_eq!(TickInput::new(f32::NAN, 1.0).effective_speed(), MIN_SPEED_MULTIPLIER);
        assert_eq!(TickInput::new(f32::INFINITY, 1.0).effective_speed(), MIN_SPEED_MULTIPLIER);
        assert_eq!(TickInput::new(2.0, 1.5).effective_damping(), MAX_DAMPING);
        assert_eq!(TickInput::new(2.0, -3.0).effective_damping(), MAX_DAMPING);
        assert_eq!(TickInput::new(2.0, 0.0).effective_damping(), MAX_DAMPING);
        assert_eq!(TickInput::new(2.0, f32::NAN).effective_damping(), MAX_DAMPING);
        assert_eq!(TickInput::new(2.0, 0.75).step_scale(), 1.5);
    }

    #[test]
    fn test_in_range_controls_pass_through() {
        assert_eq!(TickInput::new(0.01, 1.0).effective_speed(), 0.01);
        assert_eq!(TickInput::new(1.0, 0.1).effective_damping(), 0.1);

        let mut state = ReactorState::new(6);
        let id = state.place(EntityKind::Fissile, Vec2::new(100.0, 100.0), Vec2::new(4.0, 0.0));

        tick(&mut state, &TickInput::new(1.0, 0.25));
        let x = state.store.get(id).unwrap().pos.x;
        assert!((x - 101.0).abs() < 1e-5, "damping 0.25 moved to {x}");

        tick(&mut state, &TickInput::new(0.01, 1.0));
        let x2 = state.store.get(id).unwrap().pos.x;
        assert!((x2 - x - 0.04).abs() < 1e-4, "speed 0.01 moved by {}", x2 - x);
    }

    #[test]
    fn test_decay_without_collisions() {
        let mut state = ReactorState::new(8);
        state.initialize(0, 0);
        state.stats.energy_output = 500.0;
        state.stats.core_temperature = 900.0;

        let mut last = state.stats.clone();
        for _ in 0..200 {
            tick(&mut state, &TickInput::default());
            assert!(state.stats.energy_output < last.energy_output);
            assert!(state.stats.core_temperature < last.core_temperature);
            assert!((state.stats.energy_output - last.energy_output * ENERGY_DECAY).abs() < 1e-3);
            last = state.stats.clone();
        }
        assert_eq!(state.stats.reaction_count, 0);
    }
}
