//! Control panel settings
//!
//! The shell's sliders (pressure, cooling, population sizes) plus arena size and seed.
//! Persisted as JSON; projected to a `TickInput` once per tick.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::sim::TickInput;

/// Reactor settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for reproducible runs
    pub seed: u64,

    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Population ===
    /// Fissile entities created on (re)initialization
    pub fissile_count: usize,
    /// Absorber rods created on (re)initialization
    pub absorber_count: usize,

    // === Controls (0 - 100) ===
    /// Drives the speed multiplier
    pub pressure: f32,
    /// Drives the damping factor
    pub cooling: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5EED,

            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,

            fissile_count: 40,
            absorber_count: 4,

            pressure: NEUTRAL_PRESSURE,
            cooling: 0.0,
        }
    }
}

impl Settings {
    /// Speed multiplier from pressure (50 is neutral)
    pub fn speed_multiplier(&self) -> f32 {
        (self.pressure / NEUTRAL_PRESSURE).max(MIN_SPEED_MULTIPLIER)
    }

    /// Damping from cooling: 1.0 with no cooling, 0.5 at full cooling
    pub fn damping(&self) -> f32 {
        1.0 - self.cooling.clamp(0.0, 100.0) / COOLING_SCALE
    }

    /// Control snapshot for the next tick
    pub fn tick_input(&self) -> TickInput {
        TickInput::new(self.speed_multiplier(), self.damping())
    }

    /// Check ranges and arena size
    pub fn validate(&self) -> Result<()> {
        let largest = [
            FISSILE_RADIUS,
            NEUTRON_RADIUS,
            ABSORBER_RADIUS,
            BYPRODUCT_RADIUS,
        ]
        .into_iter()
        .fold(0.0f32, f32::max);

        for (name, extent) in [("arena_width", self.arena_width), ("arena_height", self.arena_height)] {
            if !extent.is_finite() || extent <= 0.0 {
                return Err(Error::InvalidSettings(format!(
                    "{name} must be finite and > 0, got {extent}"
                )));
            }
            if extent < 2.0 * largest {
                return Err(Error::InvalidSettings(format!(
                    "{name} must be at least {}, got {extent}",
                    2.0 * largest
                )));
            }
        }
        for (name, value) in [("pressure", self.pressure), ("cooling", self.cooling)] {
            if !(0.0..=100.0).contains(&value) {
                return Err(Error::InvalidSettings(format!(
                    "{name} must be within 0..=100, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Load and validate settings from a JSON file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
