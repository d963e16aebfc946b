//! Core statistics
//!
//! Energy output and core temperature rise with each fission and decay geometrically every
//! tick. The status band is a pure projection of temperature, never stored.

use serde::{Deserialize, Serialize};

use super::state::EntityKind;
use super::store::EntityStore;
use crate::consts::*;

/// Display status derived from core temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusBand {
    Nominal,
    Warning,
    Critical,
}

impl StatusBand {
    /// Below 800 nominal, 800 through 2000 warning, above 2000 critical
    pub fn from_temperature(temperature: f32) -> Self {
        if temperature > CRITICAL_TEMPERATURE {
            StatusBand::Critical
        } else if temperature >= WARNING_TEMPERATURE {
            StatusBand::Warning
        } else {
            StatusBand::Nominal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusBand::Nominal => "Nominal",
            StatusBand::Warning => "Warning",
            StatusBand::Critical => "Critical",
        }
    }
}

/// Cumulative and derived reactor statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Never negative
    pub energy_output: f32,
    /// Never below `AMBIENT_TEMPERATURE`
    pub core_temperature: f32,
    /// Fission events since the last initialization
    pub reaction_count: u64,
    /// Neutrons currently in the store
    pub live_neutron_count: usize,
}

impl Default for Statistics {
    fn default() -> Self {
        Self {
            energy_output: 0.0,
            core_temperature: AMBIENT_TEMPERATURE,
            reaction_count: 0,
            live_neutron_count: 0,
        }
    }
}

impl Statistics {
    /// Back to baseline values
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn record_fission(&mut self) {
        self.reaction_count = self.reaction_count.saturating_add(1);
        self.energy_output += FISSION_ENERGY;
        self.core_temperature += FISSION_HEAT;
    }

    /// One tick of geometric decay toward the floors
    pub fn apply_decay(&mut self) {
        self.energy_output = (self.energy_output * ENERGY_DECAY).max(0.0);
        self.core_temperature = (self.core_temperature * TEMPERATURE_DECAY).max(AMBIENT_TEMPERATURE);
        // Guard against NaN creeping in from outside writes
        if !self.energy_output.is_finite() {
            self.energy_output = 0.0;
        }
        if !self.core_temperature.is_finite() {
            self.core_temperature = AMBIENT_TEMPERATURE;
        }
    }

    pub fn recount_neutrons(&mut self, store: &EntityStore) {
        self.live_neutron_count = store.count(EntityKind::Neutron);
    }

    pub fn status(&self) -> StatusBand {
        StatusBand::from_temperature(self.core_temperature)
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            energy_output: self.energy_output,
            core_temperature: self.core_temperature,
            reaction_count: self.reaction_count,
            live_neutron_count: self.live_neutron_count,
            status: self.status(),
        }
    }
}

/// Display-facing copy of the statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub energy_output: f32,
    pub core_temperature: f32,
    pub reaction_count: u64,
    pub live_neutron_count: usize,
    pub status: StatusBand,
}
