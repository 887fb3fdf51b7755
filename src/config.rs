/***
CHEMOTAXIS: receptor state aggregation for E. coli chemotaxis simulations
    Copyright (C) 2025 Andrew T. Martens

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License, version 3,
    as published by the Free Software Foundation.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.

e-mail: chemotaxis@logical.bio
 ***/

/* config.rs: simulation window and initial concentrations for the Spiro
(1997) chemotaxis model. */

use crate::error::{ChemotaxisError, Result};

pub const SIM_START: f64 = 0.0;
pub const SIM_END: f64 = 500.0;
pub const SIM_SAMPLES_PER_TIME: f64 = 10.0;

/// Time window and sampling of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub start: f64,
    pub end: f64,
    /// Defaults to 10 samples per unit of time.
    pub samples: Option<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
	SimulationConfig {
	    start: SIM_START,
	    end: SIM_END,
	    samples: None,
	}
    }
}

impl SimulationConfig {
    pub fn new(start: f64, end: f64, samples: Option<usize>) -> Result<Self> {
	let config = SimulationConfig { start, end, samples };
	config.validate()?;
	Ok(config)
    }

    pub fn samples(&self) -> usize {
	match self.samples {
	    Some(samples) => samples,
	    None => (SIM_SAMPLES_PER_TIME * (self.end - self.start)).round() as usize,
	}
    }

    pub fn validate(&self) -> Result<()> {
	if !self.start.is_finite() || !self.end.is_finite() {
	    return Err(ChemotaxisError::InvalidConfig(
		"simulation times must be finite".to_string()
	    ));
	}
	if self.start >= self.end {
	    return Err(ChemotaxisError::InvalidConfig(format!(
		"simulation cannot start ({}) at or after its end ({})",
		self.start, self.end
	    )));
	}
	if self.samples() < 2 {
	    return Err(ChemotaxisError::InvalidConfig(format!(
		"need at least 2 samples, got {}", self.samples()
	    )));
	}
	Ok(())
    }
}

/// Initial concentrations (M) of the chemotaxis proteins, Table 2 of Spiro
/// et al. All receptors start doubly methylated, unbound and
/// unphosphorylated, so `t2` is also the conserved receptor total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialConcentrations {
    /// CheB
    pub b: f64,
    /// CheR
    pub r: f64,
    /// Tar receptor, as T2
    pub t2: f64,
    /// CheY
    pub y: f64,
    /// CheZ
    pub z: f64,
}

impl Default for InitialConcentrations {
    fn default() -> Self {
	InitialConcentrations {
	    b: 1.7e-6,
	    r: 0.3e-6,
	    t2: 8e-6,
	    y: 20e-6,
	    z: 40e-6,
	}
    }
}

impl InitialConcentrations {
    /// Species id and value pairs, in the order they are applied to the model.
    pub fn assignments(&self) -> [(&'static str, f64); 5] {
	[
	    ("B", self.b),
	    ("R", self.r),
	    ("T2", self.t2),
	    ("Y", self.y),
	    ("Z", self.z),
	]
    }

    pub fn total_receptor(&self) -> f64 {
	self.t2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sampling_is_ten_per_time_unit() {
	let config = SimulationConfig::default();
	assert_eq!(config.samples(), 5000);
	assert_eq!(SimulationConfig::new(0.0, 10.0, None).unwrap().samples(), 100);
	assert_eq!(SimulationConfig::new(0.0, 10.0, Some(11)).unwrap().samples(), 11);
    }

    #[test]
    fn rejects_backwards_window() {
	assert!(matches!(
	    SimulationConfig::new(10.0, 0.0, None),
	    Err(ChemotaxisError::InvalidConfig(_))
	));
	assert!(SimulationConfig::new(0.0, f64::INFINITY, Some(10)).is_err());
    }

    #[test]
    fn rejects_too_few_samples() {
	assert!(SimulationConfig::new(0.0, 0.05, None).is_err());
	assert!(SimulationConfig::new(0.0, 1.0, Some(1)).is_err());
    }

    #[test]
    fn spiro_defaults() {
	let c = InitialConcentrations::default();
	assert_eq!(c.assignments()[2], ("T2", 8e-6));
	assert_eq!(c.total_receptor(), 8e-6);
    }
}
