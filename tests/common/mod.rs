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

#![allow(dead_code)]

use std::collections::HashMap;

use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use chemotaxis::receptor_states::{
    LIGAND_BINDINGS, METHYLATION_LEVELS, PHOSPHORYLATIONS, REGULATOR_BINDINGS
};
use chemotaxis::{ChemotaxisError, Result, Simulator, State};

pub const TOTAL_RECEPTOR: f64 = 8e-6;

pub fn values(ca: &Float64Chunked) -> Vec<f64> {
    ca.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect()
}

/// State names in enumeration order
pub fn state_names() -> Vec<String> {
    let mut names = Vec::new();
    for &l in &LIGAND_BINDINGS {
	for &p in &PHOSPHORYLATIONS {
	    for &r in &REGULATOR_BINDINGS {
		for &m in &METHYLATION_LEVELS {
		    names.push(State::make_name(l, p, r, m));
		}
	    }
	}
    }
    names
}

/// Random receptor time course whose total drifts from TOTAL_RECEPTOR by
/// at most `slack` (relative), mimicking conservation error of an integrator.
pub fn noisy_time_course(samples: usize, seed: u64, slack: f64) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(seed);
    let names = state_names();

    let mut columns = vec![Column::new(
	"time".into(),
	(0..samples).map(|i| i as f64).collect::<Vec<f64>>(),
    )];

    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(samples);
    for _ in 0..samples {
	let weights: Vec<f64> = names.iter().map(|_| rng.random_range(0.0..1.0)).collect();
	let sum: f64 = weights.iter().sum();
	let drift = 1.0 + rng.random_range(-slack..=slack);
	rows.push(weights.iter().map(|w| TOTAL_RECEPTOR * drift * w / sum).collect());
    }

    for (i, name) in names.iter().enumerate() {
	let data: Vec<f64> = rows.iter().map(|row| row[i]).collect();
	columns.push(Column::new(name.as_str().into(), data));
    }

    DataFrame::new(columns).unwrap()
}

/// A stand-in for the reaction engine with a closed-form solution: all
/// receptors start as T2 and relax exponentially towards an even spread
/// over the 24 states. CheY and CheB become 30% and 20% phosphorylated.
pub struct RelaxationSimulator {
    values: HashMap<String, f64>,
    last: HashMap<String, f64>,
}

pub const RELAXATION_REACTIONS: [&str; 2] = ["J1", "J2"];

const OTHER_SPECIES: [&str; 7] = ["Y", "Yp", "B", "Bp", "R", "Z", "L"];

impl RelaxationSimulator {
    pub fn new() -> Self {
	let mut values = HashMap::new();
	for name in state_names() {
	    values.insert(name, 0.0);
	}
	for name in OTHER_SPECIES {
	    values.insert(name.to_string(), 0.0);
	}
	RelaxationSimulator { values, last: HashMap::new() }
    }

    fn value_at(&self, id: &str, t: f64) -> Option<f64> {
	let decay = (-t).exp();
	let t2 = self.values["T2"];
	let y = self.values["Y"] + self.values["Yp"];
	let b = self.values["B"] + self.values["Bp"];

	let value = match id {
	    "T2" => t2 * (decay + (1.0 - decay) / 24.0),
	    "Y" => y * (1.0 - 0.3 * (1.0 - decay)),
	    "Yp" => y * 0.3 * (1.0 - decay),
	    "B" => b * (1.0 - 0.2 * (1.0 - decay)),
	    "Bp" => b * 0.2 * (1.0 - decay),
	    "J1" => decay,
	    "J2" => 0.5 * decay,
	    _ if self.values.contains_key(id) && state_names().iter().any(|s| s == id) => {
		t2 * (1.0 - decay) / 24.0
	    }
	    _ => self.values.get(id).copied()?,
	};
	Some(value)
    }
}

impl Simulator for RelaxationSimulator {
    fn floating_species_ids(&self) -> Vec<String> {
	let mut ids = state_names();
	ids.extend(OTHER_SPECIES.iter().map(|s| s.to_string()));
	ids
    }

    fn reaction_ids(&self) -> Vec<String> {
	RELAXATION_REACTIONS.iter().map(|r| r.to_string()).collect()
    }

    fn set_value(&mut self, id: &str, value: f64) -> Result<()> {
	match self.values.get_mut(id) {
	    Some(v) => {
		*v = value;
		Ok(())
	    }
	    None => Err(ChemotaxisError::UnknownIdentifier(id.to_string())),
	}
    }

    fn simulate(
	&mut self,
	start: f64,
	end: f64,
	samples: usize,
	selection: &[String],
    ) -> Result<DataFrame> {
	let step = (end - start) / (samples - 1) as f64;
	let time: Vec<f64> = (0..samples).map(|i| start + i as f64 * step).collect();

	let mut columns = Vec::with_capacity(selection.len());
	for id in selection {
	    let data: Vec<f64> = if id == "time" {
		time.clone()
	    } else {
		time.iter()
		    .map(|&t| self.value_at(id, t))
		    .collect::<Option<Vec<f64>>>()
		    .ok_or_else(|| ChemotaxisError::MissingSpecies(id.clone()))?
	    };
	    if let Some(&v) = data.last() {
		self.last.insert(id.clone(), v);
	    }
	    columns.push(Column::new(id.as_str().into(), data));
	}

	Ok(DataFrame::new(columns)?)
    }

    fn floating_species_concentrations(&self) -> Vec<f64> {
	self.floating_species_ids()
	    .iter()
	    .map(|id| self.last.get(id).or(self.values.get(id)).copied().unwrap_or(f64::NAN))
	    .collect()
    }

    fn reaction_rates(&self) -> Vec<f64> {
	self.reaction_ids()
	    .iter()
	    .map(|id| self.last.get(id).copied().unwrap_or(0.0))
	    .collect()
    }
}
