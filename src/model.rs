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

/* model.rs: run the chemotaxis model through a simulation engine and provide
access to its variables. */

use std::collections::HashMap;

use log::{debug, info, warn};
use polars::prelude::{DataFrame, Float64Chunked};

use crate::config::{InitialConcentrations, SimulationConfig};
use crate::dataframe_operations::{
    extract_series, phosphorylated_fraction, restrict_time_window, TIME
};
use crate::error::{ChemotaxisError, Result};
use crate::factory::StateAggregationFactory;
use crate::receptor_states::ReceptorStates;

pub const YP_FRACTION: &str = "fYp";
pub const BP_FRACTION: &str = "fBp";

/// The engine that integrates the reaction network. Results come back as a
/// table with one column per selected identifier plus "time".
pub trait Simulator {
    fn floating_species_ids(&self) -> Vec<String>;

    fn reaction_ids(&self) -> Vec<String>;

    /// Set the current value of a species or parameter.
    fn set_value(&mut self, id: &str, value: f64) -> Result<()>;

    fn simulate(
	&mut self,
	start: f64,
	end: f64,
	samples: usize,
	selection: &[String],
    ) -> Result<DataFrame>;

    /// Current concentrations, in the order of `floating_species_ids`.
    fn floating_species_concentrations(&self) -> Vec<f64>;

    /// Current reaction rates, in the order of `reaction_ids`.
    fn reaction_rates(&self) -> Vec<f64>;
}

/// Anything that can hand out named time series, e.g. for plotting.
pub trait VariableProvider {
    fn variable(&self, name: &str) -> Result<Float64Chunked>;
}

/// A simulator that replays a time course recorded from an engine run.
///
/// Columns other than "time" are species unless listed as reactions.
/// Values set with `set_value` are only reflected in the current state; the
/// recorded trajectory itself is not recomputed.
#[derive(Debug, Clone)]
pub struct RecordedSimulation {
    time_course: DataFrame,
    reactions: Vec<String>,
    current: HashMap<String, f64>,
}

impl RecordedSimulation {
    pub fn new(time_course: DataFrame, reactions: Vec<String>) -> Result<Self> {
	if time_course.column(TIME).is_err() {
	    return Err(ChemotaxisError::MissingSpecies(TIME.to_string()));
	}
	if let Some(missing) = reactions
	    .iter()
	    .find(|r| time_course.column(r.as_str()).is_err())
	{
	    return Err(ChemotaxisError::MissingSpecies(missing.clone()));
	}
	if time_course.height() == 0 {
	    return Err(ChemotaxisError::InvalidConfig(
		"recorded time course has no samples".to_string(),
	    ));
	}

	let mut recorded = RecordedSimulation {
	    time_course,
	    reactions,
	    current: HashMap::new(),
	};
	let initial = recorded.time_course.clone();
	recorded.record_row(&initial, 0)?;
	Ok(recorded)
    }

    pub fn time_course(&self) -> &DataFrame {
	&self.time_course
    }

    // Make the values at `row` of `df` the current values
    fn record_row(&mut self, df: &DataFrame, row: usize) -> Result<()> {
	for name in df.get_column_names() {
	    if name.as_str() == TIME {
		continue;
	    }
	    let series = extract_series(df, name.as_str())?;
	    if let Some(value) = series.get(row) {
		self.current.insert(name.to_string(), value);
	    }
	}
	Ok(())
    }

    fn current_values(&self, ids: &[String]) -> Vec<f64> {
	ids.iter()
	    .map(|id| self.current.get(id).copied().unwrap_or(f64::NAN))
	    .collect()
    }
}

impl Simulator for RecordedSimulation {
    fn floating_species_ids(&self) -> Vec<String> {
	self.time_course
	    .get_column_names()
	    .into_iter()
	    .map(|name| name.to_string())
	    .filter(|name| name != TIME && !self.reactions.contains(name))
	    .collect()
    }

    fn reaction_ids(&self) -> Vec<String> {
	self.reactions.clone()
    }

    fn set_value(&mut self, id: &str, value: f64) -> Result<()> {
	if !self.current.contains_key(id) {
	    return Err(ChemotaxisError::UnknownIdentifier(id.to_string()));
	}
	debug!("Setting {} = {} (recorded trajectory is unchanged)", id, value);
	self.current.insert(id.to_string(), value);
	Ok(())
    }

    fn simulate(
	&mut self,
	start: f64,
	end: f64,
	samples: usize,
	selection: &[String],
    ) -> Result<DataFrame> {
	let result = restrict_time_window(&self.time_course, start, end, selection)?;
	if result.height() == 0 {
	    return Err(ChemotaxisError::InvalidConfig(format!(
		"recorded time course has no samples between {} and {}",
		start, end
	    )));
	}
	if result.height() != samples {
	    warn!(
		"Recorded time course has {} samples in [{}, {}], {} requested",
		result.height(), start, end, samples
	    );
	}
	self.record_row(&result, result.height() - 1)?;
	Ok(result)
    }

    fn floating_species_concentrations(&self) -> Vec<f64> {
	self.current_values(&self.floating_species_ids())
    }

    fn reaction_rates(&self) -> Vec<f64> {
	self.current_values(&self.reactions)
    }
}

/// Environment for computational experiments on the chemotaxis system:
///
/// ```ignore
/// let mut model = ChemotaxisModel::new(simulator, InitialConcentrations::default());
/// model.initialize()?;
/// model.run(&SimulationConfig::default())?;
/// let bound = model.get_variable("fT___")?;
/// ```
pub struct ChemotaxisModel<S: Simulator> {
    simulator: S,
    concentrations: InitialConcentrations,
    result: Option<DataFrame>,
    factory: Option<StateAggregationFactory>,
}

impl<S: Simulator> ChemotaxisModel<S> {
    pub fn new(simulator: S, concentrations: InitialConcentrations) -> Self {
	ChemotaxisModel {
	    simulator,
	    concentrations,
	    result: None,
	    factory: None,
	}
    }

    pub fn simulator(&self) -> &S {
	&self.simulator
    }

    pub fn concentrations(&self) -> &InitialConcentrations {
	&self.concentrations
    }

    /// Push the initial concentrations into the simulator.
    pub fn initialize(&mut self) -> Result<()> {
	for (id, value) in self.concentrations.assignments() {
	    self.simulator.set_value(id, value)?;
	}
	Ok(())
    }

    /// Simulate every floating species and reaction over the configured
    /// window, then build the receptor states from the result.
    pub fn run(&mut self, config: &SimulationConfig) -> Result<&DataFrame> {
	config.validate()?;

	let mut selection = self.simulator.floating_species_ids();
	selection.extend(self.simulator.reaction_ids());
	selection.push(TIME.to_string());

	let samples = config.samples();
	info!(
	    "Simulating {} identifiers from {} to {} ({} samples)",
	    selection.len(), config.start, config.end, samples
	);

	let result = self.simulator.simulate(config.start, config.end, samples, &selection)?;
	let states = ReceptorStates::new(&result)?;
	self.factory = Some(StateAggregationFactory::new(states));
	self.result = Some(result);

	self.result.as_ref().ok_or(ChemotaxisError::NotSimulated)
    }

    pub fn result(&self) -> Result<&DataFrame> {
	self.result.as_ref().ok_or(ChemotaxisError::NotSimulated)
    }

    pub fn factory(&self) -> Result<&StateAggregationFactory> {
	self.factory.as_ref().ok_or(ChemotaxisError::NotSimulated)
    }

    pub fn receptor_states(&self) -> Result<&ReceptorStates> {
	Ok(self.factory()?.receptor_states())
    }

    /// Fraction of CheY that is phosphorylated.
    pub fn yp_fraction(&self) -> Result<Float64Chunked> {
	phosphorylated_fraction(self.result()?, "Yp", "Y", YP_FRACTION)
    }

    /// Fraction of CheB that is phosphorylated.
    pub fn bp_fraction(&self) -> Result<Float64Chunked> {
	phosphorylated_fraction(self.result()?, "Bp", "B", BP_FRACTION)
    }

    /// Resolve a variable name. In order: "time", the special fractions
    /// "fYp" and "fBp", an aggregation name (see `StateAggregationFactory`),
    /// and finally any species or reaction in the result.
    pub fn get_variable(&self, name: &str) -> Result<Float64Chunked> {
	match name {
	    TIME => return extract_series(self.result()?, TIME),
	    YP_FRACTION => return self.yp_fraction(),
	    BP_FRACTION => return self.bp_fraction(),
	    _ => {}
	}

	match self.factory()?.v(name) {
	    Ok(series) => return Ok(series),
	    Err(ChemotaxisError::InvalidPattern { .. })
	    | Err(ChemotaxisError::InvalidPatternLength { .. }) => {}
	    Err(e) => return Err(e),
	}

	match extract_series(self.result()?, name) {
	    Ok(series) => Ok(series),
	    Err(ChemotaxisError::MissingSpecies(_)) => {
		Err(ChemotaxisError::VariableNotFound(name.to_string()))
	    }
	    Err(e) => Err(e),
	}
    }

    /// Current rate of the reaction `id`.
    pub fn reaction_rate(&self, id: &str) -> Result<f64> {
	let ids = self.simulator.reaction_ids();
	let index = ids
	    .iter()
	    .position(|r| r == id)
	    .ok_or_else(|| ChemotaxisError::UnknownIdentifier(id.to_string()))?;
	self.simulator
	    .reaction_rates()
	    .get(index)
	    .copied()
	    .ok_or_else(|| ChemotaxisError::UnknownIdentifier(id.to_string()))
    }

    /// Current concentration of the floating species `id`.
    pub fn concentration(&self, id: &str) -> Result<f64> {
	let ids = self.simulator.floating_species_ids();
	let index = ids
	    .iter()
	    .position(|s| s == id)
	    .ok_or_else(|| ChemotaxisError::UnknownIdentifier(id.to_string()))?;
	self.simulator
	    .floating_species_concentrations()
	    .get(index)
	    .copied()
	    .ok_or_else(|| ChemotaxisError::UnknownIdentifier(id.to_string()))
    }
}

impl<S: Simulator> VariableProvider for ChemotaxisModel<S> {
    fn variable(&self, name: &str) -> Result<Float64Chunked> {
	self.get_variable(name)
    }
}
