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

/* receptor_states.rs: enumerate receptor micro-states and aggregate them. */

use log::{debug, warn};
use polars::prelude::{DataFrame, Float64Chunked};

use crate::dataframe_operations::{extract_series, sum_series};
use crate::error::Result;
use crate::state::State;

pub const LIGAND_BINDINGS: [bool; 2] = [false, true];
pub const PHOSPHORYLATIONS: [bool; 2] = [false, true];
pub const REGULATOR_BINDINGS: [bool; 2] = [false, true];
pub const MIN_METHYLATION: u8 = 2;
pub const MAX_METHYLATION: u8 = 4;
pub const METHYLATION_LEVELS: [u8; 3] = [2, 3, 4];

pub const NUM_STATES: usize = LIGAND_BINDINGS.len()
    * PHOSPHORYLATIONS.len()
    * REGULATOR_BINDINGS.len()
    * METHYLATION_LEVELS.len();

/// Information about the state of receptors over time.
/// The state has 4 components:
///   Is bound to a ligand (boolean)
///   Is phosphorylated (boolean)
///   Is bound to CheR (boolean)
///   Methylation level (2, 3 or 4)
///
/// Predicates passed to the selection methods take those components in
/// that order.
#[derive(Debug, Clone)]
pub struct ReceptorStates {
    states: Vec<State>,
    total: Float64Chunked,
    num_samples: usize,
}

impl ReceptorStates {
    /// Build every state from a simulation result. The total over all
    /// states is computed once here and each state's fraction is taken
    /// relative to it before the state is stored.
    pub fn new(simulation_result: &DataFrame) -> Result<Self> {
	let num_samples = simulation_result.height();
	let mut components = Vec::with_capacity(NUM_STATES);

	// Ligand outermost, methylation innermost
	for &l in &LIGAND_BINDINGS {
	    for &p in &PHOSPHORYLATIONS {
		for &r in &REGULATOR_BINDINGS {
		    for &m in &METHYLATION_LEVELS {
			components.push((l, p, r, m));
		    }
		}
	    }
	}

	let data = components
	    .iter()
	    .map(|&(l, p, r, m)| extract_series(simulation_result, &State::make_name(l, p, r, m)))
	    .collect::<Result<Vec<_>>>()?;
	let total = sum_series("total", num_samples, &data)?;

	let degenerate = (&total).into_iter().filter(|v| *v == Some(0.0)).count();
	if degenerate > 0 {
	    warn!(
		"Total receptor concentration is zero at {} of {} time points; \
		 fractions there are reported as 0",
		degenerate, num_samples
	    );
	}

	let states = components
	    .into_iter()
	    .zip(data)
	    .map(|((l, p, r, m), series)| State::from_data(l, p, r, m, series, &total))
	    .collect::<Result<Vec<_>>>()?;

	debug!("Enumerated {} receptor states over {} samples", states.len(), num_samples);

	Ok(ReceptorStates { states, total, num_samples })
    }

    pub fn states(&self) -> &[State] {
	&self.states
    }

    pub fn len(&self) -> usize {
	self.states.len()
    }

    pub fn is_empty(&self) -> bool {
	self.states.is_empty()
    }

    pub fn num_samples(&self) -> usize {
	self.num_samples
    }

    /// Total receptor concentration over time, summed over every state.
    pub fn total(&self) -> &Float64Chunked {
	&self.total
    }

    pub fn get(&self, name: &str) -> Option<&State> {
	self.states.iter().find(|s| s.name() == name)
    }

    /// States for which `func(ligand, phosphorylated, regulator, methylation)`
    /// holds, in enumeration order.
    pub fn select_states<F>(&self, func: F) -> Vec<&State>
    where
	F: Fn(bool, bool, bool, u8) -> bool,
    {
	self.states
	    .iter()
	    .filter(|s| {
		func(
		    s.is_bound_ligand(),
		    s.is_phosphorylated(),
		    s.is_bound_regulator(),
		    s.methylation(),
		)
	    })
	    .collect()
    }

    /// Sum of concentrations of the selected states. Zero everywhere if no
    /// state is selected.
    pub fn sum_states<F>(&self, func: F) -> Result<Float64Chunked>
    where
	F: Fn(bool, bool, bool, u8) -> bool,
    {
	let selected = self.select_states(func);
	sum_series(
	    "sum",
	    self.num_samples,
	    selected.iter().map(|s| s.data()),
	)
    }

    /// Fraction of all receptors in the selected states, from the nominal
    /// series fixed at construction.
    pub fn frac_states<F>(&self, func: F) -> Result<Float64Chunked>
    where
	F: Fn(bool, bool, bool, u8) -> bool,
    {
	let selected = self.select_states(func);
	sum_series(
	    "fraction",
	    self.num_samples,
	    selected.iter().map(|s| s.nominal_data()),
	)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChemotaxisError;
    use polars::prelude::{NamedFrom, Series};
    use crate::test_support::{conserved_result, values, TOTAL_RECEPTOR};

    #[test]
    fn enumerates_every_state_once() {
	let states = ReceptorStates::new(&conserved_result(20)).unwrap();
	assert_eq!(states.len(), 24);
	assert_eq!(states.select_states(|_, _, _, _| true).len(), NUM_STATES);

	let mut names: Vec<&str> = states.states().iter().map(|s| s.name()).collect();
	names.sort();
	names.dedup();
	assert_eq!(names.len(), 24);
    }

    #[test]
    fn enumeration_order_is_fixed() {
	let states = ReceptorStates::new(&conserved_result(5)).unwrap();
	let names: Vec<&str> = states.states().iter().map(|s| s.name()).collect();
	assert_eq!(&names[..6], &["T2", "T3", "T4", "T2R", "T3R", "T4R"]);
	assert_eq!(names[6], "T2p");
	assert_eq!(names[23], "LT4pR");

	let selected: Vec<&str> = states
	    .select_states(|l, p, _, _| l && p)
	    .iter()
	    .map(|s| s.name())
	    .collect();
	assert_eq!(selected, vec!["LT2p", "LT3p", "LT4p", "LT2pR", "LT3pR", "LT4pR"]);
    }

    #[test]
    fn total_is_conserved() {
	let states = ReceptorStates::new(&conserved_result(50)).unwrap();
	let total = states.sum_states(|_, _, _, _| true).unwrap();
	assert_eq!(total.len(), 50);
	for v in values(&total) {
	    assert!((v - TOTAL_RECEPTOR).abs() <= 0.01 * TOTAL_RECEPTOR);
	}
    }

    #[test]
    fn fractions_of_everything_sum_to_one() {
	let states = ReceptorStates::new(&conserved_result(50)).unwrap();
	for v in values(&states.frac_states(|_, _, _, _| true).unwrap()) {
	    assert!((v - 1.0).abs() <= 0.01);
	}
    }

    #[test]
    fn fractions_use_the_global_total() {
	let states = ReceptorStates::new(&conserved_result(10)).unwrap();
	let bound = states.frac_states(|l, _, _, _| l).unwrap();
	let unbound = states.frac_states(|l, _, _, _| !l).unwrap();
	for (b, u) in values(&bound).into_iter().zip(values(&unbound)) {
	    assert!(b < 1.0 && u < 1.0);
	    assert!((b + u - 1.0).abs() < 1e-12);
	}
    }

    #[test]
    fn empty_selection_is_zero() {
	let states = ReceptorStates::new(&conserved_result(7)).unwrap();
	let none = |_: bool, _: bool, _: bool, m: u8| m > 4;
	assert!(states.select_states(none).is_empty());
	assert_eq!(values(&states.sum_states(none).unwrap()), vec![0.0; 7]);
	assert_eq!(values(&states.frac_states(none).unwrap()), vec![0.0; 7]);
    }

    #[test]
    fn missing_state_fails_construction() {
	let df = conserved_result(5).drop("LT3pR").unwrap();
	let err = ReceptorStates::new(&df).unwrap_err();
	assert!(matches!(err, ChemotaxisError::MissingSpecies(ref n) if n == "LT3pR"));
    }

    #[test]
    fn fractions_are_zero_where_every_state_is_empty() {
	let mut df = conserved_result(3);
	let names: Vec<String> = ReceptorStates::new(&df)
	    .unwrap()
	    .states()
	    .iter()
	    .map(|s| s.name().to_string())
	    .collect();
	for name in &names {
	    let mut data = values(&extract_series(&df, name).unwrap());
	    data[1] = 0.0;
	    df.replace(name, Series::new(name.as_str().into(), data)).unwrap();
	}

	let states = ReceptorStates::new(&df).unwrap();
	assert_eq!(values(states.total())[1], 0.0);

	let all = values(&states.frac_states(|_, _, _, _| true).unwrap());
	assert_eq!(all[1], 0.0);
	assert!((all[0] - 1.0).abs() < 1e-12, "{}", all[0]);
	assert!((all[2] - 1.0).abs() < 1e-12, "{}", all[2]);

	let bound = values(&states.frac_states(|l, _, _, _| l).unwrap());
	assert_eq!(bound[1], 0.0);
	for state in states.states() {
	    assert_eq!(values(state.nominal_data())[1], 0.0, "{}", state.name());
	}
    }
}
