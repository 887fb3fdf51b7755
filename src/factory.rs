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

/* factory.rs: evaluate aggregation names against the receptor states. */

use log::debug;
use polars::prelude::Float64Chunked;

use crate::error::Result;
use crate::pattern::{Aggregation, StatePattern};
use crate::receptor_states::ReceptorStates;

/// State aggregations are summations of values of a subset of states.
///
/// An aggregation is either a total concentration, denoted by the prefix
/// "t", or a fraction of the total concentration of receptors, denoted by
/// "f". For example the fraction of receptors that are bound to ligand and
/// phosphorylated is "fTT__", and the total concentration of receptors
/// that are not bound to CheR and have a methylation of 3 is "t__F3". The
/// total concentration over all states is "t____", and "f____" is 1.
#[derive(Debug, Clone)]
pub struct StateAggregationFactory {
    receptor_states: ReceptorStates,
}

impl StateAggregationFactory {
    pub fn new(receptor_states: ReceptorStates) -> Self {
	StateAggregationFactory { receptor_states }
    }

    pub fn receptor_states(&self) -> &ReceptorStates {
	&self.receptor_states
    }

    /// Values of the aggregation `name`. The name is fully validated before
    /// any states are summed.
    pub fn v(&self, name: &str) -> Result<Float64Chunked> {
	let pattern: StatePattern = name.parse()?;
	self.evaluate(&pattern)
	    .map(|series| series.with_name(name.into()))
    }

    pub fn evaluate(&self, pattern: &StatePattern) -> Result<Float64Chunked> {
	debug!("Aggregating states matching {}", pattern);

	let func = |l, p, r, m| pattern.matches(l, p, r, m);
	match pattern.aggregation {
	    Aggregation::Total => self.receptor_states.sum_states(func),
	    Aggregation::Fraction => self.receptor_states.frac_states(func),
	}
    }
}
