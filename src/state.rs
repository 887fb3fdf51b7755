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

/* state.rs: a single receptor micro-state and its time course. */

use polars::prelude::{DataFrame, Float64Chunked};

use crate::dataframe_operations::{divide_or_zero, extract_series};
use crate::error::Result;

/// One element of the receptor state: ligand binding, phosphorylation, CheR
/// binding and methylation level, plus the concentration of receptors in
/// that state over time.
///
/// The name is the species identifier used by the reaction network, e.g.
/// `LT3p` for a ligand-bound, phosphorylated, triply methylated receptor that
/// is not bound to CheR. Data is read from the simulation result under
/// that name. The nominal data is the fraction of `total` in this state,
/// with 0.0 wherever `total` is zero.
#[derive(Debug, Clone)]
pub struct State {
    is_bound_ligand: bool,
    is_phosphorylated: bool,
    is_bound_regulator: bool,
    methylation: u8,
    name: String,
    data: Float64Chunked,
    nominal_data: Float64Chunked,
}

impl State {
    pub fn new(
	is_bound_ligand: bool,
	is_phosphorylated: bool,
	is_bound_regulator: bool,
	methylation: u8,
	simulation_result: &DataFrame,
	total: &Float64Chunked,
    ) -> Result<Self> {
	let name = Self::make_name(
	    is_bound_ligand, is_phosphorylated, is_bound_regulator, methylation
	);
	let data = extract_series(simulation_result, &name)?;
	Self::from_data(
	    is_bound_ligand, is_phosphorylated, is_bound_regulator, methylation, data, total
	)
    }

    pub(crate) fn from_data(
	is_bound_ligand: bool,
	is_phosphorylated: bool,
	is_bound_regulator: bool,
	methylation: u8,
	data: Float64Chunked,
	total: &Float64Chunked,
    ) -> Result<Self> {
	let name = Self::make_name(
	    is_bound_ligand, is_phosphorylated, is_bound_regulator, methylation
	);
	let (nominal_data, _) = divide_or_zero(&data, total)?;

	Ok(State {
	    is_bound_ligand,
	    is_phosphorylated,
	    is_bound_regulator,
	    methylation,
	    name,
	    data,
	    nominal_data,
	})
    }

    /// "LT" or "T", then the methylation level, then "p" if phosphorylated,
    /// then "R" if bound to CheR.
    pub fn make_name(
	is_bound_ligand: bool,
	is_phosphorylated: bool,
	is_bound_regulator: bool,
	methylation: u8,
    ) -> String {
	let mut name = String::with_capacity(5);
	if is_bound_ligand {
	    name.push_str("LT");
	} else {
	    name.push('T');
	}
	name.push_str(&methylation.to_string());
	if is_phosphorylated {
	    name.push('p');
	}
	if is_bound_regulator {
	    name.push('R');
	}
	name
    }

    pub fn name(&self) -> &str {
	&self.name
    }

    pub fn is_bound_ligand(&self) -> bool {
	self.is_bound_ligand
    }

    pub fn is_phosphorylated(&self) -> bool {
	self.is_phosphorylated
    }

    pub fn is_bound_regulator(&self) -> bool {
	self.is_bound_regulator
    }

    pub fn methylation(&self) -> u8 {
	self.methylation
    }

    pub fn data(&self) -> &Float64Chunked {
	&self.data
    }

    /// Fraction of the receptor pool in this state.
    pub fn nominal_data(&self) -> &Float64Chunked {
	&self.nominal_data
    }
}
