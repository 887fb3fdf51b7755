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

/* lib.rs: receptor state aggregation over chemotaxis simulation results. */

//! Receptor state aggregation for the E. coli chemotaxis model of Spiro et
//! al. (PNAS, 1997).
//!
//! A simulation engine produces a time course with one column per species.
//! [`ReceptorStates`] enumerates the 24 receptor micro-states (ligand
//! binding, phosphorylation, CheR binding, methylation 2-4) found in that
//! time course, and [`StateAggregationFactory`] sums or fractions subsets of
//! them selected by short names such as `"fTT__"`.

pub mod config;
pub mod dataframe_operations;
pub mod error;
pub mod factory;
pub mod model;
pub mod pattern;
pub mod receptor_states;
pub mod state;

pub use config::{InitialConcentrations, SimulationConfig};
pub use error::{ChemotaxisError, Result};
pub use factory::StateAggregationFactory;
pub use model::{ChemotaxisModel, RecordedSimulation, Simulator, VariableProvider};
pub use pattern::{Aggregation, AxisMatcher, StatePattern};
pub use receptor_states::ReceptorStates;
pub use state::State;
