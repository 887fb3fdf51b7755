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

/* error.rs: errors raised while aggregating receptor states. */

use polars::prelude::PolarsError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChemotaxisError>;

/// Everything that can go wrong between a finished simulation and an
/// aggregated time series.
#[derive(Error, Debug)]
pub enum ChemotaxisError {
    /// Aggregation name has the wrong number of characters
    #[error("Name {pattern} must be {expected} characters, found {found}.")]
    InvalidPatternLength {
	pattern: String,
	expected: usize,
	found: usize,
    },
    /// Aggregation name contains a character that is not allowed at its position
    #[error("In name {pattern}, the character {character} in position {position} is invalid.")]
    InvalidPattern {
	pattern: String,
	character: char,
	position: usize,
    },
    /// A species expected by the state model is absent from the simulation
    /// result. Usually the reaction network and the state model disagree.
    #[error("Species {0} not found in simulation result.")]
    MissingSpecies(String),
    /// No resolution path produced a value for the requested variable
    #[error("Variable {0} not found.")]
    VariableNotFound(String),
    /// Reaction or species id unknown to the simulator
    #[error("Identifier {0} is not known to the simulator.")]
    UnknownIdentifier(String),
    #[error("No simulation result available; run the model first.")]
    NotSimulated,
    #[error("Invalid simulation configuration: {0}")]
    InvalidConfig(String),
    #[error("Series {name} has {found} samples, expected {expected}.")]
    LengthMismatch {
	name: String,
	found: usize,
	expected: usize,
    },
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}
