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

/* pattern.rs: parse aggregation names such as "tTT_3" into state selectors. */

use std::fmt;
use std::str::FromStr;

use crate::error::{ChemotaxisError, Result};
use crate::receptor_states::{MAX_METHYLATION, MIN_METHYLATION};

/// Number of state axes: ligand, phosphorylation, CheR, methylation.
pub const NUM_AXES: usize = 4;

/// Length of an aggregation name: aggregation kind plus one character per axis.
pub const PATTERN_LENGTH: usize = NUM_AXES + 1;

/// How the selected states are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Total concentration ("t")
    Total,
    /// Fraction of all receptors
    Fraction,
}

/// Selector for one component of the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisMatcher {
    Wildcard,
    MustBeTrue,
    MustBeFalse,
    ExactValue(u8),
}

impl AxisMatcher {
    fn parse_boolean(pattern: &str, character: char, position: usize) -> Result<Self> {
	match character {
	    '_' => Ok(AxisMatcher::Wildcard),
	    'T' => Ok(AxisMatcher::MustBeTrue),
	    'F' => Ok(AxisMatcher::MustBeFalse),
	    _ => Err(invalid(pattern, character, position)),
	}
    }

    fn parse_methylation(pattern: &str, character: char, position: usize) -> Result<Self> {
	if character == '_' {
	    return Ok(AxisMatcher::Wildcard);
	}
	match character.to_digit(10) {
	    Some(level) if (MIN_METHYLATION as u32..=MAX_METHYLATION as u32).contains(&level) => {
		Ok(AxisMatcher::ExactValue(level as u8))
	    }
	    _ => Err(invalid(pattern, character, position)),
	}
    }

    pub fn matches_flag(&self, value: bool) -> bool {
	match self {
	    AxisMatcher::Wildcard => true,
	    AxisMatcher::MustBeTrue => value,
	    AxisMatcher::MustBeFalse => !value,
	    AxisMatcher::ExactValue(_) => false,
	}
    }

    pub fn matches_level(&self, value: u8) -> bool {
	match self {
	    AxisMatcher::Wildcard => true,
	    AxisMatcher::ExactValue(level) => *level == value,
	    _ => false,
	}
    }

    fn symbol(&self) -> char {
	match self {
	    AxisMatcher::Wildcard => '_',
	    AxisMatcher::MustBeTrue => 'T',
	    AxisMatcher::MustBeFalse => 'F',
	    AxisMatcher::ExactValue(level) => char::from(b'0' + level),
	}
    }
}

fn invalid(pattern: &str, character: char, position: usize) -> ChemotaxisError {
    ChemotaxisError::InvalidPattern {
	pattern: pattern.to_string(),
	character,
	position,
    }
}

/// A parsed aggregation name.
///
/// The first character chooses the aggregation: "t" sums concentrations, any
/// other character gives the fraction of all receptors. The remaining
/// characters select ligand binding, phosphorylation, CheR binding and
/// methylation, in that order. "_" matches anything, "T"/"F" require a
/// boolean component to be true/false, and a digit requires that
/// methylation level.
///
/// ```ignore
/// let p: StatePattern = "fTT__".parse()?;  // ligand-bound & phosphorylated
/// let q: StatePattern = "t___3".parse()?;  // all triply methylated
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatePattern {
    pub aggregation: Aggregation,
    pub ligand: AxisMatcher,
    pub phosphorylated: AxisMatcher,
    pub regulator: AxisMatcher,
    pub methylation: AxisMatcher,
}

impl StatePattern {
    pub fn matches(
	&self,
	is_bound_ligand: bool,
	is_phosphorylated: bool,
	is_bound_regulator: bool,
	methylation: u8,
    ) -> bool {
	self.ligand.matches_flag(is_bound_ligand)
	    && self.phosphorylated.matches_flag(is_phosphorylated)
	    && self.regulator.matches_flag(is_bound_regulator)
	    && self.methylation.matches_level(methylation)
    }
}

impl FromStr for StatePattern {
    type Err = ChemotaxisError;

    fn from_str(name: &str) -> Result<Self> {
	let chars: Vec<char> = name.chars().collect();
	if chars.len() != PATTERN_LENGTH {
	    return Err(ChemotaxisError::InvalidPatternLength {
		pattern: name.to_string(),
		expected: PATTERN_LENGTH,
		found: chars.len(),
	    });
	}

	let aggregation = if chars[0] == 't' {
	    Aggregation::Total
	} else {
	    Aggregation::Fraction
	};

	Ok(StatePattern {
	    aggregation,
	    ligand: AxisMatcher::parse_boolean(name, chars[1], 1)?,
	    phosphorylated: AxisMatcher::parse_boolean(name, chars[2], 2)?,
	    regulator: AxisMatcher::parse_boolean(name, chars[3], 3)?,
	    methylation: AxisMatcher::parse_methylation(name, chars[4], 4)?,
	})
    }
}

impl fmt::Display for StatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
	let kind = match self.aggregation {
	    Aggregation::Total => 't',
	    Aggregation::Fraction => 'f',
	};
	write!(
	    f,
	    "{}{}{}{}{}",
	    kind,
	    self.ligand.symbol(),
	    self.phosphorylated.symbol(),
	    self.regulator.symbol(),
	    self.methylation.symbol()
	)
    }
}

/// Every canonical aggregation name ("t" or "f" prefix), totals first.
pub fn all_patterns() -> Vec<StatePattern> {
    let flags = [AxisMatcher::Wildcard, AxisMatcher::MustBeTrue, AxisMatcher::MustBeFalse];
    let levels: Vec<AxisMatcher> = std::iter::once(AxisMatcher::Wildcard)
	.chain((MIN_METHYLATION..=MAX_METHYLATION).map(AxisMatcher::ExactValue))
	.collect();

    let mut patterns = Vec::new();
    for aggregation in [Aggregation::Total, Aggregation::Fraction] {
	for ligand in flags {
	    for phosphorylated in flags {
		for regulator in flags {
		    for &methylation in &levels {
			patterns.push(StatePattern {
			    aggregation,
			    ligand,
			    phosphorylated,
			    regulator,
			    methylation,
			});
		    }
		}
	    }
	}
    }
    patterns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position_of(err: ChemotaxisError) -> (char, usize) {
	match err {
	    ChemotaxisError::InvalidPattern { character, position, .. } => (character, position),
	    other => panic!("unexpected error: {other}"),
	}
    }

    #[test]
    fn parses_total_and_fraction() {
	let p: StatePattern = "tTT_3".parse().unwrap();
	assert_eq!(p.aggregation, Aggregation::Total);
	assert_eq!(p.ligand, AxisMatcher::MustBeTrue);
	assert_eq!(p.phosphorylated, AxisMatcher::MustBeTrue);
	assert_eq!(p.regulator, AxisMatcher::Wildcard);
	assert_eq!(p.methylation, AxisMatcher::ExactValue(3));

	let q: StatePattern = "fF_F_".parse().unwrap();
	assert_eq!(q.aggregation, Aggregation::Fraction);
	assert_eq!(q.regulator, AxisMatcher::MustBeFalse);
    }

    #[test]
    fn any_leading_character_but_t_is_a_fraction() {
	for name in ["f____", "x____", "T____"] {
	    let p: StatePattern = name.parse().unwrap();
	    assert_eq!(p.aggregation, Aggregation::Fraction, "{name}");
	}
    }

    #[test]
    fn wrong_length() {
	for name in ["", "t___", "t_____", "tTT3"] {
	    let err = name.parse::<StatePattern>().unwrap_err();
	    assert!(
		matches!(err, ChemotaxisError::InvalidPatternLength { expected: 5, .. }),
		"{name}"
	    );
	}
    }

    #[test]
    fn bad_boolean_characters() {
	assert_eq!(position_of("tX___".parse::<StatePattern>().unwrap_err()), ('X', 1));
	assert_eq!(position_of("t_t__".parse::<StatePattern>().unwrap_err()), ('t', 2));
	assert_eq!(position_of("t__3_".parse::<StatePattern>().unwrap_err()), ('3', 3));
    }

    #[test]
    fn bad_methylation_characters() {
	for (name, c) in [("t___1", '1'), ("t___5", '5'), ("t___T", 'T'), ("t___x", 'x')] {
	    assert_eq!(position_of(name.parse::<StatePattern>().unwrap_err()), (c, 4));
	}
    }

    #[test]
    fn regulator_matcher_reads_regulator() {
	let p: StatePattern = "t__T_".parse().unwrap();
	assert!(p.matches(false, false, true, 2));
	assert!(!p.matches(false, true, false, 2));
    }

    #[test]
    fn conjunction_of_axes() {
	let p: StatePattern = "tTFF4".parse().unwrap();
	assert!(p.matches(true, false, false, 4));
	assert!(!p.matches(true, false, false, 3));
	assert!(!p.matches(false, false, false, 4));
	assert!(!p.matches(true, true, false, 4));
	assert!(!p.matches(true, false, true, 4));
    }

    #[test]
    fn display_round_trips() {
	for name in ["t____", "fTT_3", "tFTF2", "f___4"] {
	    let p: StatePattern = name.parse().unwrap();
	    assert_eq!(p.to_string(), name);
	}
    }

    #[test]
    fn enumerates_all_patterns() {
	let patterns = all_patterns();
	assert_eq!(patterns.len(), 2 * 3 * 3 * 3 * 4);
	assert_eq!(patterns[0].to_string(), "t____");
	for p in &patterns {
	    assert_eq!(p.to_string().parse::<StatePattern>().unwrap(), *p);
	}
    }
}
