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

/* dataframe_operations.rs: time-series arithmetic on simulation results using
Polars dataframes. */

use polars::prelude::*;

use crate::error::{ChemotaxisError, Result};

/// Name of the distinguished time column in every simulation result.
pub const TIME: &str = "time";

/// Pull a single column out of a simulation result as f64 values.
/// A missing column means the reaction network doesn't define the species.
pub fn extract_series(df: &DataFrame, name: &str) -> Result<Float64Chunked> {
    let column = df
	.column(name)
	.map_err(|_| ChemotaxisError::MissingSpecies(name.to_string()))?;

    let series = column
	.as_materialized_series()
	.cast(&DataType::Float64)?;

    Ok(series.f64()?.clone())
}

pub fn zeros(name: &str, length: usize) -> Float64Chunked {
    Float64Chunked::full(name.into(), 0.0, length)
}

/// Element-wise sum over time. An empty selection sums to zero at every time
/// point rather than failing.
pub fn sum_series<'a, I>(name: &str, length: usize, series: I) -> Result<Float64Chunked>
where
    I: IntoIterator<Item = &'a Float64Chunked>,
{
    let mut total = zeros(name, length);

    for s in series {
	if s.len() != length {
	    return Err(ChemotaxisError::LengthMismatch {
		name: s.name().to_string(),
		found: s.len(),
		expected: length,
	    });
	}
	total = &total + s;
    }

    Ok(total.with_name(name.into()))
}

/// Element-wise quotient. Where the denominator is zero the quotient is
/// defined as 0.0; the number of such time points is returned alongside.
pub fn divide_or_zero(
    numerator: &Float64Chunked,
    denominator: &Float64Chunked,
) -> Result<(Float64Chunked, usize)> {
    if numerator.len() != denominator.len() {
	return Err(ChemotaxisError::LengthMismatch {
	    name: denominator.name().to_string(),
	    found: denominator.len(),
	    expected: numerator.len(),
	});
    }

    let mut degenerate = 0_usize;
    let quotient: Float64Chunked = numerator
	.into_iter()
	.zip(denominator.into_iter())
	.map(|pair| match pair {
	    (Some(_), Some(d)) if d == 0.0 => {
		degenerate += 1;
		Some(0.0)
	    }
	    (Some(n), Some(d)) => Some(n / d),
	    _ => None,
	})
	.collect();

    Ok((quotient.with_name(numerator.name().clone()), degenerate))
}

/// Fraction of a pool in its phosphorylated form, p / (p + u). Time points
/// where the pool is empty give 0.0.
pub fn phosphorylated_fraction(
    df: &DataFrame,
    phosphorylated: &str,
    unphosphorylated: &str,
    alias: &str,
) -> Result<Float64Chunked> {
    for name in [phosphorylated, unphosphorylated] {
	if df.column(name).is_err() {
	    return Err(ChemotaxisError::MissingSpecies(name.to_string()));
	}
    }

    let p = col(phosphorylated).cast(DataType::Float64);
    let u = col(unphosphorylated).cast(DataType::Float64);
    let pool = p.clone() + u;

    let result = df
	.clone()
	.lazy()
	.select([
	    when(pool.clone().eq(lit(0.0)))
		.then(lit(0.0))
		.otherwise(p / pool)
		.alias(alias)
	])
	.collect()?;

    extract_series(&result, alias)
}

/// Keep the samples with start <= time <= end and only the selected columns,
/// in selection order.
pub fn restrict_time_window(
    df: &DataFrame,
    start: f64,
    end: f64,
    selection: &[String],
) -> Result<DataFrame> {
    if df.column(TIME).is_err() {
	return Err(ChemotaxisError::MissingSpecies(TIME.to_string()));
    }
    if let Some(missing) = selection.iter().find(|s| df.column(s.as_str()).is_err()) {
	return Err(ChemotaxisError::MissingSpecies(missing.clone()));
    }

    let columns: Vec<Expr> = selection
	.iter()
	.map(|s| col(s.as_str()))
	.collect();

    let result = df
	.clone()
	.lazy()
	.filter(
	    col(TIME)
		.cast(DataType::Float64)
		.gt_eq(lit(start))
		.and(col(TIME).cast(DataType::Float64).lt_eq(lit(end)))
	)
	.select(columns)
	.collect()?;

    Ok(result)
}
