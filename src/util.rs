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

/* util.rs: reading and writing time courses, parsing command-line lists. */

use anyhow::{Context, Result, bail};
use polars::prelude::{DataFrame, ParquetReader, ParquetWriter, SerReader};
use std::fs::File;
use std::path::Path;

/* Input a comma-separated list of names, e.g. "fYp,t____,LT2p". Whitespace
around names is ignored. Empty names and repeated names are errors. */
pub fn parse_name_list(input: &str) -> Result<Vec<String>> {
    let mut names: Vec<String> = Vec::new();

    for (idx, chunk) in input.split(',').enumerate() {
	let name = chunk.trim();
	if name.is_empty() {
	    bail!("empty name at position {} in `{}`", idx + 1, input);
	}
	if names.iter().any(|n| n == name) {
	    bail!("name `{}` listed more than once", name);
	}
	names.push(name.to_string());
    }

    Ok(names)
}

pub fn read_time_course<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
    let path = path.as_ref();
    let file = File::open(path)
	.with_context(|| format!("Failed to open time course '{}'", path.display()))?;
    let df = ParquetReader::new(file)
	.finish()
	.with_context(|| format!("Failed to read parquet file '{}'", path.display()))?;
    Ok(df)
}

pub fn write_parquet<P: AsRef<Path>>(df: &mut DataFrame, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
	.with_context(|| format!("Failed to create '{}'", path.display()))?;
    ParquetWriter::new(file).finish(df)?;
    Ok(())
}
