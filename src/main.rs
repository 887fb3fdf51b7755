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

/* main.rs: command-line interface */

use polars::prelude::{ChunkAgg, Column, DataFrame, IntoSeries};

use std::fs::{create_dir_all, remove_file, write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};

use anyhow::{Context, Result, bail};

use chemotaxis::dataframe_operations::{extract_series, TIME};
use chemotaxis::pattern::all_patterns;
use chemotaxis::{ChemotaxisModel, InitialConcentrations, RecordedSimulation, SimulationConfig};

mod util;

#[derive(Parser)]
#[command(
    name = "chemotaxis",
    version = "1.0.0",
    author = "Andrew T. Martens <andrew_martens@hms.harvard.edu>",
    about = "Receptor state aggregation for E. coli chemotaxis simulations",
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
	about = "Resolve variables (species, fYp/fBp, or aggregation names \
		 such as fTT__) from a recorded time course"
    )]
    Aggregate {
	#[arg(
	    short = 't',
	    long = "time-course",
	    help = "Simulation time course (parquet), one column per species \
		    plus \"time\"",
	    required = true
	)]
	time_course_path: String,

	#[arg(
	    short = 'V',
	    long = "variables",
	    help = "Comma-separated variables to write, e.g. \"fYp,t____,fTT__\"",
	    required = true
	)]
	variables: String,

	#[arg(
	    short = 'o',
	    long = "out-file",
	    help = "Output file (parquet)",
	    required = true
	)]
	out_file: String,

	#[arg(
	    short = 'r',
	    long = "reactions",
	    help = "Comma-separated columns that are reaction rates, not species"
	)]
	reactions: Option<String>,

	#[arg(
	    short = 's',
	    long = "start",
	    default_value_t = 0.0,
	    help = "Simulation start time"
	)]
	start: f64,

	#[arg(
	    short = 'e',
	    long = "end",
	    help = "Simulation end time. Defaults to the last recorded time."
	)]
	end: Option<f64>,

	#[arg(
	    short = 'n',
	    long = "samples",
	    help = "Expected number of samples. Defaults to 10 per unit time."
	)]
	samples: Option<usize>,

	#[arg(short, long, action = ArgAction::Count)]
	verbosity: u8,
    },

    #[command(
	about = "List every receptor state with its final fraction of the \
		 receptor pool"
    )]
    States {
	#[arg(
	    short = 't',
	    long = "time-course",
	    help = "Simulation time course (parquet)",
	    required = true
	)]
	time_course_path: String,

	#[arg(short, long, action = ArgAction::Count)]
	verbosity: u8,
    },

    #[command(about = "List every valid aggregation name")]
    Patterns,
}

/*
   Boilerplate function that starts the program and immediately calls run(),
   and takes care of error handling.
*/
fn main() -> Result<()> {
    if let Err(e) = run() {
	eprintln!("Error: {:?}", e);
	std::process::exit(1);
    }
    Ok(())
}

/*
   Process command-line arguments & invoke the corresponding subroutine.
*/
fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
	Commands::Aggregate {
	    time_course_path, variables, out_file, reactions, start, end,
	    samples, verbosity
	} => {
	    init_logging(verbosity);
	    run_aggregate(
		time_course_path,
		variables,
		out_file,
		reactions,
		start,
		end,
		samples
	    )
	}

	Commands::States { time_course_path, verbosity } => {
	    init_logging(verbosity);
	    run_states(time_course_path)
	}

	Commands::Patterns => {
	    for pattern in all_patterns() {
		println!("{}", pattern);
	    }
	    Ok(())
	}
    }
}

// -v for info, -vv for debug. RUST_LOG still wins if set.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
	0 => "warn",
	1 => "info",
	_ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

// Does a directory exist? Is it writeable?
fn ensure_writable_dir<P: AsRef<Path>>(path: P, temp_filename : String) -> Result<()> {
    let path = path.as_ref();

    if path.exists() {
	if !path.is_dir() {
	    anyhow::bail!("Path exists but is not a directory: {}", path.display());
	}

	// Check writability by trying to create a temp file
	let test_path = path.join(temp_filename);
	write(&test_path, b"test").context("Directory exists but is not writable")?;
	remove_file(&test_path).ok(); // Cleanup, ignore error
    } else {
	create_dir_all(path)
	    .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }

    Ok(())
}

fn load_model(
    time_course_path: &str,
    reactions: Option<String>,
) -> Result<(ChemotaxisModel<RecordedSimulation>, f64)> {
    let time_course = util::read_time_course(time_course_path)?;

    let last_time = extract_series(&time_course, TIME)?
	.max()
	.context("Time course has no samples")?;

    let reactions = match reactions {
	Some(reactions) => util::parse_name_list(&reactions)?,
	None => Vec::new(),
    };

    let simulator = RecordedSimulation::new(time_course, reactions)?;
    let model = ChemotaxisModel::new(simulator, InitialConcentrations::default());

    Ok((model, last_time))
}

fn run_aggregate(
    time_course_path : String,
    variables : String,
    out_file : String,
    reactions : Option<String>,
    start : f64,
    end : Option<f64>,
    samples : Option<usize>,
) -> Result<()> {
    let variables = util::parse_name_list(&variables)?;

    // Make sure that output directory exists and can be written to
    let out_path = PathBuf::from(&out_file);
    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
	ensure_writable_dir(parent, ".chemotaxis_write_test".to_string())?;
    }

    let (mut model, last_time) = load_model(&time_course_path, reactions)?;

    let end = end.unwrap_or(last_time);
    let config = SimulationConfig::new(start, end, samples)?;
    model.run(&config)?;

    let mut columns: Vec<Column> = Vec::with_capacity(variables.len() + 1);
    columns.push(Column::from(model.get_variable(TIME)?.into_series()));

    for name in variables.iter().filter(|n| n.as_str() != TIME) {
	let series = model
	    .get_variable(name)
	    .with_context(|| format!("Failed to resolve variable {}", name))?
	    .with_name(name.as_str().into());
	columns.push(Column::from(series.into_series()));
    }

    if columns.len() == 1 {
	bail!("no variables to write besides time");
    }

    let mut table = DataFrame::new(columns)?;
    util::write_parquet(&mut table, &out_path)?;

    log::info!("Wrote {} variables to {}", table.width() - 1, out_path.display());

    Ok(())
}

fn run_states(time_course_path : String) -> Result<()> {
    let (mut model, last_time) = load_model(&time_course_path, None)?;

    let first_time = extract_series(model.simulator().time_course(), TIME)?
	.min()
	.context("Time course has no samples")?;
    let config = SimulationConfig::new(first_time, last_time, None)?;
    model.run(&config)?;

    let states = model.receptor_states()?;
    let last = states.num_samples() - 1;

    println!("state\tfinal concentration\tfinal fraction");
    for state in states.states() {
	let concentration = state.data().get(last).unwrap_or(f64::NAN);
	let fraction = state.nominal_data().get(last).unwrap_or(f64::NAN);
	println!("{}\t{:.4e}\t{:.4}", state.name(), concentration, fraction);
    }

    Ok(())
}
