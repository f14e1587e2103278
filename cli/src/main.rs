use std::{error::Error, io::Write, path::PathBuf, time::Duration};

use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use strum::{Display, IntoEnumIterator};

use cubesearch::prelude::*;

#[derive(
	PartialEq, Eq, Default, Debug, Display, Copy, Clone, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[non_exhaustive]
enum HeuristicKind {
	#[default]
	Misplaced,
	Admissible,
}

impl HeuristicKind {
	fn build(self) -> Box<dyn Heuristic> {
		match self {
			HeuristicKind::Misplaced => Box::new(Misplaced),
			HeuristicKind::Admissible => Box::new(Admissible),
		}
	}
}

/// N×N×N cube solver using A*
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Configuration file of the cube (6*size lines of size colors each).
	/// Without it, the solved cube is used
	config: Option<PathBuf>,

	/// The edge length of the cube
	#[arg(short = 'n', long, default_value_t = 3)]
	size: usize,

	/// Use a sequence to apply on the starting cube, e.g. "H0 V2' S1"
	#[arg(short, long, default_value_t = String::new())]
	sequence: String,

	/// Scramble the starting cube with this many random moves
	#[arg(short, long, default_value_t = 0)]
	random: usize,

	/// Seed of the random scramble
	#[arg(long)]
	seed: Option<u64>,

	/// Specify the heuristic used for solving
	#[arg(long, default_value_t = HeuristicKind::default())]
	heuristic: HeuristicKind,

	/// Print all possible heuristics and quit
	#[arg(long, default_value_t = false)]
	list_heuristics: bool,

	/// Give up after expanding this many states
	#[arg(long)]
	max_expansions: Option<usize>,

	/// Give up after this many milliseconds
	#[arg(long)]
	timeout_ms: Option<u64>,

	/// Only output the solving sequence
	#[arg(short, long, default_value_t = false)]
	quiet: bool,

	/// Output length of sequence
	#[arg(short, long, default_value_t = false)]
	length: bool,

	/// Print the cubes with ANSI-colors
	#[arg(short, long, default_value_t = false)]
	color: bool,

	/// Print the output to a file rather to the stdout
	#[arg(short, long)]
	output: Option<PathBuf>,
}

impl Args {
	fn limits(&self) -> SearchLimits {
		let mut limits = SearchLimits::default();
		if let Some(max) = self.max_expansions {
			limits = limits.with_max_expansions(max);
		}
		if let Some(ms) = self.timeout_ms {
			limits = limits.with_timeout(Duration::from_millis(ms));
		}
		limits
	}

	fn render(&self, cube: &CubeState) -> String {
		if self.color {
			cube.colored()
		} else {
			cube.to_string()
		}
	}
}

/// Build the starting cube. A malformed configuration falls back to a solved cube.
fn initial_cube(args: &Args) -> Result<CubeState, Box<dyn Error>> {
	let mut cube = match &args.config {
		Some(path) => {
			// An unreadable file can't fall back
			let text = std::fs::read_to_string(path)
				.map_err(|e| format!("{}: {}", path.display(), e))?;
			let (cube, _) = CubeState::load_or_solved(&text, args.size)?;
			cube
		}
		None => CubeState::solved(args.size)?,
	};

	if 0 < args.random {
		let mut rng = match args.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_entropy(),
		};
		let moves = random_moves(args.size, args.random, &mut rng);
		log::info!("Scramble: {}", format_moves(&moves));
		cube = cube.apply_moves(&moves)?;
	}

	cube = cube.apply_moves(&parse_moves(&args.sequence)?)?;
	Ok(cube)
}

fn main() -> Result<(), Box<dyn Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

	let args = Args::parse();
	// Whether to redirect it to the stdout or a file
	let mut out: Box<dyn Write> = match &args.output {
		Some(path) => Box::new(std::fs::File::create(path)?),
		None => Box::new(std::io::stdout()),
	};

	// List the heuristics and exit
	if args.list_heuristics {
		for kind in HeuristicKind::iter() {
			writeln!(out, "{}", kind)?;
		}
		return Ok(());
	}

	let cube = initial_cube(&args)?;
	if !args.quiet {
		writeln!(out, "{}", args.render(&cube))?;
	}

	let heuristic = args.heuristic.build();
	let result = search(&cube, heuristic.as_ref(), &args.limits())?;
	log::debug!("{:?}", result.stats);

	match result.outcome {
		Outcome::Solved(solution) => {
			if !args.quiet {
				for step in solution.steps.iter().skip(1) {
					if let Some(mv) = step.mv {
						writeln!(out, "{}", mv)?;
					}
					writeln!(out, "{}", args.render(&step.state))?;
				}
			}
			write!(out, "{}", format_moves(&solution.moves()))?;
			if args.length {
				writeln!(out, " (len={})", solution.len())?;
			} else {
				writeln!(out)?;
			}
		}
		Outcome::NoSolution(reason) => {
			writeln!(out, "No solution found ({})", reason)?;
		}
	}

	Ok(())
}
