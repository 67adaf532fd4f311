use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{anyhow, Result};
use clap::Parser;

use zedd::petri::SafePetriNet;
use zedd::Engine;

/// Compute the reachable state space of every 1-safe net in a PNML
/// file.
#[derive(Parser)]
#[command(name = "petrinet")]
struct Args {
	/// The filename of the PNML file to parse.
	pnml: PathBuf,

	/// Run the computation on a worker thread with a stack of N MiB,
	/// for nets whose diagrams grow deep.
	#[arg(short = 'r', long = "stack-size", value_name = "N")]
	stack_size: Option<usize>,
}

fn main() -> Result<()> {
	env_logger::init();
	let args = Args::parse();

	match args.stack_size {
		Some(mib) => {
			let worker = std::thread::Builder::new()
				.stack_size(mib * 1024 * 1024)
				.spawn(move || run(&args.pnml))?;
			worker
				.join()
				.map_err(|_| anyhow!("state-space worker panicked"))?
		}
		None => run(&args.pnml),
	}
}

fn run(pnml: &Path) -> Result<()> {
	let mut engine = Engine::new();
	let mut nets = SafePetriNet::from_pnml(&mut engine, pnml)?;
	println!("{} Petri Net(s) found in the pnml file.", nets.len());

	for net in &mut nets {
		println!("Generate the state space for \"{}\".", net.name());
		let start = Instant::now();
		let state_space = net.state_space(&mut engine)?;
		let elapsed = start.elapsed().as_secs_f64();
		println!(
			"\t{} state(s), computed in {:.6}[s]",
			engine.cardinality(&state_space),
			elapsed
		);
	}
	Ok(())
}
