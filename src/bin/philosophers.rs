use std::time::Instant;

use anyhow::Result;
use clap::Parser;

use zedd::petri::MarkedPetriNet;
use zedd::Engine;

/// Compute the state space of the dining-philosophers net.
#[derive(Parser)]
#[command(name = "philosophers")]
struct Args {
	/// The number of philosophers.
	#[arg(short = 'n', long = "philosophers", default_value_t = 3)]
	philosophers: usize,
}

fn main() -> Result<()> {
	env_logger::init();
	let args = Args::parse();

	let mut engine = Engine::new();
	let mut net = MarkedPetriNet::philosophers(&mut engine, args.philosophers);

	let start = Instant::now();
	let state_space = net.state_space(&mut engine)?;
	let elapsed = start.elapsed().as_secs_f64();

	println!("Result of computation for {} philosophers:", args.philosophers);
	println!(
		"\t{} state(s), computed in {:.6}[s]",
		engine.cardinality(&state_space),
		elapsed
	);
	Ok(())
}
