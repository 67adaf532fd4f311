use std::time::Instant;

use clap::Parser;
use rand::Rng;

use zedd::Engine;

/// Random-workload benchmark: build S singleton families and fold
/// them into one union.
#[derive(Parser)]
#[command(name = "unions")]
struct Args {
	/// The number of singletons to create.
	#[arg(short = 's', long = "singletons", default_value_t = 40)]
	singletons: usize,

	/// The (maximum) number of elements in each singleton.
	#[arg(short = 'e', long = "elements", default_value_t = 100)]
	elements: usize,
}

fn main() {
	env_logger::init();
	let args = Args::parse();

	let mut rng = rand::thread_rng();
	let singletons: Vec<Vec<usize>> = (0..args.singletons)
		.map(|_| {
			(0..args.elements)
				.map(|_| rng.gen_range(0..args.elements))
				.collect()
		})
		.collect();

	let mut engine = Engine::new();

	let benchmark_start = Instant::now();
	let singleton_start = Instant::now();
	let diagrams: Vec<_> = singletons
		.into_iter()
		.map(|singleton| engine.from_set(singleton))
		.collect();
	let singleton_time = singleton_start.elapsed().as_secs_f64();

	let union_start = Instant::now();
	let mut rv = engine.zero();
	for diagram in &diagrams {
		rv = engine.union(&rv, diagram);
	}
	let union_time = union_start.elapsed().as_secs_f64();
	let benchmark_time = benchmark_start.elapsed().as_secs_f64();

	println!("{:<20} {}", "Total time:", benchmark_time);
	println!("{:<20} {}", "Create singletons:", singleton_time);
	println!("{:<20} {}", "Compute unions:", union_time);
}
