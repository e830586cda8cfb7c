use clap::Parser;
use forest_fire_core::{ForestSimulation, Neighborhood, SimulationConfig};
use tracing_subscriber::EnvFilter;

/// Forest-fire automaton demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "forest-fire-demo")]
#[command(about = "Stochastic forest-fire cellular automaton demo", long_about = None)]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = 256)]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = 256)]
    height: usize,

    /// Number of steps to simulate
    #[arg(short, long, default_value_t = 500)]
    steps: u64,

    /// Spontaneous ignition probability per tree per step
    #[arg(short = 'p', long, default_value_t = 0.0001)]
    ignition: f64,

    /// Growth probability per empty cell per step
    #[arg(short = 'g', long, default_value_t = 0.02)]
    growth: f64,

    /// Neighborhood mode (von-neumann, moore)
    #[arg(short, long, default_value = "von-neumann")]
    neighborhood: String,

    /// Report interval in steps
    #[arg(short, long, default_value_t = 100)]
    report_interval: u64,

    /// Ignite the cell at X,Y before the run starts (repeatable)
    #[arg(long, value_names = ["X", "Y"], num_args = 2, action = clap::ArgAction::Append)]
    ignite: Vec<usize>,

    /// Run the step-batch measurement session to completion
    #[arg(short, long)]
    measure: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let neighborhood = match args.neighborhood.to_lowercase().as_str() {
        "moore" => Neighborhood::Moore,
        "von-neumann" | "vonneumann" => Neighborhood::VonNeumann,
        other => {
            println!("Unknown neighborhood '{}', using Von Neumann", other);
            Neighborhood::VonNeumann
        }
    };

    let mut sim = ForestSimulation::new(SimulationConfig {
        ignition_probability: args.ignition,
        growth_probability: args.growth,
        neighborhood,
        width: args.width,
        height: args.height,
        ..SimulationConfig::default()
    });

    println!("=== Forest Fire Demo ===\n");
    let config = sim.config();
    println!(
        "Grid: {}x{} cells, {:?} neighborhood",
        config.width, config.height, config.neighborhood
    );
    println!(
        "Ignition: p={}, growth: g={}\n",
        config.ignition_probability, config.growth_probability
    );

    // Manual ignitions happen between steps, never during one.
    for target in args.ignite.chunks(2) {
        if let [x, y] = *target {
            sim.ignite(x, y);
        }
    }

    if args.measure {
        sim.measurement_mut().start();
        while sim.measurement().is_active() {
            sim.step();
        }
        for result in sim.measurement().results() {
            println!(
                "{:>6} steps in {:>8.2} ms",
                result.steps,
                result.elapsed.as_secs_f64() * 1000.0
            );
        }
        return;
    }

    let report_interval = args.report_interval.max(1);
    for step in 1..=args.steps {
        sim.step();
        if step % report_interval == 0 || step == args.steps {
            let stats = sim.stats();
            let coverage = 100.0 * stats.trees as f64 / stats.total_cells as f64;
            println!(
                "step {:>6}: {} trees ({:.1}% cover), {} burning, {} empty",
                step, stats.trees, coverage, stats.burning, stats.empty
            );
        }
    }
}
