use bpnet::plot::plot_errors_over_epochs;
use bpnet::prelude::*;
use bpnet::utils::write_error_history_to_csv;
use clap::Parser;
use log::info;
use std::path::PathBuf;

/// Trains a network on the XOR table and reports the error curve.
#[derive(Parser)]
#[command(about = "Online backpropagation on the XOR table")]
struct Cli {
    /// TOML network config; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Layer sizes, e.g. `2,4,1`
    #[arg(long, value_delimiter = ',')]
    topology: Option<Vec<usize>>,

    /// Learning rate (eta)
    #[arg(long)]
    eta: Option<f64>,

    /// Momentum (alpha)
    #[arg(long)]
    alpha: Option<f64>,

    /// Weight initialisation seed
    #[arg(long)]
    seed: Option<u64>,

    /// Training iterations
    #[arg(long, default_value_t = 2000)]
    iterations: usize,

    /// Log every n iterations (0 = summary only)
    #[arg(long, default_value_t = 200)]
    log_every: usize,

    /// Write the error history as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Render the error history as PNG
    #[arg(long)]
    plot: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => NetworkConfig::load(path)?,
        None => NetworkConfig::new(&[2, 4, 1]),
    };
    if let Some(topology) = cli.topology {
        config.topology = topology;
        config.layer_count = None;
    }
    if let Some(eta) = cli.eta {
        config.learning_rate = eta;
    }
    if let Some(alpha) = cli.alpha {
        config.momentum = alpha;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let mut network = Network::builder().config(config).build()?;
    network.summary();

    let examples = [
        ([0.0, 0.0], [0.0]),
        ([0.0, 1.0], [1.0]),
        ([1.0, 0.0], [1.0]),
        ([1.0, 1.0], [0.0]),
    ];

    let logging = if cli.log_every == 0 {
        Logging::Completion
    } else {
        Logging::Iterations(cli.log_every)
    };
    let report = Trainer::new()
        .stop_condition(StopCondition::Iterations(cli.iterations))
        .logging(logging)
        .train(&mut network, &examples[..])?;

    for (input, target) in &examples {
        let output = network.predict(input)?;
        info!("input {:?} -> output {:.4} (target {})", input, output[0], target[0]);
    }

    if let Some(path) = &cli.csv {
        write_error_history_to_csv(&report.history, path)?;
        info!("error history written to {}", path.display());
    }
    if let Some(path) = &cli.plot {
        plot_errors_over_epochs(&report.history, path)?;
        info!("error plot written to {}", path);
    }

    Ok(())
}
