use agora_runner::{CsvTelemetry, Simulation, SimulationConfig};
use clap::Parser;
use std::path::PathBuf;

/// Agora - multi-agent market microstructure simulator
#[derive(Parser, Debug)]
#[command(name = "agora", version, about)]
struct Cli {
    /// Load configuration from JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to run (overrides the config)
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Random seed for the price walk and stochastic agents
    #[arg(short, long)]
    seed: Option<u64>,

    /// Directory for prices.csv, actions.csv and pnl.csv
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Log per-tick matching detail
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut config = match &cli.config {
        Some(path) => {
            log::info!("Loading configuration from: {}", path.display());
            SimulationConfig::from_file(path)?
        }
        None => SimulationConfig::default(),
    };
    if let Some(ticks) = cli.ticks {
        config.ticks = ticks;
    }
    if let Some(seed) = cli.seed {
        config.environment.seed = Some(seed);
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }

    let sink = CsvTelemetry::create(&config.output_dir)?;
    let mut simulation = Simulation::from_config(&config, sink)?;
    let summary = simulation.run(config.ticks)?;

    println!("Simulation complete");
    println!("  Ticks:        {}", summary.ticks);
    println!("  Trades:       {}", summary.total_trades);
    println!("  Volume:       {}", summary.total_volume);
    println!("  Rejected:     {}", summary.rejected_actions);
    println!("  Final mid:    {}", summary.final_mid_price);
    for (agent, value) in &summary.final_values {
        println!("  {:<12}  {}", agent.as_str(), value.round_dp(2));
    }
    println!("Logs written to {}", config.output_dir.display());

    Ok(())
}
