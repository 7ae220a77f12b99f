/// Feedplay Simulator - replay autoplay scenarios from the command line
use clap::{Parser, Subcommand};
use feedplay_playback::Strategy;
use feedplay_sim::{Scenario, SimConfig, Simulator, TraceFormat};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "feedplay-sim")]
#[command(about = "Simulate autoplay over a scrolling feed", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./feedplay.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario and print the playback trace
    Run {
        /// Scenario file path
        scenario: PathBuf,
        /// Election strategy, overriding config and scenario
        #[arg(short, long)]
        strategy: Option<Strategy>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Include preparation, release and saved-state events
        #[arg(short, long)]
        verbose: bool,
    },
    /// List the available election strategies
    Strategies,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "feedplay=info,feedplay_sim=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            scenario,
            strategy,
            json,
            verbose,
        } => {
            run(cli.config, &scenario, strategy, json, verbose)?;
        }
        Commands::Strategies => {
            list_strategies();
        }
    }

    Ok(())
}

fn run(
    config_path: Option<PathBuf>,
    scenario_path: &Path,
    strategy: Option<Strategy>,
    json: bool,
    verbose: bool,
) -> anyhow::Result<()> {
    // Load configuration
    let mut config = SimConfig::load(config_path.as_deref())?;
    if json {
        config.trace.format = TraceFormat::Json;
    }
    if verbose {
        config.trace.verbose = true;
    }
    config.validate()?;

    let mut scenario = Scenario::load(scenario_path)?;
    if strategy.is_some() {
        scenario.strategy = strategy;
    }

    tracing::info!("Running scenario {}", scenario_path.display());

    let report = Simulator::new(&config, &scenario)?.run(&scenario)?;
    print!("{}", report.render(config.trace.format, config.trace.verbose)?);

    Ok(())
}

fn list_strategies() {
    let default = Strategy::default();
    for strategy in Strategy::ALL {
        let marker = if strategy == default { " (default)" } else { "" };
        println!("{:<36} {}{}", strategy, strategy.description(), marker);
    }
}
