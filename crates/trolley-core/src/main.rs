//! Trolley Ring Simulator
//!
//! Runs the homogeneous, mixed and competition experiments and prints the
//! resulting loss tables.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use trolley_core::config::DEFAULT_CONFIG_PATH;
use trolley_core::experiments::{run_competition, run_homogeneous, run_mixed};
use trolley_core::{ExperimentConfig, LossType};
use trolley_events::{ExperimentReport, InfoMode, RoundRecord, StrategyKind};

/// Command line arguments for the simulator
#[derive(Parser, Debug)]
#[command(name = "trolley_sim")]
#[command(about = "Repeated multi-agent trolley problem on a ring")]
struct Args {
    /// TOML experiment file (defaults to trolley.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Number of trolleys on the ring
    #[arg(long, global = true)]
    population: Option<usize>,

    /// Let agents see their neighbors' passenger counts (competition only)
    #[arg(long, global = true)]
    full_info: bool,

    /// Emit JSON lines instead of tables
    #[arg(long, global = true)]
    jsonl: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Each strategy alone on the ring
    Homogeneous {
        /// Trials per strategy and information mode
        #[arg(long)]
        trials: Option<u64>,
    },
    /// All strategies sharing one ring
    Mixed {
        /// Trials per information mode
        #[arg(long)]
        trials: Option<u64>,
    },
    /// Evolutionary competition between strategies
    Compete {
        #[arg(long)]
        rounds: Option<u32>,
        /// Trials per round
        #[arg(long)]
        batch_size: Option<u64>,
        /// Fraction of the ring replaced each round
        #[arg(long)]
        replace_ratio: Option<f64>,
        /// Metric agents are ranked by
        #[arg(long, value_enum)]
        loss: Option<LossArg>,
    },
    /// Print the default configuration as TOML
    DefaultConfig,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum LossArg {
    Teleological,
    Deontological,
}

impl From<LossArg> for LossType {
    fn from(arg: LossArg) -> Self {
        match arg {
            LossArg::Teleological => LossType::Teleological,
            LossArg::Deontological => LossType::Deontological,
        }
    }
}

type BoxError = Box<dyn std::error::Error>;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), BoxError> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }
    if let Some(population) = args.population {
        config.simulation.population = population;
    }
    if args.full_info {
        config.simulation.full_info = true;
    }

    match args.command {
        Command::DefaultConfig => {
            print!("{}", ExperimentConfig::default().to_toml()?);
        }
        Command::Homogeneous { trials } => {
            if let Some(trials) = trials {
                config.experiment.trials = trials;
            }
            config.validate()?;
            let report = run_homogeneous(&config)?;
            print_report(&report, args.jsonl)?;
        }
        Command::Mixed { trials } => {
            if let Some(trials) = trials {
                config.experiment.trials = trials;
            }
            config.validate()?;
            let report = run_mixed(&config)?;
            print_report(&report, args.jsonl)?;
        }
        Command::Compete {
            rounds,
            batch_size,
            replace_ratio,
            loss,
        } => {
            let competition = &mut config.competition;
            if let Some(rounds) = rounds {
                competition.rounds = rounds;
            }
            if let Some(batch_size) = batch_size {
                competition.batch_size = batch_size;
            }
            if let Some(ratio) = replace_ratio {
                competition.replace_ratio = ratio;
            }
            if let Some(loss) = loss {
                competition.loss = loss.into();
            }
            config.validate()?;
            let rounds = run_competition(&config)?;
            print_rounds(&rounds, args.jsonl)?;
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ExperimentConfig, BoxError> {
    match path {
        Some(path) => Ok(ExperimentConfig::load(path)?),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            Ok(ExperimentConfig::load_or_default(DEFAULT_CONFIG_PATH))
        }
        None => Ok(ExperimentConfig::default()),
    }
}

fn print_report(report: &ExperimentReport, jsonl: bool) -> Result<(), BoxError> {
    if jsonl {
        println!("{}", report.to_jsonl()?);
        return Ok(());
    }

    println!(
        "{:?} experiment: n={}, seed={}, trials={}",
        report.kind, report.population, report.seed, report.trials
    );
    for &mode in InfoMode::all() {
        println!();
        println!("{:?} information", mode);
        println!("{:<22} {:>6} {:>10} {:>10}", "strategy", "agents", "tele", "deon");
        for row in report.rows_for(mode) {
            println!(
                "{:<22} {:>6} {:>10.3} {:>10.3}",
                row.strategy.label(),
                row.agents,
                row.losses.teleological,
                row.losses.deontological
            );
        }
    }
    Ok(())
}

fn print_rounds(rounds: &[RoundRecord], jsonl: bool) -> Result<(), BoxError> {
    if jsonl {
        for record in rounds {
            println!("{}", record.to_jsonl()?);
        }
        return Ok(());
    }

    print!("{:>5} {:>8}", "round", "loss");
    for kind in StrategyKind::all() {
        print!(" {:>20}", kind.label());
    }
    println!();
    for record in rounds {
        match record.window_loss {
            Some(loss) => print!("{:>5} {:>8.3}", record.round, loss),
            None => print!("{:>5} {:>8}", record.round, "-"),
        }
        for &kind in StrategyKind::all() {
            print!(" {:>20}", record.count_of(kind));
        }
        println!();
    }
    Ok(())
}
