//! Experiment Drivers
//!
//! The three standard studies: every strategy alone on the ring, all
//! strategies sharing one ring, and an evolutionary competition between them.

use trolley_events::{
    ExperimentKind, ExperimentReport, InfoMode, RoundRecord, StrategyKind, StrategyLoss,
};

use crate::competition::Competition;
use crate::config::ExperimentConfig;
use crate::error::SimResult;
use crate::setup::{balanced_population, homogeneous_population};
use crate::simulation::Simulation;

fn new_simulation(config: &ExperimentConfig, full_info: bool) -> SimResult<Simulation> {
    let sim = &config.simulation;
    Simulation::new(sim.population, full_info, sim.seed, sim.bounds())
}

/// Fills the ring with one strategy at a time and measures global loss,
/// under partial and then full information.
pub fn run_homogeneous(config: &ExperimentConfig) -> SimResult<ExperimentReport> {
    let population = config.simulation.population;
    let trials = config.experiment.trials;
    let mut report = ExperimentReport::new(
        ExperimentKind::Homogeneous,
        population,
        config.simulation.seed,
        trials,
    );

    for &mode in InfoMode::all() {
        tracing::info!(?mode, population, "starting homogeneous experiment");
        let mut sim = new_simulation(config, mode.is_full())?;

        for &kind in StrategyKind::all() {
            sim.set_all_agents(homogeneous_population(kind, population, sim.bounds()))?;
            sim.run_trials(trials)?;
            let losses = sim.losses()?;
            tracing::debug!(strategy = %kind, ?losses, "homogeneous run finished");
            report.push(StrategyLoss {
                strategy: kind,
                info_mode: mode,
                agents: population,
                losses,
            });
            sim.clear_records();
        }
    }

    Ok(report)
}

/// Places equal shares of every strategy on one shuffled ring and measures
/// each strategy's loss over its own slots.
pub fn run_mixed(config: &ExperimentConfig) -> SimResult<ExperimentReport> {
    let population = config.simulation.population;
    let trials = config.experiment.trials;
    let mut report = ExperimentReport::new(
        ExperimentKind::Mixed,
        population,
        config.simulation.seed,
        trials,
    );

    for &mode in InfoMode::all() {
        tracing::info!(?mode, population, "starting mixed experiment");
        let mut sim = new_simulation(config, mode.is_full())?;
        let bounds = sim.bounds();
        let agents = balanced_population(population, bounds, sim.rng_mut())?;
        sim.set_all_agents(agents)?;
        sim.run_trials(trials)?;

        for &kind in StrategyKind::all() {
            let indices = sim.indices_of(kind);
            report.push(StrategyLoss {
                strategy: kind,
                info_mode: mode,
                agents: indices.len(),
                losses: sim.ledger().losses_by_indices(&indices)?,
            });
        }
    }

    Ok(report)
}

/// Runs the configured competition on a balanced ring.
pub fn run_competition(config: &ExperimentConfig) -> SimResult<Vec<RoundRecord>> {
    let mut sim = new_simulation(config, config.simulation.full_info)?;
    let bounds = sim.bounds();
    let agents = balanced_population(config.simulation.population, bounds, sim.rng_mut())?;
    sim.set_all_agents(agents)?;

    tracing::info!(
        population = sim.len(),
        full_info = sim.full_info(),
        rounds = config.competition.rounds,
        loss = %config.competition.loss,
        "starting competition"
    );
    Competition::new(config.competition.clone())?.run(&mut sim)
}
