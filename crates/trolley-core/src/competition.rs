//! Evolutionary Competition
//!
//! Each round runs a batch of trials, ranks every slot by its own loss over
//! that batch, overwrites the worst performers with fresh clones of the best
//! performers' strategies, and reshuffles the ring. Population size never
//! changes; only the strategy mix does.

use serde::{Deserialize, Serialize};
use trolley_events::{LossType, RoundRecord, StrategyKind};

use crate::error::{SimError, SimResult};
use crate::simulation::{Ledger, Simulation};

/// Largest replace ratio that keeps the template and replacement sets from
/// swallowing the whole ring.
pub const MAX_REPLACE_RATIO: f64 = 0.5;

/// Competition parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitionConfig {
    /// Rounds to run
    pub rounds: u32,
    /// Trials per round
    pub batch_size: u64,
    /// Fraction of the ring replaced each round
    pub replace_ratio: f64,
    /// Metric agents are ranked by
    pub loss: LossType,
}

impl Default for CompetitionConfig {
    fn default() -> Self {
        Self {
            rounds: 20,
            batch_size: 100,
            replace_ratio: 0.2,
            loss: LossType::Teleological,
        }
    }
}

impl CompetitionConfig {
    pub fn validate(&self) -> SimResult<()> {
        if self.batch_size == 0 {
            return Err(SimError::invalid("batch_size must be at least 1"));
        }
        if !(0.0..=MAX_REPLACE_RATIO).contains(&self.replace_ratio) {
            return Err(SimError::invalid(format!(
                "replace_ratio must be within [0, {}], got {}",
                MAX_REPLACE_RATIO, self.replace_ratio
            )));
        }
        Ok(())
    }
}

/// Agents replaced per round: `max(1, round(ratio * population))`.
pub fn replacement_count(population: usize, ratio: f64) -> usize {
    ((ratio * population as f64).round() as usize).max(1)
}

/// Selection for one round, derived from a batch window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetitionRound {
    /// All slots, lowest loss first
    pub ranked: Vec<usize>,
    /// Slots to clone from, best first
    pub templates: Vec<usize>,
    /// Slots to overwrite, worst first; `replaced[j]` receives `templates[j]`'s strategy
    pub replaced: Vec<usize>,
}

impl CompetitionRound {
    /// Ranks the window and pairs the `k` best with the `k` worst.
    pub fn plan(window: &Ledger, loss_type: LossType, k: usize) -> SimResult<Self> {
        if k == 0 || k > window.len() {
            return Err(SimError::invalid(format!(
                "cannot replace {} of {} agents",
                k,
                window.len()
            )));
        }
        let ranked = window.rank_ascending(loss_type);
        let templates = ranked[..k].to_vec();
        let replaced = ranked.iter().rev().take(k).copied().collect();
        Ok(Self {
            ranked,
            templates,
            replaced,
        })
    }
}

/// Drives competition rounds over a simulation.
#[derive(Debug, Clone)]
pub struct Competition {
    config: CompetitionConfig,
    rounds_run: u32,
}

impl Competition {
    pub fn new(config: CompetitionConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rounds_run: 0,
        })
    }

    pub fn config(&self) -> &CompetitionConfig {
        &self.config
    }

    pub fn rounds_run(&self) -> u32 {
        self.rounds_run
    }

    /// Runs one batch, then eliminates and repopulates.
    pub fn run_round(&mut self, sim: &mut Simulation) -> SimResult<RoundRecord> {
        let loss_type = self.config.loss;
        let k = replacement_count(sim.len(), self.config.replace_ratio);

        let before = sim.ledger().clone();
        sim.run_trials(self.config.batch_size)?;
        let window = sim.ledger().since(&before);
        // A short batch can carry nobody the metric counts.
        let window_loss = match window.loss(loss_type) {
            Ok(loss) => Some(loss),
            Err(SimError::DivisionByZero(_)) => None,
            Err(err) => return Err(err),
        };

        let plan = CompetitionRound::plan(&window, loss_type, k)?;
        let cloned = plan
            .templates
            .iter()
            .map(|&i| sim.label_at(i))
            .collect::<SimResult<Vec<StrategyKind>>>()?;
        let eliminated = plan
            .replaced
            .iter()
            .map(|&i| sim.label_at(i))
            .collect::<SimResult<Vec<StrategyKind>>>()?;

        for (&slot, &kind) in plan.replaced.iter().zip(&cloned) {
            let agent = sim.make_agent(kind);
            sim.set_agent_at(slot, agent)?;
        }
        sim.shuffle_agents();

        self.rounds_run += 1;
        let record = RoundRecord {
            round: self.rounds_run,
            loss_type,
            window_loss,
            eliminated,
            cloned,
            population: sim.population_counts(),
        };
        tracing::info!(
            round = record.round,
            loss = %loss_type,
            window_loss = ?record.window_loss,
            survivors = record.survivors().len(),
            "competition round complete"
        );
        Ok(record)
    }

    /// Runs every configured round.
    pub fn run(&mut self, sim: &mut Simulation) -> SimResult<Vec<RoundRecord>> {
        (0..self.config.rounds).map(|_| self.run_round(sim)).collect()
    }
}
