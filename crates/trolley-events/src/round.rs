//! Competition Round Records
//!
//! One record per round of the evolutionary competition.

use serde::{Deserialize, Serialize};

use crate::loss::LossType;
use crate::strategy::StrategyKind;

/// Number of agents running one strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationCount {
    pub strategy: StrategyKind,
    pub count: usize,
}

/// Outcome of a single competition round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Round number, starting at 1
    pub round: u32,
    pub loss_type: LossType,
    /// Population-wide loss over this round's batch of trials; `None` when
    /// the batch carried nobody the metric counts
    pub window_loss: Option<f64>,
    /// Strategies of the eliminated agents, worst first
    pub eliminated: Vec<StrategyKind>,
    /// Strategies cloned into the freed slots, best first
    pub cloned: Vec<StrategyKind>,
    /// Population after replacement, in canonical strategy order
    pub population: Vec<PopulationCount>,
}

impl RoundRecord {
    /// Total agents on the ring after this round.
    pub fn total(&self) -> usize {
        self.population.iter().map(|p| p.count).sum()
    }

    /// Agents running `strategy` after this round.
    pub fn count_of(&self, strategy: StrategyKind) -> usize {
        self.population
            .iter()
            .find(|p| p.strategy == strategy)
            .map_or(0, |p| p.count)
    }

    /// Strategies still present after this round.
    pub fn survivors(&self) -> Vec<StrategyKind> {
        self.population
            .iter()
            .filter(|p| p.count > 0)
            .map(|p| p.strategy)
            .collect()
    }

    /// Serializes the record to a single JSON line.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes a record from a JSON line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> RoundRecord {
        RoundRecord {
            round: 1,
            loss_type: LossType::Teleological,
            window_loss: Some(0.45),
            eliminated: vec![StrategyKind::AlwaysSwitch],
            cloned: vec![StrategyKind::StatExpectedValue],
            population: vec![
                PopulationCount { strategy: StrategyKind::Random, count: 0 },
                PopulationCount { strategy: StrategyKind::StatExpectedValue, count: 3 },
                PopulationCount { strategy: StrategyKind::TrackLife, count: 2 },
            ],
        }
    }

    #[test]
    fn test_total_and_count_of() {
        let r = record();
        assert_eq!(r.total(), 5);
        assert_eq!(r.count_of(StrategyKind::StatExpectedValue), 3);
        assert_eq!(r.count_of(StrategyKind::AlwaysSwitch), 0);
    }

    #[test]
    fn test_survivors_skip_extinct() {
        let survivors = record().survivors();
        assert_eq!(
            survivors,
            vec![StrategyKind::StatExpectedValue, StrategyKind::TrackLife]
        );
    }
}
