//! Experiment Reports
//!
//! Per-strategy loss rows produced by the homogeneous and mixed experiments.

use serde::{Deserialize, Serialize};

use crate::loss::LossPair;
use crate::strategy::StrategyKind;

/// Whether agents could see their neighbors' passenger counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfoMode {
    Partial,
    Full,
}

impl InfoMode {
    /// Partial first, matching the order experiments run in.
    pub fn all() -> &'static [InfoMode] {
        &[InfoMode::Partial, InfoMode::Full]
    }

    pub fn from_full_info(full_info: bool) -> Self {
        if full_info {
            InfoMode::Full
        } else {
            InfoMode::Partial
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, InfoMode::Full)
    }
}

/// Which experiment produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentKind {
    /// Every slot on the ring runs the same strategy
    Homogeneous,
    /// Equal shares of every strategy, shuffled around the ring
    Mixed,
}

/// Loss measured for one strategy under one information mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyLoss {
    pub strategy: StrategyKind,
    pub info_mode: InfoMode,
    /// How many ring slots ran this strategy
    pub agents: usize,
    pub losses: LossPair,
}

/// Full result of one experiment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub kind: ExperimentKind,
    pub population: usize,
    pub seed: u64,
    pub trials: u64,
    pub rows: Vec<StrategyLoss>,
}

impl ExperimentReport {
    pub fn new(kind: ExperimentKind, population: usize, seed: u64, trials: u64) -> Self {
        Self {
            kind,
            population,
            seed,
            trials,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: StrategyLoss) {
        self.rows.push(row);
    }

    /// Finds the row for a strategy under an information mode.
    pub fn row(&self, strategy: StrategyKind, info_mode: InfoMode) -> Option<&StrategyLoss> {
        self.rows
            .iter()
            .find(|r| r.strategy == strategy && r.info_mode == info_mode)
    }

    /// Rows for one information mode, in insertion order.
    pub fn rows_for(&self, info_mode: InfoMode) -> impl Iterator<Item = &StrategyLoss> {
        self.rows.iter().filter(move |r| r.info_mode == info_mode)
    }

    /// Serializes the report to a single JSON line.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes a report from a JSON line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}
