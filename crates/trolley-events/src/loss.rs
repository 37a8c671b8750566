//! Loss Metrics
//!
//! The two ethical-loss ratios the simulation reports.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which cumulative loss ratio to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LossType {
    /// Killed over encountered, counting passengers and track occupants alike
    #[default]
    Teleological,
    /// Passengers killed over passengers carried
    Deontological,
}

impl LossType {
    /// Returns both loss types.
    pub fn all() -> &'static [LossType] {
        &[LossType::Teleological, LossType::Deontological]
    }

    /// Short column name for result tables.
    pub fn short_name(&self) -> &'static str {
        match self {
            LossType::Teleological => "tele",
            LossType::Deontological => "deon",
        }
    }
}

impl fmt::Display for LossType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LossType::Teleological => f.write_str("teleological"),
            LossType::Deontological => f.write_str("deontological"),
        }
    }
}

/// Teleological and deontological loss measured over the same records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossPair {
    pub teleological: f64,
    pub deontological: f64,
}

impl LossPair {
    pub fn new(teleological: f64, deontological: f64) -> Self {
        Self {
            teleological,
            deontological,
        }
    }

    /// Selects one of the two ratios.
    pub fn get(&self, loss_type: LossType) -> f64 {
        match loss_type {
            LossType::Teleological => self.teleological,
            LossType::Deontological => self.deontological,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loss_pair_get() {
        let pair = LossPair::new(0.25, 0.5);
        assert_eq!(pair.get(LossType::Teleological), 0.25);
        assert_eq!(pair.get(LossType::Deontological), 0.5);
    }

    #[test]
    fn test_loss_type_default_is_teleological() {
        assert_eq!(LossType::default(), LossType::Teleological);
    }

    #[test]
    fn test_loss_type_parses_from_snake_case() {
        let parsed: LossType = serde_json::from_str("\"deontological\"").unwrap();
        assert_eq!(parsed, LossType::Deontological);
    }
}
