//! Strategy Labels
//!
//! The closed set of decision strategies a trolley can run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label identifying which decision strategy an agent runs.
///
/// Agents carry no identity beyond this label: it is what experiments group
/// by and what the competition clones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Flips a fair coin every trial
    Random,
    /// Always stays on the default track
    AlwaysDoNothing,
    /// Always switches to the alternative track
    AlwaysSwitch,
    /// Switches only when that spares more people on the tracks
    TrackLife,
    /// Minimizes expected loss including passengers
    StatExpectedValue,
}

impl StrategyKind {
    /// Number of distinct strategies.
    pub const COUNT: usize = 5;

    /// Returns all strategies in canonical order.
    pub fn all() -> &'static [StrategyKind] {
        &[
            StrategyKind::Random,
            StrategyKind::AlwaysDoNothing,
            StrategyKind::AlwaysSwitch,
            StrategyKind::TrackLife,
            StrategyKind::StatExpectedValue,
        ]
    }

    /// Position of this strategy in [`StrategyKind::all`].
    pub fn ordinal(&self) -> usize {
        match self {
            StrategyKind::Random => 0,
            StrategyKind::AlwaysDoNothing => 1,
            StrategyKind::AlwaysSwitch => 2,
            StrategyKind::TrackLife => 3,
            StrategyKind::StatExpectedValue => 4,
        }
    }

    /// Human-readable label used in result tables.
    pub fn label(&self) -> &'static str {
        match self {
            StrategyKind::Random => "RandomAgent",
            StrategyKind::AlwaysDoNothing => "AlwaysDoNothingAgent",
            StrategyKind::AlwaysSwitch => "AlwaysSwitchAgent",
            StrategyKind::TrackLife => "TrackLifeAgent",
            StrategyKind::StatExpectedValue => "StatAgent",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_matches_canonical_order() {
        for (i, kind) in StrategyKind::all().iter().enumerate() {
            assert_eq!(kind.ordinal(), i);
        }
        assert_eq!(StrategyKind::all().len(), StrategyKind::COUNT);
    }

    #[test]
    fn test_serializes_snake_case() {
        let json = serde_json::to_string(&StrategyKind::StatExpectedValue).unwrap();
        assert_eq!(json, "\"stat_expected_value\"");
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(StrategyKind::TrackLife.to_string(), "TrackLifeAgent");
    }
}
