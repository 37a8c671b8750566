//! Decision Strategies
//!
//! One decision rule per [`StrategyKind`]. Input validation happens in
//! [`Agent::decide`](super::Agent::decide); the rules here only see complete
//! observations.

use trolley_events::StrategyKind;

use super::{CountBounds, Decision};
use crate::rng::RandomSource;

/// Everything a trolley can see in one trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    /// Passengers on this trolley
    pub passengers: u32,
    /// People tied to the default track
    pub default_track: u32,
    /// People tied to the alternative track
    pub alternative_track: u32,
    /// `(default-side, alternative-side)` neighbor passengers, full information only
    pub neighbors: Option<(u32, u32)>,
}

/// Neighbor passenger estimate used without full information.
///
/// Sums `0..=passenger_max` and divides by `passenger_max`, not by the number
/// of terms. Reference results depend on this exact figure.
pub fn partial_info_neighbor_estimate(passenger_max: u32) -> f64 {
    let total: u64 = (0..=u64::from(passenger_max)).sum();
    total as f64 / f64::from(passenger_max)
}

/// Expected deaths if the trolley ends up on a track: everyone tied to it,
/// plus half the chance of a collision killing both trolleys' passengers.
pub fn expected_loss(track_count: u32, own_passengers: u32, neighbor_passengers: f64) -> f64 {
    (2.0 * f64::from(track_count) + f64::from(own_passengers) + neighbor_passengers) / 2.0
}

pub(crate) fn choose(
    kind: StrategyKind,
    obs: &Observation,
    bounds: CountBounds,
    rng: &mut RandomSource,
) -> Decision {
    match kind {
        StrategyKind::Random => Decision::from_coin(rng.coin()),
        StrategyKind::AlwaysDoNothing => Decision::Stay,
        StrategyKind::AlwaysSwitch => Decision::Switch,
        StrategyKind::TrackLife => {
            if obs.default_track > obs.alternative_track {
                Decision::Switch
            } else {
                Decision::Stay
            }
        }
        StrategyKind::StatExpectedValue => stat_expected_value(obs, bounds),
    }
}

fn stat_expected_value(obs: &Observation, bounds: CountBounds) -> Decision {
    let (default_neighbor, alternative_neighbor) = match obs.neighbors {
        Some((d, a)) => (f64::from(d), f64::from(a)),
        None => {
            let estimate = partial_info_neighbor_estimate(bounds.passenger_max);
            (estimate, estimate)
        }
    };

    let stay = expected_loss(obs.default_track, obs.passengers, default_neighbor);
    let switch = expected_loss(obs.alternative_track, obs.passengers, alternative_neighbor);

    if stay > switch {
        Decision::Switch
    } else {
        Decision::Stay
    }
}
