//! Agents
//!
//! A trolley's decision-maker: the per-trial inputs pushed in by the
//! simulation and the strategy that turns them into a track choice.

pub mod strategy;

use trolley_events::StrategyKind;

use crate::error::{SimError, SimResult};
use crate::rng::RandomSource;

pub use strategy::{expected_loss, partial_info_neighbor_estimate, Observation};

/// Default ceiling on people tied to one track.
pub const DEFAULT_TRACK_MAX: u32 = 5;
/// Default ceiling on passengers riding one trolley.
pub const DEFAULT_PASSENGER_MAX: u32 = 5;

/// Simulation-wide ceilings on per-trial counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountBounds {
    pub track_max: u32,
    pub passenger_max: u32,
}

impl CountBounds {
    /// Validated bounds. `passenger_max` must be positive because the
    /// partial-information passenger estimate divides by it.
    pub fn new(track_max: u32, passenger_max: u32) -> SimResult<Self> {
        if passenger_max == 0 {
            return Err(SimError::invalid("passenger_max must be at least 1"));
        }
        Ok(Self {
            track_max,
            passenger_max,
        })
    }
}

impl Default for CountBounds {
    fn default() -> Self {
        Self {
            track_max: DEFAULT_TRACK_MAX,
            passenger_max: DEFAULT_PASSENGER_MAX,
        }
    }
}

/// Binary track choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Keep to the default track
    Stay,
    /// Divert onto the alternative track
    Switch,
}

impl Decision {
    /// 0 for stay, 1 for switch; indexes into a `(default, alternative)` pair.
    pub fn index(&self) -> usize {
        match self {
            Decision::Stay => 0,
            Decision::Switch => 1,
        }
    }

    /// Heads switches.
    pub fn from_coin(heads: bool) -> Self {
        if heads {
            Decision::Switch
        } else {
            Decision::Stay
        }
    }

    /// Picks the chosen track out of a `(default, alternative)` pair.
    pub fn pick<T: Copy>(&self, pair: (T, T)) -> T {
        match self {
            Decision::Stay => pair.0,
            Decision::Switch => pair.1,
        }
    }
}

/// One trolley's decision-maker.
///
/// Passenger and track counts persist until overwritten. Neighbor passenger
/// counts are consumed by the decision they were pushed for, so a
/// full-information decision always needs a fresh push.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    kind: StrategyKind,
    bounds: CountBounds,
    passenger_count: Option<u32>,
    track_counts: Option<(u32, u32)>,
    neighbor_counts: Option<(u32, u32)>,
}

impl Agent {
    pub fn new(kind: StrategyKind, bounds: CountBounds) -> Self {
        Self {
            kind,
            bounds,
            passenger_count: None,
            track_counts: None,
            neighbor_counts: None,
        }
    }

    pub fn kind(&self) -> StrategyKind {
        self.kind
    }

    pub fn bounds(&self) -> CountBounds {
        self.bounds
    }

    /// A new agent of the same strategy with no inputs set.
    pub fn spawn_fresh(&self) -> Self {
        Self::new(self.kind, self.bounds)
    }

    pub fn set_passenger_count(&mut self, count: u32) {
        self.passenger_count = Some(count);
    }

    pub fn set_track_counts(&mut self, default_count: u32, alternative_count: u32) {
        self.track_counts = Some((default_count, alternative_count));
    }

    pub fn set_neighbor_passenger_counts(&mut self, default_neighbor: u32, alternative_neighbor: u32) {
        self.neighbor_counts = Some((default_neighbor, alternative_neighbor));
    }

    pub fn passenger_count(&self) -> Option<u32> {
        self.passenger_count
    }

    pub fn track_counts(&self) -> Option<(u32, u32)> {
        self.track_counts
    }

    /// Chooses a track for the current trial.
    ///
    /// Fails with [`SimError::MissingInformation`] if any required input has
    /// not been pushed.
    pub fn decide(&mut self, full_info: bool, rng: &mut RandomSource) -> SimResult<Decision> {
        let neighbors = self.neighbor_counts.take();
        let passengers = self
            .passenger_count
            .ok_or(SimError::MissingInformation("passenger count"))?;
        let (default_track, alternative_track) = self
            .track_counts
            .ok_or(SimError::MissingInformation("track counts"))?;
        let neighbors = if full_info {
            Some(neighbors.ok_or(SimError::MissingInformation("neighbor passenger counts"))?)
        } else {
            None
        };

        let observation = Observation {
            passengers,
            default_track,
            alternative_track,
            neighbors,
        };
        let decision = strategy::choose(self.kind, &observation, self.bounds, rng);
        tracing::trace!(strategy = %self.kind, ?observation, ?decision, "agent decided");
        Ok(decision)
    }
}
