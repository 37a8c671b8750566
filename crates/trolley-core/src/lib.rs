//! Core simulation logic: a ring of trolleys, their decision strategies,
//! loss accounting and the evolutionary competition between strategies.

pub mod agents;
pub mod competition;
pub mod config;
pub mod error;
pub mod experiments;
pub mod rng;
pub mod setup;
pub mod simulation;
pub mod topology;

pub use agents::{Agent, CountBounds, Decision};
pub use competition::{Competition, CompetitionConfig, CompetitionRound};
pub use config::{ConfigError, ExperimentConfig};
pub use error::{SimError, SimResult};
pub use rng::RandomSource;
pub use simulation::{Ledger, PersonCounts, Simulation};
pub use topology::Ring;

pub use trolley_events::{LossPair, LossType, StrategyKind};
