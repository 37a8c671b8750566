//! Shared record types for the trolley ring simulation.
//!
//! This crate contains pure data structures with no simulation logic: the
//! strategy and loss vocabularies plus the records experiment drivers emit.
//! It is a dependency for all other crates in the workspace.

pub mod loss;
pub mod report;
pub mod round;
pub mod strategy;

pub use loss::{LossPair, LossType};
pub use report::{ExperimentKind, ExperimentReport, InfoMode, StrategyLoss};
pub use round::{PopulationCount, RoundRecord};
pub use strategy::StrategyKind;
