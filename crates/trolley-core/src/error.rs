//! Error Types
//!
//! Every failure here is a programmer or configuration error: nothing is
//! retried and nothing is silently defaulted.

use thiserror::Error;

/// Errors raised by the simulation engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// A trolley or track index outside the ring
    #[error("index {index} out of range for ring of {len}")]
    OutOfRange { index: usize, len: usize },

    /// An agent was asked to decide before its inputs were pushed
    #[error("insufficient information: {0} not set")]
    MissingInformation(&'static str),

    /// Population or parameter setup that cannot be simulated
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A loss ratio whose encountered-count denominator is zero
    #[error("division by zero: no {0} encountered")]
    DivisionByZero(&'static str),
}

impl SimError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SimError::InvalidConfiguration(msg.into())
    }
}

pub type SimResult<T> = Result<T, SimError>;
