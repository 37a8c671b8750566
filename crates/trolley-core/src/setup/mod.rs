//! Population Setup
//!
//! Builders for the agent lists experiments place on the ring.

pub mod population;

pub use population::*;
