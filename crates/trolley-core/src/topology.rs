//! Ring Topology
//!
//! Trolley `i` owns track `i` (its default) and may divert onto track `i + 1`
//! (its alternative), wrapping at the end of the ring. Every track can thus be
//! reached by exactly two trolleys: its owner and the trolley just before it.

use crate::error::{SimError, SimResult};

/// Smallest ring on which every trolley has two tracks to choose from.
pub const MIN_RING_SIZE: usize = 2;

/// Pure index arithmetic over a ring of fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ring {
    len: usize,
}

impl Ring {
    pub fn new(len: usize) -> SimResult<Self> {
        if len < MIN_RING_SIZE {
            return Err(SimError::invalid(format!(
                "ring needs at least {} trolleys, got {}",
                MIN_RING_SIZE, len
            )));
        }
        Ok(Self { len })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn check(&self, index: usize) -> SimResult<()> {
        if index >= self.len {
            return Err(SimError::OutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    /// `(default, alternative)` track indices for a trolley.
    pub fn track_pair(&self, trolley: usize) -> SimResult<(usize, usize)> {
        self.check(trolley)?;
        Ok((trolley, (trolley + 1) % self.len))
    }

    /// `(default-side, alternative-side)` neighbors of a trolley.
    ///
    /// The default-side neighbor is the one whose alternative track is this
    /// trolley's default track; the alternative-side neighbor owns the track
    /// this trolley would switch onto.
    pub fn neighbor_pair(&self, trolley: usize) -> SimResult<(usize, usize)> {
        self.check(trolley)?;
        let before = if trolley == 0 { self.len - 1 } else { trolley - 1 };
        let after = if trolley == self.len - 1 { 0 } else { trolley + 1 };
        Ok((before, after))
    }
}
