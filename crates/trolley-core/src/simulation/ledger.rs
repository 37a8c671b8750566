//! Loss Ledger
//!
//! Cumulative people-seen and people-killed tallies, globally and per ring
//! slot, and the loss ratios read from them.

use trolley_events::{LossPair, LossType};

use crate::error::{SimError, SimResult};

/// Passengers and track occupants, counted together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersonCounts {
    pub passengers: u64,
    pub track: u64,
}

impl PersonCounts {
    pub fn new(passengers: u64, track: u64) -> Self {
        Self { passengers, track }
    }

    pub fn total(&self) -> u64 {
        self.passengers + self.track
    }

    fn add(&mut self, other: PersonCounts) {
        self.passengers += other.passengers;
        self.track += other.track;
    }

    fn minus(&self, earlier: PersonCounts) -> PersonCounts {
        PersonCounts {
            passengers: self.passengers.saturating_sub(earlier.passengers),
            track: self.track.saturating_sub(earlier.track),
        }
    }
}

/// Killed over encountered, passengers and track occupants alike.
pub fn teleological_loss(killed: PersonCounts, seen: PersonCounts) -> SimResult<f64> {
    if seen.total() == 0 {
        return Err(SimError::DivisionByZero("people"));
    }
    Ok(killed.total() as f64 / seen.total() as f64)
}

/// Passengers killed over passengers carried.
pub fn deontological_loss(killed: PersonCounts, seen: PersonCounts) -> SimResult<f64> {
    if seen.passengers == 0 {
        return Err(SimError::DivisionByZero("passengers"));
    }
    Ok(killed.passengers as f64 / seen.passengers as f64)
}

pub fn loss_ratio(loss_type: LossType, killed: PersonCounts, seen: PersonCounts) -> SimResult<f64> {
    match loss_type {
        LossType::Teleological => teleological_loss(killed, seen),
        LossType::Deontological => deontological_loss(killed, seen),
    }
}

/// All accumulators a simulation keeps between [`clear`](Ledger::clear)s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    pub total_trials: u64,
    /// People present on the ring, summed over trials
    pub seen: PersonCounts,
    /// People killed, each collision and each struck track counted once
    pub killed: PersonCounts,
    /// Per slot: own passengers plus occupants of both candidate tracks
    pub encountered_by_agent: Vec<PersonCounts>,
    /// Per slot: own passengers lost to collisions plus occupants of the chosen track
    pub killed_by_agent: Vec<PersonCounts>,
}

impl Ledger {
    pub fn new(len: usize) -> Self {
        Self {
            total_trials: 0,
            seen: PersonCounts::default(),
            killed: PersonCounts::default(),
            encountered_by_agent: vec![PersonCounts::default(); len],
            killed_by_agent: vec![PersonCounts::default(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.encountered_by_agent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encountered_by_agent.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Ledger::new(self.len());
    }

    pub(crate) fn record_seen(&mut self, seen: PersonCounts) {
        self.total_trials += 1;
        self.seen.add(seen);
    }

    pub(crate) fn record_encounter(&mut self, index: usize, counts: PersonCounts) {
        self.encountered_by_agent[index].add(counts);
    }

    pub(crate) fn record_agent_kill(&mut self, index: usize, counts: PersonCounts) {
        self.killed_by_agent[index].add(counts);
    }

    pub(crate) fn record_kill(&mut self, counts: PersonCounts) {
        self.killed.add(counts);
    }

    /// Global loss of the given type.
    pub fn loss(&self, loss_type: LossType) -> SimResult<f64> {
        loss_ratio(loss_type, self.killed, self.seen)
    }

    /// Both global losses.
    pub fn losses(&self) -> SimResult<LossPair> {
        Ok(LossPair::new(
            self.loss(LossType::Teleological)?,
            self.loss(LossType::Deontological)?,
        ))
    }

    /// Loss aggregated over a subset of slots before dividing.
    pub fn loss_by_indices(&self, loss_type: LossType, indices: &[usize]) -> SimResult<f64> {
        let mut killed = PersonCounts::default();
        let mut encountered = PersonCounts::default();
        for &i in indices {
            if i >= self.len() {
                return Err(SimError::OutOfRange {
                    index: i,
                    len: self.len(),
                });
            }
            killed.add(self.killed_by_agent[i]);
            encountered.add(self.encountered_by_agent[i]);
        }
        loss_ratio(loss_type, killed, encountered)
    }

    /// Both subset losses.
    pub fn losses_by_indices(&self, indices: &[usize]) -> SimResult<LossPair> {
        Ok(LossPair::new(
            self.loss_by_indices(LossType::Teleological, indices)?,
            self.loss_by_indices(LossType::Deontological, indices)?,
        ))
    }

    /// One slot's own loss for ranking. A slot that encountered nobody the
    /// metric counts scores 0.
    fn rank_score(&self, loss_type: LossType, index: usize) -> f64 {
        loss_ratio(
            loss_type,
            self.killed_by_agent[index],
            self.encountered_by_agent[index],
        )
        .unwrap_or(0.0)
    }

    /// Slot indices ordered from lowest to highest individual loss.
    /// Equal losses keep ascending index order.
    pub fn rank_ascending(&self, loss_type: LossType) -> Vec<usize> {
        let mut scored: Vec<(usize, f64)> = (0..self.len())
            .map(|i| (i, self.rank_score(loss_type, i)))
            .collect();
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        scored.into_iter().map(|(i, _)| i).collect()
    }

    /// What was accumulated after `earlier` was taken.
    ///
    /// `earlier` must be a snapshot of this same ledger with no clear in between.
    pub fn since(&self, earlier: &Ledger) -> Ledger {
        let diff = |now: &[PersonCounts], then: &[PersonCounts]| -> Vec<PersonCounts> {
            now.iter()
                .enumerate()
                .map(|(i, c)| c.minus(then.get(i).copied().unwrap_or_default()))
                .collect()
        };
        Ledger {
            total_trials: self.total_trials.saturating_sub(earlier.total_trials),
            seen: self.seen.minus(earlier.seen),
            killed: self.killed.minus(earlier.killed),
            encountered_by_agent: diff(&self.encountered_by_agent, &earlier.encountered_by_agent),
            killed_by_agent: diff(&self.killed_by_agent, &earlier.killed_by_agent),
        }
    }
}
