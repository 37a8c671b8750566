//! Ring Simulation
//!
//! Owns the ring of agents, the per-trial passenger and track counts, and the
//! loss ledger. One [`run_trial`](Simulation::run_trial) pushes every agent its
//! local view, collects the track choices, and books the deaths.

pub mod ledger;

use trolley_events::{LossPair, LossType, PopulationCount, StrategyKind};

use crate::agents::{Agent, CountBounds};
use crate::error::{SimError, SimResult};
use crate::rng::RandomSource;
use crate::topology::Ring;

pub use ledger::{Ledger, PersonCounts};

/// A ring of trolleys and everything needed to run trials on it.
#[derive(Debug, Clone)]
pub struct Simulation {
    ring: Ring,
    full_info: bool,
    bounds: CountBounds,
    rng: RandomSource,
    /// People tied to each track, indexed by track
    track_occupancy: Vec<u32>,
    /// Passengers on each trolley, indexed by trolley
    passenger_counts: Vec<u32>,
    agents: Vec<Option<Agent>>,
    ledger: Ledger,
}

impl Simulation {
    /// Creates a ring of `population` empty slots and samples the initial
    /// track and passenger counts from `seed`.
    pub fn new(population: usize, full_info: bool, seed: u64, bounds: CountBounds) -> SimResult<Self> {
        let ring = Ring::new(population)?;
        let bounds = CountBounds::new(bounds.track_max, bounds.passenger_max)?;
        let mut sim = Self {
            ring,
            full_info,
            bounds,
            rng: RandomSource::new(seed),
            track_occupancy: vec![0; population],
            passenger_counts: vec![0; population],
            agents: vec![None; population],
            ledger: Ledger::new(population),
        };
        sim.refresh_track_counts();
        sim.refresh_passenger_counts();
        Ok(sim)
    }

    /// Ring with the default count ceilings.
    pub fn with_defaults(population: usize, full_info: bool, seed: u64) -> SimResult<Self> {
        Self::new(population, full_info, seed, CountBounds::default())
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    pub fn ring(&self) -> Ring {
        self.ring
    }

    pub fn full_info(&self) -> bool {
        self.full_info
    }

    pub fn bounds(&self) -> CountBounds {
        self.bounds
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn track_occupancy(&self) -> &[u32] {
        &self.track_occupancy
    }

    pub fn passenger_counts(&self) -> &[u32] {
        &self.passenger_counts
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Shared random stream, for callers that must draw in step with the run.
    pub fn rng_mut(&mut self) -> &mut RandomSource {
        &mut self.rng
    }

    /// A fresh agent of `kind` using this ring's count ceilings.
    pub fn make_agent(&self, kind: StrategyKind) -> Agent {
        Agent::new(kind, self.bounds)
    }

    // --- population ---------------------------------------------------------

    pub fn set_agent_at(&mut self, index: usize, agent: Agent) -> SimResult<()> {
        let len = self.len();
        let slot = self
            .agents
            .get_mut(index)
            .ok_or(SimError::OutOfRange { index, len })?;
        *slot = Some(agent);
        Ok(())
    }

    /// Replaces the whole population. Length must match the ring.
    pub fn set_all_agents(&mut self, agents: Vec<Agent>) -> SimResult<()> {
        if agents.len() != self.len() {
            return Err(SimError::invalid(format!(
                "expected {} agents, got {}",
                self.len(),
                agents.len()
            )));
        }
        self.agents = agents.into_iter().map(Some).collect();
        Ok(())
    }

    pub fn agent_at(&self, index: usize) -> SimResult<&Agent> {
        match self.agents.get(index) {
            None => Err(SimError::OutOfRange {
                index,
                len: self.len(),
            }),
            Some(None) => Err(SimError::invalid(format!("slot {} has no agent", index))),
            Some(Some(agent)) => Ok(agent),
        }
    }

    /// Strategy label of the agent at `index`.
    pub fn label_at(&self, index: usize) -> SimResult<StrategyKind> {
        self.agent_at(index).map(Agent::kind)
    }

    /// Strategy labels around the ring, in slot order.
    pub fn labels(&self) -> SimResult<Vec<StrategyKind>> {
        (0..self.len()).map(|i| self.label_at(i)).collect()
    }

    /// Slots currently running `kind`.
    pub fn indices_of(&self, kind: StrategyKind) -> Vec<usize> {
        self.agents
            .iter()
            .enumerate()
            .filter(|(_, a)| a.as_ref().map(Agent::kind) == Some(kind))
            .map(|(i, _)| i)
            .collect()
    }

    /// Agents per strategy in canonical order; extinct strategies count zero.
    pub fn population_counts(&self) -> Vec<PopulationCount> {
        let mut counts = [0usize; StrategyKind::COUNT];
        for agent in self.agents.iter().flatten() {
            counts[agent.kind().ordinal()] += 1;
        }
        StrategyKind::all()
            .iter()
            .map(|&strategy| PopulationCount {
                strategy,
                count: counts[strategy.ordinal()],
            })
            .collect()
    }

    /// Uniformly permutes the agents around the ring using the shared stream.
    pub fn shuffle_agents(&mut self) {
        self.rng.shuffle(&mut self.agents);
    }

    // --- per-trial counts ---------------------------------------------------

    /// Resamples every track in `[0, track_max]`.
    pub fn refresh_track_counts(&mut self) {
        self.rng
            .fill_counts(&mut self.track_occupancy, self.bounds.track_max);
    }

    /// Resamples every trolley's passengers in `[0, passenger_max]`.
    pub fn refresh_passenger_counts(&mut self) {
        self.rng
            .fill_counts(&mut self.passenger_counts, self.bounds.passenger_max);
    }

    /// Both refreshes, tracks first.
    pub fn refresh(&mut self) {
        self.refresh_track_counts();
        self.refresh_passenger_counts();
    }

    /// Overrides the track occupancy for the next trial.
    pub fn set_track_occupancy(&mut self, counts: &[u32]) -> SimResult<()> {
        Self::check_counts("track", counts, self.len(), self.bounds.track_max)?;
        self.track_occupancy.copy_from_slice(counts);
        Ok(())
    }

    /// Overrides the passenger counts for the next trial.
    pub fn set_passenger_counts(&mut self, counts: &[u32]) -> SimResult<()> {
        Self::check_counts("passenger", counts, self.len(), self.bounds.passenger_max)?;
        self.passenger_counts.copy_from_slice(counts);
        Ok(())
    }

    fn check_counts(what: &str, counts: &[u32], len: usize, max: u32) -> SimResult<()> {
        if counts.len() != len {
            return Err(SimError::invalid(format!(
                "expected {} {} counts, got {}",
                len,
                what,
                counts.len()
            )));
        }
        if let Some(&over) = counts.iter().find(|&&c| c > max) {
            return Err(SimError::invalid(format!(
                "{} count {} exceeds maximum {}",
                what, over, max
            )));
        }
        Ok(())
    }

    // --- trial --------------------------------------------------------------

    /// Runs one trial on the current counts and returns the per-agent kill table.
    ///
    /// Counts are not refreshed here; call [`refresh`](Self::refresh) first.
    /// Fails before touching the ledger if any slot is empty or any agent
    /// lacks information.
    pub fn run_trial(&mut self) -> SimResult<&[PersonCounts]> {
        let n = self.len();
        let mut chosen = Vec::with_capacity(n);

        for i in 0..n {
            let pair = self.ring.track_pair(i)?;
            let neighbors = if self.full_info {
                let (d, a) = self.ring.neighbor_pair(i)?;
                Some((self.passenger_counts[d], self.passenger_counts[a]))
            } else {
                None
            };
            let agent = self.agents[i]
                .as_mut()
                .ok_or_else(|| SimError::invalid(format!("slot {} has no agent", i)))?;

            agent.set_passenger_count(self.passenger_counts[i]);
            agent.set_track_counts(self.track_occupancy[pair.0], self.track_occupancy[pair.1]);
            if let Some((d, a)) = neighbors {
                agent.set_neighbor_passenger_counts(d, a);
            }
            let decision = agent.decide(self.full_info, &mut self.rng)?;
            chosen.push(decision.pick(pair));
        }

        self.book_trial(&chosen);
        Ok(&self.ledger.killed_by_agent)
    }

    fn book_trial(&mut self, chosen: &[usize]) {
        let n = self.len();
        let passengers = |i: usize| u64::from(self.passenger_counts[i]);
        let occupants = |t: usize| u64::from(self.track_occupancy[t]);

        let seen = PersonCounts::new(
            (0..n).map(passengers).sum(),
            (0..n).map(occupants).sum(),
        );

        // A track can only be claimed by its owner and the trolley before it.
        let mut claims = vec![0u8; n];
        for &track in chosen {
            claims[track] += 1;
        }
        debug_assert!(claims.iter().all(|&c| c <= 2));

        let mut encountered = Vec::with_capacity(n);
        let mut agent_kills = Vec::with_capacity(n);
        let mut collided_passengers = 0u64;
        for (i, &track) in chosen.iter().enumerate() {
            let (d, a) = (i, (i + 1) % n);
            encountered.push(PersonCounts::new(passengers(i), occupants(d) + occupants(a)));

            let lost = if claims[track] == 2 { passengers(i) } else { 0 };
            collided_passengers += lost;
            agent_kills.push(PersonCounts::new(lost, occupants(track)));
        }

        let struck: u64 = (0..n).filter(|&t| claims[t] > 0).map(occupants).sum();
        if collided_passengers > 0 {
            tracing::debug!(
                trial = self.ledger.total_trials + 1,
                collided_passengers,
                "trolleys collided"
            );
        }

        self.ledger.record_seen(seen);
        for (i, (enc, kill)) in encountered.into_iter().zip(agent_kills).enumerate() {
            self.ledger.record_encounter(i, enc);
            self.ledger.record_agent_kill(i, kill);
        }
        self.ledger
            .record_kill(PersonCounts::new(collided_passengers, struck));
    }

    /// Refreshes the counts and runs `trials` trials.
    pub fn run_trials(&mut self, trials: u64) -> SimResult<()> {
        for _ in 0..trials {
            self.refresh();
            self.run_trial()?;
        }
        Ok(())
    }

    /// Zeroes every accumulator. Agents and current counts are untouched.
    pub fn clear_records(&mut self) {
        self.ledger.clear();
    }

    // --- loss queries -------------------------------------------------------

    pub fn tele_loss(&self) -> SimResult<f64> {
        self.ledger.loss(LossType::Teleological)
    }

    pub fn deon_loss(&self) -> SimResult<f64> {
        self.ledger.loss(LossType::Deontological)
    }

    pub fn loss(&self, loss_type: LossType) -> SimResult<f64> {
        self.ledger.loss(loss_type)
    }

    pub fn losses(&self) -> SimResult<LossPair> {
        self.ledger.losses()
    }

    pub fn tele_loss_by_indices(&self, indices: &[usize]) -> SimResult<f64> {
        self.ledger.loss_by_indices(LossType::Teleological, indices)
    }

    pub fn deon_loss_by_indices(&self, indices: &[usize]) -> SimResult<f64> {
        self.ledger.loss_by_indices(LossType::Deontological, indices)
    }

    pub fn loss_by_indices(&self, loss_type: LossType, indices: &[usize]) -> SimResult<f64> {
        self.ledger.loss_by_indices(loss_type, indices)
    }

    /// The `k` slots with the lowest individual loss, best first.
    pub fn best_indices(&self, loss_type: LossType, k: usize) -> Vec<usize> {
        self.ledger.rank_ascending(loss_type).into_iter().take(k).collect()
    }

    /// The `k` slots with the highest individual loss, worst first.
    pub fn worst_indices(&self, loss_type: LossType, k: usize) -> Vec<usize> {
        self.ledger.rank_ascending(loss_type).into_iter().rev().take(k).collect()
    }
}
