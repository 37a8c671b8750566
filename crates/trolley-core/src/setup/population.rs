//! Population builders: one strategy everywhere, or equal shares of all of them.

use trolley_events::StrategyKind;

use crate::agents::{Agent, CountBounds};
use crate::error::{SimError, SimResult};
use crate::rng::RandomSource;

/// `population` agents all running `kind`.
pub fn homogeneous_population(kind: StrategyKind, population: usize, bounds: CountBounds) -> Vec<Agent> {
    (0..population).map(|_| Agent::new(kind, bounds)).collect()
}

/// Equal shares of every strategy, shuffled with `rng`.
///
/// `population` must be a multiple of the number of strategies.
pub fn balanced_population(
    population: usize,
    bounds: CountBounds,
    rng: &mut RandomSource,
) -> SimResult<Vec<Agent>> {
    let kinds = StrategyKind::all();
    if population == 0 || population % kinds.len() != 0 {
        return Err(SimError::invalid(format!(
            "population {} is not divisible by the {} strategies",
            population,
            kinds.len()
        )));
    }

    let mut agents: Vec<Agent> = (0..population / kinds.len())
        .flat_map(|_| kinds.iter().map(|&k| Agent::new(k, bounds)))
        .collect();
    rng.shuffle(&mut agents);
    Ok(agents)
}
