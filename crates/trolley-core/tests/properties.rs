//! Property tests for ring topology and ledger conservation.

use proptest::prelude::*;
use trolley_core::setup::homogeneous_population;
use trolley_core::{Ring, Simulation, StrategyKind};

fn any_strategy() -> impl Strategy<Value = StrategyKind> {
    prop::sample::select(StrategyKind::all().to_vec())
}

proptest! {
    #[test]
    fn prop_track_pair_in_range_and_distinct(n in 2usize..200, seed in any::<usize>()) {
        let ring = Ring::new(n).unwrap();
        let i = seed % n;
        let (d, a) = ring.track_pair(i).unwrap();
        prop_assert!(d < n && a < n);
        prop_assert_ne!(d, a);
        prop_assert_eq!(d, i);
    }

    #[test]
    fn prop_neighbor_pair_in_range(n in 2usize..200, seed in any::<usize>()) {
        let ring = Ring::new(n).unwrap();
        let i = seed % n;
        let (before, after) = ring.neighbor_pair(i).unwrap();
        prop_assert!(before < n && after < n);
        prop_assert_ne!(before, i);
        prop_assert_ne!(after, i);
        if n >= 3 {
            prop_assert_ne!(before, after);
        }
        // the default-side neighbor's alternative track is our default track
        prop_assert_eq!(ring.track_pair(before).unwrap().1, i);
    }

    #[test]
    fn prop_out_of_range_rejected(n in 2usize..50, extra in 0usize..50) {
        let ring = Ring::new(n).unwrap();
        prop_assert!(ring.track_pair(n + extra).is_err());
        prop_assert!(ring.neighbor_pair(n + extra).is_err());
    }

    #[test]
    fn prop_ledger_conservation_and_bounds(
        kinds in prop::collection::vec(any_strategy(), 2..16),
        full_info in any::<bool>(),
        seed in any::<u64>(),
        trials in 1u64..40,
    ) {
        let n = kinds.len();
        let mut sim = Simulation::with_defaults(n, full_info, seed).unwrap();
        let agents = kinds.iter().map(|&k| sim.make_agent(k)).collect();
        sim.set_all_agents(agents).unwrap();
        sim.run_trials(trials).unwrap();

        let ledger = sim.ledger();
        let passengers: u64 = ledger.encountered_by_agent.iter().map(|c| c.passengers).sum();
        prop_assert_eq!(passengers, ledger.seen.passengers);
        // every track is a candidate for exactly two trolleys
        let track: u64 = ledger.encountered_by_agent.iter().map(|c| c.track).sum();
        prop_assert_eq!(track, 2 * ledger.seen.track);

        for (killed, seen) in ledger.killed_by_agent.iter().zip(&ledger.encountered_by_agent) {
            prop_assert!(killed.passengers <= seen.passengers);
            prop_assert!(killed.track <= seen.track);
        }
        let agent_passenger_kills: u64 = ledger.killed_by_agent.iter().map(|c| c.passengers).sum();
        prop_assert_eq!(agent_passenger_kills, ledger.killed.passengers);
        prop_assert!(ledger.killed.track <= ledger.seen.track);

        if let Ok(tele) = sim.tele_loss() {
            prop_assert!((0.0..=1.0).contains(&tele));
        }
        if let Ok(deon) = sim.deon_loss() {
            prop_assert!((0.0..=1.0).contains(&deon));
        }
    }

    #[test]
    fn prop_homogeneous_fixed_rings_never_collide(
        n in 2usize..30,
        seed in any::<u64>(),
        switch in any::<bool>(),
    ) {
        let kind = if switch { StrategyKind::AlwaysSwitch } else { StrategyKind::AlwaysDoNothing };
        let mut sim = Simulation::with_defaults(n, false, seed).unwrap();
        let agents = homogeneous_population(kind, n, sim.bounds());
        sim.set_all_agents(agents).unwrap();
        sim.run_trials(10).unwrap();
        prop_assert_eq!(sim.ledger().killed.passengers, 0);
        prop_assert_eq!(sim.ledger().killed.track, sim.ledger().seen.track);
    }
}
