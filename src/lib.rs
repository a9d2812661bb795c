pub mod clock;
pub mod constraint;
pub mod distribution;
pub mod mdp;
pub mod pta;
pub mod region;

pub use clock::Clock;
pub use constraint::{ClockConstraint, ComparisonOp, Interval};
pub use distribution::DiscreteDistribution;
pub use mdp::{DelayOutcome, RegionMdp};
pub use pta::{Pta, PtaError, SchedulerError, Target, Transition};
pub use region::Region;

/// Install a terminal logger at the given level.
///
/// A convenience for binaries and examples embedding this crate that don't
/// already have a `log` subscriber installed; the core library never calls
/// this itself and never assumes a particular logger is present.
#[cfg(feature = "native")]
pub fn init_logging(level: log::LevelFilter) {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .expect("initialize logger");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn public_surface_builds_a_trivial_pta() {
        let x = Clock::new(0);
        let guard = ClockConstraint::singleton(x, ComparisonOp::Ge, 1);
        let targets = DiscreteDistribution::delta(Target::new(vec![x], "q0"));

        let mut edges = HashMap::new();
        edges.insert("loop", Transition::new(guard, targets));
        let mut transitions = HashMap::new();
        transitions.insert("q0", edges);

        let mut invariants = HashMap::new();
        invariants.insert("q0", ClockConstraint::True);

        let locations: HashSet<&str> = ["q0"].into_iter().collect();
        let pta = Pta::new(locations, 1, "q0", transitions, invariants, HashMap::new())
            .expect("well-formed PTA");

        let mdp = pta.to_region_mdp();
        assert_eq!(mdp.location(), &"q0");
    }
}
