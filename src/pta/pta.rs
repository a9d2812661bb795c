use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use log::{debug, trace};

use super::error::PtaError;
use super::transition::{clocks_referenced, Target, Transition};
use crate::clock::Clock;
use crate::constraint::{ClockConstraint, Interval};
use crate::distribution::DiscreteDistribution;
use crate::mdp::RegionMdp;

/// A Probabilistic Timed Automaton: a finite control graph over locations
/// `Location`, a fixed set of clocks, guarded probabilistic transitions
/// `Action`, per-location invariants, and an optional labelling function.
///
/// `Pta` is immutable once constructed; every query is a pure function of
/// the automaton and its arguments. Simulation state lives in
/// [`RegionMdp`], obtained via [`Pta::to_region_mdp`].
#[derive(Debug, Clone)]
pub struct Pta<Location, Action>
where
    Location: Eq + Hash + Clone,
    Action: Eq + Hash + Clone,
{
    locations: HashSet<Location>,
    n_clocks: usize,
    initial_location: Location,
    transitions: HashMap<Location, HashMap<Action, Transition<Location>>>,
    invariants: HashMap<Location, ClockConstraint>,
    labels: HashMap<Location, HashSet<String>>,
}

impl<Location, Action> Pta<Location, Action>
where
    Location: Eq + Hash + Clone,
    Action: Eq + Hash + Clone,
{
    /// Construct a `Pta`, validating the structural invariants from the
    /// construction surface: the initial location is declared, every
    /// location has transitions and an invariant, and every guard/invariant
    /// only references declared clocks.
    pub fn new(
        locations: HashSet<Location>,
        n_clocks: usize,
        initial_location: Location,
        transitions: HashMap<Location, HashMap<Action, Transition<Location>>>,
        invariants: HashMap<Location, ClockConstraint>,
        labels: HashMap<Location, HashSet<String>>,
    ) -> Result<Self, PtaError> {
        if !locations.contains(&initial_location) {
            return Err(PtaError::InitialLocationNotDeclared);
        }
        for loc in &locations {
            if !transitions.contains_key(loc) {
                return Err(PtaError::MissingTransitions);
            }
            let invariant = invariants.get(loc).ok_or(PtaError::MissingInvariant)?;

            let mut referenced = HashSet::new();
            clocks_referenced(invariant, &mut referenced);
            for edge in transitions[loc].values() {
                clocks_referenced(&edge.guard, &mut referenced);
            }
            for clock in referenced {
                if clock.index() >= n_clocks {
                    return Err(PtaError::UndeclaredClockInInvariant {
                        clock: clock.index(),
                    });
                }
            }
        }

        debug!(
            "constructed PTA with {} locations and {} clocks",
            locations.len(),
            n_clocks
        );

        Ok(Self {
            locations,
            n_clocks,
            initial_location,
            transitions,
            invariants,
            labels,
        })
    }

    pub fn locations(&self) -> &HashSet<Location> {
        &self.locations
    }

    pub fn n_clocks(&self) -> usize {
        self.n_clocks
    }

    pub fn initial_location(&self) -> &Location {
        &self.initial_location
    }

    pub fn labels(&self, location: &Location) -> HashSet<String> {
        self.labels.get(location).cloned().unwrap_or_default()
    }

    /// The subset of `transitions[location]` whose guard is satisfied by
    /// `values`.
    pub fn enabled_actions(
        &self,
        location: &Location,
        values: &HashMap<Clock, f64>,
    ) -> HashMap<Action, DiscreteDistribution<Target<Location>>> {
        let edges = &self.transitions[location];
        let enabled: HashMap<Action, DiscreteDistribution<Target<Location>>> = edges
            .iter()
            .filter(|(_, edge)| edge.guard.contains(values))
            .map(|(action, edge)| (action.clone(), edge.targets.clone()))
            .collect();
        trace!("{} of {} actions enabled", enabled.len(), edges.len());
        enabled
    }

    /// The interval of delays admissible at `location` given `values`,
    /// before the location's invariant turns false.
    pub fn allowed_delays(&self, location: &Location, values: &HashMap<Clock, f64>) -> Interval {
        self.invariants[location].delays(values)
    }

    /// Obtain a stateful Region-MDP simulation of this automaton.
    pub fn to_region_mdp(&self) -> RegionMdp<'_, Location, Action> {
        RegionMdp::new(self)
    }
}
