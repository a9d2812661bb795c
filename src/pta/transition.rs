use std::collections::HashSet;
use std::hash::Hash;

use crate::clock::Clock;
use crate::constraint::ClockConstraint;
use crate::distribution::DiscreteDistribution;

/// The outcome of taking an edge: the clocks reset to 0 and the successor
/// location reached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target<Location> {
    pub reset_clocks: Vec<Clock>,
    pub successor: Location,
}

impl<Location> Target<Location> {
    pub fn new(reset_clocks: impl IntoIterator<Item = Clock>, successor: Location) -> Self {
        Self {
            reset_clocks: reset_clocks.into_iter().collect(),
            successor,
        }
    }
}

/// A single outgoing edge: a guard that must hold for the edge to be
/// enabled, and a probability distribution over its possible targets.
#[derive(Debug, Clone)]
pub struct Transition<Location>
where
    Location: Eq + Hash + Clone,
{
    pub guard: ClockConstraint,
    pub targets: DiscreteDistribution<Target<Location>>,
}

impl<Location> Transition<Location>
where
    Location: Eq + Hash + Clone,
{
    pub fn new(guard: ClockConstraint, targets: DiscreteDistribution<Target<Location>>) -> Self {
        Self { guard, targets }
    }
}

pub(crate) fn clocks_referenced(constraint: &ClockConstraint, out: &mut HashSet<Clock>) {
    match constraint {
        ClockConstraint::True | ClockConstraint::False => {}
        ClockConstraint::Singleton { clock, .. } => {
            out.insert(*clock);
        }
        ClockConstraint::Diagonal { lhs, rhs, .. } => {
            out.insert(*lhs);
            out.insert(*rhs);
        }
        ClockConstraint::And(parts) => {
            for p in parts {
                clocks_referenced(p, out);
            }
        }
    }
}
