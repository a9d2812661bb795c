use std::collections::HashMap;
use std::hash::Hash;

use log::{info, warn};
use rand::Rng;

use crate::clock::Clock;
use crate::constraint::Interval;
use crate::distribution::DiscreteDistribution;
use crate::pta::{Pta, SchedulerError, Target};

/// Outcome of a [`RegionMdp::delay`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DelayOutcome<Location> {
    /// The delay was admissible; the driver advanced to this state.
    Running {
        location: Location,
        valuation: HashMap<Clock, f64>,
    },
    /// The delay would have violated the current location's invariant. The
    /// driver is now stuck in a terminal state until [`RegionMdp::reset`].
    InvariantViolated,
}

/// Whether the driver is still willing to take `delay`/`step` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Running,
    InvariantViolated,
}

/// A stateful, integral-region-graph simulation of a [`Pta`]: an MDP whose
/// state is `(location, Region)` and whose actions are delays and edge
/// selections.
///
/// Not directly constructed; obtain one via [`Pta::to_region_mdp`].
#[derive(Debug)]
pub struct RegionMdp<'a, Location, Action>
where
    Location: Eq + Hash + Clone,
    Action: Eq + Hash + Clone,
{
    pta: &'a Pta<Location, Action>,
    region: crate::region::Region,
    current_location: Location,
    state: RunState,
}

impl<'a, Location, Action> RegionMdp<'a, Location, Action>
where
    Location: Eq + Hash + Clone,
    Action: Eq + Hash + Clone,
{
    pub(crate) fn new(pta: &'a Pta<Location, Action>) -> Self {
        Self {
            pta,
            region: crate::region::Region::all_zero(pta.n_clocks()),
            current_location: pta.initial_location().clone(),
            state: RunState::Running,
        }
    }

    /// Reset the driver to the initial `(location, allZeros)` state.
    pub fn reset(&mut self) -> (Location, HashMap<Clock, f64>) {
        self.region = crate::region::Region::all_zero(self.pta.n_clocks());
        self.current_location = self.pta.initial_location().clone();
        self.state = RunState::Running;
        info!("region MDP reset to initial location");
        self.current_state()
    }

    /// The current `(location, valuation)` pair.
    pub fn current_state(&self) -> (Location, HashMap<Clock, f64>) {
        (self.current_location.clone(), self.region.valuation())
    }

    pub fn location(&self) -> &Location {
        &self.current_location
    }

    /// Edges whose guard is satisfied by the current representative
    /// valuation.
    pub fn enabled_actions(&self) -> HashMap<Action, DiscreteDistribution<Target<Location>>> {
        let values = self.region.valuation();
        self.pta.enabled_actions(&self.current_location, &values)
    }

    /// The interval of delays admissible before the current location's
    /// invariant turns false.
    pub fn allowed_delays(&self) -> Interval {
        let values = self.region.valuation();
        self.pta.allowed_delays(&self.current_location, &values)
    }

    /// Stay in the current location and delay by `time`.
    ///
    /// Returns [`DelayOutcome::InvariantViolated`] (not an error) if `time`
    /// drives the automaton outside its invariant; the driver then refuses
    /// further progress until [`RegionMdp::reset`].
    pub fn delay(&mut self, time: f64) -> Result<DelayOutcome<Location>, SchedulerError> {
        if time < 0.0 {
            return Err(SchedulerError::NegativeDelay(time.to_string()));
        }
        if self.state == RunState::InvariantViolated {
            return Ok(DelayOutcome::InvariantViolated);
        }

        let allowed = self.allowed_delays();
        if !allowed.contains(time) {
            warn!("delay {time} violates invariant at current location");
            self.state = RunState::InvariantViolated;
            return Ok(DelayOutcome::InvariantViolated);
        }

        if time > 0.0 {
            self.region.delay_real(time);
        }

        let (location, valuation) = self.current_state();
        Ok(DelayOutcome::Running { location, valuation })
    }

    /// Delay by an exact integer number of region-graph steps.
    pub fn delay_steps(&mut self, steps: u64) -> Result<DelayOutcome<Location>, SchedulerError> {
        if self.state == RunState::InvariantViolated {
            return Ok(DelayOutcome::InvariantViolated);
        }
        self.region.delay_steps(steps);
        let values = self.region.valuation();
        if !self
            .pta
            .allowed_delays(&self.current_location, &values)
            .contains(0.0)
        {
            warn!("delay_steps({steps}) violates invariant at current location");
            self.state = RunState::InvariantViolated;
            return Ok(DelayOutcome::InvariantViolated);
        }
        let (location, valuation) = self.current_state();
        Ok(DelayOutcome::Running { location, valuation })
    }

    /// Take `action`, sampling its probabilistic target with `rng`.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        action: &Action,
        rng: &mut R,
    ) -> Result<(Location, HashMap<Clock, f64>), SchedulerError> {
        if self.state == RunState::InvariantViolated {
            return Err(SchedulerError::ActionNotEnabled);
        }

        let enabled = self.enabled_actions();
        let dist = enabled
            .get(action)
            .ok_or(SchedulerError::ActionNotEnabled)?;
        let target = dist.sample(rng).clone();

        for clock in &target.reset_clocks {
            self.region.reset(*clock);
        }
        self.current_location = target.successor;

        info!("stepped to new location via action");
        Ok(self.current_state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{ClockConstraint, ComparisonOp};
    use crate::pta::Transition;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn clock_gate_pta() -> Pta<&'static str, &'static str> {
        let x = Clock::new(0);
        let mut locations = HashSet::new();
        locations.insert("waiting");
        locations.insert("done");

        let guard = ClockConstraint::singleton(x, ComparisonOp::Ge, 2);
        let targets = DiscreteDistribution::delta(Target::new(vec![], "done"));
        let mut waiting_edges = HashMap::new();
        waiting_edges.insert("go", Transition::new(guard, targets));

        let mut transitions = HashMap::new();
        transitions.insert("waiting", waiting_edges);
        transitions.insert("done", HashMap::new());

        let mut invariants = HashMap::new();
        invariants.insert("waiting", ClockConstraint::singleton(x, ComparisonOp::Le, 3));
        invariants.insert("done", ClockConstraint::True);

        Pta::new(
            locations,
            1,
            "waiting",
            transitions,
            invariants,
            HashMap::new(),
        )
        .unwrap()
    }

    #[test]
    fn enabled_actions_contract() {
        let pta = clock_gate_pta();
        let mut mdp = pta.to_region_mdp();
        assert!(mdp.enabled_actions().is_empty());
        mdp.delay(2.0).unwrap();
        assert!(mdp.enabled_actions().contains_key(&"go"));
    }

    #[test]
    fn invariant_violation_contract() {
        let pta = clock_gate_pta();
        let mut mdp = pta.to_region_mdp();
        let outcome = mdp.delay(4.0).unwrap();
        assert_eq!(outcome, DelayOutcome::InvariantViolated);

        // stuck until reset
        let still_stuck = mdp.delay(0.0).unwrap();
        assert_eq!(still_stuck, DelayOutcome::InvariantViolated);
        assert!(mdp.step(&"go", &mut SmallRng::seed_from_u64(0)).is_err());

        mdp.reset();
        assert!(mdp.delay(0.0).unwrap() != DelayOutcome::InvariantViolated);
    }

    #[test]
    fn step_rejects_disabled_action() {
        let pta = clock_gate_pta();
        let mut mdp = pta.to_region_mdp();
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(
            mdp.step(&"go", &mut rng).unwrap_err(),
            SchedulerError::ActionNotEnabled
        );
    }

    #[test]
    fn step_resets_clocks_and_moves_location() {
        let pta = clock_gate_pta();
        let mut mdp = pta.to_region_mdp();
        let mut rng = SmallRng::seed_from_u64(2);
        mdp.delay(2.0).unwrap();
        let (location, valuation) = mdp.step(&"go", &mut rng).unwrap();
        assert_eq!(location, "done");
        assert_eq!(valuation[&Clock::new(0)], 2.0);
    }

    #[test]
    fn negative_delay_is_a_scheduler_error() {
        let pta = clock_gate_pta();
        let mut mdp = pta.to_region_mdp();
        assert_eq!(
            mdp.delay(-1.0).unwrap_err(),
            SchedulerError::NegativeDelay((-1.0f64).to_string())
        );
    }
}
