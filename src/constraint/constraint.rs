use std::collections::HashMap;
use std::fmt;

use super::interval::Interval;
use super::op::ComparisonOp;
use crate::clock::Clock;

/// A clock constraint in the grammar
///
/// ```text
/// cc ::= true | false | cc & cc | c ~ n | c1 - c2 ~ n
/// ```
///
/// where `~` is one of `<, <=, >=, >` and `n` is a natural number.
///
/// The smart constructors (`singleton`, `diagonal`, `and`) fold the
/// degenerate boundary cases described for the upstream grammar: a clock is
/// never negative, so `c >= 0` and `c > -1`-style bounds collapse to `True`,
/// and `c < 0` collapses to `False`.
#[derive(Debug, Clone, PartialEq)]
pub enum ClockConstraint {
    True,
    False,
    Singleton {
        clock: Clock,
        bound: i64,
        op: ComparisonOp,
    },
    Diagonal {
        lhs: Clock,
        rhs: Clock,
        bound: i64,
        op: ComparisonOp,
    },
    And(Vec<ClockConstraint>),
}

impl ClockConstraint {
    /// Build `clock ~ bound`, folding away constraints that every
    /// nonnegative clock valuation trivially satisfies or violates.
    pub fn singleton(clock: Clock, op: ComparisonOp, bound: i64) -> Self {
        if op.is_lower_bound() {
            if bound < 0 || (bound == 0 && !op.is_strict()) {
                return ClockConstraint::True;
            }
        } else if bound < 0 || (bound == 0 && op.is_strict()) {
            return ClockConstraint::False;
        }
        ClockConstraint::Singleton { clock, bound, op }
    }

    /// Build `lhs - rhs ~ bound`. Diagonal constraints relate exactly two
    /// clocks; there is no folding analogous to `singleton` because the
    /// difference of two nonnegative clocks carries no sign guarantee.
    pub fn diagonal(lhs: Clock, rhs: Clock, op: ComparisonOp, bound: i64) -> Self {
        assert!(bound >= 0, "diagonal constraint bound must be non-negative");
        ClockConstraint::Diagonal {
            lhs,
            rhs,
            bound,
            op,
        }
    }

    /// Conjunction, flattening nested `And` nodes and short-circuiting on
    /// any `False` conjunct.
    pub fn and(self, other: ClockConstraint) -> ClockConstraint {
        match (self, other) {
            (ClockConstraint::False, _) | (_, ClockConstraint::False) => ClockConstraint::False,
            (ClockConstraint::True, rhs) => rhs,
            (lhs, ClockConstraint::True) => lhs,
            (ClockConstraint::And(mut lhs), ClockConstraint::And(rhs)) => {
                lhs.extend(rhs);
                ClockConstraint::And(lhs)
            }
            (ClockConstraint::And(mut lhs), rhs) => {
                lhs.push(rhs);
                ClockConstraint::And(lhs)
            }
            (lhs, ClockConstraint::And(mut rhs)) => {
                rhs.insert(0, lhs);
                ClockConstraint::And(rhs)
            }
            (lhs, rhs) => ClockConstraint::And(vec![lhs, rhs]),
        }
    }

    /// Whether `values` satisfies this constraint.
    pub fn contains(&self, values: &HashMap<Clock, f64>) -> bool {
        match self {
            ClockConstraint::True => true,
            ClockConstraint::False => false,
            ClockConstraint::Singleton { clock, bound, op } => {
                let v = values[clock];
                op.apply(v, *bound as f64)
            }
            ClockConstraint::Diagonal {
                lhs,
                rhs,
                bound,
                op,
            } => {
                let diff = values[lhs] - values[rhs];
                op.apply(diff, *bound as f64)
            }
            ClockConstraint::And(parts) => parts.iter().all(|p| p.contains(values)),
        }
    }

    /// Solve for the interval of delays `t >= 0` such that `values + t`
    /// satisfies this constraint, i.e. the admissible delay interval.
    ///
    /// Diagonal constraints don't depend on elapsed delay time (both
    /// clocks advance in lockstep, so their difference is delay-invariant)
    /// and therefore resolve to either the full half-line or the empty
    /// interval depending on whether they already hold.
    pub fn delays(&self, values: &HashMap<Clock, f64>) -> Interval {
        match self {
            ClockConstraint::True => Interval::at_least(0.0),
            ClockConstraint::False => Interval::empty(),
            ClockConstraint::Singleton { clock, bound, op } => {
                let v_c = values[clock];
                let n = *bound as f64;
                if op.is_lower_bound() {
                    // Already-satisfied guards (v_c > n) must not yield a
                    // negative lower bound; delays are nonnegative by contract.
                    let lower = (n - v_c).max(0.0);
                    if op.is_strict() {
                        Interval::above(lower)
                    } else {
                        Interval::at_least(lower)
                    }
                } else if op.is_strict() {
                    Interval::closed_open(0.0, n - v_c)
                } else {
                    Interval::closed(0.0, n - v_c)
                }
            }
            ClockConstraint::Diagonal {
                lhs,
                rhs,
                bound,
                op,
            } => {
                let diff = values[lhs] - values[rhs];
                if op.apply(diff, *bound as f64) {
                    Interval::at_least(0.0)
                } else {
                    Interval::empty()
                }
            }
            ClockConstraint::And(parts) => parts
                .iter()
                .map(|p| p.delays(values))
                .fold(Interval::at_least(0.0), |acc, next| acc.intersect(&next)),
        }
    }
}

impl fmt::Display for ClockConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockConstraint::True => write!(f, "true"),
            ClockConstraint::False => write!(f, "false"),
            ClockConstraint::Singleton { clock, bound, op } => write!(f, "{clock} {op} {bound}"),
            ClockConstraint::Diagonal {
                lhs,
                rhs,
                bound,
                op,
            } => write!(f, "{lhs} - {rhs} {op} {bound}"),
            ClockConstraint::And(parts) => {
                let rendered: Vec<String> = parts.iter().map(|p| p.to_string()).collect();
                write!(f, "{}", rendered.join(" & "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(Clock, f64)]) -> HashMap<Clock, f64> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn singleton_folds_trivial_lower_bound() {
        let c = Clock::new(0);
        assert_eq!(
            ClockConstraint::singleton(c, ComparisonOp::Ge, 0),
            ClockConstraint::True
        );
        assert_eq!(
            ClockConstraint::singleton(c, ComparisonOp::Gt, -1),
            ClockConstraint::True
        );
    }

    #[test]
    fn singleton_folds_trivial_upper_bound() {
        let c = Clock::new(0);
        assert_eq!(
            ClockConstraint::singleton(c, ComparisonOp::Lt, 0),
            ClockConstraint::False
        );
        assert_eq!(
            ClockConstraint::singleton(c, ComparisonOp::Le, -1),
            ClockConstraint::False
        );
    }

    #[test]
    fn and_short_circuits_on_false() {
        let c = Clock::new(0);
        let cc = ClockConstraint::singleton(c, ComparisonOp::Lt, 5)
            .and(ClockConstraint::False);
        assert_eq!(cc, ClockConstraint::False);
    }

    #[test]
    fn and_flattens_nested_conjunctions() {
        let c0 = Clock::new(0);
        let c1 = Clock::new(1);
        let a = ClockConstraint::singleton(c0, ComparisonOp::Ge, 1);
        let b = ClockConstraint::singleton(c1, ComparisonOp::Le, 4);
        let combined = a.clone().and(b.clone()).and(ClockConstraint::True);
        match combined {
            ClockConstraint::And(parts) => assert_eq!(parts, vec![a, b]),
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn delays_for_upper_bound_is_closed_open() {
        let c = Clock::new(0);
        let cc = ClockConstraint::singleton(c, ComparisonOp::Lt, 5);
        let vals = values(&[(c, 2.0)]);
        let interval = cc.delays(&vals);
        assert!(interval.contains(0.0));
        assert!(interval.contains(2.999));
        assert!(!interval.contains(3.0));
    }

    #[test]
    fn delays_conjunction_is_intersection() {
        let c = Clock::new(0);
        let lower = ClockConstraint::singleton(c, ComparisonOp::Ge, 2);
        let upper = ClockConstraint::singleton(c, ComparisonOp::Le, 5);
        let cc = lower.and(upper);
        let vals = values(&[(c, 1.0)]);
        let interval = cc.delays(&vals);
        assert!(!interval.contains(0.5));
        assert!(interval.contains(1.0));
        assert!(interval.contains(4.0));
        assert!(!interval.contains(4.1));
    }

    #[test]
    fn diagonal_contains_checks_difference() {
        let c0 = Clock::new(0);
        let c1 = Clock::new(1);
        let cc = ClockConstraint::diagonal(c0, c1, ComparisonOp::Le, 2);
        let ok = values(&[(c0, 3.0), (c1, 2.0)]);
        let bad = values(&[(c0, 6.0), (c1, 2.0)]);
        assert!(cc.contains(&ok));
        assert!(!cc.contains(&bad));
    }

    #[test]
    fn diagonal_delays_is_full_or_empty() {
        let c0 = Clock::new(0);
        let c1 = Clock::new(1);
        let cc = ClockConstraint::diagonal(c0, c1, ComparisonOp::Le, 2);
        let ok = values(&[(c0, 3.0), (c1, 2.0)]);
        let bad = values(&[(c0, 6.0), (c1, 2.0)]);
        assert!(cc.delays(&ok).contains(1000.0));
        assert!(cc.delays(&bad).is_empty());
    }
}
