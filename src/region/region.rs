use std::collections::HashMap;

use crate::clock::Clock;
use crate::constraint::ClockConstraint;

/// An integral Region: the canonical representative of an equivalence class
/// of dense-time clock valuations.
///
/// Clocks are addressed by their `usize` index, which must be dense and
/// contiguous (`0..n_clocks`) as assigned at PTA-construction time. The
/// Region's own state is three flat arrays of length `K = n_clocks` plus the
/// fractional-class count `m` and the `all_integer` flag, following
/// Hartmanns, Sedwards & D'Argenio's region-graph encoding.
#[derive(Debug, Clone)]
pub struct Region {
    integer_part: Vec<i64>,
    fractional_rank: Vec<i64>,
    num_fractional_classes: i64,
    all_integer: bool,
}

impl Region {
    /// The all-zero Region over `n_clocks` clocks: every clock at 0, a
    /// single fractional class, and the integer-lattice point set.
    pub fn all_zero(n_clocks: usize) -> Self {
        Self {
            integer_part: vec![0; n_clocks],
            fractional_rank: vec![0; n_clocks],
            num_fractional_classes: 1,
            all_integer: true,
        }
    }

    pub fn n_clocks(&self) -> usize {
        self.integer_part.len()
    }

    pub fn is_all_integer(&self) -> bool {
        self.all_integer
    }

    /// The representative valuation of every clock in this Region.
    ///
    /// When the Region sits on the integer lattice, `val(c) = I(c) +
    /// F(c)/m`. Otherwise the representative is strictly interior to its
    /// equivalence class: `val(c) = I(c) + (2F(c)+1)/(2m)`.
    pub fn valuation(&self) -> HashMap<Clock, f64> {
        let m = self.num_fractional_classes as f64;
        (0..self.n_clocks())
            .map(|i| {
                let v = if self.all_integer {
                    self.integer_part[i] as f64 + self.fractional_rank[i] as f64 / m
                } else {
                    self.integer_part[i] as f64 + (2 * self.fractional_rank[i] + 1) as f64 / (2.0 * m)
                };
                (Clock::new(i), v)
            })
            .collect()
    }

    /// Whether the representative valuation satisfies `constraint`.
    pub fn contains(&self, constraint: &ClockConstraint) -> bool {
        constraint.contains(&self.valuation())
    }

    /// Advance the Region by `k` positions in the canonical region-graph
    /// traversal. `k` must be at least 1.
    pub fn delay_steps(&mut self, k: u64) {
        assert!(k >= 1, "delay_steps requires at least one step");
        if k == 1 {
            self.delay_one_step();
        } else {
            self.delay_many_steps(k);
        }
        self.check_invariants();
    }

    fn delay_one_step(&mut self) {
        if self.all_integer {
            self.all_integer = false;
            return;
        }
        let m = self.num_fractional_classes;
        for i in 0..self.n_clocks() {
            let rank = (self.fractional_rank[i] + 1) % m;
            if rank == 0 {
                self.integer_part[i] += 1;
            }
            self.fractional_rank[i] = rank;
        }
        self.all_integer = true;
    }

    fn delay_many_steps(&mut self, k: u64) {
        let m = self.num_fractional_classes;
        let s: i64 = if self.all_integer { 1 } else { 0 };
        let k = k as i64;
        for i in 0..self.n_clocks() {
            let f = self.fractional_rank[i];
            self.integer_part[i] += (2 * f + s + k).div_euclid(2 * m);
            self.fractional_rank[i] = (f + (k + s).div_euclid(2)).rem_euclid(m);
        }
        if k % 2 != 0 {
            self.all_integer = !self.all_integer;
        }
    }

    /// Advance the Region by the unique integer step count corresponding to
    /// elapsing `t > 0` real time units.
    ///
    /// Relies on representative valuations advancing in uniform increments
    /// of `1/(2m)` per unit step while `m` is unchanged (true of any run of
    /// `delay_steps` uninterrupted by a `reset`): the number of boundaries
    /// crossed by a real delay of `t` is `round(t * 2m)`.
    pub fn delay_real(&mut self, t: f64) {
        assert!(t > 0.0, "delay_real requires a strictly positive duration");
        let m = self.num_fractional_classes as f64;
        let k = (t * 2.0 * m).round().max(1.0) as u64;
        self.delay_steps(k);
    }

    /// Reset `clock` to exactly 0.
    pub fn reset(&mut self, clock: Clock) {
        let c = clock.index();
        assert!(c < self.n_clocks(), "clock index out of range for this region");

        if self.all_integer && self.fractional_rank[c] == 0 {
            self.integer_part[c] = 0;
            self.check_invariants();
            return;
        }

        let rank_c = self.fractional_rank[c];
        let same = (0..self.n_clocks()).any(|i| i != c && self.fractional_rank[i] == rank_c);
        let was_all_integer = self.all_integer;

        let new_m =
            self.num_fractional_classes + i64::from(same) - i64::from(was_all_integer);
        self.num_fractional_classes = new_m;

        for i in 0..self.n_clocks() {
            if i == c {
                continue;
            }
            if !same && self.fractional_rank[i] > rank_c {
                self.fractional_rank[i] = (self.fractional_rank[i] - 1).rem_euclid(new_m);
            }
            if !was_all_integer {
                self.fractional_rank[i] = (self.fractional_rank[i] + 1).rem_euclid(new_m);
            }
        }

        self.fractional_rank[c] = 0;
        self.integer_part[c] = 0;
        self.all_integer = true;

        self.check_invariants();
    }

    /// Debug-only enforcement of the Region's internal consistency
    /// invariants. A violation here is a bug in this module, not a bad
    /// scheduler decision.
    fn check_invariants(&self) {
        debug_assert!(self.num_fractional_classes >= 1, "R1: m must be >= 1");
        debug_assert!(
            self.fractional_rank.iter().all(|&r| r >= 0 && r < self.num_fractional_classes),
            "R2: fractional ranks must lie in 0..m"
        );
        debug_assert!(
            self.fractional_rank.iter().any(|&r| r == 0),
            "R3: some clock must occupy rank 0"
        );
    }
}
