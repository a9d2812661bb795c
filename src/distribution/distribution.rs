use std::collections::HashMap;
use std::collections::HashSet;
use std::hash::Hash;

use rand::distributions::{Distribution as _, WeightedIndex};
use rand::Rng;

/// A finite, discrete probability distribution over outcomes of type `T`.
///
/// Plays the role of the external "black box" sampler a [`crate::pta::Pta`]
/// transition hands off to: the PTA only ever needs `sample`, `probability`
/// and `support` from its distributions, never their internal representation.
#[derive(Debug, Clone)]
pub struct DiscreteDistribution<T> {
    weights: HashMap<T, f64>,
}

impl<T> DiscreteDistribution<T>
where
    T: Eq + Hash + Clone,
{
    /// Build a distribution from explicit (outcome, probability) weights.
    ///
    /// Weights need not already sum to 1; they are normalized relative to
    /// each other by `sample`, matching the behaviour of `random.choices`
    /// this type is grounded on.
    pub fn new(weights: HashMap<T, f64>) -> Self {
        assert!(
            weights.values().all(|w| *w >= 0.0),
            "distribution weights must be nonnegative"
        );
        assert!(!weights.is_empty(), "distribution must have nonempty support");
        assert!(
            weights.values().any(|w| *w > 0.0),
            "distribution must have at least one positive weight"
        );
        Self { weights }
    }

    /// The Kronecker delta distribution: probability 1 on `center`, 0 elsewhere.
    pub fn delta(center: T) -> Self {
        let mut weights = HashMap::new();
        weights.insert(center, 1.0);
        Self { weights }
    }

    /// The uniform distribution over a finite support.
    pub fn uniform(support: impl IntoIterator<Item = T>) -> Self {
        let items: Vec<T> = support.into_iter().collect();
        assert!(!items.is_empty(), "uniform distribution needs nonempty support");
        let p = 1.0 / items.len() as f64;
        let weights = items.into_iter().map(|t| (t, p)).collect();
        Self { weights }
    }

    /// The set of outcomes with nonzero probability.
    pub fn support(&self) -> impl Iterator<Item = &T> {
        self.weights.keys()
    }

    /// The probability assigned to `outcome`, or 0 if it is not in the support.
    pub fn probability(&self, outcome: &T) -> f64 {
        let total: f64 = self.weights.values().sum();
        self.weights.get(outcome).copied().unwrap_or(0.0) / total
    }

    /// Draw one outcome from the distribution using `rng`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        let items: Vec<(&T, f64)> = self.weights.iter().map(|(t, w)| (t, *w)).collect();
        let dist = WeightedIndex::new(items.iter().map(|(_, w)| *w))
            .expect("distribution must have at least one positive weight, enforced at construction");
        let idx = dist.sample(rng);
        items[idx].0
    }

    /// Draw `k` outcomes from the distribution using `rng`, each draw
    /// independent of the others (sampling with replacement).
    pub fn sample_many<R: Rng + ?Sized>(&self, rng: &mut R, k: usize) -> Vec<&T> {
        let items: Vec<(&T, f64)> = self.weights.iter().map(|(t, w)| (t, *w)).collect();
        let dist = WeightedIndex::new(items.iter().map(|(_, w)| *w))
            .expect("distribution must have at least one positive weight, enforced at construction");
        (0..k).map(|_| items[dist.sample(rng)].0).collect()
    }

    /// Whether every outcome in this distribution's support is a member of
    /// `allowed`. Used to check a transition's targets only ever name clocks
    /// or locations the surrounding automaton actually declares.
    pub fn validate_support(&self, allowed: &HashSet<T>) -> bool {
        self.support().all(|t| allowed.contains(t))
    }
}
