//! ## Center-Point Selection Strategies
//!
//! When a leaf sphere of the metric tree overflows, two of its keys are
//! promoted to become the centers of the replacement leaves. This module
//! defines the selection strategies for that choice. Selectors own their
//! random generator; a seed can be supplied for reproducible splits.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::errors::MetrumError;
use crate::geometry::DistanceMetric;

/// Chooses two distinct center keys from an overflowing leaf.
///
/// `keys` always holds at least two entries when a selector is invoked (leaf
/// capacity is validated to be at least 4).
pub trait CenterSelector {
    /// Returns two distinct indices into `keys` identifying the new centers.
    fn choose_two<K, M: DistanceMetric<K>>(
        &mut self,
        keys: &[K],
    ) -> Result<(usize, usize), MetrumError>;
}

/// Selects a single uniformly random pair of distinct keys.
///
/// Cheap but can produce poorly separated children, which in turn produces
/// overlapping sibling spheres and slower searches.
#[derive(Debug, Clone)]
pub struct SingleRandomSample {
    rng: SmallRng,
}

impl SingleRandomSample {
    pub fn new(seed: u64) -> Self {
        SingleRandomSample {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for SingleRandomSample {
    fn default() -> Self {
        SingleRandomSample {
            rng: SmallRng::from_entropy(),
        }
    }
}

impl CenterSelector for SingleRandomSample {
    fn choose_two<K, M: DistanceMetric<K>>(
        &mut self,
        keys: &[K],
    ) -> Result<(usize, usize), MetrumError> {
        Ok(random_distinct_pair(&mut self.rng, keys.len()))
    }
}

/// Draws `⌊√N⌋` random pairs of distinct keys and keeps the pair with the
/// greatest distance between its members.
///
/// This is the default strategy: better-separated centers produce children
/// with less overlap, so searches prune more aggressively.
#[derive(Debug, Clone)]
pub struct MaxOfRandomSamples {
    rng: SmallRng,
}

impl MaxOfRandomSamples {
    pub fn new(seed: u64) -> Self {
        MaxOfRandomSamples {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for MaxOfRandomSamples {
    fn default() -> Self {
        MaxOfRandomSamples {
            rng: SmallRng::from_entropy(),
        }
    }
}

impl CenterSelector for MaxOfRandomSamples {
    fn choose_two<K, M: DistanceMetric<K>>(
        &mut self,
        keys: &[K],
    ) -> Result<(usize, usize), MetrumError> {
        let samples = (keys.len() as f64).sqrt().floor().max(1.0) as usize;
        let mut best = random_distinct_pair(&mut self.rng, keys.len());
        let mut best_distance = checked_distance::<K, M>(&keys[best.0], &keys[best.1])?;
        for _ in 1..samples {
            let candidate = random_distinct_pair(&mut self.rng, keys.len());
            let d = checked_distance::<K, M>(&keys[candidate.0], &keys[candidate.1])?;
            if d > best_distance {
                best = candidate;
                best_distance = d;
            }
        }
        Ok(best)
    }
}

fn random_distinct_pair(rng: &mut SmallRng, n: usize) -> (usize, usize) {
    let first = rng.gen_range(0..n);
    let mut second = rng.gen_range(0..n - 1);
    if second >= first {
        second += 1;
    }
    (first, second)
}

fn checked_distance<K, M: DistanceMetric<K>>(a: &K, b: &K) -> Result<f64, MetrumError> {
    let d = M::distance(a, b);
    if d.is_nan() || d < 0.0 {
        return Err(MetrumError::InvalidDistance { value: d });
    }
    Ok(d)
}
